use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::attendance::models::AttendanceRecord;
use crate::shared::fingerprint::{BrowserSignals, GraphicsInfo};

/// Request body for the advisory duplicate check.
/// Every field is optional free text; the check never blocks a guest.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckDuplicateDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    /// Client fingerprint; empty when generation failed or was skipped
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckDuplicateResponseDto {
    pub is_duplicate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_data: Option<ExistingSubmissionDto>,
    pub message: String,
}

/// What was previously recorded, shown in the "already submitted" modal
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExistingSubmissionDto {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub will_attend: bool,
}

/// RSVP submission from the invitation page
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceDto {
    /// Client-side submission time; the server stamps KST when absent
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100, message = "이름은 100자 이내로 입력해주세요."))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "연락처는 30자 이내로 입력해주세요."))]
    pub phone: String,
    pub will_attend: bool,
    /// Defaults to 1 when attending, 0 otherwise
    #[serde(default)]
    pub attend_count: Option<u32>,
    #[serde(default)]
    pub user_agent: String,
    #[serde(default)]
    pub device_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitAttendanceResponseDto {
    pub success: bool,
}

/// One attendance row as shown on the admin dashboard.
/// The raw user agent stays server-side.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntryDto {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub will_attend: bool,
    pub attend_count: u32,
    pub device_id: String,
}

impl From<&AttendanceRecord> for AttendanceEntryDto {
    fn from(record: &AttendanceRecord) -> Self {
        Self {
            timestamp: record.timestamp.clone(),
            name: record.name.clone(),
            phone: record.phone.clone(),
            will_attend: record.will_attend,
            attend_count: record.attend_count,
            device_id: record.device_id.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceListResponseDto {
    pub success: bool,
    pub attendance: Vec<AttendanceEntryDto>,
    pub total: usize,
}

/// Dashboard aggregation, recomputed on every poll
#[derive(Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummaryDto {
    pub total_attendees: usize,
    pub total_declined: usize,
    /// Sum of attend_count across attendees
    pub total_people: u32,
}

/// Raw browser signals collected by the invitation page. Every field is
/// optional — locked-down browsers send what they can and the generator
/// substitutes sentinels for the rest.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSignalsDto {
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub screen_width: Option<u32>,
    #[serde(default)]
    pub screen_height: Option<u32>,
    /// Timezone offset in minutes
    #[serde(default)]
    pub timezone_offset: Option<i32>,
    /// Data URL of the fixed-text canvas rendering
    #[serde(default)]
    pub canvas_fingerprint: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub hardware_concurrency: Option<u32>,
    /// Device memory in GB, when the browser exposes it
    #[serde(default)]
    pub device_memory: Option<u32>,
    #[serde(default)]
    pub color_depth: Option<u32>,
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
    #[serde(default)]
    pub avail_width: Option<u32>,
    #[serde(default)]
    pub avail_height: Option<u32>,
    #[serde(default)]
    pub plugin_count: Option<u32>,
    #[serde(default)]
    pub touch_support: Option<bool>,
    #[serde(default)]
    pub webgl_vendor: Option<String>,
    #[serde(default)]
    pub webgl_renderer: Option<String>,
    /// True when reading the graphics debug extension threw
    #[serde(default)]
    pub webgl_error: bool,
    /// Per-tab session-start value from sessionStorage
    #[serde(default)]
    pub session_start: Option<String>,
}

impl From<DeviceSignalsDto> for BrowserSignals {
    fn from(dto: DeviceSignalsDto) -> Self {
        let graphics = if dto.webgl_error {
            GraphicsInfo::Errored
        } else if dto.webgl_vendor.is_none() && dto.webgl_renderer.is_none() {
            GraphicsInfo::Unavailable
        } else {
            GraphicsInfo::Info {
                vendor: dto.webgl_vendor,
                renderer: dto.webgl_renderer,
            }
        };

        BrowserSignals {
            user_agent: dto.user_agent,
            language: dto.language,
            screen: dto.screen_width.zip(dto.screen_height),
            timezone_offset_minutes: dto.timezone_offset,
            canvas_data_url: dto.canvas_fingerprint,
            platform: dto.platform,
            hardware_concurrency: dto.hardware_concurrency,
            device_memory_gb: dto.device_memory,
            color_depth: dto.color_depth,
            device_pixel_ratio: dto.device_pixel_ratio,
            available_screen: dto.avail_width.zip(dto.avail_height),
            plugin_count: dto.plugin_count,
            touch_support: dto.touch_support,
            graphics,
            session_start: dto.session_start,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceIdResponseDto {
    /// Short base-36 identifier; heuristic, not a security boundary
    pub device_id: String,
}
