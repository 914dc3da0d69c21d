use chrono::{FixedOffset, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::error::Result;
use crate::features::attendance::dtos::{
    AttendanceEntryDto, AttendanceListResponseDto, AttendanceSummaryDto, CheckDuplicateDto,
    CheckDuplicateResponseDto, ExistingSubmissionDto, SubmitAttendanceDto,
    SubmitAttendanceResponseDto,
};
use crate::features::attendance::models::AttendanceRecord;
use crate::features::attendance::services::duplicate_rules::{find_duplicate, DuplicateCandidate};
use crate::modules::sheets::SheetsClient;
use crate::shared::constants::{
    ANONYMOUS_NAME, ATTENDANCE_RANGE, ATTENDING, NOT_ATTENDING, PHONE_NOT_PROVIDED,
};
use crate::shared::validation::is_blank;

/// Service for the RSVP workflow: advisory duplicate check, row append,
/// and the admin read path. Stateless; every call authenticates fresh.
pub struct AttendanceService {
    sheets: Arc<SheetsClient>,
}

impl AttendanceService {
    pub fn new(sheets: Arc<SheetsClient>) -> Self {
        Self { sheets }
    }

    /// Submission timestamp in KST, "YYYY-MM-DD HH:mm:ss"
    fn submission_timestamp() -> String {
        let kst = FixedOffset::east_opt(9 * 3600).expect("KST offset is valid");
        Utc::now()
            .with_timezone(&kst)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }

    /// Fetch and parse every stored attendance row. The worksheet title is
    /// rediscovered per call — the sheet may be renamed at any time.
    async fn fetch_records(&self) -> Result<Vec<AttendanceRecord>> {
        let title = self.sheets.first_sheet_title().await?;
        let rows = self.sheets.get_values(&title, ATTENDANCE_RANGE).await?;
        Ok(rows
            .iter()
            .map(|row| AttendanceRecord::from_row(row))
            .collect())
    }

    /// Advisory duplicate check. Fail-open: a fetch failure is downgraded to
    /// "not a duplicate" so an infrastructure hiccup never blocks an RSVP.
    pub async fn check_duplicate(&self, dto: CheckDuplicateDto) -> CheckDuplicateResponseDto {
        let candidate = DuplicateCandidate::new(dto.name, dto.phone, dto.device_id);

        if candidate.is_anonymous() {
            return CheckDuplicateResponseDto {
                is_duplicate: false,
                existing_data: None,
                message: "익명 참석으로 등록됩니다.".to_string(),
            };
        }

        let records = match self.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                warn!("Duplicate check skipped, assuming new submission: {}", e);
                return CheckDuplicateResponseDto {
                    is_duplicate: false,
                    existing_data: None,
                    message: "새로운 참석자입니다.".to_string(),
                };
            }
        };

        match find_duplicate(&candidate, &records) {
            Some(existing) => CheckDuplicateResponseDto {
                is_duplicate: true,
                existing_data: Some(ExistingSubmissionDto {
                    timestamp: existing.timestamp.clone(),
                    name: if existing.name.is_empty() {
                        ANONYMOUS_NAME.to_string()
                    } else {
                        existing.name.clone()
                    },
                    phone: if existing.phone.is_empty() {
                        PHONE_NOT_PROVIDED.to_string()
                    } else {
                        existing.phone.clone()
                    },
                    will_attend: existing.will_attend,
                }),
                message: "이미 등록된 참석자입니다.".to_string(),
            },
            None => CheckDuplicateResponseDto {
                is_duplicate: false,
                existing_data: None,
                message: "새로운 참석자입니다.".to_string(),
            },
        }
    }

    /// Append one attendance row. Discovery or append failure is a hard
    /// error surfaced to the caller — no silent retry, no partial success.
    pub async fn record(&self, dto: SubmitAttendanceDto) -> Result<SubmitAttendanceResponseDto> {
        let title = self.sheets.first_sheet_title().await?;

        let timestamp = dto
            .timestamp
            .filter(|t| !is_blank(t))
            .unwrap_or_else(Self::submission_timestamp);
        let name = if is_blank(&dto.name) {
            ANONYMOUS_NAME.to_string()
        } else {
            dto.name
        };
        let attend_count = resolve_attend_count(dto.will_attend, dto.attend_count);

        let row = submission_row(
            &timestamp,
            &name,
            &dto.phone,
            dto.will_attend,
            attend_count,
            &dto.user_agent,
            &dto.device_id,
        );
        self.sheets.append_row(&title, row).await?;

        info!(
            "Attendance recorded: attending={}, count={}",
            dto.will_attend, attend_count
        );
        Ok(SubmitAttendanceResponseDto { success: true })
    }

    /// Full list for the admin dashboard
    pub async fn list(&self) -> Result<AttendanceListResponseDto> {
        let records = self.fetch_records().await?;
        let attendance: Vec<AttendanceEntryDto> =
            records.iter().map(AttendanceEntryDto::from).collect();
        let total = attendance.len();
        Ok(AttendanceListResponseDto {
            success: true,
            attendance,
            total,
        })
    }

    pub async fn summary(&self) -> Result<AttendanceSummaryDto> {
        Ok(summarize(&self.fetch_records().await?))
    }
}

/// Explicit count wins; otherwise 1 attending / 0 not (the invitation UI
/// does not collect a party size).
fn resolve_attend_count(will_attend: bool, explicit: Option<u32>) -> u32 {
    explicit.unwrap_or(u32::from(will_attend))
}

/// The 7 ordered cells of one attendance row (columns A..G)
fn submission_row(
    timestamp: &str,
    name: &str,
    phone: &str,
    will_attend: bool,
    attend_count: u32,
    user_agent: &str,
    device_id: &str,
) -> Vec<serde_json::Value> {
    vec![
        json!(timestamp),
        json!(name),
        json!(phone),
        json!(if will_attend { ATTENDING } else { NOT_ATTENDING }),
        json!(attend_count),
        json!(user_agent),
        json!(device_id),
    ]
}

/// Dashboard aggregation: attendee count, decliner count, and the summed
/// headcount of attendees. Pure; recomputed on every read.
pub fn summarize(records: &[AttendanceRecord]) -> AttendanceSummaryDto {
    let total_attendees = records.iter().filter(|r| r.will_attend).count();
    let total_people = records
        .iter()
        .filter(|r| r.will_attend)
        .map(|r| r.attend_count)
        .sum();
    AttendanceSummaryDto {
        total_attendees,
        total_declined: records.len() - total_attendees,
        total_people,
    }
}
