use utoipa::{Modify, OpenApi};

use crate::features::attendance::{dtos as attendance_dtos, handlers as attendance_handlers};
use crate::features::layouts::{dtos as layouts_dtos, handlers as layouts_handlers};
use crate::features::photos::{dtos as photos_dtos, handlers as photos_handlers};
use crate::features::venue::{dtos as venue_dtos, handlers as venue_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Attendance
        attendance_handlers::generate_device_id,
        attendance_handlers::check_duplicate,
        attendance_handlers::submit_attendance,
        attendance_handlers::get_attendance,
        attendance_handlers::get_attendance_summary,
        // Photos
        photos_handlers::upload_photo,
        photos_handlers::get_photos,
        // Layouts
        layouts_handlers::list_layouts,
        // Venue
        venue_handlers::get_venue,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            // Attendance
            attendance_dtos::DeviceSignalsDto,
            attendance_dtos::DeviceIdResponseDto,
            attendance_dtos::CheckDuplicateDto,
            attendance_dtos::CheckDuplicateResponseDto,
            attendance_dtos::ExistingSubmissionDto,
            attendance_dtos::SubmitAttendanceDto,
            attendance_dtos::SubmitAttendanceResponseDto,
            attendance_dtos::AttendanceEntryDto,
            attendance_dtos::AttendanceListResponseDto,
            attendance_dtos::AttendanceSummaryDto,
            // Photos
            photos_dtos::UploadPhotoDto,
            photos_dtos::UploadPhotoResponseDto,
            photos_dtos::PhotoDto,
            // Layouts
            layouts_dtos::LayoutDto,
            // Venue
            venue_dtos::VenueResponseDto,
            venue_dtos::MapConfigDto,
            venue_dtos::DirectionLinkDto,
        )
    ),
    tags(
        (name = "attendance", description = "RSVP submission, duplicate check and admin read path"),
        (name = "photos", description = "Guest photo upload and gallery listing"),
        (name = "layouts", description = "Invitation theme catalogue"),
        (name = "venue", description = "Venue and map configuration"),
    ),
    info(
        title = "Dearday API",
        version = "0.1.0",
        description = "API documentation for the Dearday wedding invitation",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
