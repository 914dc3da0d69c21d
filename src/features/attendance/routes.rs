use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::attendance::handlers::{
    check_duplicate, generate_device_id, get_attendance, get_attendance_summary,
    submit_attendance,
};
use crate::features::attendance::services::AttendanceService;

/// Create routes for the attendance feature
pub fn routes(attendance_service: Arc<AttendanceService>) -> Router {
    Router::new()
        .route("/api/attendance/device-id", post(generate_device_id))
        .route(
            "/api/attendance/check-duplicate",
            post(check_duplicate),
        )
        .route(
            "/api/attendance",
            post(submit_attendance).get(get_attendance),
        )
        .route("/api/attendance/summary", get(get_attendance_summary))
        .with_state(attendance_service)
}
