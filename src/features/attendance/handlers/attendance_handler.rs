use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::attendance::dtos::{
    AttendanceListResponseDto, AttendanceSummaryDto, CheckDuplicateDto, CheckDuplicateResponseDto,
    DeviceIdResponseDto, DeviceSignalsDto, SubmitAttendanceDto, SubmitAttendanceResponseDto,
};
use crate::features::attendance::services::AttendanceService;
use crate::shared::fingerprint::{self, BrowserSignals};
use crate::shared::types::ErrorResponse;

/// Derive the device identifier from collected browser signals
///
/// Deterministic: the same signals always produce the same id, and absent
/// signals take fixed sentinels, so the call cannot fail.
#[utoipa::path(
    post,
    path = "/api/attendance/device-id",
    tag = "attendance",
    request_body = DeviceSignalsDto,
    responses(
        (status = 200, description = "Identifier generated", body = DeviceIdResponseDto)
    )
)]
pub async fn generate_device_id(Json(dto): Json<DeviceSignalsDto>) -> Json<DeviceIdResponseDto> {
    let signals = BrowserSignals::from(dto);
    Json(DeviceIdResponseDto {
        device_id: fingerprint::generate(signals.into_probes()),
    })
}

/// Advisory duplicate check before submitting an RSVP
///
/// Never blocks: anonymous candidates skip matching, and fetch failures are
/// downgraded to "not a duplicate".
#[utoipa::path(
    post,
    path = "/api/attendance/check-duplicate",
    tag = "attendance",
    request_body = CheckDuplicateDto,
    responses(
        (status = 200, description = "Check performed (always answers)", body = CheckDuplicateResponseDto)
    )
)]
pub async fn check_duplicate(
    State(service): State<Arc<AttendanceService>>,
    Json(dto): Json<CheckDuplicateDto>,
) -> Json<CheckDuplicateResponseDto> {
    Json(service.check_duplicate(dto).await)
}

/// Record an RSVP
///
/// Appends one row to the attendance worksheet. Failures surface as a
/// generic server error; the guest can retry immediately.
#[utoipa::path(
    post,
    path = "/api/attendance",
    tag = "attendance",
    request_body = SubmitAttendanceDto,
    responses(
        (status = 200, description = "Attendance recorded", body = SubmitAttendanceResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Sheet append failed", body = ErrorResponse)
    )
)]
pub async fn submit_attendance(
    State(service): State<Arc<AttendanceService>>,
    Json(dto): Json<SubmitAttendanceDto>,
) -> Result<Json<SubmitAttendanceResponseDto>, AppError> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let response = service.record(dto).await?;
    Ok(Json(response))
}

/// List every attendance record (admin dashboard)
#[utoipa::path(
    get,
    path = "/api/attendance",
    tag = "attendance",
    responses(
        (status = 200, description = "All records with total count", body = AttendanceListResponseDto),
        (status = 500, description = "Sheet read failed", body = ErrorResponse)
    )
)]
pub async fn get_attendance(
    State(service): State<Arc<AttendanceService>>,
) -> Result<Json<AttendanceListResponseDto>, AppError> {
    Ok(Json(service.list().await?))
}

/// Attendance summary (admin dashboard)
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    tag = "attendance",
    responses(
        (status = 200, description = "Attendee/decliner counts and headcount", body = AttendanceSummaryDto),
        (status = 500, description = "Sheet read failed", body = ErrorResponse)
    )
)]
pub async fn get_attendance_summary(
    State(service): State<Arc<AttendanceService>>,
) -> Result<Json<AttendanceSummaryDto>, AppError> {
    Ok(Json(service.summary().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GoogleSheetsConfig;
    use crate::features::attendance::routes;
    use crate::modules::sheets::SheetsClient;
    use axum_test::TestServer;
    use serde_json::json;

    // The configured private key is not valid PEM, so any sheet access fails
    // locally at assertion signing — which is exactly what the fail-open
    // paths need to demonstrate.
    fn test_server() -> TestServer {
        let sheets = Arc::new(SheetsClient::new(GoogleSheetsConfig {
            sheet_id: "test-sheet".to_string(),
            service_account_email: "svc@test.iam.gserviceaccount.com".to_string(),
            private_key: "not-a-key".to_string(),
        }));
        let service = Arc::new(AttendanceService::new(sheets));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_device_id_generation_is_deterministic() {
        let server = test_server();
        let signals = json!({
            "userAgent": "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)",
            "language": "ko-KR",
            "screenWidth": 390,
            "screenHeight": 844,
            "timezoneOffset": -540,
            "touchSupport": true
        });
        let first: serde_json::Value = server
            .post("/api/attendance/device-id")
            .json(&signals)
            .await
            .json();
        let second: serde_json::Value = server
            .post("/api/attendance/device-id")
            .json(&signals)
            .await
            .json();
        assert_eq!(first["deviceId"], second["deviceId"]);
        assert!(!first["deviceId"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_device_id_generation_accepts_empty_signals() {
        // Generation never fails, even with nothing collected
        let server = test_server();
        let response = server
            .post("/api/attendance/device-id")
            .json(&json!({}))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(!body["deviceId"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_duplicate_anonymous_short_circuit() {
        let server = test_server();
        let response = server
            .post("/api/attendance/check-duplicate")
            .json(&json!({ "name": "", "phone": "", "deviceId": "abc123" }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["isDuplicate"], json!(false));
        assert_eq!(body["message"], json!("익명 참석으로 등록됩니다."));
    }

    #[tokio::test]
    async fn test_check_duplicate_fails_open_on_fetch_error() {
        let server = test_server();
        let response = server
            .post("/api/attendance/check-duplicate")
            .json(&json!({ "name": "김민수", "phone": "010-1234-5678", "deviceId": "abc123" }))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["isDuplicate"], json!(false));
    }

    #[tokio::test]
    async fn test_submit_surfaces_hard_failure() {
        let server = test_server();
        let response = server
            .post("/api/attendance")
            .json(&json!({ "name": "김민수", "willAttend": true }))
            .await;
        response.assert_status(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_submit_rejects_overlong_name() {
        let server = test_server();
        let response = server
            .post("/api/attendance")
            .json(&json!({ "name": "가".repeat(101), "willAttend": true }))
            .await;
        response.assert_status_bad_request();
    }
}
