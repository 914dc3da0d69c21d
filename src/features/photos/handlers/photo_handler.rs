use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::features::photos::dtos::{
    is_media_content_type, PhotoDto, UploadPhotoDto, UploadPhotoResponseDto, MAX_UPLOAD_SIZE,
};
use crate::features::photos::services::PhotoService;
use crate::shared::types::ErrorResponse;

/// Upload a guest photo or video
///
/// Accepts multipart/form-data with:
/// - `file`: The media file to upload (required)
/// - `uploaderName`: Display name of the uploading guest (optional)
#[utoipa::path(
    post,
    path = "/api/photos/upload",
    tag = "photos",
    request_body(
        content = UploadPhotoDto,
        content_type = "multipart/form-data",
        description = "Media upload form with optional uploader name",
    ),
    responses(
        (status = 200, description = "Photo stored", body = UploadPhotoResponseDto),
        (status = 400, description = "Missing file or unsupported type", body = ErrorResponse),
        (status = 500, description = "Storage write failed", body = ErrorResponse)
    )
)]
pub async fn upload_photo(
    State(service): State<Arc<PhotoService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadPhotoResponseDto>, AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut uploader_name: Option<String> = None;

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "uploaderName" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read uploaderName field: {}", e))
                })?;
                if !text.is_empty() {
                    uploader_name = Some(text);
                }
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    // No file, no upload — nothing has been written yet
    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("파일이 없습니다.".to_string()))?;
    let file_name = file_name.unwrap_or_else(|| "unnamed".to_string());
    let content_type =
        content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    if file_data.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::BadRequest(format!(
            "파일이 너무 큽니다. 최대 {}MB까지 업로드할 수 있습니다.",
            MAX_UPLOAD_SIZE / 1024 / 1024
        )));
    }

    if !is_media_content_type(&content_type) {
        return Err(AppError::BadRequest(
            "이미지 또는 영상 파일만 업로드 가능합니다.".to_string(),
        ));
    }

    let response = service
        .upload(file_data, &file_name, &content_type, uploader_name)
        .await?;

    Ok(Json(response))
}

/// List uploaded photos for the gallery (newest first)
#[utoipa::path(
    get,
    path = "/api/photos",
    tag = "photos",
    responses(
        (status = 200, description = "Gallery entries", body = Vec<PhotoDto>),
        (status = 500, description = "Listing failed", body = ErrorResponse)
    )
)]
pub async fn get_photos(
    State(service): State<Arc<PhotoService>>,
) -> Result<Json<Vec<PhotoDto>>, AppError> {
    Ok(Json(service.list().await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GoogleSheetsConfig, StorageConfig};
    use crate::features::photos::routes;
    use crate::modules::sheets::SheetsClient;
    use crate::modules::storage::StorageClient;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;

    // Rejection happens before any storage or sheet call, so these tests
    // run without the external services.
    fn test_server() -> TestServer {
        let sheets = Arc::new(SheetsClient::new(GoogleSheetsConfig {
            sheet_id: "test-sheet".to_string(),
            service_account_email: "svc@test.iam.gserviceaccount.com".to_string(),
            private_key: "not-a-key".to_string(),
        }));
        let storage = Arc::new(
            StorageClient::new(StorageConfig {
                region: "ap-northeast-2".to_string(),
                access_key: "test".to_string(),
                secret_key: "test".to_string(),
                bucket: "wedding-photos".to_string(),
                endpoint: Some("http://localhost:9000".to_string()),
                cdn_domain: None,
                folder_prefix: "attendance".to_string(),
            })
            .unwrap(),
        );
        let service = Arc::new(PhotoService::new(storage, sheets));
        TestServer::new(routes::routes(service)).unwrap()
    }

    #[tokio::test]
    async fn test_upload_rejects_missing_file() {
        let server = test_server();
        let form = MultipartForm::new().add_text("uploaderName", "김민수");
        let response = server.post("/api/photos/upload").multipart(form).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_upload_rejects_non_media_type() {
        let server = test_server();
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(b"%PDF-1.4".to_vec())
                .file_name("doc.pdf")
                .mime_type("application/pdf"),
        );
        let response = server.post("/api/photos/upload").multipart(form).await;
        response.assert_status_bad_request();
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], serde_json::json!(false));
    }
}
