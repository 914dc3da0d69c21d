use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Upload request DTO for OpenAPI documentation.
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadPhotoDto {
    /// The image or video to upload
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
    /// Display name of the uploading guest
    #[schema(example = "김민수")]
    pub uploader_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoResponseDto {
    pub success: bool,
    /// Public retrieval URL of the stored object
    pub url: String,
    /// Original filename as uploaded
    pub file_name: String,
    /// Size of the file in bytes
    pub file_size: u64,
}

/// One gallery entry
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PhotoDto {
    /// Storage key, including the folder prefix
    pub id: String,
    pub file_name: String,
    /// MIME type derived from the file extension
    pub file_type: String,
    pub url: String,
    pub file_size: u64,
    pub last_modified: DateTime<Utc>,
}

/// Maximum upload size in bytes (50MB — short ceremony videos included)
pub const MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

/// Guests may upload images and videos, nothing else
pub fn is_media_content_type(content_type: &str) -> bool {
    content_type.starts_with("image/") || content_type.starts_with("video/")
}

/// Extension of an uploaded filename, "bin" when it has none
pub fn file_extension(file_name: &str) -> &str {
    file_name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("bin")
}

/// MIME type for a listed object, from the fixed extension table
pub fn content_type_from_extension(file_name: &str) -> String {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg".to_string(),
        "png" | "gif" | "webp" => format!("image/{}", extension),
        "mp4" | "mov" | "avi" | "webm" => format!("video/{}", extension),
        _ => "application/octet-stream".to_string(),
    }
}

/// Human-readable size recorded in the metadata sheet, e.g. "3.42MB"
pub fn human_readable_size(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / 1024.0 / 1024.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_media_content_type() {
        assert!(is_media_content_type("image/jpeg"));
        assert!(is_media_content_type("image/heic"));
        assert!(is_media_content_type("video/mp4"));
        assert!(!is_media_content_type("application/pdf"));
        assert!(!is_media_content_type("text/plain"));
        assert!(!is_media_content_type(""));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.JPG"), "JPG");
        assert_eq!(file_extension("clip.final.mp4"), "mp4");
        assert_eq!(file_extension("noext"), "bin");
    }

    #[test]
    fn test_content_type_from_extension_table() {
        assert_eq!(content_type_from_extension("a.jpg"), "image/jpeg");
        assert_eq!(content_type_from_extension("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_from_extension("a.png"), "image/png");
        assert_eq!(content_type_from_extension("a.gif"), "image/gif");
        assert_eq!(content_type_from_extension("a.webp"), "image/webp");
        assert_eq!(content_type_from_extension("a.mp4"), "video/mp4");
        assert_eq!(content_type_from_extension("a.MOV"), "video/mov");
        assert_eq!(content_type_from_extension("a.avi"), "video/avi");
        assert_eq!(content_type_from_extension("a.webm"), "video/webm");
        assert_eq!(
            content_type_from_extension("a.pdf"),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_from_extension("noext"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_readable_size(0), "0.00MB");
        assert_eq!(human_readable_size(1024 * 1024), "1.00MB");
        assert_eq!(human_readable_size(3 * 1024 * 1024 + 512 * 1024), "3.50MB");
    }
}
