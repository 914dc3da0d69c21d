use chrono::{FixedOffset, SecondsFormat, Utc};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::photos::dtos::{
    content_type_from_extension, file_extension, human_readable_size, PhotoDto,
    UploadPhotoResponseDto,
};
use crate::modules::sheets::SheetsClient;
use crate::modules::storage::{StorageClient, StoredObject};
use crate::shared::constants::{ANONYMOUS_NAME, PHOTO_LIST_MAX_KEYS, PHOTO_SHEET_TITLE};
use crate::shared::validation::is_blank;

/// Service for the guest photo pipeline: validated upload into object
/// storage plus the gallery listing. The object store is the source of
/// truth; the metadata sheet is best-effort.
pub struct PhotoService {
    storage: Arc<StorageClient>,
    sheets: Arc<SheetsClient>,
}

impl PhotoService {
    pub fn new(storage: Arc<StorageClient>, sheets: Arc<SheetsClient>) -> Self {
        Self { storage, sheets }
    }

    /// Store an already-validated media file and record its metadata.
    ///
    /// The metadata append is deliberately not propagated: once the object
    /// write succeeded the upload is a success, and a missing metadata row
    /// is only logged.
    pub async fn upload(
        &self,
        data: Vec<u8>,
        original_filename: &str,
        content_type: &str,
        uploader_name: Option<String>,
    ) -> Result<UploadPhotoResponseDto> {
        let file_size = data.len() as u64;

        let key = self.storage.object_key(&generate_file_name(original_filename));
        self.storage.upload(&key, data, content_type).await?;
        let url = self.storage.public_url(&key);

        debug!("Photo stored: key={}, size={}", key, file_size);

        if let Err(e) = self
            .append_metadata(
                uploader_name.as_deref(),
                original_filename,
                content_type,
                &url,
                file_size,
            )
            .await
        {
            // Object write already succeeded; the gallery reads from storage
            warn!("Photo metadata append failed, continuing: {}", e);
        }

        info!("Photo uploaded: {} ({})", key, human_readable_size(file_size));

        Ok(UploadPhotoResponseDto {
            success: true,
            url,
            file_name: original_filename.to_string(),
            file_size,
        })
    }

    /// Append one metadata row to the photo worksheet when it exists,
    /// else to the first worksheet.
    async fn append_metadata(
        &self,
        uploader_name: Option<&str>,
        original_filename: &str,
        content_type: &str,
        url: &str,
        file_size: u64,
    ) -> Result<()> {
        let titles = self.sheets.sheet_titles().await?;
        let target = titles
            .iter()
            .find(|title| title.as_str() == PHOTO_SHEET_TITLE)
            .or_else(|| titles.first())
            .ok_or_else(|| AppError::Sheets("Spreadsheet has no worksheets".to_string()))?;

        let uploader = uploader_name
            .filter(|name| !is_blank(name))
            .unwrap_or(ANONYMOUS_NAME);

        let row = vec![
            json!(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            json!(uploader),
            json!(original_filename),
            json!(content_type),
            json!(url),
            json!(human_readable_size(file_size)),
        ];
        self.sheets.append_row(target, row).await
    }

    /// Gallery listing: one bounded fetch, newest first
    pub async fn list(&self) -> Result<Vec<PhotoDto>> {
        let objects = self.storage.list(PHOTO_LIST_MAX_KEYS).await?;
        let prefix = format!("{}/", self.storage.folder_prefix());
        Ok(build_listing(objects, &prefix, |key| {
            self.storage.public_url(key)
        }))
    }
}

/// Generated object file name: KST timestamp plus a short random suffix,
/// preserving the original extension
fn generate_file_name(original_filename: &str) -> String {
    let kst = FixedOffset::east_opt(9 * 3600).expect("KST offset is valid");
    let timestamp = Utc::now().with_timezone(&kst).format("%Y%m%d%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}.{}",
        timestamp,
        &suffix[..8],
        file_extension(original_filename)
    )
}

/// Transform raw object summaries into gallery entries: drop the folder
/// marker and zero-byte objects, derive MIME types, sort newest first.
fn build_listing(
    objects: Vec<StoredObject>,
    prefix: &str,
    mut url_for: impl FnMut(&str) -> String,
) -> Vec<PhotoDto> {
    let mut photos: Vec<PhotoDto> = objects
        .into_iter()
        .filter(|object| object.key != prefix && object.size > 0)
        .map(|object| {
            let file_name = object
                .key
                .strip_prefix(prefix)
                .unwrap_or(&object.key)
                .to_string();
            let url = url_for(&object.key);
            let file_type = content_type_from_extension(&file_name);
            let last_modified = object.last_modified.unwrap_or_else(Utc::now);
            PhotoDto {
                id: object.key,
                file_name,
                file_type,
                url,
                file_size: object.size,
                last_modified,
            }
        })
        .collect();

    photos.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    photos
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn object(key: &str, size: u64, modified_secs: i64) -> StoredObject {
        StoredObject {
            key: key.to_string(),
            size,
            last_modified: Some(Utc.timestamp_opt(modified_secs, 0).unwrap()),
        }
    }

    fn url_stub(key: &str) -> String {
        format!("https://cdn.example.com/{}", key)
    }

    #[test]
    fn test_build_listing_skips_folder_marker_and_empty_objects() {
        let objects = vec![
            object("attendance/", 0, 100),
            object("attendance/empty.jpg", 0, 200),
            object("attendance/real.jpg", 42, 300),
        ];
        let photos = build_listing(objects, "attendance/", url_stub);
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].id, "attendance/real.jpg");
        assert_eq!(photos[0].file_name, "real.jpg");
    }

    #[test]
    fn test_build_listing_marker_only_prefix_is_empty() {
        let objects = vec![object("attendance/", 0, 100)];
        assert!(build_listing(objects, "attendance/", url_stub).is_empty());
    }

    #[test]
    fn test_build_listing_sorts_newest_first() {
        let objects = vec![
            object("attendance/old.jpg", 10, 100),
            object("attendance/new.mp4", 10, 300),
            object("attendance/mid.png", 10, 200),
        ];
        let photos = build_listing(objects, "attendance/", url_stub);
        let names: Vec<&str> = photos.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["new.mp4", "mid.png", "old.jpg"]);
    }

    #[test]
    fn test_build_listing_derives_type_and_url() {
        let objects = vec![object("attendance/20251011-ab.webm", 7, 100)];
        let photos = build_listing(objects, "attendance/", url_stub);
        assert_eq!(photos[0].file_type, "video/webm");
        assert_eq!(
            photos[0].url,
            "https://cdn.example.com/attendance/20251011-ab.webm"
        );
        assert_eq!(photos[0].file_size, 7);
    }

    #[test]
    fn test_generate_file_name_shape() {
        let name = generate_file_name("ceremony shot.JPG");
        // {14-digit timestamp}-{8 char suffix}.{original extension}
        let (stem, extension) = name.rsplit_once('.').unwrap();
        assert_eq!(extension, "JPG");
        let (timestamp, suffix) = stem.split_once('-').unwrap();
        assert_eq!(timestamp.len(), 14);
        assert!(timestamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), 8);
    }

    #[test]
    fn test_generate_file_name_unique_suffix() {
        assert_ne!(generate_file_name("a.png"), generate_file_name("a.png"));
    }
}
