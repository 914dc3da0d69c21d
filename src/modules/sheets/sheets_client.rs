use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::config::GoogleSheetsConfig;
use crate::core::error::{AppError, Result};
use crate::modules::sheets::google_token;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// Thin client over the Sheets v4 REST surface.
///
/// Worksheet titles are discovered per call instead of hardcoded — the
/// couple can rename the sheet without redeploying.
pub struct SheetsClient {
    config: GoogleSheetsConfig,
    http: reqwest::Client,
}

impl SheetsClient {
    pub fn new(config: GoogleSheetsConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Worksheet titles in sheet order (index 0 is the attendance sheet).
    pub async fn sheet_titles(&self) -> Result<Vec<String>> {
        let token = google_token::fetch_access_token(&self.http, &self.config).await?;
        let url = format!("{}/{}", SHEETS_API_BASE, self.config.sheet_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("Spreadsheet metadata request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sheets(format!(
                "Spreadsheet metadata request failed: HTTP {}",
                response.status()
            )));
        }

        let metadata: SpreadsheetMetadata = response
            .json()
            .await
            .map_err(|e| AppError::Sheets(format!("Invalid spreadsheet metadata: {}", e)))?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    pub async fn first_sheet_title(&self) -> Result<String> {
        self.sheet_titles()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Sheets("Spreadsheet has no worksheets".to_string()))
    }

    /// Read a cell range (e.g. "A2:G1000") of the given worksheet. Returns
    /// the raw positional rows; absent trailing cells are simply missing.
    pub async fn get_values(&self, sheet_title: &str, range: &str) -> Result<Vec<Vec<String>>> {
        let token = google_token::fetch_access_token(&self.http, &self.config).await?;
        let full_range = format!("{}!{}", sheet_title, range);
        let url = format!(
            "{}/{}/values/{}",
            SHEETS_API_BASE,
            self.config.sheet_id,
            urlencoding::encode(&full_range)
        );

        let response = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("Range read failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Sheets(format!(
                "Range read failed: HTTP {}",
                response.status()
            )));
        }

        let values: ValueRange = response
            .json()
            .await
            .map_err(|e| AppError::Sheets(format!("Invalid range response: {}", e)))?;

        debug!(
            "Read {} rows from '{}'",
            values.values.len(),
            full_range
        );
        Ok(values.values)
    }

    /// Append one row to the given worksheet with RAW value input (cells are
    /// stored exactly as sent, no spreadsheet-side parsing).
    pub async fn append_row(&self, sheet_title: &str, row: Vec<serde_json::Value>) -> Result<()> {
        let token = google_token::fetch_access_token(&self.http, &self.config).await?;
        let url = format!(
            "{}/{}/values/{}:append?valueInputOption=RAW",
            SHEETS_API_BASE,
            self.config.sheet_id,
            urlencoding::encode(sheet_title)
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| AppError::Sheets(format!("Row append failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Sheets(format!(
                "Row append failed: HTTP {} - {}",
                status, body
            )));
        }

        debug!("Appended one row to '{}'", sheet_title);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_parsing_keeps_sheet_order() {
        let raw = r#"{
            "spreadsheetId": "abc",
            "sheets": [
                {"properties": {"sheetId": 0, "title": "참석여부"}},
                {"properties": {"sheetId": 1, "title": "사진업로드"}}
            ]
        }"#;
        let metadata: SpreadsheetMetadata = serde_json::from_str(raw).unwrap();
        let titles: Vec<String> = metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect();
        assert_eq!(titles, vec!["참석여부", "사진업로드"]);
    }

    #[test]
    fn test_value_range_defaults_to_empty() {
        // An empty range comes back without a "values" field at all
        let raw = r#"{"range": "Sheet1!A2:G1000", "majorDimension": "ROWS"}"#;
        let values: ValueRange = serde_json::from_str(raw).unwrap();
        assert!(values.values.is_empty());
    }

    #[test]
    fn test_value_range_rows_may_be_short() {
        let raw = r#"{"values": [["2025-10-11 13:00:00", "김민수"], []]}"#;
        let values: ValueRange = serde_json::from_str(raw).unwrap();
        assert_eq!(values.values.len(), 2);
        assert_eq!(values.values[0].len(), 2);
        assert!(values.values[1].is_empty());
    }
}
