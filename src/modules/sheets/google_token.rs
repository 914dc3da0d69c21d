use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::core::config::GoogleSheetsConfig;
use crate::core::error::AppError;

pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Assertion lifetime accepted by the token endpoint
const ASSERTION_TTL_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct ServiceAccountClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed service-account assertion for a bearer token.
///
/// Handlers are single-shot and stateless, so the token is fetched fresh on
/// every request rather than cached across them.
pub async fn fetch_access_token(
    http: &reqwest::Client,
    config: &GoogleSheetsConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = ServiceAccountClaims {
        iss: &config.service_account_email,
        scope: SHEETS_SCOPE,
        aud: TOKEN_URL,
        exp: now + ASSERTION_TTL_SECS,
        iat: now,
    };

    let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())
        .map_err(|e| AppError::Config(format!("Invalid GOOGLE_PRIVATE_KEY: {}", e)))?;
    let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| AppError::Sheets(format!("Failed to sign service-account assertion: {}", e)))?;

    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", JWT_BEARER_GRANT),
            ("assertion", assertion.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Sheets(format!("Token request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::Sheets(format!(
            "Token request failed: HTTP {} - {}",
            status, body
        )));
    }

    let token: TokenResponse = response
        .json()
        .await
        .map_err(|e| AppError::Sheets(format!("Failed to parse token response: {}", e)))?;

    Ok(token.access_token)
}
