use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorResponse;

#[derive(Debug, Error)]
#[allow(dead_code)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Sheets API error: {0}")]
    Sheets(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Upstream details go to the log; guests get a retryable generic
        // message in the language of the invitation.
        let (status, message) = match self {
            AppError::Config(ref msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Validation(ref msg) | AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string(),
                )
            }
            AppError::Sheets(ref msg) => {
                tracing::error!("Sheets API error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "서버 오류가 발생했습니다. 잠시 후 다시 시도해주세요.".to_string(),
                )
            }
            AppError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "파일 업로드에 실패했습니다.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
