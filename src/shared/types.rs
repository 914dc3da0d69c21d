use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error envelope returned by every failing endpoint.
///
/// Success responses keep the wire shapes the invitation pages already
/// consume (see the per-feature DTOs); only errors share this envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: message.into(),
        }
    }
}
