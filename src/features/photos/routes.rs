use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::features::photos::dtos::MAX_UPLOAD_SIZE;
use crate::features::photos::handlers::{get_photos, upload_photo};
use crate::features::photos::services::PhotoService;

/// Create routes for the photos feature
pub fn routes(photo_service: Arc<PhotoService>) -> Router {
    Router::new()
        .route(
            "/api/photos/upload",
            // Allow body size up to MAX_UPLOAD_SIZE + buffer for multipart overhead
            post(upload_photo).layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE + 1024 * 1024)),
        )
        .route("/api/photos", get(get_photos))
        .with_state(photo_service)
}
