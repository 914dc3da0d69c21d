use axum::{routing::get, Router};

use crate::features::layouts::handlers::list_layouts;

/// Create routes for the layouts feature
pub fn routes() -> Router {
    Router::new().route("/api/layouts", get(list_layouts))
}
