use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::venue::handlers::get_venue;
use crate::features::venue::services::VenueService;

/// Create routes for the venue feature
pub fn routes(venue_service: Arc<VenueService>) -> Router {
    Router::new()
        .route("/api/venue", get(get_venue))
        .with_state(venue_service)
}
