use axum::{extract::State, Json};
use std::sync::Arc;

use crate::features::venue::dtos::VenueResponseDto;
use crate::features::venue::services::VenueService;

/// Venue and map configuration for the LOCATION section
#[utoipa::path(
    get,
    path = "/api/venue",
    tag = "venue",
    responses(
        (status = 200, description = "Venue descriptor with map config", body = VenueResponseDto)
    )
)]
pub async fn get_venue(State(service): State<Arc<VenueService>>) -> Json<VenueResponseDto> {
    Json(service.describe())
}
