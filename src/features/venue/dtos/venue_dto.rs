use serde::Serialize;
use utoipa::ToSchema;

/// Venue descriptor for the LOCATION section
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponseDto {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub map: MapConfigDto,
}

/// Map rendering configuration.
///
/// When no provider key is configured the client renders the static
/// directions panel instead of the interactive map — the page never breaks
/// over a missing key.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapConfigDto {
    /// True when an interactive map can be rendered
    pub interactive: bool,
    /// Kakao Maps JavaScript app key, present only when configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_key: Option<String>,
    /// Outbound links for the fallback directions panel
    pub directions: Vec<DirectionLinkDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DirectionLinkDto {
    pub label: String,
    pub url: String,
}
