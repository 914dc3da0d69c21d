use crate::core::config::VenueConfig;
use crate::features::venue::dtos::{DirectionLinkDto, MapConfigDto, VenueResponseDto};

/// Serves the venue descriptor, including the degrade-gracefully map
/// configuration: with no provider key the response still carries the
/// directions links, never an error.
pub struct VenueService {
    config: VenueConfig,
}

impl VenueService {
    pub fn new(config: VenueConfig) -> Self {
        Self { config }
    }

    pub fn describe(&self) -> VenueResponseDto {
        let config = &self.config;
        VenueResponseDto {
            name: config.name.clone(),
            address: config.address.clone(),
            latitude: config.latitude,
            longitude: config.longitude,
            map: MapConfigDto {
                interactive: config.kakao_map_api_key.is_some(),
                app_key: config.kakao_map_api_key.clone(),
                directions: direction_links(config),
            },
        }
    }
}

/// Outbound map links for the static directions panel
fn direction_links(config: &VenueConfig) -> Vec<DirectionLinkDto> {
    let encoded_name = urlencoding::encode(&config.name);
    let encoded_address = urlencoding::encode(&config.address);
    vec![
        DirectionLinkDto {
            label: "카카오맵".to_string(),
            url: format!(
                "https://map.kakao.com/link/map/{},{},{}",
                encoded_name, config.latitude, config.longitude
            ),
        },
        DirectionLinkDto {
            label: "네이버지도".to_string(),
            url: format!("https://map.naver.com/v5/search/{}", encoded_address),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(kakao_map_api_key: Option<&str>) -> VenueConfig {
        VenueConfig {
            name: "당산 그랜드컨벤션센터".to_string(),
            address: "서울특별시 영등포구 양평로 58".to_string(),
            latitude: 37.5347454,
            longitude: 126.9006169,
            kakao_map_api_key: kakao_map_api_key.map(str::to_string),
        }
    }

    #[test]
    fn test_describe_with_map_key() {
        let venue = VenueService::new(config(Some("kakao-app-key"))).describe();
        assert!(venue.map.interactive);
        assert_eq!(venue.map.app_key.as_deref(), Some("kakao-app-key"));
        assert!(!venue.map.directions.is_empty());
    }

    #[test]
    fn test_describe_without_key_degrades_to_directions() {
        // A missing key removes the interactive map, nothing else
        let venue = VenueService::new(config(None)).describe();
        assert!(!venue.map.interactive);
        assert!(venue.map.app_key.is_none());
        assert_eq!(venue.map.directions.len(), 2);
        assert!(venue.map.directions[0].url.contains("map.kakao.com"));
    }
}
