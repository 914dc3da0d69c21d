mod venue_dto;

pub use venue_dto::{DirectionLinkDto, MapConfigDto, VenueResponseDto};
