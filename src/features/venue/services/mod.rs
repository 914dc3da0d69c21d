mod venue_service;

pub use venue_service::VenueService;
