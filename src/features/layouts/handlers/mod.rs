mod layout_handler;

pub use layout_handler::*;
