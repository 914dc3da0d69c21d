mod layout_dto;

pub use layout_dto::{catalogue, LayoutDto};
