use serde::Serialize;
use utoipa::ToSchema;

/// One selectable invitation theme
#[derive(Debug, Serialize, ToSchema)]
pub struct LayoutDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
}

impl LayoutDto {
    fn new(id: &str, name: &str, description: &str, thumbnail: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            thumbnail: thumbnail.to_string(),
        }
    }
}

/// The fixed theme catalogue shown on the layout picker
pub fn catalogue() -> Vec<LayoutDto> {
    vec![
        LayoutDto::new(
            "exclusive",
            "Exclusive",
            "모던하고 세련된 디자인의 웨딩 페이지",
            "/layouts/exclusive.jpg",
        ),
        LayoutDto::new(
            "classic",
            "Classic",
            "전통적이고 우아한 디자인의 웨딩 페이지",
            "/layouts/classic.jpg",
        ),
        LayoutDto::new(
            "minimal",
            "Minimal",
            "심플하고 깔끔한 디자인의 웨딩 페이지",
            "/layouts/minimal.jpg",
        ),
    ]
}
