use axum::Json;

use crate::features::layouts::dtos::{catalogue, LayoutDto};

/// List the available invitation themes
#[utoipa::path(
    get,
    path = "/api/layouts",
    tag = "layouts",
    responses(
        (status = 200, description = "Theme catalogue", body = Vec<LayoutDto>)
    )
)]
pub async fn list_layouts() -> Json<Vec<LayoutDto>> {
    Json(catalogue())
}

#[cfg(test)]
mod tests {
    use crate::features::layouts::routes;
    use axum_test::TestServer;

    #[tokio::test]
    async fn test_list_layouts() {
        let server = TestServer::new(routes::routes()).unwrap();
        let response = server.get("/api/layouts").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["id"], "exclusive");
    }
}
