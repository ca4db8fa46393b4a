use utoipa::OpenApi;

use crate::routes::{dishes, health};

#[derive(OpenApi)]
#[openapi(info(
    title = "dish-server",
    description = "Dish publishing API. Live updates are pushed on `/ws` (WebSocket) and `/events` (SSE).",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(health::HealthApi::openapi());
    root.merge(dishes::DishApi::openapi());
    root
}
