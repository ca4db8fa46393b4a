//! Dish record routes.
//!
//! | method | path                           |
//! |--------|--------------------------------|
//! | GET    | `/records`                     |
//! | GET    | `/records/{id}`                |
//! | PATCH  | `/records/{id}/toggle-publish` |
//! | POST   | `/records/reseed`              |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use dish_types::{Dish, DishStats, ReseedResponse};
use utoipa::OpenApi;

use crate::error::ServerError;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(list_dishes, get_dish, toggle_publish, reseed_dishes),
    components(schemas(Dish, DishStats, ReseedResponse))
)]
pub struct DishApi;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/records", get(list_dishes))
        .route("/records/reseed", post(reseed_dishes))
        .route("/records/{id}", get(get_dish))
        .route("/records/{id}/toggle-publish", patch(toggle_publish))
}

/// All dishes, newest first.
#[utoipa::path(
    get,
    path = "/records",
    tag = "dishes",
    responses(
        (status = 200, description = "Dish list", body = Vec<Dish>),
        (status = 503, description = "Store unavailable"),
    )
)]
pub async fn list_dishes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Dish>>, ServerError> {
    Ok(Json(state.dishes.list_dishes().await?))
}

#[utoipa::path(
    get,
    path = "/records/{id}",
    tag = "dishes",
    params(("id" = String, Path, description = "Dish record id (UUID)")),
    responses(
        (status = 200, description = "Dish found", body = Dish),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn get_dish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Dish>, ServerError> {
    Ok(Json(state.dishes.get_dish(&id).await?))
}

/// Flip `isPublished` and push the updated record to every subscriber.
#[utoipa::path(
    patch,
    path = "/records/{id}/toggle-publish",
    tag = "dishes",
    params(("id" = String, Path, description = "Dish record id (UUID)")),
    responses(
        (status = 200, description = "Updated dish", body = Dish),
        (status = 400, description = "Malformed id or rejected update"),
        (status = 404, description = "Unknown id"),
    )
)]
pub async fn toggle_publish(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Dish>, ServerError> {
    Ok(Json(state.dishes.toggle_publish(&id).await?))
}

/// Delete every dish and insert the sample set.
#[utoipa::path(
    post,
    path = "/records/reseed",
    tag = "dishes",
    responses(
        (status = 200, description = "Sample data initialized", body = ReseedResponse),
        (status = 500, description = "Store error"),
    )
)]
pub async fn reseed_dishes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ReseedResponse>, ServerError> {
    let records = state.dishes.reseed().await?;
    Ok(Json(ReseedResponse {
        message: "Sample data initialized".to_owned(),
        records,
    }))
}
