//! Axum router construction.
//!
//! [`build`] assembles the complete application router, including:
//! - Middleware layers (CORS, per-request trace-ID injection)
//! - Optional Swagger UI / OpenAPI spec endpoint (disable with `DISH_ENABLE_SWAGGER=false`)
//! - Health route
//! - `/records` routes and the `/ws` + `/events` push transports

pub mod dishes;
pub mod doc;
mod health;
pub mod push;

use std::sync::Arc;

use axum::{Router, middleware};
use tower::ServiceBuilder;
use utoipa_swagger_ui::SwaggerUi;

use crate::middleware::{cors, trace};
use crate::state::AppState;

/// Build the complete Axum [`Router`] for the application.
pub fn build(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .merge(health::router())
        .merge(dishes::router())
        .merge(push::router());

    if state.config.enable_swagger {
        app = app.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", doc::get_docs()));
    }

    app
        // Outermost layers execute first on the way in.
        .layer(ServiceBuilder::new().layer(cors::cors_layer(state.clone())))
        .layer(middleware::from_fn(trace::trace_middleware))
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test {
    use super::*;
    use crate::broadcast::Broadcaster;
    use crate::config::Config;
    use crate::entities::SqliteStore;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use dish_types::{Dish, DishEvent, DishStats, ReseedResponse};
    use http_body_util::BodyExt;
    use serde::de::DeserializeOwned;
    use tower::ServiceExt;
    use uuid::Uuid;

    async fn test_state() -> Arc<AppState> {
        let store = SqliteStore::connect("sqlite::memory:").await.unwrap();
        let config = Config {
            enable_swagger: false,
            ..Config::default()
        };
        Arc::new(AppState::new(config, store, Broadcaster::new()))
    }

    async fn send(app: &Router, method: Method, uri: &str) -> axum::response::Response {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(req).await.unwrap()
    }

    async fn json_body<T: DeserializeOwned>(resp: axum::response::Response) -> T {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn reseed(app: &Router) -> Vec<Dish> {
        let resp = send(app, Method::POST, "/records/reseed").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: ReseedResponse = json_body(resp).await;
        assert_eq!(body.message, "Sample data initialized");
        body.records
    }

    #[tokio::test]
    async fn reseed_then_list_returns_twelve_newest_first() {
        let app = build(test_state().await);
        let inserted = reseed(&app).await;
        assert_eq!(inserted.len(), 12);

        let resp = send(&app, Method::GET, "/records").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let listed: Vec<Dish> = json_body(resp).await;
        assert_eq!(listed.len(), 12);
        assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));
        assert_eq!(
            DishStats::from_dishes(&listed),
            DishStats {
                total: 12,
                published: 5,
                unpublished: 7
            }
        );
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = build(test_state().await);
        let listed: Vec<Dish> = json_body(send(&app, Method::GET, "/records").await).await;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn toggle_returns_flipped_record_and_broadcasts_it() {
        let state = test_state().await;
        let app = build(state.clone());
        let inserted = reseed(&app).await;
        let target = inserted.iter().find(|d| !d.is_published).unwrap();
        let mut viewer = state.broadcaster().subscribe();

        let resp = send(
            &app,
            Method::PATCH,
            &format!("/records/{}/toggle-publish", target.id),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let updated: Dish = json_body(resp).await;
        assert!(updated.is_published);
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.dish_id, target.dish_id);

        assert_eq!(viewer.try_recv(), Some(DishEvent::DishUpdated(updated)));
        assert_eq!(viewer.try_recv(), None);
    }

    #[tokio::test]
    async fn toggle_unknown_id_is_404_with_error_body() {
        let app = build(test_state().await);
        reseed(&app).await;

        let resp = send(
            &app,
            Method::PATCH,
            &format!("/records/{}/toggle-publish", Uuid::new_v4()),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = json_body(resp).await;
        assert!(body["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        let app = build(test_state().await);
        let resp = send(&app, Method::PATCH, "/records/xyz/toggle-publish").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = send(&app, Method::GET, "/records/xyz").await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_single_dish_by_id() {
        let app = build(test_state().await);
        let inserted = reseed(&app).await;
        let resp = send(&app, Method::GET, &format!("/records/{}", inserted[0].id)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let dish: Dish = json_body(resp).await;
        assert_eq!(dish.dish_id, "dish1");
    }

    #[tokio::test]
    async fn responses_carry_trace_id() {
        let app = build(test_state().await);
        let trace_id = Uuid::new_v4().to_string();
        let req = Request::builder()
            .uri("/health")
            .header(trace::X_TRACE_ID, &trace_id)
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.headers()[trace::X_TRACE_ID], trace_id.as_str());
    }

    #[tokio::test]
    async fn health_reports_open_subscribers() {
        let state = test_state().await;
        let app = build(state.clone());
        let _viewer = state.broadcaster().subscribe();
        let body: serde_json::Value = json_body(send(&app, Method::GET, "/health").await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["subscribers"], 1);
    }

    #[tokio::test]
    async fn event_stream_delivers_toggle() {
        let state = test_state().await;
        let app = build(state.clone());
        let inserted = reseed(&app).await;

        let resp = send(&app, Method::GET, "/events").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.broadcaster().subscriber_count(), 1);

        let updated = state
            .dishes
            .toggle_publish(&inserted[1].id.to_string())
            .await
            .unwrap();

        let mut body = resp.into_body();
        let frame = body.frame().await.unwrap().unwrap();
        let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
        assert!(text.contains("event: dishUpdated"), "{text}");
        assert!(text.contains(&updated.id.to_string()), "{text}");

        drop(body);
        assert_eq!(state.broadcaster().subscriber_count(), 0);
    }
}
