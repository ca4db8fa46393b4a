use dish_types::{Dish, ReseedResponse};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use crate::error::ClientError;
use crate::events::EventStream;

/// Thin typed wrapper over the dish-server HTTP API.
#[derive(Debug, Clone)]
pub struct DishClient {
    http: reqwest::Client,
    base_url: String,
}

impl DishClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /records`: every dish, newest first.
    pub async fn list_dishes(&self) -> Result<Vec<Dish>, ClientError> {
        self.call(Method::GET, "/records").await
    }

    /// `GET /records/{id}`.
    pub async fn get_dish(&self, id: Uuid) -> Result<Dish, ClientError> {
        self.call(Method::GET, &format!("/records/{id}")).await
    }

    /// `PATCH /records/{id}/toggle-publish`: returns the updated dish.
    pub async fn toggle_publish(&self, id: Uuid) -> Result<Dish, ClientError> {
        self.call(Method::PATCH, &format!("/records/{id}/toggle-publish"))
            .await
    }

    /// `POST /records/reseed`: replace everything with the sample dishes.
    pub async fn reseed(&self) -> Result<ReseedResponse, ClientError> {
        self.call(Method::POST, "/records/reseed").await
    }

    /// Open the `/events` stream. The server counts this client as a
    /// subscriber from the moment this returns.
    pub async fn subscribe(&self) -> Result<EventStream, ClientError> {
        let response = self
            .http
            .get(self.url("/events"))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = check_status(response).await?;
        let is_event_stream = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/event-stream"));
        if !is_event_stream {
            return Err(ClientError::Stream(
                "server did not answer with an event stream".to_owned(),
            ));
        }
        debug!(url = %self.url("/events"), "subscribed to dish events");
        Ok(EventStream::new(response))
    }

    async fn call<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T, ClientError> {
        let response = self.http.request(method, self.url(path)).send().await?;
        let response = check_status(response).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Map non-success statuses to [`ClientError`], using the server's
/// `{"error": "..."}` body as the message when present.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_owned))
        .unwrap_or(text);
    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
