//! Push transports for the broadcast channel.
//!
//! Both endpoints register one subscriber per connection before the
//! connection is handed off, and the subscriber is removed when the
//! connection ends.
//!
//! - `GET /ws`: WebSocket. Each event is a text frame
//!   `{"event":"dishUpdated","data":{...}}`. Inbound data frames are ignored.
//! - `GET /events`: Server-Sent Events, `event: dishUpdated` with the record
//!   as JSON `data`.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures::{SinkExt, Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::broadcast::Subscription;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/events", get(sse_handler))
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let subscription = state.broadcaster().subscribe();
    ws.on_upgrade(move |socket| serve_socket(socket, subscription))
        .into_response()
}

async fn serve_socket(socket: WebSocket, mut subscription: Subscription) {
    let subscriber = subscription.id();
    info!(subscriber, "websocket client connected");
    let (mut sink, mut inbound) = socket.split();

    loop {
        tokio::select! {
            event = subscription.recv() => {
                let Some(event) = event else { break };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(subscriber, error = %e, "failed to encode push event");
                        continue;
                    }
                };
                if let Err(e) = sink.send(Message::Text(text.into())).await {
                    debug!(subscriber, error = %e, "websocket send failed");
                    break;
                }
            }
            frame = inbound.next() => match frame {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(subscriber, error = %e, "websocket receive failed");
                    break;
                }
            },
        }
    }

    info!(subscriber, "websocket client disconnected");
}

pub async fn sse_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let subscription = state.broadcaster().subscribe();
    info!(subscriber = subscription.id(), "event-stream client connected");

    let stream = subscription
        .into_stream()
        .map(|event| Event::default().event(event.name()).json_data(event.dish()));
    Sse::new(stream).keep_alive(KeepAlive::default())
}
