//! Live-update stream over the server's `/events` endpoint.
//!
//! The endpoint speaks Server-Sent Events: `event:` and `data:` lines,
//! `:`-prefixed keep-alive comments, and a blank line closing each message.

use std::collections::VecDeque;
use std::pin::Pin;

use bytes::Bytes;
use dish_types::{DISH_UPDATED, Dish, DishEvent};
use futures::{Stream, StreamExt};
use tracing::{debug, trace};

use crate::error::ClientError;

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// One SSE message after framing, before JSON decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SseMessage {
    pub event: Option<String>,
    pub data: String,
}

/// Incremental SSE framer. Bytes may arrive split at any position,
/// including inside a multi-byte character.
#[derive(Debug, Default)]
pub(crate) struct SseDecoder {
    buf: Vec<u8>,
    event: Option<String>,
    data: Vec<String>,
}

impl SseDecoder {
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseMessage> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let raw: Vec<u8> = self.buf.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw[..raw.len() - 1]);
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if let Some(message) = self.feed_line(line) {
                out.push(message);
            }
        }
        out
    }

    fn feed_line(&mut self, line: &str) -> Option<SseMessage> {
        if line.is_empty() {
            let event = self.event.take();
            if self.data.is_empty() {
                return None;
            }
            let data = std::mem::take(&mut self.data).join("\n");
            return Some(SseMessage { event, data });
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((f, v)) => (f, v.strip_prefix(' ').unwrap_or(v)),
            None => (line, ""),
        };
        match field {
            "event" => self.event = Some(value.to_owned()),
            "data" => self.data.push(value.to_owned()),
            _ => trace!(field, "ignoring SSE field"),
        }
        None
    }
}

/// Pushed [`DishEvent`]s from one `/events` connection.
///
/// The server registers this connection as a subscriber as soon as the
/// response head arrives; events published before that are not replayed.
pub struct EventStream {
    body: ByteStream,
    decoder: SseDecoder,
    pending: VecDeque<DishEvent>,
}

impl EventStream {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            body: Box::pin(response.bytes_stream()),
            decoder: SseDecoder::default(),
            pending: VecDeque::new(),
        }
    }

    /// Wait for the next event. `None` means the server closed the stream.
    pub async fn next_event(&mut self) -> Option<Result<DishEvent, ClientError>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                return Some(Ok(event));
            }
            let chunk = match self.body.next().await? {
                Ok(chunk) => chunk,
                Err(e) => return Some(Err(ClientError::Http(e))),
            };
            for message in self.decoder.push(&chunk) {
                match decode_message(message) {
                    Ok(Some(event)) => self.pending.push_back(event),
                    Ok(None) => {}
                    Err(e) => return Some(Err(e)),
                }
            }
        }
    }
}

fn decode_message(message: SseMessage) -> Result<Option<DishEvent>, ClientError> {
    match message.event.as_deref() {
        Some(DISH_UPDATED) => {
            let dish: Dish = serde_json::from_str(&message.data)?;
            Ok(Some(DishEvent::DishUpdated(dish)))
        }
        other => {
            debug!(event = ?other, "skipping unrecognised event");
            Ok(None)
        }
    }
}
