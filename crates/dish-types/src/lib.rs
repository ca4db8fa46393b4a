//! Wire types shared by `dish-server` and its clients.
//!
//! Field names follow the dashboard's JSON contract (`dishId`, `isPublished`,
//! `createdAt`, ...), so every type here serializes in camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Name of the single push event carried by the broadcast channel.
pub const DISH_UPDATED: &str = "dishUpdated";

/// A dish record as served over HTTP and pushed over the broadcast channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Server-assigned identifier.
    pub id: Uuid,
    /// Business identifier, unique across the collection.
    pub dish_id: String,
    pub dish_name: String,
    pub image_url: String,
    pub is_published: bool,
    /// Bumped by exactly one on every toggle. Clients use it to discard
    /// pushes that are older than what they already hold.
    pub revision: i64,
    pub created_at: DateTime<Utc>,
}

/// An event pushed to every connected subscriber.
///
/// Over WebSocket this is sent as `{"event": "dishUpdated", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DishEvent {
    /// A record's publish flag changed; carries the full post-change record.
    #[serde(rename = "dishUpdated")]
    DishUpdated(Dish),
}

impl DishEvent {
    /// Event name as used for the SSE `event:` field.
    pub fn name(&self) -> &'static str {
        match self {
            DishEvent::DishUpdated(_) => DISH_UPDATED,
        }
    }

    pub fn dish(&self) -> &Dish {
        match self {
            DishEvent::DishUpdated(dish) => dish,
        }
    }
}

/// Dashboard header counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DishStats {
    pub total: usize,
    pub published: usize,
    pub unpublished: usize,
}

impl DishStats {
    pub fn from_dishes<'a>(dishes: impl IntoIterator<Item = &'a Dish>) -> Self {
        let (total, published) = dishes.into_iter().fold((0, 0), |(total, published), d| {
            (total + 1, published + usize::from(d.is_published))
        });
        Self {
            total,
            published,
            unpublished: total - published,
        }
    }
}

/// Body returned by `POST /records/reseed`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReseedResponse {
    pub message: String,
    pub records: Vec<Dish>,
}
