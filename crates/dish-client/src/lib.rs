//! Client side of dish-board.
//!
//! - [`DishClient`]: typed calls for the `/records` API and the `/events`
//!   live-update stream.
//! - [`DishCache`]: the in-memory mirror of the collection with its
//!   total / published / unpublished counters.
//! - [`LiveDishes`]: a cache wired to a client, subscribed before its initial
//!   fetch and patched by every pushed event.

pub mod cache;
pub mod client;
pub mod error;
pub mod events;
pub mod live;

pub use cache::{ApplyOutcome, DishCache};
pub use client::DishClient;
pub use error::ClientError;
pub use events::EventStream;
pub use live::LiveDishes;
