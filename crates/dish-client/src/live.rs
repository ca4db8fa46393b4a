//! A [`DishCache`] kept in sync with the server.

use dish_types::Dish;
use tracing::{debug, info};

use crate::cache::{ApplyOutcome, DishCache};
use crate::client::DishClient;
use crate::error::ClientError;
use crate::events::EventStream;

/// Full fetch plus live patches, the way the dashboard view consumes them.
///
/// [`LiveDishes::connect`] opens the event stream *before* issuing the full
/// fetch, so a toggle that lands in between is still delivered; the cache's
/// revision check then discards whichever copy is older.
pub struct LiveDishes {
    client: DishClient,
    events: EventStream,
    cache: DishCache,
}

impl LiveDishes {
    pub async fn connect(client: DishClient) -> Result<Self, ClientError> {
        let events = client.subscribe().await?;
        let mut cache = DishCache::new();
        cache.load(client.list_dishes().await?);
        info!(dishes = cache.len(), "dish cache loaded");
        Ok(Self {
            client,
            events,
            cache,
        })
    }

    pub fn cache(&self) -> &DishCache {
        &self.cache
    }

    pub fn client(&self) -> &DishClient {
        &self.client
    }

    /// Re-run the full fetch, e.g. after a reseed.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let dishes = self.client.list_dishes().await?;
        self.cache.load(dishes);
        Ok(())
    }

    /// Wait for the next pushed event and apply it to the cache.
    ///
    /// A push for an id the cache does not hold means the collection was
    /// replaced elsewhere (reseed publishes nothing), so the full list is
    /// fetched again before the event is re-applied.
    ///
    /// Returns `None` when the server closes the stream.
    pub async fn next_update(&mut self) -> Option<Result<(ApplyOutcome, Dish), ClientError>> {
        let event = match self.events.next_event().await? {
            Ok(event) => event,
            Err(e) => return Some(Err(e)),
        };
        let mut outcome = self.cache.apply(&event);
        if outcome == ApplyOutcome::Unknown {
            info!(id = %event.dish().id, "push for unknown dish; re-fetching list");
            if let Err(e) = self.refresh().await {
                return Some(Err(e));
            }
            outcome = self.cache.apply(&event);
        }
        let dish = event.dish().clone();
        debug!(id = %dish.id, revision = dish.revision, ?outcome, "push applied");
        Some(Ok((outcome, dish)))
    }
}
