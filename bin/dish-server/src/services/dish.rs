//! Dish reads, the publish toggle, and reseeding.
//!
//! The toggle is the only mutation exposed to callers. After the store
//! confirms the write, the post-toggle record is published to every
//! connected subscriber; publishing is fire-and-forget and happens before the
//! HTTP response is produced.

use std::sync::Arc;

use chrono::Utc;
use dish_types::{Dish, DishEvent};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::broadcast::Broadcaster;
use crate::entities::{DishRecord, DishStore};
use crate::error::ServerError;
use crate::seed::seed_records;

#[derive(Debug)]
pub struct DishService<S> {
    store: Arc<S>,
    broadcaster: Broadcaster,
}

impl<S> Clone for DishService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl<S: DishStore> DishService<S> {
    pub fn new(store: Arc<S>, broadcaster: Broadcaster) -> Self {
        Self { store, broadcaster }
    }

    pub fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }

    pub async fn list_dishes(&self) -> Result<Vec<Dish>, ServerError> {
        let records = self.store.list_dishes().await?;
        Ok(records.into_iter().map(DishRecord::into_dish).collect())
    }

    pub async fn get_dish(&self, raw_id: &str) -> Result<Dish, ServerError> {
        let id = parse_id(raw_id)?;
        self.store
            .get_dish(id)
            .await?
            .map(DishRecord::into_dish)
            .ok_or_else(|| not_found(id))
    }

    /// Invert `isPublished` on one record and push the result to subscribers.
    #[instrument(skip(self))]
    pub async fn toggle_publish(&self, raw_id: &str) -> Result<Dish, ServerError> {
        let id = parse_id(raw_id)?;
        let dish = self
            .store
            .toggle_published(id)
            .await?
            .map(DishRecord::into_dish)
            .ok_or_else(|| not_found(id))?;

        let delivered = self
            .broadcaster
            .publish(DishEvent::DishUpdated(dish.clone()));
        info!(
            dish_id = %dish.dish_id,
            is_published = dish.is_published,
            revision = dish.revision,
            delivered,
            "publish state toggled"
        );
        Ok(dish)
    }

    /// Replace the whole collection with the seed set.
    ///
    /// Nothing is pushed to subscribers; viewers re-fetch the list.
    pub async fn reseed(&self) -> Result<Vec<Dish>, ServerError> {
        let records = seed_records(Utc::now());
        info!(count = records.len(), "replacing dishes with seed set");
        self.store.replace_all(&records).await?;
        Ok(records.into_iter().map(DishRecord::into_dish).collect())
    }

    /// Seed only if the store is empty. Returns `true` when it seeded.
    pub async fn seed_if_empty(&self) -> Result<bool, ServerError> {
        if self.store.count_dishes().await? > 0 {
            return Ok(false);
        }
        self.reseed().await?;
        Ok(true)
    }
}

fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::Validation(format!("invalid dish id: {raw}")))
}

fn not_found(id: Uuid) -> ServerError {
    ServerError::NotFound(format!("dish {id} not found"))
}
