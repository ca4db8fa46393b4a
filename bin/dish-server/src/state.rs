//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::broadcast::Broadcaster;
use crate::config::Config;
use crate::entities::SqliteStore;
use crate::services::DishService;

/// State shared across all HTTP handlers and push transports.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Dish reads and the publish toggle, wired to the store and broadcaster.
    pub dishes: DishService<SqliteStore>,
}

impl AppState {
    pub fn new(config: Config, store: SqliteStore, broadcaster: Broadcaster) -> Self {
        Self {
            config: Arc::new(config),
            dishes: DishService::new(Arc::new(store), broadcaster),
        }
    }

    /// The subscriber registry used by `/ws` and `/events`.
    pub fn broadcaster(&self) -> &Broadcaster {
        self.dishes.broadcaster()
    }
}
