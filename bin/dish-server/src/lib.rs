//! dish-server: dish records over HTTP with live publish-state push.
//!
//! The binary in `main.rs` wires these modules together; they are exposed as
//! a library so other crates in the workspace can run a server in tests.

pub mod broadcast;
pub mod config;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod seed;
pub mod services;
pub mod state;

pub use broadcast::{Broadcaster, Subscription};
pub use config::Config;
pub use entities::SqliteStore;
pub use error::ServerError;
pub use state::AppState;
