//! dish-server entry point.
//!
//! Reads `DISH_*` settings from the environment, opens the record store
//! (running migrations), optionally seeds an empty store, then serves the
//! HTTP API and push transports until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dish_server::routes;
use dish_server::{AppState, Broadcaster, Config, SqliteStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config);
    info!(version = env!("CARGO_PKG_VERSION"), "dish-server starting");

    let store = SqliteStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    info!(database_url = %config.database_url, "record store ready");

    let state = Arc::new(AppState::new(config.clone(), store, Broadcaster::new()));
    if config.seed_on_start {
        seed_on_start(&state).await;
    }

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("invalid DISH_BIND '{}'", config.bind_address))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, swagger = config.enable_swagger, "listening");

    axum::serve(listener, routes::build(state))
        .with_graceful_shutdown(wait_for_shutdown())
        .await?;

    info!("dish-server stopped");
    Ok(())
}

/// `RUST_LOG` wins over `DISH_LOG`; an unparsable `DISH_LOG` falls back to `info`.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|e| {
            eprintln!("DISH_LOG='{}' ignored ({e}); using 'info'", config.log_level);
            EnvFilter::new("info")
        });

    let fmt = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);
    if config.log_json {
        fmt.json().init();
    } else {
        fmt.init();
    }
}

async fn seed_on_start(state: &AppState) {
    match state.dishes.seed_if_empty().await {
        Ok(true) => info!("seeded empty store with sample dishes"),
        Ok(false) => info!("store has records; seed skipped"),
        Err(e) => warn!(error = %e, "seeding sample dishes failed"),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable; waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    }
    info!("shutdown requested; draining connections");
}
