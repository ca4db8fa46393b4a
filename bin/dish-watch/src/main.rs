//! dish-watch: terminal client for dish-server.
//!
//! `watch` subscribes to the live event stream before fetching the list, then
//! redraws the board every time a publish flag changes anywhere.

mod cli;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use dish_client::{DishCache, DishClient, LiveDishes};
use tracing::{debug, info, warn};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let client = DishClient::new(cli.server.clone());
    let result = match cli.command {
        Commands::List => list(&client).await,
        Commands::Toggle { id } => {
            let dish = client
                .toggle_publish(id)
                .await
                .with_context(|| format!("toggling {id}"))?;
            println!("{}", render::row(&dish));
            Ok(())
        }
        Commands::Reseed => {
            let response = client.reseed().await.context("reseeding")?;
            println!("{} ({} dishes)", response.message, response.records.len());
            Ok(())
        }
        Commands::Watch => watch(client).await,
    };

    if let Err(ref e) = result {
        tracing::error!(error = %e, "command failed");
    }
    result
}

async fn list(client: &DishClient) -> Result<()> {
    let mut cache = DishCache::new();
    cache.load(client.list_dishes().await.context("listing dishes")?);
    print!("{}", render::board(cache.dishes(), cache.stats()));
    Ok(())
}

async fn watch(client: DishClient) -> Result<()> {
    let base = client.base_url().to_owned();
    let mut live = LiveDishes::connect(client)
        .await
        .with_context(|| format!("connecting to {base}"))?;
    info!(server = %base, "watching for dish updates");
    redraw(&live);

    loop {
        tokio::select! {
            update = live.next_update() => match update {
                // an unknown id re-fetches the list, so redraw whatever the outcome
                Some(Ok((outcome, dish))) => {
                    debug!(id = %dish.id, published = dish.is_published, ?outcome, "dish update");
                    redraw(&live);
                }
                Some(Err(e)) => return Err(e).context("reading live updates"),
                None => {
                    warn!("server closed the event stream");
                    return Ok(());
                }
            },
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}

fn redraw(live: &LiveDishes) {
    // clear screen, cursor home
    print!("\x1b[2J\x1b[H");
    print!("{}", render::board(live.cache().dishes(), live.cache().stats()));
}

fn init_logging(verbose: u8) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))
}
