//! Game Store Engine server
//!
//! Binds the REST API over fresh in-memory stores.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --port 8080
//! cargo run -- --host 0.0.0.0 --port 8080 --seed demos/seed.json
//! cargo run -- --log-level debug
//! ```
//!
//! The server exposes `/api/users`, `/api/games`, and `/api/transactions`
//! plus a `/health` probe. State lives in memory and is lost on shutdown;
//! use `--seed` to load accounts and catalogue items at startup.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gamestore_engine::api::{self, AppState};
use gamestore_engine::cli;
use gamestore_engine::config;
use gamestore_engine::core::{SystemClock, TransactionProcessor};
use gamestore_engine::store::{InMemoryAccountStore, InMemoryCatalogueStore, InMemoryLedger};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse_args();

    init_logging(&args.log_level)?;

    // Stores and the processor over them
    let accounts = Arc::new(InMemoryAccountStore::new());
    let catalogue = Arc::new(InMemoryCatalogueStore::new());
    let ledger = Arc::new(InMemoryLedger::new());
    let processor = TransactionProcessor::new(
        accounts.clone(),
        catalogue.clone(),
        ledger.clone(),
        Arc::new(SystemClock),
    );

    if let Some(seed_path) = &args.seed {
        let seed = config::load_seed(seed_path)?;
        let (n_accounts, n_games) =
            config::apply_seed(seed, accounts.as_ref(), catalogue.as_ref()).await?;
        info!(
            accounts = n_accounts,
            games = n_games,
            "seed data loaded from {}",
            seed_path.display()
        );
    }

    let state = AppState::new(accounts, catalogue, ledger, processor);
    let app = api::router(state);

    let bind_addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}:{}", bind_addr.0, bind_addr.1))?;

    info!("game store engine listening on {}:{}", bind_addr.0, bind_addr.1);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Initialize the tracing subscriber
///
/// `RUST_LOG` wins over the CLI flag when set, so operators can still narrow
/// to a specific target.
fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("invalid log level")?;

    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutdown signal received");
}
