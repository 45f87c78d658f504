//! HTTP API boundary
//!
//! Thin REST surface over the stores and the transaction processor:
//! - `/api/users` - registration, login, profile management ([`accounts`])
//! - `/api/games` - catalogue CRUD and genre search ([`catalogue`])
//! - `/api/transactions` - the transaction core's wire entry ([`transactions`])
//!
//! Error mapping lives in [`error`]; every handler returns
//! `Result<_, StoreError>` and the taxonomy maps to status codes in one
//! place.

pub mod accounts;
pub mod catalogue;
pub mod error;
pub mod transactions;

pub use error::ErrorBody;

use crate::core::TransactionProcessor;
use crate::store::{AccountStore, CatalogueStore, TransactionLedger};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub catalogue: Arc<dyn CatalogueStore>,
    pub ledger: Arc<dyn TransactionLedger>,
    pub processor: TransactionProcessor,
}

impl AppState {
    /// Assemble state over the given stores, wiring a processor on top
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        catalogue: Arc<dyn CatalogueStore>,
        ledger: Arc<dyn TransactionLedger>,
        processor: TransactionProcessor,
    ) -> Self {
        Self {
            accounts,
            catalogue,
            ledger,
            processor,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/users", accounts::create_router())
        .nest("/api/games", catalogue::create_router())
        .nest("/api/transactions", transactions::create_router())
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
