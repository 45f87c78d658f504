//! Game Store Engine Library
//! # Overview
//!
//! This library implements a digital game storefront: catalogue browsing,
//! user accounts, and purchase/lease transactions against a persisted
//! balance, served over a small REST API.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, CatalogueItem, TransactionRecord, errors)
//! - [`store`] - Store traits and thread-safe in-memory implementations
//! - [`core`] - Business logic components:
//!   - [`core::processor`] - Transaction creation: validation, cost, atomic
//!     debit with compensating action
//!   - [`core::dates`] - Charge date and 30-day lease expiry computation
//!   - [`core::clock`] - The processor's time source
//! - [`api`] - HTTP boundary (axum routers, error/status mapping)
//! - [`cli`] - CLI argument parsing
//! - [`config`] - JSON seed file loading
//!
//! # Transaction Kinds
//!
//! The processor supports two charge kinds:
//!
//! - **Purchase**: one-off charge at the item's purchase price, no expiry
//! - **Lease**: charge at the item's lease price, expiring exactly 30
//!   calendar days after the transaction date
//!
//! # Balance Discipline
//!
//! An account's balance is never negative at any observable rest point. The
//! balance check and debit are one atomic step per account, so concurrent
//! charges against the same account cannot overdraw it. The charged amount
//! is snapshotted into the transaction record; later catalogue price changes
//! never rewrite history.

// Module declarations
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod store;
pub mod types;

pub use self::core::{Clock, SystemClock, TransactionProcessor};
pub use store::{
    AccountStore, CatalogueStore, InMemoryAccountStore, InMemoryCatalogueStore, InMemoryLedger,
    TransactionLedger,
};
pub use types::{
    Account, AccountId, CatalogueItem, ItemId, StoreError, TransactionId, TransactionKind,
    TransactionRecord,
};
