//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account-related types
//! - `catalogue`: Catalogue item types
//! - `transaction`: Transaction kinds, records, and identifiers
//! - `error`: Error types for the game store engine

pub mod account;
pub mod catalogue;
pub mod error;
pub mod transaction;

pub use account::{Account, AccountId};
pub use catalogue::{CatalogueItem, ItemId};
pub use error::StoreError;
pub use transaction::{TransactionId, TransactionKind, TransactionRecord};
