//! Error types for the game store engine
//!
//! This module defines all error types that can occur while serving store
//! requests. Errors are designed to carry enough context for the caller to
//! act on (which entity, required vs. available amounts).
//!
//! # Error Categories
//!
//! - **Validation Errors**: malformed transaction kind, negative balance, etc.
//! - **Lookup Errors**: account, catalogue item, or transaction not found
//! - **Business Errors**: insufficient funds, duplicate username/email
//! - **Storage Errors**: persistence failures and the fatal inconsistent-state
//!   condition (debit applied but ledger write lost)

use crate::types::{AccountId, ItemId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the game store engine
///
/// This enum represents all possible errors that can occur while handling
/// store operations. Each variant includes relevant context to diagnose and
/// resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Transaction kind string was neither `Purchase` nor `Lease`
    ///
    /// Raised at the request boundary before any store access.
    #[error("Invalid transaction kind '{kind}': expected 'Purchase' or 'Lease'")]
    InvalidKind {
        /// The kind string as received
        kind: String,
    },

    /// Account lookup failed
    #[error("Account {account} not found")]
    AccountNotFound {
        /// Account id that was not found
        account: AccountId,
    },

    /// Account lookup by username failed
    #[error("Account with username '{username}' not found")]
    UsernameNotFound {
        /// Username that was not found
        username: String,
    },

    /// Catalogue item lookup failed
    #[error("Catalogue item {item} not found")]
    ItemNotFound {
        /// Item id that was not found
        item: ItemId,
    },

    /// Transaction record lookup failed
    #[error("Transaction {transaction} not found")]
    TransactionNotFound {
        /// Transaction id that was not found
        transaction: TransactionId,
    },

    /// Account balance cannot cover the requested charge
    ///
    /// The account state remains unchanged; no partial debit occurs.
    #[error(
        "Insufficient funds for account {account}: available {available}, required {required}"
    )]
    InsufficientFunds {
        /// Account id
        account: AccountId,
        /// Balance at the time of the check
        available: Decimal,
        /// Amount the charge required
        required: Decimal,
    },

    /// Username is already registered to another account
    #[error("Username '{username}' is already taken")]
    UsernameTaken { username: String },

    /// Email is already registered to another account
    #[error("Email '{email}' is already taken")]
    EmailTaken { email: String },

    /// Login credentials did not match a stored account
    ///
    /// Deliberately carries no detail about which part was wrong.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account balance would become (or be stored as) negative
    #[error("Account balance must not be negative (account {account})")]
    NegativeBalance { account: AccountId },

    /// Catalogue prices must be strictly positive
    #[error("Prices for '{title}' must be greater than zero")]
    NonPositivePrice { title: String },

    /// Checked balance arithmetic failed
    ///
    /// The operation is rejected to preserve account integrity.
    #[error("Arithmetic overflow in {operation} for account {account}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Account id
        account: AccountId,
    },

    /// Backing store unavailable or a write was rejected
    ///
    /// The message is for server logs; client-facing surfaces report this
    /// generically without storage details.
    #[error("Persistence failure: {message}")]
    Persistence { message: String },

    /// A debit was applied but the ledger write (and its compensating
    /// credit) failed
    ///
    /// Requires manual reconciliation. Never retried, never folded into a
    /// generic failure.
    #[error(
        "Inconsistent state: account {account} was debited {amount} but no transaction record exists"
    )]
    InconsistentState {
        /// Account whose balance no longer matches the ledger
        account: AccountId,
        /// Amount of the unrecorded debit
        amount: Decimal,
    },
}

// Helper functions for creating common errors

impl StoreError {
    /// Create an InvalidKind error
    pub fn invalid_kind(kind: &str) -> Self {
        StoreError::InvalidKind {
            kind: kind.to_string(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(account: AccountId) -> Self {
        StoreError::AccountNotFound { account }
    }

    /// Create a UsernameNotFound error
    pub fn username_not_found(username: &str) -> Self {
        StoreError::UsernameNotFound {
            username: username.to_string(),
        }
    }

    /// Create an ItemNotFound error
    pub fn item_not_found(item: ItemId) -> Self {
        StoreError::ItemNotFound { item }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(transaction: TransactionId) -> Self {
        StoreError::TransactionNotFound { transaction }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(account: AccountId, available: Decimal, required: Decimal) -> Self {
        StoreError::InsufficientFunds {
            account,
            available,
            required,
        }
    }

    /// Create a UsernameTaken error
    pub fn username_taken(username: &str) -> Self {
        StoreError::UsernameTaken {
            username: username.to_string(),
        }
    }

    /// Create an EmailTaken error
    pub fn email_taken(email: &str) -> Self {
        StoreError::EmailTaken {
            email: email.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, account: AccountId) -> Self {
        StoreError::ArithmeticOverflow {
            operation: operation.to_string(),
            account,
        }
    }

    /// Create a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        StoreError::Persistence {
            message: message.into(),
        }
    }

    /// Create an InconsistentState error
    pub fn inconsistent_state(account: AccountId, amount: Decimal) -> Self {
        StoreError::InconsistentState { account, amount }
    }

    /// Whether this error is the fatal reconciliation condition
    pub fn is_inconsistent_state(&self) -> bool {
        matches!(self, StoreError::InconsistentState { .. })
    }
}
