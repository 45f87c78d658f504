//! Store traits for accounts, the catalogue, and the transaction ledger
//!
//! This module defines the trait abstractions the transaction processor is
//! written against. Every method is async: the backing store is treated as
//! potentially blocking I/O and every call is awaited — no fire-and-forget
//! writes. The in-memory implementations live in sibling modules; a
//! database-backed store would implement the same traits.

use crate::types::{
    Account, AccountId, CatalogueItem, ItemId, StoreError, TransactionId, TransactionRecord,
};
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Store of user accounts and their balances
///
/// Balance mutations (`debit`, `credit`) for a given account id are totally
/// ordered: the balance check and the write are observed as a single atomic
/// step. Implementations must serialize read-check-write per account.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Get an account by id
    async fn get(&self, id: AccountId) -> Result<Account, StoreError>;

    /// Get an account by its unique username
    async fn get_by_username(&self, username: &str) -> Result<Account, StoreError>;

    /// Check whether a username is already registered
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Check whether an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert a new account, assigning its id
    ///
    /// Rejects duplicate usernames/emails and negative starting balances.
    async fn insert(&self, account: Account) -> Result<Account, StoreError>;

    /// Upsert an account by id
    ///
    /// Used for profile edits (including balance top-ups). Rejects negative
    /// balances and username/email values held by a different account.
    async fn save(&self, account: Account) -> Result<Account, StoreError>;

    /// Atomically check `balance >= amount` and subtract
    ///
    /// Fails with [`StoreError::InsufficientFunds`] without mutating when the
    /// balance cannot cover the amount. Returns the updated account.
    async fn debit(&self, id: AccountId, amount: Decimal) -> Result<Account, StoreError>;

    /// Atomically add to the balance
    ///
    /// Used for top-ups and for the processor's compensating action when a
    /// ledger write fails after a debit. Returns the updated account.
    async fn credit(&self, id: AccountId, amount: Decimal) -> Result<Account, StoreError>;

    /// Delete an account by id
    async fn delete(&self, id: AccountId) -> Result<(), StoreError>;

    /// All accounts, ordered by id
    async fn list(&self) -> Result<Vec<Account>, StoreError>;
}

/// Store of catalogue items
///
/// Read-only from the transaction core's perspective; the write operations
/// exist for the management API surface.
#[async_trait]
pub trait CatalogueStore: Send + Sync {
    /// Get an item by id
    async fn get(&self, id: ItemId) -> Result<CatalogueItem, StoreError>;

    /// Items whose genre contains the given substring, case-insensitive
    async fn search_by_genre(&self, genre: &str) -> Result<Vec<CatalogueItem>, StoreError>;

    /// Insert a new item, assigning its id
    ///
    /// Rejects items whose purchase or lease price is not strictly positive.
    async fn insert(&self, item: CatalogueItem) -> Result<CatalogueItem, StoreError>;

    /// Upsert an item by id
    async fn save(&self, item: CatalogueItem) -> Result<CatalogueItem, StoreError>;

    /// Delete an item by id
    async fn delete(&self, id: ItemId) -> Result<(), StoreError>;

    /// All items, ordered by id
    async fn list(&self) -> Result<Vec<CatalogueItem>, StoreError>;
}

/// Append-only store of transaction records
#[async_trait]
pub trait TransactionLedger: Send + Sync {
    /// Insert a record, assigning its id
    ///
    /// The caller's `id` field is ignored; the persisted record (with the
    /// assigned id) is returned.
    async fn save(&self, record: TransactionRecord) -> Result<TransactionRecord, StoreError>;

    /// Get a record by id
    async fn get(&self, id: TransactionId) -> Result<TransactionRecord, StoreError>;

    /// All records charged to one account, ordered by id
    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, StoreError>;

    /// All records, ordered by id
    async fn list(&self) -> Result<Vec<TransactionRecord>, StoreError>;

    /// Delete a record by id
    async fn delete(&self, id: TransactionId) -> Result<(), StoreError>;

    /// Delete every record charged to one account
    ///
    /// Supports the cascade when an account is closed. Returns the number of
    /// records removed.
    async fn delete_by_account(&self, account_id: AccountId) -> Result<usize, StoreError>;
}
