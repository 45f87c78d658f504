//! In-memory account store
//!
//! This module provides `InMemoryAccountStore`, a thread-safe implementation
//! of [`AccountStore`] backed by `DashMap`.
//!
//! # Balance Mutation Discipline
//!
//! The balance is the one piece of shared mutable state in the engine, so
//! `debit` and `credit` perform their read-check-write while holding the
//! account's map entry guard. DashMap's fine-grained locking makes that guard
//! a per-account mutual-exclusion scope: two concurrent debits against the
//! same account are serialized, and the `balance >= amount` check can never
//! race with the write that follows it. No await points occur while a guard
//! is held.

use crate::store::AccountStore;
use crate::types::{Account, AccountId, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe in-memory account store
///
/// Accounts are keyed by id; ids are assigned from a monotonically increasing
/// counter starting at 1. Uniqueness checks for username and email scan the
/// map, which is fine at in-memory scale.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Account records keyed by id
    accounts: DashMap<AccountId, Account>,

    /// Highest id handed out so far
    next_id: AtomicU32,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn username_holder(&self, username: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| *entry.key())
    }

    fn email_holder(&self, email: &str) -> Option<AccountId> {
        self.accounts
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| *entry.key())
    }

    /// Reject identity fields already held by a *different* account
    fn check_uniqueness(&self, account: &Account) -> Result<(), StoreError> {
        if let Some(holder) = self.username_holder(&account.username) {
            if holder != account.id {
                return Err(StoreError::username_taken(&account.username));
            }
        }
        if let Some(holder) = self.email_holder(&account.email) {
            if holder != account.id {
                return Err(StoreError::email_taken(&account.email));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn get(&self, id: AccountId) -> Result<Account, StoreError> {
        self.accounts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::account_not_found(id))
    }

    async fn get_by_username(&self, username: &str) -> Result<Account, StoreError> {
        self.accounts
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::username_not_found(username))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.username_holder(username).is_some())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.email_holder(email).is_some())
    }

    async fn insert(&self, mut account: Account) -> Result<Account, StoreError> {
        if account.balance < Decimal::ZERO {
            return Err(StoreError::NegativeBalance {
                account: account.id,
            });
        }
        // New accounts have no id yet, so uniqueness is against everyone.
        account.id = 0;
        self.check_uniqueness(&account)?;

        account.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        if account.balance < Decimal::ZERO {
            return Err(StoreError::NegativeBalance {
                account: account.id,
            });
        }
        self.check_uniqueness(&account)?;

        self.accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn debit(&self, id: AccountId, amount: Decimal) -> Result<Account, StoreError> {
        // The entry guard is the per-account mutual-exclusion scope: check
        // and write happen under one lock.
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| StoreError::account_not_found(id))?;

        if entry.balance < amount {
            return Err(StoreError::insufficient_funds(id, entry.balance, amount));
        }

        entry.balance = entry
            .balance
            .checked_sub(amount)
            .ok_or_else(|| StoreError::arithmetic_overflow("debit", id))?;

        Ok(entry.value().clone())
    }

    async fn credit(&self, id: AccountId, amount: Decimal) -> Result<Account, StoreError> {
        let mut entry = self
            .accounts
            .get_mut(&id)
            .ok_or_else(|| StoreError::account_not_found(id))?;

        entry.balance = entry
            .balance
            .checked_add(amount)
            .ok_or_else(|| StoreError::arithmetic_overflow("credit", id))?;

        Ok(entry.value().clone())
    }

    async fn delete(&self, id: AccountId) -> Result<(), StoreError> {
        self.accounts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::account_not_found(id))
    }

    async fn list(&self) -> Result<Vec<Account>, StoreError> {
        let mut accounts: Vec<Account> = self
            .accounts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        accounts.sort_by_key(|account| account.id);
        Ok(accounts)
    }
}
