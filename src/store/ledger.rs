//! In-memory transaction ledger
//!
//! Thread-safe implementation of [`TransactionLedger`] backed by `DashMap`.
//! Records are append-only: once saved they are never modified, only read or
//! deleted. Ids are assigned by the store on insert.

use crate::store::TransactionLedger;
use crate::types::{AccountId, StoreError, TransactionId, TransactionRecord};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe in-memory ledger
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    /// Records keyed by id
    records: DashMap<TransactionId, TransactionRecord>,

    /// Highest id handed out so far
    next_id: AtomicU32,
}

impl InMemoryLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryLedger {
    async fn save(&self, mut record: TransactionRecord) -> Result<TransactionRecord, StoreError> {
        record.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: TransactionId) -> Result<TransactionRecord, StoreError> {
        self.records
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::transaction_not_found(id))
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut records: Vec<TransactionRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().account_id == account_id)
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn list(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let mut records: Vec<TransactionRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn delete(&self, id: TransactionId) -> Result<(), StoreError> {
        self.records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::transaction_not_found(id))
    }

    async fn delete_by_account(&self, account_id: AccountId) -> Result<usize, StoreError> {
        let before = self.records.len();
        self.records
            .retain(|_, record| record.account_id != account_id);
        Ok(before - self.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn record(account_id: AccountId) -> TransactionRecord {
        TransactionRecord {
            id: 0,
            account_id,
            item_id: 1,
            kind: TransactionKind::Purchase,
            amount: dec!(40.00),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_get_round_trips() {
        let ledger = InMemoryLedger::new();

        let saved = ledger.save(record(1)).await.unwrap();
        assert_eq!(saved.id, 1);

        let fetched = ledger.get(saved.id).await.unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_save_ignores_caller_supplied_id() {
        let ledger = InMemoryLedger::new();

        let mut r = record(1);
        r.id = 777;
        let saved = ledger.save(r).await.unwrap();

        assert_eq!(saved.id, 1);
        assert!(matches!(
            ledger.get(777).await,
            Err(StoreError::TransactionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_by_account_filters_and_orders() {
        let ledger = InMemoryLedger::new();
        ledger.save(record(1)).await.unwrap();
        ledger.save(record(2)).await.unwrap();
        ledger.save(record(1)).await.unwrap();

        let for_one = ledger.list_by_account(1).await.unwrap();
        let ids: Vec<TransactionId> = for_one.iter().map(|r| r.id).collect();

        assert_eq!(ids, vec![1, 3]);
        assert!(for_one.iter().all(|r| r.account_id == 1));
    }

    #[tokio::test]
    async fn test_list_returns_everything_in_id_order() {
        let ledger = InMemoryLedger::new();
        for account in [3, 1, 2] {
            ledger.save(record(account)).await.unwrap();
        }

        let all = ledger.list().await.unwrap();
        let ids: Vec<TransactionId> = all.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let ledger = InMemoryLedger::new();
        let saved = ledger.save(record(1)).await.unwrap();

        ledger.delete(saved.id).await.unwrap();

        assert!(matches!(
            ledger.get(saved.id).await,
            Err(StoreError::TransactionNotFound { .. })
        ));
        assert!(matches!(
            ledger.delete(saved.id).await,
            Err(StoreError::TransactionNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_by_account_cascades_only_that_account() {
        let ledger = InMemoryLedger::new();
        ledger.save(record(1)).await.unwrap();
        ledger.save(record(1)).await.unwrap();
        ledger.save(record(2)).await.unwrap();

        let removed = ledger.delete_by_account(1).await.unwrap();

        assert_eq!(removed, 2);
        assert!(ledger.list_by_account(1).await.unwrap().is_empty());
        assert_eq!(ledger.list_by_account(2).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_record_is_immutable_snapshot() {
        let ledger = InMemoryLedger::new();
        let saved = ledger.save(record(1)).await.unwrap();

        // Mutating the caller's copy does not touch the stored record.
        let mut copy = saved.clone();
        copy.amount = dec!(0.01);

        assert_eq!(ledger.get(saved.id).await.unwrap().amount, dec!(40.00));
    }
}
