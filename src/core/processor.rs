//! Transaction processing core
//!
//! This module provides the `TransactionProcessor`, which orchestrates the
//! account store, catalogue store, and transaction ledger to create a priced,
//! dated transaction and atomically adjust the account balance.
//!
//! # Validation Order
//!
//! Checks fail fast, first failing check wins:
//! 1. the transaction kind (enforced at the wire boundary, see
//!    [`TransactionKind::from_str`](std::str::FromStr))
//! 2. the account must exist
//! 3. the catalogue item must exist
//! 4. the balance must cover the cost — checked and debited as one atomic
//!    step in the account store, so no mutation occurs on failure
//!
//! # Atomicity
//!
//! The debit and the ledger write form a compensating-action pair. A ledger
//! failure after a successful debit triggers a compensating credit; if that
//! credit also fails the processor surfaces
//! [`StoreError::InconsistentState`] and logs a reconciliation event. Neither
//! path is ever retried automatically — retrying a debit risks double
//! charging. Only the idempotent account/item *reads* are retried, a bounded
//! number of times.

use crate::core::clock::Clock;
use crate::core::dates::charge_dates;
use crate::store::{AccountStore, CatalogueStore, TransactionLedger};
use crate::types::{
    Account, AccountId, CatalogueItem, ItemId, StoreError, TransactionKind, TransactionRecord,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Total attempts for an idempotent store read before giving up
const READ_RETRY_ATTEMPTS: u32 = 3;

/// Orchestrates transaction creation over the store components
///
/// Cheap to clone; all components are behind `Arc`, so a clone can be moved
/// onto a spawned task while the caller keeps its own handle.
#[derive(Clone)]
pub struct TransactionProcessor {
    accounts: Arc<dyn AccountStore>,
    catalogue: Arc<dyn CatalogueStore>,
    ledger: Arc<dyn TransactionLedger>,
    clock: Arc<dyn Clock>,
}

impl TransactionProcessor {
    /// Create a processor over the given stores and clock
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        catalogue: Arc<dyn CatalogueStore>,
        ledger: Arc<dyn TransactionLedger>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            catalogue,
            ledger,
            clock,
        }
    }

    /// Charge an account for a catalogue item and persist the record
    ///
    /// Validates that the account and item exist, computes the cost from the
    /// item's purchase or lease price, atomically debits the balance, stamps
    /// the transaction date (and lease expiry) from the processor clock, and
    /// appends the record to the ledger.
    ///
    /// # Arguments
    ///
    /// * `account_id` - The account to charge
    /// * `item_id` - The catalogue item being bought or leased
    /// * `kind` - Purchase or lease
    ///
    /// # Returns
    ///
    /// The persisted record, including the ledger-assigned id. Callers that
    /// cached account state before the call must re-fetch it afterwards; the
    /// processor caches nothing.
    ///
    /// # Errors
    ///
    /// * [`StoreError::AccountNotFound`] / [`StoreError::ItemNotFound`] - in
    ///   validation order
    /// * [`StoreError::InsufficientFunds`] - balance cannot cover the cost;
    ///   no mutation occurred
    /// * [`StoreError::Persistence`] - the ledger write failed and the debit
    ///   was credited back
    /// * [`StoreError::InconsistentState`] - the ledger write *and* the
    ///   compensating credit failed; manual reconciliation required
    pub async fn create_transaction(
        &self,
        account_id: AccountId,
        item_id: ItemId,
        kind: TransactionKind,
    ) -> Result<TransactionRecord, StoreError> {
        let account = self.get_account(account_id).await?;
        let item = self.get_item(item_id).await?;

        let cost = match kind {
            TransactionKind::Purchase => item.purchase_price,
            TransactionKind::Lease => item.lease_price,
        };

        // Atomic check-and-debit. Never auto-retried: a retry after an
        // ambiguous failure could charge twice.
        self.accounts
            .debit(account.id, cost)
            .await
            .map_err(|err| {
                if let StoreError::InsufficientFunds {
                    available, required, ..
                } = &err
                {
                    warn!(
                        account = account_id,
                        item = item_id,
                        %available,
                        %required,
                        "charge rejected: insufficient funds"
                    );
                }
                err
            })?;

        let dates = charge_dates(self.clock.now(), kind);
        let record = TransactionRecord {
            id: 0,
            account_id: account.id,
            item_id: item.id,
            kind,
            amount: cost,
            transaction_date: dates.transaction_date,
            expiry_date: dates.expiry_date,
        };

        match self.ledger.save(record).await {
            Ok(saved) => {
                info!(
                    transaction = saved.id,
                    account = account_id,
                    item = item_id,
                    kind = %kind,
                    amount = %cost,
                    "transaction created"
                );
                Ok(saved)
            }
            Err(save_err) => Err(self.compensate_failed_save(account.id, cost, save_err).await),
        }
    }

    /// Undo a debit whose ledger write failed
    ///
    /// Returns the error to surface: the original persistence failure when
    /// the credit lands (the account is whole again), or
    /// [`StoreError::InconsistentState`] when it does not.
    async fn compensate_failed_save(
        &self,
        account_id: AccountId,
        amount: Decimal,
        save_err: StoreError,
    ) -> StoreError {
        warn!(
            account = account_id,
            amount = %amount,
            "ledger write failed after debit, applying compensating credit: {save_err}"
        );

        match self.accounts.credit(account_id, amount).await {
            Ok(_) => save_err,
            Err(credit_err) => {
                // Debit applied, no record, credit lost: the one state the
                // system must never be quiet about.
                error!(
                    account = account_id,
                    amount = %amount,
                    "reconciliation required: compensating credit failed ({credit_err}) \
                     after ledger write failure ({save_err})"
                );
                StoreError::inconsistent_state(account_id, amount)
            }
        }
    }

    /// Account read with bounded retries on persistence failures
    ///
    /// Reads are idempotent, so transient store failures are retried up to
    /// [`READ_RETRY_ATTEMPTS`] total attempts. Not-found passes through
    /// immediately.
    async fn get_account(&self, id: AccountId) -> Result<Account, StoreError> {
        let mut attempt = 1;
        loop {
            match self.accounts.get(id).await {
                Err(StoreError::Persistence { message }) if attempt < READ_RETRY_ATTEMPTS => {
                    warn!(account = id, attempt, "retrying account read: {message}");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Catalogue read with bounded retries on persistence failures
    async fn get_item(&self, id: ItemId) -> Result<CatalogueItem, StoreError> {
        let mut attempt = 1;
        loop {
            match self.catalogue.get(id).await {
                Err(StoreError::Persistence { message }) if attempt < READ_RETRY_ATTEMPTS => {
                    warn!(item = id, attempt, "retrying catalogue read: {message}");
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
