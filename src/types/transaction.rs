//! Transaction types for the game store engine
//!
//! This module defines the transaction kind and the immutable transaction
//! record produced by the processor.

use crate::types::{AccountId, ItemId, StoreError};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier
///
/// Assigned by the transaction ledger on insert.
pub type TransactionId = u32;

/// The two ways a game can be charged
///
/// A `Purchase` grants the game permanently; a `Lease` grants it for 30
/// calendar days from the transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// One-off charge at the item's purchase price, no expiry
    Purchase,

    /// Charge at the item's lease price, expiring 30 days after the
    /// transaction date
    Lease,
}

impl FromStr for TransactionKind {
    type Err = StoreError;

    /// Parse the wire-level kind string
    ///
    /// Only the exact strings `Purchase` and `Lease` are accepted; anything
    /// else is an [`StoreError::InvalidKind`]. This runs at the request
    /// boundary before any store access, so a malformed kind fails first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Purchase" => Ok(TransactionKind::Purchase),
            "Lease" => Ok(TransactionKind::Lease),
            other => Err(StoreError::invalid_kind(other)),
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Purchase => write!(f, "Purchase"),
            TransactionKind::Lease => write!(f, "Lease"),
        }
    }
}

/// A persisted charge against an account
///
/// Created exactly once by the transaction processor and immutable
/// thereafter (except deletion). The `amount` is a snapshot of the catalogue
/// price at charge time, not a live reference — later catalogue price changes
/// never alter historical records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Ledger-assigned transaction id
    pub id: TransactionId,

    /// Account that was charged
    pub account_id: AccountId,

    /// Catalogue item that was bought or leased
    pub item_id: ItemId,

    /// Purchase or lease
    pub kind: TransactionKind,

    /// Amount charged, snapshot of the price at charge time
    pub amount: Decimal,

    /// Calendar date of the charge (UTC)
    pub transaction_date: NaiveDate,

    /// Lease expiry date, exactly 30 calendar days after the transaction
    /// date; absent for purchases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case::purchase("Purchase", TransactionKind::Purchase)]
    #[case::lease("Lease", TransactionKind::Lease)]
    fn test_kind_parses_exact_strings(#[case] input: &str, #[case] expected: TransactionKind) {
        assert_eq!(input.parse::<TransactionKind>().unwrap(), expected);
    }

    #[rstest]
    #[case::lowercase("purchase")]
    #[case::uppercase("LEASE")]
    #[case::unknown("Rental")]
    #[case::empty("")]
    fn test_kind_rejects_malformed_strings(#[case] input: &str) {
        let err = input.parse::<TransactionKind>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidKind { .. }));
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [TransactionKind::Purchase, TransactionKind::Lease] {
            assert_eq!(kind.to_string().parse::<TransactionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_purchase_record_serializes_without_expiry_field() {
        let record = TransactionRecord {
            id: 1,
            account_id: 2,
            item_id: 3,
            kind: TransactionKind::Purchase,
            amount: dec!(40.00),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: None,
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("expiry_date"));
    }

    #[test]
    fn test_lease_record_serializes_expiry_field() {
        let record = TransactionRecord {
            id: 1,
            account_id: 2,
            item_id: 3,
            kind: TransactionKind::Lease,
            amount: dec!(10.00),
            transaction_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            expiry_date: Some(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap()),
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"expiry_date\":\"2024-02-14\""));
    }
}
