//! Catalogue types for the game store engine
//!
//! This module defines the CatalogueItem structure describing a game on sale.
//! Catalogue items are read-only input to the transaction core.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalogue item identifier
pub type ItemId = u32;

/// A game in the store catalogue
///
/// Carries both pricing modes: the one-off purchase price and the price of a
/// 30-day lease. Both must be strictly positive; the catalogue store rejects
/// items that are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueItem {
    /// Store-assigned item id
    pub id: ItemId,

    /// Display title
    pub title: String,

    /// Genre label, matched by substring in catalogue searches
    pub genre: String,

    /// Developer / studio name
    pub developer: String,

    /// Original release date
    pub release_date: NaiveDate,

    /// Price of a permanent purchase (> 0)
    pub purchase_price: Decimal,

    /// Price of a 30-day lease (> 0)
    pub lease_price: Decimal,

    /// Free-form description
    pub description: String,
}

impl CatalogueItem {
    /// Whether both prices satisfy the strictly-positive invariant
    pub fn has_valid_prices(&self) -> bool {
        self.purchase_price > Decimal::ZERO && self.lease_price > Decimal::ZERO
    }
}
