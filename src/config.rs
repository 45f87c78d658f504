//! Seed file loading
//!
//! The server can bootstrap its in-memory stores from a JSON seed file passed
//! via `--seed`. The file carries plain account and catalogue entries; ids
//! are assigned by the stores on insert, so seed entries never specify them.
//!
//! ```json
//! {
//!   "accounts": [
//!     { "username": "ada", "email": "ada@example.com",
//!       "password": "c0ffee", "balance": "50.00" }
//!   ],
//!   "games": [
//!     { "title": "Hollow Depths", "genre": "Metroidvania",
//!       "developer": "Cave Nine", "release_date": "2023-05-12",
//!       "purchase_price": "40.00", "lease_price": "10.00",
//!       "description": "Descend, map, survive." }
//!   ]
//! }
//! ```

use crate::store::{AccountStore, CatalogueStore};
use crate::types::{Account, CatalogueItem};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

/// A seed file's contents
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub accounts: Vec<SeedAccount>,
    #[serde(default)]
    pub games: Vec<SeedGame>,
}

/// One account entry in a seed file
#[derive(Debug, Deserialize)]
pub struct SeedAccount {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub balance: Decimal,
}

/// One catalogue entry in a seed file
#[derive(Debug, Deserialize)]
pub struct SeedGame {
    pub title: String,
    pub genre: String,
    pub developer: String,
    pub release_date: NaiveDate,
    pub purchase_price: Decimal,
    pub lease_price: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Read and parse a seed file
pub fn load_seed(path: &Path) -> Result<SeedData> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))
}

/// Insert seed entries into the stores
///
/// Returns the number of (accounts, games) inserted. Fails on the first
/// entry the stores reject (duplicate username, non-positive price, ...),
/// since a partially applied seed is worse than a loud startup failure.
pub async fn apply_seed(
    seed: SeedData,
    accounts: &dyn AccountStore,
    catalogue: &dyn CatalogueStore,
) -> Result<(usize, usize)> {
    let mut inserted_accounts = 0;
    for entry in seed.accounts {
        accounts
            .insert(Account::with_balance(
                &entry.username,
                &entry.email,
                &entry.password,
                entry.balance,
            ))
            .await
            .with_context(|| format!("seed account '{}' rejected", entry.username))?;
        inserted_accounts += 1;
    }

    let mut inserted_games = 0;
    for entry in seed.games {
        catalogue
            .insert(CatalogueItem {
                id: 0,
                title: entry.title.clone(),
                genre: entry.genre,
                developer: entry.developer,
                release_date: entry.release_date,
                purchase_price: entry.purchase_price,
                lease_price: entry.lease_price,
                description: entry.description,
            })
            .await
            .with_context(|| format!("seed game '{}' rejected", entry.title))?;
        inserted_games += 1;
    }

    Ok((inserted_accounts, inserted_games))
}
