//! In-memory catalogue store
//!
//! Thread-safe implementation of [`CatalogueStore`] backed by `DashMap`.
//! The catalogue is read-only from the transaction core's perspective; the
//! write paths serve the management API and the seed loader.

use crate::store::CatalogueStore;
use crate::types::{CatalogueItem, ItemId, StoreError};
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};

/// Thread-safe in-memory catalogue
#[derive(Debug, Default)]
pub struct InMemoryCatalogueStore {
    /// Items keyed by id
    items: DashMap<ItemId, CatalogueItem>,

    /// Highest id handed out so far
    next_id: AtomicU32,
}

impl InMemoryCatalogueStore {
    /// Create an empty catalogue
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogueStore for InMemoryCatalogueStore {
    async fn get(&self, id: ItemId) -> Result<CatalogueItem, StoreError> {
        self.items
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StoreError::item_not_found(id))
    }

    async fn search_by_genre(&self, genre: &str) -> Result<Vec<CatalogueItem>, StoreError> {
        let needle = genre.to_lowercase();
        let mut matches: Vec<CatalogueItem> = self
            .items
            .iter()
            .filter(|entry| entry.value().genre.to_lowercase().contains(&needle))
            .map(|entry| entry.value().clone())
            .collect();
        matches.sort_by_key(|item| item.id);
        Ok(matches)
    }

    async fn insert(&self, mut item: CatalogueItem) -> Result<CatalogueItem, StoreError> {
        if !item.has_valid_prices() {
            return Err(StoreError::NonPositivePrice {
                title: item.title.clone(),
            });
        }

        item.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn save(&self, item: CatalogueItem) -> Result<CatalogueItem, StoreError> {
        if !item.has_valid_prices() {
            return Err(StoreError::NonPositivePrice {
                title: item.title.clone(),
            });
        }

        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        self.items
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::item_not_found(id))
    }

    async fn list(&self) -> Result<Vec<CatalogueItem>, StoreError> {
        let mut items: Vec<CatalogueItem> = self
            .items
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|item| item.id);
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn item(title: &str, genre: &str) -> CatalogueItem {
        CatalogueItem {
            id: 0,
            title: title.to_string(),
            genre: genre.to_string(),
            developer: "Cave Nine".to_string(),
            release_date: NaiveDate::from_ymd_opt(2023, 5, 12).unwrap(),
            purchase_price: dec!(40.00),
            lease_price: dec!(10.00),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_get_round_trips() {
        let store = InMemoryCatalogueStore::new();

        let saved = store.insert(item("Hollow Depths", "Metroidvania")).await.unwrap();
        assert_eq!(saved.id, 1);

        let fetched = store.get(saved.id).await.unwrap();
        assert_eq!(fetched, saved);
    }

    #[tokio::test]
    async fn test_get_unknown_item() {
        let store = InMemoryCatalogueStore::new();
        let result = store.get(404).await;
        assert!(matches!(result, Err(StoreError::ItemNotFound { item: 404 })));
    }

    #[tokio::test]
    async fn test_insert_rejects_non_positive_prices() {
        let store = InMemoryCatalogueStore::new();

        let mut free = item("Freebie", "Puzzle");
        free.purchase_price = dec!(0.00);

        let result = store.insert(free).await;
        assert!(matches!(result, Err(StoreError::NonPositivePrice { .. })));
    }

    #[tokio::test]
    async fn test_search_by_genre_is_case_insensitive_substring() {
        let store = InMemoryCatalogueStore::new();
        store.insert(item("Hollow Depths", "Metroidvania")).await.unwrap();
        store.insert(item("Star Charter", "Space RPG")).await.unwrap();
        store.insert(item("Dungeon Ledger", "rpg")).await.unwrap();

        let hits = store.search_by_genre("RPG").await.unwrap();

        let titles: Vec<&str> = hits.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Star Charter", "Dungeon Ledger"]);
    }

    #[tokio::test]
    async fn test_search_with_no_matches_is_empty() {
        let store = InMemoryCatalogueStore::new();
        store.insert(item("Hollow Depths", "Metroidvania")).await.unwrap();

        let hits = store.search_by_genre("racing").await.unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn test_save_updates_price_in_place() {
        let store = InMemoryCatalogueStore::new();
        let mut saved = store.insert(item("Hollow Depths", "Metroidvania")).await.unwrap();

        saved.purchase_price = dec!(60.00);
        store.save(saved.clone()).await.unwrap();

        assert_eq!(store.get(saved.id).await.unwrap().purchase_price, dec!(60.00));
    }

    #[tokio::test]
    async fn test_delete_removes_item() {
        let store = InMemoryCatalogueStore::new();
        let saved = store.insert(item("Hollow Depths", "Metroidvania")).await.unwrap();

        store.delete(saved.id).await.unwrap();
        assert!(matches!(
            store.get(saved.id).await,
            Err(StoreError::ItemNotFound { .. })
        ));
    }
}
