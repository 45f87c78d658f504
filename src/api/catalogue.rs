//! Catalogue endpoints (`/api/games`)
//!
//! CRUD over catalogue items plus genre search. These routes are simple data
//! access; the transaction core only ever reads from the catalogue.

use crate::api::AppState;
use crate::types::{CatalogueItem, ItemId, StoreError};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

/// Item create/update request body
#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub title: String,
    pub genre: String,
    pub developer: String,
    pub release_date: NaiveDate,
    pub purchase_price: Decimal,
    pub lease_price: Decimal,
    #[serde(default)]
    pub description: String,
}

impl ItemRequest {
    fn into_item(self, id: ItemId) -> CatalogueItem {
        CatalogueItem {
            id,
            title: self.title,
            genre: self.genre,
            developer: self.developer,
            release_date: self.release_date,
            purchase_price: self.purchase_price,
            lease_price: self.lease_price,
            description: self.description,
        }
    }
}

/// Genre search query string
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub genre: String,
}

/// Build the `/api/games` router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/search", get(search_items))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}

/// `GET /api/games` — full catalogue
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<CatalogueItem>>, StoreError> {
    Ok(Json(state.catalogue.list().await?))
}

/// `GET /api/games/{id}`
async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<Json<CatalogueItem>, StoreError> {
    Ok(Json(state.catalogue.get(id).await?))
}

/// `GET /api/games/search?genre=` — genre substring match, case-insensitive
async fn search_items(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CatalogueItem>>, StoreError> {
    Ok(Json(state.catalogue.search_by_genre(&query.genre).await?))
}

/// `POST /api/games` — add an item to the catalogue
async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<ItemRequest>,
) -> Result<(StatusCode, Json<CatalogueItem>), StoreError> {
    let saved = state.catalogue.insert(request.into_item(0)).await?;
    info!(item = saved.id, title = %saved.title, "catalogue item added");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PUT /api/games/{id}` — replace an item
async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    Json(request): Json<ItemRequest>,
) -> Result<Json<CatalogueItem>, StoreError> {
    state.catalogue.get(id).await?;
    Ok(Json(state.catalogue.save(request.into_item(id)).await?))
}

/// `DELETE /api/games/{id}`
async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, StoreError> {
    state.catalogue.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
