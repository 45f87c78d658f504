//! Transaction endpoints (`/api/transactions`)
//!
//! The create handler is the wire entry to the transaction core. The kind
//! string is parsed before any store access (fail-fast on a malformed kind),
//! and the debit+record mutation is spawned onto the runtime so a client
//! disconnect cannot abandon it mid-flight — a started financial mutation
//! always runs to completion.

use crate::api::AppState;
use crate::types::{
    AccountId, ItemId, StoreError, TransactionId, TransactionKind, TransactionRecord,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

/// Create-transaction request body
///
/// `kind` travels as the string `"Purchase"` or `"Lease"`.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub account_id: AccountId,
    pub item_id: ItemId,
    pub kind: String,
}

/// Build the `/api/transactions` router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/{id}", get(get_transaction).delete(delete_transaction))
        .route("/user/{user_id}", get(transactions_for_account))
}

/// `POST /api/transactions` — charge an account for an item
async fn create_transaction(
    State(state): State<AppState>,
    Json(request): Json<CreateTransactionRequest>,
) -> Result<(StatusCode, Json<TransactionRecord>), StoreError> {
    // Validation order: kind first, before any store access.
    let kind: TransactionKind = request.kind.parse()?;

    // Detach the financial mutation from this request's lifetime. If the
    // client disconnects, axum drops the handler future, but the spawned
    // task keeps running until the debit and ledger write have settled.
    let processor = state.processor.clone();
    let record = tokio::spawn(async move {
        processor
            .create_transaction(request.account_id, request.item_id, kind)
            .await
    })
    .await
    .map_err(|join_err| StoreError::persistence(format!("transaction task failed: {join_err}")))??;

    Ok((StatusCode::CREATED, Json(record)))
}

/// `GET /api/transactions` — full ledger
async fn list_transactions(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransactionRecord>>, StoreError> {
    Ok(Json(state.ledger.list().await?))
}

/// `GET /api/transactions/{id}`
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> Result<Json<TransactionRecord>, StoreError> {
    Ok(Json(state.ledger.get(id).await?))
}

/// `GET /api/transactions/user/{user_id}` — one account's history
///
/// 404s on an unknown account rather than returning an empty list.
async fn transactions_for_account(
    State(state): State<AppState>,
    Path(user_id): Path<AccountId>,
) -> Result<Json<Vec<TransactionRecord>>, StoreError> {
    state.accounts.get(user_id).await?;
    Ok(Json(state.ledger.list_by_account(user_id).await?))
}

/// `DELETE /api/transactions/{id}`
async fn delete_transaction(
    State(state): State<AppState>,
    Path(id): Path<TransactionId>,
) -> Result<StatusCode, StoreError> {
    state.ledger.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
