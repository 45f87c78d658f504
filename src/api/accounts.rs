//! Account endpoints (`/api/users`)
//!
//! Registration, credential checks, profile management, and account closure.
//! Login is stateless: credentials are verified and the account snapshot is
//! returned; no session or cookie is issued. Closing an account cascades to
//! its transaction records.

use crate::api::AppState;
use crate::types::{Account, AccountId, StoreError};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// Credential hash as stored at registration
    pub password: String,
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    /// Credential hash; the hashing scheme is owned by the client
    pub password: String,
    /// Optional starting balance, defaults to zero
    #[serde(default)]
    pub balance: Option<Decimal>,
}

/// Profile edit request body (full replacement)
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub balance: Decimal,
}

/// Build the `/api/users` router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(register))
        .route("/login", post(login))
        .route(
            "/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}

/// `POST /api/users/login` — verify credentials, return the account
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Account>, StoreError> {
    let account = state
        .accounts
        .get_by_username(&request.username)
        .await
        .map_err(|err| match err {
            // Don't reveal whether the username exists.
            StoreError::UsernameNotFound { .. } => StoreError::InvalidCredentials,
            other => other,
        })?;

    if account.password_hash != request.password {
        warn!(username = %request.username, "failed login attempt");
        return Err(StoreError::InvalidCredentials);
    }

    info!(account = account.id, "successful login");
    Ok(Json(account))
}

/// `GET /api/users` — all accounts
async fn list_accounts(State(state): State<AppState>) -> Result<Json<Vec<Account>>, StoreError> {
    Ok(Json(state.accounts.list().await?))
}

/// `GET /api/users/{id}`
async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<Json<Account>, StoreError> {
    Ok(Json(state.accounts.get(id).await?))
}

/// `POST /api/users` — register a new account
///
/// Rejects duplicate usernames/emails and negative starting balances.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Account>), StoreError> {
    let account = Account::with_balance(
        &request.username,
        &request.email,
        &request.password,
        request.balance.unwrap_or(Decimal::ZERO),
    );

    let saved = state.accounts.insert(account).await?;
    info!(account = saved.id, username = %saved.username, "account registered");
    Ok((StatusCode::CREATED, Json(saved)))
}

/// `PUT /api/users/{id}` — replace profile fields, including balance
async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    Json(request): Json<UpdateRequest>,
) -> Result<Json<Account>, StoreError> {
    // Upsert semantics would silently create accounts on typo'd ids; the
    // edit surface requires the account to already exist.
    state.accounts.get(id).await?;

    let account = Account {
        id,
        username: request.username,
        email: request.email,
        password_hash: request.password,
        balance: request.balance,
    };

    Ok(Json(state.accounts.save(account).await?))
}

/// `DELETE /api/users/{id}` — close the account and cascade its records
async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> Result<StatusCode, StoreError> {
    state.accounts.delete(id).await?;
    let removed = state.ledger.delete_by_account(id).await?;
    info!(
        account = id,
        cascaded = removed,
        "account closed, transaction records removed"
    );
    Ok(StatusCode::NO_CONTENT)
}
