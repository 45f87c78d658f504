//! Error-to-response mapping for the HTTP boundary
//!
//! Validation and not-found errors are returned as structured client errors
//! with actionable detail. Internal failures (persistence, arithmetic,
//! inconsistent state) are reported generically so storage details never
//! leak; their full detail goes to the server log instead.

use crate::types::StoreError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{error, warn};

/// Client-facing error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong
    pub error: String,
}

/// Status code and client-facing message for an error
///
/// Kept separate from `IntoResponse` so the mapping is testable without
/// building a response.
pub fn status_and_message(err: &StoreError) -> (StatusCode, String) {
    match err {
        StoreError::InvalidKind { .. }
        | StoreError::InsufficientFunds { .. }
        | StoreError::UsernameTaken { .. }
        | StoreError::EmailTaken { .. }
        | StoreError::NegativeBalance { .. }
        | StoreError::NonPositivePrice { .. } => (StatusCode::BAD_REQUEST, err.to_string()),

        StoreError::AccountNotFound { .. }
        | StoreError::UsernameNotFound { .. }
        | StoreError::ItemNotFound { .. }
        | StoreError::TransactionNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),

        StoreError::InvalidCredentials => (StatusCode::UNAUTHORIZED, err.to_string()),

        // Generic bodies: storage details stay in the server log.
        StoreError::Persistence { .. } | StoreError::ArithmeticOverflow { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal storage error".to_string(),
        ),

        StoreError::InconsistentState { account, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!(
                "Transaction state for account {account} requires manual reconciliation"
            ),
        ),
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = status_and_message(&self);

        if status.is_server_error() {
            error!(status = %status, "request failed: {self}");
        } else {
            warn!(status = %status, "request rejected: {self}");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
