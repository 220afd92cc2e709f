//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::completion::CompletionError;

/// An error returned by an API handler.
///
/// Validation and conflict errors carry the human-readable message shown
/// to the caller; store failures are logged at this boundary and surfaced
/// as an opaque server error.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Validation(String),

  #[error("{0}")]
  Conflict(String),

  #[error("Invalid credentials")]
  InvalidCredentials,

  #[error("{0}")]
  Completion(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<CompletionError> for ApiError {
  fn from(e: CompletionError) -> Self {
    ApiError::Completion(e.to_string())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::Validation(m) | ApiError::Conflict(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
      ApiError::Completion(m) => {
        tracing::error!(error = %m, "completion request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, m.clone())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal storage error".to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
