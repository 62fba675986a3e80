//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use clubhouse_core::Error as CoreError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler. Serialised as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("{0}")]
  Ledger(#[from] CoreError),

  #[error("not found: {0}")]
  NotFound(String),

  /// The body was not readable as JSON at all.
  #[error("invalid request body: {}", .0.body_text())]
  Body(#[from] JsonRejection),
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Body(r) if r.status() == StatusCode::PAYLOAD_TOO_LARGE => {
        StatusCode::PAYLOAD_TOO_LARGE
      }
      ApiError::Body(_) => StatusCode::BAD_REQUEST,
      ApiError::Ledger(e) => match e {
        CoreError::Validation { .. } | CoreError::InvalidSnapshot(_) => {
          StatusCode::BAD_REQUEST
        }
        CoreError::Conflict { .. } => StatusCode::CONFLICT,
        CoreError::NotFound(_) => StatusCode::NOT_FOUND,
        CoreError::Store(_) | CoreError::Serialization(_) => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
      },
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let message = match &self {
      ApiError::Ledger(CoreError::Conflict { month, category }) => format!(
        "results already exist for {month} / {category}; remove them first"
      ),
      ApiError::Ledger(CoreError::NotFound(_)) | ApiError::NotFound(_) => {
        "event not found".to_string()
      }
      // Storage failures are logged in full and reported opaquely.
      _ if status.is_server_error() => {
        tracing::error!(error = %self, "request failed");
        "internal server error".to_string()
      }
      other => other.to_string(),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
