//! Gateway errors and their HTTP rendering.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  /// The server has no signing secret or password hash configured.
  #[error("admin access is not configured")]
  NotConfigured,
  #[error("token error: {0}")]
  Token(#[from] jsonwebtoken::errors::Error),
  #[error("invalid request body: {0}")]
  BadRequest(String),
  /// A configuration value outside its allowed range.
  #[error("invalid configuration: {0}")]
  InvalidConfig(String),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res
          .headers_mut()
          .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        res
      }
      Error::NotConfigured => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "not configured" })),
      )
        .into_response(),
      Error::BadRequest(_) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": self.to_string() })),
      )
        .into_response(),
      Error::InvalidConfig(_) | Error::Token(_) => {
        tracing::error!(error = %self, "request failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "error": "internal server error" })),
        )
          .into_response()
      }
    }
  }
}
