//! Error types for `clubhouse-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::event::Category;

#[derive(Debug, Error)]
pub enum Error {
  /// Input rejected before any store access.
  #[error("invalid {field}: {message}")]
  Validation {
    field:   String,
    message: String,
  },

  #[error("results already exist for {month} / {category}")]
  Conflict {
    month:    String,
    category: Category,
  },

  #[error("event not found: {0}")]
  NotFound(Uuid),

  /// An import document that is not shaped like a ledger snapshot.
  #[error("invalid snapshot: {0}")]
  InvalidSnapshot(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn validation(
    field: impl Into<String>,
    message: impl Into<String>,
  ) -> Self {
    Self::Validation { field: field.into(), message: message.into() }
  }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
