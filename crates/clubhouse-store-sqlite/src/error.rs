//! Error type for `clubhouse-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A row that does not decode into a valid event.
  #[error("corrupt event row {id}: {reason}")]
  CorruptRow { id: String, reason: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
