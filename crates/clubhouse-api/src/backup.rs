//! Whole-ledger export and import.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/admin/export` | `{"players": [..], "events": [..]}` |
//! | `POST` | `/admin/import` | Same document; replaces the ledger |

use std::sync::Arc;

use axum::{
  Json,
  extract::{State, rejection::JsonRejection},
};
use clubhouse_core::{ledger::Ledger, snapshot::LedgerSnapshot, store::EventStore};
use serde::Serialize;

use crate::error::ApiError;

/// `GET /admin/export`
pub async fn export<S>(
  State(ledger): State<Arc<Ledger<S>>>,
) -> Result<Json<LedgerSnapshot>, ApiError>
where
  S: EventStore,
{
  Ok(Json(ledger.export().await?))
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
  pub imported: usize,
}

/// `POST /admin/import`. The body is parsed leniently as JSON first so that
/// shape errors come back as our own `{"error": ..}` documents.
pub async fn import<S>(
  State(ledger): State<Arc<Ledger<S>>>,
  body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<ImportResponse>, ApiError>
where
  S: EventStore,
{
  let Json(body) = body?;
  let snapshot = LedgerSnapshot::from_value(body)?;
  let imported = ledger.import(snapshot).await?;
  tracing::info!(imported, "ledger imported");
  Ok(Json(ImportResponse { imported }))
}
