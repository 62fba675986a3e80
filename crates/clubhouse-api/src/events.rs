//! Handlers for `/events` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/events` | Optional `?year=all\|YYYY` |
//! | `POST`   | `/admin/events` | Body: [`EventInput`]; returns 201 + `{"event": ..}` |
//! | `DELETE` | `/admin/events/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use clubhouse_core::{
  event::{Event, EventInput},
  ledger::Ledger,
  store::EventStore,
  year::YearFilter,
};
use serde::Serialize;
use uuid::Uuid;

use crate::{error::ApiError, leaderboard::YearParams};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EventsResponse {
  pub year:   YearFilter,
  pub events: Vec<Event>,
}

/// `GET /events[?year=<year>]`
pub async fn list<S>(
  State(ledger): State<Arc<Ledger<S>>>,
  Query(params): Query<YearParams>,
) -> Result<Json<EventsResponse>, ApiError>
where
  S: EventStore,
{
  let year = params.filter()?;
  let events = ledger.list(&year).await?;
  Ok(Json(EventsResponse { year, events }))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EventResponse {
  pub event: Event,
}

/// `POST /admin/events`, body: `{"month": "2024-01", "category": "Stable
/// Ford", "winners": ["..", "..", ".."]}`
pub async fn create<S>(
  State(ledger): State<Arc<Ledger<S>>>,
  body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: EventStore,
{
  let Json(body) = body?;
  let event = ledger.create(EventInput::from_value(body)?).await?;
  tracing::info!(id = %event.id, month = %event.month, category = %event.category, "event recorded");
  Ok((StatusCode::CREATED, Json(EventResponse { event })))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
  pub ok: bool,
}

/// `DELETE /admin/events/{id}`
pub async fn delete_one<S>(
  State(ledger): State<Arc<Ledger<S>>>,
  Path(id): Path<String>,
) -> Result<Json<DeletedResponse>, ApiError>
where
  S: EventStore,
{
  // An id that is not a UUID cannot name a stored event.
  let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound(id))?;
  ledger.remove(id).await?;
  tracing::info!(%id, "event deleted");
  Ok(Json(DeletedResponse { ok: true }))
}
