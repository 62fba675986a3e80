//! Handlers for the read-only leaderboard endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/leaderboard` | Optional `?year=all\|YYYY` |
//! | `GET`  | `/years` | Years with results, newest first |
//! | `GET`  | `/players` | Known player names, for autocomplete |

use std::{collections::BTreeMap, sync::Arc};

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::{DateTime, Utc};
use clubhouse_core::{
  event::Category,
  ledger::Ledger,
  rankings::Rankings,
  scoring,
  store::EventStore,
  year::YearFilter,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// `?year=` query parameter shared by the read endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct YearParams {
  pub year: Option<String>,
}

impl YearParams {
  pub fn filter(&self) -> Result<YearFilter, ApiError> {
    Ok(YearFilter::parse(self.year.as_deref())?)
  }
}

// ─── Leaderboard ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
  pub year:       YearFilter,
  pub categories: [Category; 2],
  /// Scoring policy keyed by position, e.g. `{"1": 3, "2": 2, "3": 1}`.
  pub points:     BTreeMap<String, u32>,
  #[serde(flatten)]
  pub rankings:   Rankings,
  pub updated_at: DateTime<Utc>,
}

/// `GET /leaderboard[?year=<year>]`
pub async fn leaderboard<S>(
  State(ledger): State<Arc<Ledger<S>>>,
  Query(params): Query<YearParams>,
) -> Result<Json<LeaderboardResponse>, ApiError>
where
  S: EventStore,
{
  let year = params.filter()?;
  let rankings = ledger.rankings(&year).await?;

  Ok(Json(LeaderboardResponse {
    year,
    categories: Category::ALL,
    points: scoring::table()
      .map(|(pos, pts)| (pos.to_string(), pts))
      .collect(),
    rankings,
    updated_at: Utc::now(),
  }))
}

// ─── Years & players ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct YearsResponse {
  pub years: Vec<String>,
}

/// `GET /years`
pub async fn years<S>(
  State(ledger): State<Arc<Ledger<S>>>,
) -> Result<Json<YearsResponse>, ApiError>
where
  S: EventStore,
{
  Ok(Json(YearsResponse { years: ledger.years().await? }))
}

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
  pub players: Vec<String>,
}

/// `GET /players`
pub async fn players<S>(
  State(ledger): State<Arc<Ledger<S>>>,
) -> Result<Json<PlayersResponse>, ApiError>
where
  S: EventStore,
{
  Ok(Json(PlayersResponse { players: ledger.players().await? }))
}
