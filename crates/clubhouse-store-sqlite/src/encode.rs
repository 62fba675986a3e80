//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings, categories by display name.

use chrono::{DateTime, Utc};
use clubhouse_core::event::{Category, Event, Month, Placement};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Event rows ───────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that produces a [`RawEvent`].
pub const EVENT_COLUMNS: &str =
  "event_id, month, category, first, second, third, created_at";

/// An `events` row as stored, before decoding.
pub struct RawEvent {
  pub event_id:   String,
  pub month:      String,
  pub category:   String,
  pub first:      String,
  pub second:     String,
  pub third:      String,
  pub created_at: String,
}

impl RawEvent {
  /// Read a row selected with [`EVENT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:   row.get(0)?,
      month:      row.get(1)?,
      category:   row.get(2)?,
      first:      row.get(3)?,
      second:     row.get(4)?,
      third:      row.get(5)?,
      created_at: row.get(6)?,
    })
  }

  pub fn from_event(event: &Event) -> Self {
    let [first, second, third] = event.placements.clone().map(|p| p.player);
    Self {
      event_id:   encode_uuid(event.id),
      month:      event.month.to_string(),
      category:   event.category.as_str().to_owned(),
      first,
      second,
      third,
      created_at: encode_dt(event.created_at),
    }
  }

  pub fn into_event(self) -> Result<Event> {
    let corrupt = |reason: String| Error::CorruptRow {
      id: self.event_id.clone(),
      reason,
    };
    let month = Month::parse(&self.month).map_err(|e| corrupt(e.to_string()))?;
    let category = Category::parse(&self.category).map_err(|e| corrupt(e.to_string()))?;

    Ok(Event {
      id: decode_uuid(&self.event_id)?,
      month,
      category,
      placements: [
        Placement { position: 1, player: self.first },
        Placement { position: 2, player: self.second },
        Placement { position: 3, player: self.third },
      ],
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
