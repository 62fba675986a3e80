//! Whole-ledger export and import.
//!
//! The snapshot document is `{ "players": [..], "events": [..] }`. `players`
//! is derived from the events on export and ignored on import.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  event::{Event, normalize_winners},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
  #[serde(default)]
  pub players: Vec<String>,
  pub events:  Vec<Event>,
}

/// Distinct player names across `events`, sorted by ordinal comparison.
pub fn players_of<'a, I>(events: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a Event>,
{
  let names: BTreeSet<&str> = events.into_iter().flat_map(Event::players).collect();
  names.into_iter().map(str::to_owned).collect()
}

impl LedgerSnapshot {
  pub fn from_events(events: Vec<Event>) -> Self {
    Self { players: players_of(&events), events }
  }

  /// Parse a snapshot document. Anything that is not an object with an
  /// `events` array of well-formed events is an [`Error::InvalidSnapshot`].
  pub fn from_json(raw: &str) -> Result<Self> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidSnapshot(e.to_string()))
  }

  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    serde_json::from_value(value).map_err(|e| Error::InvalidSnapshot(e.to_string()))
  }

  pub fn to_json_pretty(&self) -> Result<String> {
    Ok(serde_json::to_string_pretty(self)?)
  }

  /// Check every event against the same rules `create` enforces, plus
  /// uniqueness of ids and of `(month, category)` across the document.
  /// Player names are normalized in the returned events.
  pub fn into_validated_events(self) -> Result<Vec<Event>> {
    let mut ids = HashSet::new();
    let mut slots = HashSet::new();
    let mut events = Vec::with_capacity(self.events.len());

    for (i, mut event) in self.events.into_iter().enumerate() {
      let field = format!("events[{i}]");

      let positions: Vec<u8> = event.placements.iter().map(|p| p.position).collect();
      if positions != [1, 2, 3] {
        return Err(Error::Validation {
          field:   format!("{field}.placements"),
          message: format!("positions must be 1, 2, 3 in order, got {positions:?}"),
        });
      }

      let names: Vec<&str> = event.players().collect();
      let normalized = normalize_winners(&names, &format!("{field}.placements"))?;
      for (placement, name) in event.placements.iter_mut().zip(normalized) {
        placement.player = name;
      }

      if !ids.insert(event.id) {
        return Err(Error::Validation {
          field,
          message: format!("duplicate event id {}", event.id),
        });
      }
      if !slots.insert((event.month.clone(), event.category)) {
        return Err(Error::Validation {
          field,
          message: format!(
            "more than one result set for {} / {}",
            event.month, event.category
          ),
        });
      }

      events.push(event);
    }

    Ok(events)
  }
}
