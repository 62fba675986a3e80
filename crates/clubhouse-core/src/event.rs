//! Event types: one recorded result set for a month and category.
//!
//! Events are never updated. Correcting a mistake means deleting the event
//! and recording it again.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

/// Number of ranked positions in every event.
pub const PLACES: usize = 3;

// ─── Category ────────────────────────────────────────────────────────────────

/// The scoring format a result set was played under. Closed set.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
pub enum Category {
  #[serde(rename = "Net Stroke Play")]
  #[strum(serialize = "Net Stroke Play")]
  NetStrokePlay,
  #[serde(rename = "Stable Ford")]
  #[strum(serialize = "Stable Ford")]
  StableFord,
}

impl Category {
  /// Every category, in display order.
  pub const ALL: [Category; 2] = [Category::NetStrokePlay, Category::StableFord];

  pub fn as_str(self) -> &'static str { self.into() }

  /// Parse the display name, reporting a field-level validation error.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s)
      .map_err(|_| Error::validation("category", format!("unknown category {s:?}")))
  }
}

// ─── Month ───────────────────────────────────────────────────────────────────

/// A competition period in `YYYY-MM` form.
#[derive(
  Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Month(String);

impl Month {
  pub fn parse(s: &str) -> Result<Self> {
    let bytes = s.as_bytes();
    let shaped = bytes.len() == 7
      && bytes[4] == b'-'
      && bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || b.is_ascii_digit());
    if !shaped {
      return Err(Error::validation("month", "must be in YYYY-MM format"));
    }
    let mm: u8 = s[5..].parse().unwrap_or(0);
    if !(1..=12).contains(&mm) {
      return Err(Error::validation("month", "month must be between 01 and 12"));
    }
    Ok(Self(s.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// The four-digit year component.
  pub fn year(&self) -> &str { &self.0[..4] }
}

impl FromStr for Month {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(s) }
}

impl TryFrom<String> for Month {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(&s) }
}

impl From<Month> for String {
  fn from(m: Month) -> Self { m.0 }
}

impl fmt::Display for Month {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Player names ────────────────────────────────────────────────────────────

/// Canonical form of a player name: trimmed, with every internal whitespace
/// run collapsed to one space. Aggregation keys on this string.
pub fn normalize_name(name: &str) -> String {
  name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize three finishers and check they are non-empty and distinct.
///
/// `field` names the input in the returned validation error.
pub fn normalize_winners<S: AsRef<str>>(
  winners: &[S],
  field: &str,
) -> Result<[String; PLACES]> {
  let normalized: Vec<String> =
    winners.iter().map(|w| normalize_name(w.as_ref())).collect();

  let normalized: [String; PLACES] = normalized
    .try_into()
    .map_err(|_| Error::validation(field, "three winners are required"))?;

  if normalized.iter().any(String::is_empty) {
    return Err(Error::validation(field, "all winners must have names"));
  }
  if normalized[0] == normalized[1]
    || normalized[0] == normalized[2]
    || normalized[1] == normalized[2]
  {
    return Err(Error::validation(field, "placements must be different players"));
  }
  Ok(normalized)
}

// ─── Placement ───────────────────────────────────────────────────────────────

/// One finishing position within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
  /// 1, 2 or 3.
  pub position: u8,
  pub player:   String,
}

// ─── Event ───────────────────────────────────────────────────────────────────

/// A recorded result set. Placements are always stored in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  pub id:         Uuid,
  pub month:      Month,
  pub category:   Category,
  pub placements: [Placement; PLACES],
  /// Informational only; never used in ranking.
  pub created_at: DateTime<Utc>,
}

impl Event {
  pub fn year(&self) -> &str { self.month.year() }

  /// Player names in position order.
  pub fn players(&self) -> impl Iterator<Item = &str> {
    self.placements.iter().map(|p| p.player.as_str())
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Unvalidated input to [`crate::ledger::Ledger::create`], exactly as a
/// client supplied it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventInput {
  #[serde(default)]
  pub month:    String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub winners:  Vec<String>,
}

impl EventInput {
  pub fn new(
    month: impl Into<String>,
    category: impl Into<String>,
    winners: impl IntoIterator<Item = impl Into<String>>,
  ) -> Self {
    Self {
      month:    month.into(),
      category: category.into(),
      winners:  winners.into_iter().map(Into::into).collect(),
    }
  }

  /// Read a request body field by field, so a wrongly typed field is a
  /// [`Error::Validation`] naming that field. Absent and `null` fields read
  /// as empty and are caught later by [`EventInput::validate`].
  pub fn from_value(value: serde_json::Value) -> Result<Self> {
    fn field<T>(map: &mut serde_json::Map<String, serde_json::Value>, name: &str) -> Result<T>
    where
      T: DeserializeOwned + Default,
    {
      match map.remove(name) {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v).map_err(|e| Error::validation(name, e.to_string())),
      }
    }

    let serde_json::Value::Object(mut map) = value else {
      return Err(Error::validation("body", "expected a JSON object"));
    };
    Ok(Self {
      month:    field(&mut map, "month")?,
      category: field(&mut map, "category")?,
      winners:  field(&mut map, "winners")?,
    })
  }

  /// Check every precondition of `create`, in field order.
  pub fn validate(&self) -> Result<NewEvent> {
    let month = Month::parse(&self.month)?;
    let category = Category::parse(&self.category)?;
    let winners = normalize_winners(&self.winners, "winners")?;
    Ok(NewEvent { month, category, winners })
  }
}

/// A validated event that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
  pub month:    Month,
  pub category: Category,
  /// Normalized names, first place first.
  pub winners:  [String; PLACES],
}

impl NewEvent {
  /// Assign identity and creation time.
  pub fn into_event(self, id: Uuid, created_at: DateTime<Utc>) -> Event {
    let [first, second, third] = self.winners;
    Event {
      id,
      month: self.month,
      category: self.category,
      placements: [
        Placement { position: 1, player: first },
        Placement { position: 2, player: second },
        Placement { position: 3, player: third },
      ],
      created_at,
    }
  }
}
