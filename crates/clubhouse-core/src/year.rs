//! Year scoping for event lists and rankings.

use std::{collections::BTreeSet, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, event::Event};

/// Which events a read covers: everything, or a single calendar year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum YearFilter {
  #[default]
  All,
  /// Four ASCII digits, e.g. `"2024"`.
  Year(String),
}

impl YearFilter {
  /// Parse a query value. Absent, empty and `"all"` mean every year.
  pub fn parse(s: Option<&str>) -> Result<Self> {
    match s.map(str::trim) {
      None | Some("") | Some("all") => Ok(Self::All),
      Some(y) if y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit()) => {
        Ok(Self::Year(y.to_owned()))
      }
      Some(other) => Err(Error::Validation {
        field:   "year".into(),
        message: format!("expected \"all\" or a four-digit year, got {other:?}"),
      }),
    }
  }

  pub fn matches(&self, event: &Event) -> bool {
    match self {
      Self::All => true,
      Self::Year(y) => event.year() == y,
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::All => "all",
      Self::Year(y) => y,
    }
  }
}

impl FromStr for YearFilter {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::parse(Some(s)) }
}

impl TryFrom<String> for YearFilter {
  type Error = Error;

  fn try_from(s: String) -> Result<Self> { Self::parse(Some(&s)) }
}

impl From<YearFilter> for String {
  fn from(f: YearFilter) -> Self { f.as_str().to_owned() }
}

impl fmt::Display for YearFilter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Distinct years that have at least one event, newest first.
pub fn years_present<'a, I>(events: I) -> Vec<String>
where
  I: IntoIterator<Item = &'a Event>,
{
  let years: BTreeSet<&str> = events.into_iter().map(Event::year).collect();
  let mut years: Vec<String> = years.into_iter().map(str::to_owned).collect();
  years.sort_by_key(|y| std::cmp::Reverse(y.parse::<u32>().unwrap_or(0)));
  years
}

/// The events a filter keeps, in their original order.
pub fn filter_by_year<'a, I>(
  events: I,
  filter: &'a YearFilter,
) -> impl Iterator<Item = &'a Event>
where
  I: IntoIterator<Item = &'a Event>,
  I::IntoIter: 'a,
{
  events.into_iter().filter(move |e| filter.matches(e))
}
