//! Ranked point tables, derived from events and never stored.
//!
//! Tables are sorted by points descending, then by player name ascending
//! using ordinal (byte-wise, case-sensitive) comparison. A player's rank is
//! their 1-based index in the table; tied players do not share a rank.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::{
  event::{Category, Event, normalize_name},
  scoring::points_for,
};

/// One row of a ranked table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
  pub player: String,
  pub points: u32,
}

/// The overall table plus one table per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
  pub overall:     Vec<Standing>,
  /// Always holds every [`Category`], possibly with an empty table.
  pub by_category: BTreeMap<Category, Vec<Standing>>,
}

impl Rankings {
  pub fn category(&self, category: Category) -> &[Standing] {
    self.by_category.get(&category).map(Vec::as_slice).unwrap_or_default()
  }

  /// The overall leader, if anyone has scored.
  pub fn leader(&self) -> Option<&Standing> { self.overall.first() }
}

/// Pair each row with its 1-based display rank.
pub fn ranked(table: &[Standing]) -> impl Iterator<Item = (usize, &Standing)> {
  table.iter().enumerate().map(|(i, s)| (i + 1, s))
}

/// Aggregate placements into ranked tables.
pub fn compute_rankings<'a, I>(events: I) -> Rankings
where
  I: IntoIterator<Item = &'a Event>,
{
  let mut overall: HashMap<String, u32> = HashMap::new();
  let mut by_category: BTreeMap<Category, HashMap<String, u32>> =
    Category::ALL.into_iter().map(|c| (c, HashMap::new())).collect();

  for event in events {
    for placement in &event.placements {
      let player = normalize_name(&placement.player);
      let points = points_for(placement.position);
      *overall.entry(player.clone()).or_default() += points;
      *by_category
        .entry(event.category)
        .or_default()
        .entry(player)
        .or_default() += points;
    }
  }

  Rankings {
    overall:     into_table(overall),
    by_category: by_category
      .into_iter()
      .map(|(c, totals)| (c, into_table(totals)))
      .collect(),
  }
}

fn into_table(totals: HashMap<String, u32>) -> Vec<Standing> {
  let mut table: Vec<Standing> = totals
    .into_iter()
    .map(|(player, points)| Standing { player, points })
    .collect();
  table.sort_by(|a, b| b.points.cmp(&a.points).then_with(|| a.player.cmp(&b.player)));
  table
}
