//! Plain-text tables for terminal output.

use clubhouse_core::{
  event::{Category, Event},
  rankings::{Rankings, Standing, ranked},
  scoring,
};

fn line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
  let padded: Vec<String> = cells
    .zip(widths)
    .map(|(c, &w)| format!("{c:<w$}"))
    .collect();
  padded.join("  ").trim_end().to_string()
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header row.
fn table(header: &[&str], rows: &[Vec<String>]) -> String {
  let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
  for row in rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = line(header.iter().copied(), &widths);
  out.push('\n');
  let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
  out.push_str(&rule.join("  "));
  out.push('\n');
  for row in rows {
    out.push_str(&line(row.iter().map(String::as_str), &widths));
    out.push('\n');
  }
  out
}

pub fn events(events: &[Event]) -> String {
  if events.is_empty() {
    return "no events recorded\n".to_string();
  }
  let rows: Vec<Vec<String>> = events
    .iter()
    .map(|e| {
      let mut row = vec![e.month.to_string(), e.category.to_string()];
      row.extend(e.placements.iter().map(|p| p.player.clone()));
      row.push(e.id.to_string());
      row
    })
    .collect();
  table(&["MONTH", "CATEGORY", "1ST", "2ND", "3RD", "ID"], &rows)
}

pub fn standings(title: &str, table_rows: &[Standing]) -> String {
  let mut out = format!("{title}\n");
  if table_rows.is_empty() {
    out.push_str("  (no results)\n");
    return out;
  }
  let rows: Vec<Vec<String>> = ranked(table_rows)
    .map(|(rank, s)| vec![rank.to_string(), s.player.clone(), s.points.to_string()])
    .collect();
  out.push_str(&table(&["#", "PLAYER", "POINTS"], &rows));
  out
}

/// The whole leaderboard, or a single category when `only` is set.
pub fn leaderboard(year: &str, rankings: &Rankings, only: Option<Category>) -> String {
  let policy: Vec<String> = scoring::table()
    .map(|(pos, pts)| format!("{pos}={pts}"))
    .collect();
  let mut out = format!("Leaderboard ({year}); points {}\n\n", policy.join(" "));

  match only {
    Some(c) => out.push_str(&standings(c.as_str(), rankings.category(c))),
    None => {
      out.push_str(&standings("Overall", &rankings.overall));
      for c in Category::ALL {
        out.push('\n');
        out.push_str(&standings(c.as_str(), rankings.category(c)));
      }
    }
  }
  out
}

/// One value per line.
pub fn list(items: &[String], empty: &str) -> String {
  if items.is_empty() {
    return format!("{empty}\n");
  }
  let mut out = items.join("\n");
  out.push('\n');
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  use chrono::Utc;
  use clubhouse_core::{event::EventInput, rankings::compute_rankings};
  use uuid::Uuid;

  fn event(month: &str, category: &str, winners: [&str; 3]) -> Event {
    EventInput::new(month, category, winners)
      .validate()
      .unwrap()
      .into_event(Uuid::nil(), Utc::now())
  }

  #[test]
  fn table_pads_columns() {
    let out = table(
      &["A", "BB"],
      &[vec!["long".into(), "x".into()], vec!["y".into(), "z".into()]],
    );
    assert_eq!(out, "A     BB\n----  --\nlong  x\ny     z\n");
  }

  #[test]
  fn standings_are_ranked_positionally() {
    let r = compute_rankings(&[
      event("2024-01", "Stable Ford", ["Bob", "Carol", "Dan"]),
      event("2024-02", "Stable Ford", ["Alice", "Dan", "Carol"]),
    ]);
    let out = standings("Overall", &r.overall);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Overall");
    assert_eq!(lines[1], "#  PLAYER  POINTS");
    assert_eq!(lines[3], "1  Alice   3");
    assert_eq!(lines[4], "2  Bob     3");
    assert_eq!(lines[5], "3  Carol   3");
    assert_eq!(lines[6], "4  Dan     3");
  }

  #[test]
  fn leaderboard_lists_every_category() {
    let r = compute_rankings(&[event("2024-01", "Net Stroke Play", ["A", "B", "C"])]);
    let out = leaderboard("all", &r, None);
    assert!(out.starts_with("Leaderboard (all); points 1=3 2=2 3=1\n"));
    assert!(out.contains("Net Stroke Play\n#"));
    assert!(out.contains("Stable Ford\n  (no results)"));

    let only = leaderboard("2024", &r, Some(Category::StableFord));
    assert!(!only.contains("Overall"));
  }

  #[test]
  fn events_table_includes_ids() {
    let out = events(&[event("2024-01", "Stable Ford", ["A", "B", "C"])]);
    assert!(out.contains("2024-01  Stable Ford  A    B    C    00000000-0000-0000-0000-000000000000"));
    assert_eq!(events(&[]), "no events recorded\n");
  }
}
