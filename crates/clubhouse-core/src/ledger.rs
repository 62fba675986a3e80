//! [`Ledger`]: the authoritative collection of recorded events.
//!
//! The ledger validates input, assigns identity and delegates persistence to
//! an [`EventStore`]. It performs no authorization; whoever holds a `Ledger`
//! may mutate it.

use chrono::Utc;
use uuid::Uuid;

use crate::{
  Error, Result,
  event::{Event, EventInput},
  rankings::{Rankings, compute_rankings},
  snapshot::{LedgerSnapshot, players_of},
  store::{EventStore, InsertOutcome},
  year::{YearFilter, years_present},
};

pub struct Ledger<S> {
  store: S,
}

impl<S: EventStore> Ledger<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// Validate `input` and record it as a new event.
  ///
  /// Fails with [`Error::Validation`] before touching the store, or with
  /// [`Error::Conflict`] if the month already has results in this category.
  pub async fn create(&self, input: EventInput) -> Result<Event> {
    let event = input.validate()?.into_event(Uuid::new_v4(), Utc::now());

    match self
      .store
      .insert_event(event.clone())
      .await
      .map_err(Error::store)?
    {
      InsertOutcome::Inserted => Ok(event),
      InsertOutcome::Occupied(existing) => Err(Error::Conflict {
        month:    existing.month.to_string(),
        category: existing.category,
      }),
    }
  }

  /// Remove an event. Returns whether anything was removed.
  pub async fn delete(&self, id: Uuid) -> Result<bool> {
    self.store.delete_event(id).await.map_err(Error::store)
  }

  /// Like [`Ledger::delete`], but a missing id is an [`Error::NotFound`].
  pub async fn remove(&self, id: Uuid) -> Result<()> {
    if self.delete(id).await? {
      Ok(())
    } else {
      Err(Error::NotFound(id))
    }
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub async fn get(&self, id: Uuid) -> Result<Option<Event>> {
    self.store.get_event(id).await.map_err(Error::store)
  }

  /// Events for `filter`, month descending then category ascending.
  pub async fn list(&self, filter: &YearFilter) -> Result<Vec<Event>> {
    self.store.list_events(filter).await.map_err(Error::store)
  }

  /// Ranked tables recomputed from the events `filter` selects.
  pub async fn rankings(&self, filter: &YearFilter) -> Result<Rankings> {
    let events = self.list(filter).await?;
    Ok(compute_rankings(&events))
  }

  /// Every year with at least one event, newest first.
  pub async fn years(&self) -> Result<Vec<String>> {
    let events = self.list(&YearFilter::All).await?;
    Ok(years_present(&events))
  }

  /// Every player who has placed, sorted by name.
  pub async fn players(&self) -> Result<Vec<String>> {
    let events = self.list(&YearFilter::All).await?;
    Ok(players_of(&events))
  }

  // ── Bulk ──────────────────────────────────────────────────────────────────

  pub async fn export(&self) -> Result<LedgerSnapshot> {
    let events = self.list(&YearFilter::All).await?;
    Ok(LedgerSnapshot::from_events(events))
  }

  /// Replace the whole ledger with a snapshot's events.
  ///
  /// The snapshot is fully validated first; if any event is rejected the
  /// ledger is left untouched. Returns the number of events imported.
  pub async fn import(&self, snapshot: LedgerSnapshot) -> Result<usize> {
    let events = snapshot.into_validated_events()?;
    let count = events.len();
    self.store.replace_all(events).await.map_err(Error::store)?;
    Ok(count)
  }

  /// Remove every event.
  pub async fn clear(&self) -> Result<()> {
    self.store.replace_all(Vec::new()).await.map_err(Error::store)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::{event::Category, memory::MemoryStore};

  fn ledger() -> Ledger<MemoryStore> { Ledger::new(MemoryStore::new()) }

  fn input(month: &str, category: &str, winners: [&str; 3]) -> EventInput {
    EventInput::new(month, category, winners)
  }

  #[tokio::test]
  async fn create_persists_normalized_event() {
    let l = ledger();
    let ev = l
      .create(input("2024-01", "Net Stroke Play", ["  Alice ", "Bob", "Carol"]))
      .await
      .unwrap();

    assert_eq!(ev.placements[0].player, "Alice");
    assert_eq!(l.get(ev.id).await.unwrap(), Some(ev));
  }

  #[tokio::test]
  async fn second_create_for_same_slot_conflicts() {
    let l = ledger();
    l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();

    let err = l
      .create(input("2024-01", "Stable Ford", ["D", "E", "F"]))
      .await
      .unwrap_err();
    assert!(matches!(
      err,
      Error::Conflict { ref month, category: Category::StableFord } if month == "2024-01"
    ));

    let events = l.list(&YearFilter::All).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].placements[0].player, "A");
  }

  #[tokio::test]
  async fn same_month_other_category_is_allowed() {
    let l = ledger();
    l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();
    l.create(input("2024-01", "Net Stroke Play", ["A", "B", "C"])).await.unwrap();
    assert_eq!(l.store().len(), 2);
  }

  #[tokio::test]
  async fn invalid_input_persists_nothing() {
    let l = ledger();
    let bad = [
      input("2024-01", "Stable Ford", ["A", "A ", "C"]),
      input("2024-01", "Stable Ford", ["A", "", "C"]),
      input("2024-1", "Stable Ford", ["A", "B", "C"]),
      input("2024-01", "Skins", ["A", "B", "C"]),
      EventInput::new("2024-01", "Stable Ford", ["A", "B", "C", "D"]),
    ];
    for i in bad {
      assert!(matches!(l.create(i).await, Err(Error::Validation { .. })));
    }
    assert!(l.store().is_empty());
  }

  #[tokio::test]
  async fn concurrent_creates_for_one_slot_admit_exactly_one() {
    let l = Arc::new(ledger());
    let tasks: Vec<_> = (0..8)
      .map(|i| {
        let l = l.clone();
        tokio::spawn(async move {
          l.create(input("2024-06", "Net Stroke Play", [&format!("P{i}"), "X", "Y"]))
            .await
        })
      })
      .collect();

    let mut ok = 0;
    let mut conflicts = 0;
    for t in tasks {
      match t.await.unwrap() {
        Ok(_) => ok += 1,
        Err(Error::Conflict { .. }) => conflicts += 1,
        Err(e) => panic!("unexpected error: {e}"),
      }
    }
    assert_eq!((ok, conflicts), (1, 7));
  }

  #[tokio::test]
  async fn list_orders_month_desc_then_category() {
    let l = ledger();
    l.create(input("2023-05", "Stable Ford", ["A", "B", "C"])).await.unwrap();
    l.create(input("2024-05", "Stable Ford", ["A", "B", "C"])).await.unwrap();
    l.create(input("2024-05", "Net Stroke Play", ["A", "B", "C"])).await.unwrap();

    let order: Vec<(String, Category)> = l
      .list(&YearFilter::All)
      .await
      .unwrap()
      .into_iter()
      .map(|e| (e.month.to_string(), e.category))
      .collect();
    assert_eq!(
      order,
      [
        ("2024-05".to_string(), Category::NetStrokePlay),
        ("2024-05".to_string(), Category::StableFord),
        ("2023-05".to_string(), Category::StableFord),
      ]
    );
  }

  #[tokio::test]
  async fn year_filter_scopes_events_and_rankings() {
    let l = ledger();
    l.create(input("2023-05", "Stable Ford", ["Alice", "Bob", "Carol"])).await.unwrap();
    l.create(input("2024-05", "Stable Ford", ["Alice", "Carol", "Bob"])).await.unwrap();

    let y2023 = YearFilter::Year("2023".into());
    let events = l.list(&y2023).await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].month.as_str(), "2023-05");

    let r = l.rankings(&y2023).await.unwrap();
    assert_eq!(r.overall[0].points, 3);
    assert_eq!(r.overall[1].player, "Bob");

    let all = l.rankings(&YearFilter::All).await.unwrap();
    assert_eq!(all.overall[0].player, "Alice");
    assert_eq!(all.overall[0].points, 6);
    assert_eq!(all.overall[1].points, 3);

    assert_eq!(l.years().await.unwrap(), ["2024", "2023"]);
  }

  #[tokio::test]
  async fn delete_removes_from_list_and_rankings() {
    let l = ledger();
    let ev = l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();

    assert!(l.delete(ev.id).await.unwrap());
    assert!(l.list(&YearFilter::All).await.unwrap().is_empty());
    assert!(l.rankings(&YearFilter::All).await.unwrap().overall.is_empty());

    // The slot is free again.
    l.create(input("2024-01", "Stable Ford", ["D", "E", "F"])).await.unwrap();
  }

  #[tokio::test]
  async fn deleting_unknown_id_is_not_found_and_changes_nothing() {
    let l = ledger();
    l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();

    let id = Uuid::new_v4();
    assert!(!l.delete(id).await.unwrap());
    assert!(matches!(l.remove(id).await, Err(Error::NotFound(missing)) if missing == id));
    assert_eq!(l.store().len(), 1);
  }

  #[tokio::test]
  async fn players_are_derived_and_sorted() {
    let l = ledger();
    l.create(input("2024-01", "Stable Ford", ["Carol", "alice", "Bob"])).await.unwrap();
    l.create(input("2024-02", "Stable Ford", ["Bob", "Carol", "Dan"])).await.unwrap();
    assert_eq!(l.players().await.unwrap(), ["Bob", "Carol", "Dan", "alice"]);
  }

  #[tokio::test]
  async fn export_then_import_into_fresh_ledger() {
    let source = ledger();
    source.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();
    source.create(input("2024-02", "Net Stroke Play", ["C", "B", "A"])).await.unwrap();
    let snapshot = source.export().await.unwrap();
    assert_eq!(snapshot.players, ["A", "B", "C"]);

    let target = ledger();
    target.create(input("2019-01", "Stable Ford", ["X", "Y", "Z"])).await.unwrap();
    assert_eq!(target.import(snapshot.clone()).await.unwrap(), 2);
    assert_eq!(target.list(&YearFilter::All).await.unwrap(), snapshot.events);
  }

  #[tokio::test]
  async fn rejected_import_leaves_ledger_untouched() {
    let l = ledger();
    let kept = l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();

    let mut snapshot = l.export().await.unwrap();
    let mut dup = snapshot.events[0].clone();
    dup.id = Uuid::new_v4();
    snapshot.events.push(dup);

    assert!(matches!(l.import(snapshot).await, Err(Error::Validation { .. })));
    assert_eq!(l.list(&YearFilter::All).await.unwrap(), [kept]);
  }

  #[tokio::test]
  async fn clear_empties_the_ledger() {
    let l = ledger();
    l.create(input("2024-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();
    l.clear().await.unwrap();
    assert!(l.store().is_empty());
    assert!(l.years().await.unwrap().is_empty());
  }
}
