//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::Utc;
use clubhouse_core::{
  Error as CoreError,
  event::{Category, Event, EventInput},
  ledger::Ledger,
  snapshot::LedgerSnapshot,
  store::{EventStore, InsertOutcome},
  year::YearFilter,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn ledger() -> Ledger<SqliteStore> { Ledger::new(store().await) }

fn event(month: &str, category: &str, winners: [&str; 3]) -> Event {
  EventInput::new(month, category, winners)
    .validate()
    .unwrap()
    .into_event(Uuid::new_v4(), Utc::now())
}

// ─── Raw store operations ────────────────────────────────────────────────────

#[tokio::test]
async fn insert_and_get_event() {
  let s = store().await;
  let ev = event("2024-01", "Net Stroke Play", ["Alice", "Bob", "Carol"]);

  assert_eq!(s.insert_event(ev.clone()).await.unwrap(), InsertOutcome::Inserted);

  let fetched = s.get_event(ev.id).await.unwrap().unwrap();
  assert_eq!(fetched.id, ev.id);
  assert_eq!(fetched.month, ev.month);
  assert_eq!(fetched.category, Category::NetStrokePlay);
  assert_eq!(fetched.placements, ev.placements);
  assert_eq!(fetched.created_at, ev.created_at);
}

#[tokio::test]
async fn get_event_missing_returns_none() {
  let s = store().await;
  assert!(s.get_event(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn insert_into_occupied_slot_reports_existing() {
  let s = store().await;
  let first = event("2024-01", "Stable Ford", ["A", "B", "C"]);
  let second = event("2024-01", "Stable Ford", ["D", "E", "F"]);

  s.insert_event(first.clone()).await.unwrap();
  match s.insert_event(second).await.unwrap() {
    InsertOutcome::Occupied(existing) => assert_eq!(existing.id, first.id),
    InsertOutcome::Inserted => panic!("slot should be occupied"),
  }
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_reports_whether_a_row_was_removed() {
  let s = store().await;
  let ev = event("2024-01", "Stable Ford", ["A", "B", "C"]);
  s.insert_event(ev.clone()).await.unwrap();

  assert!(s.delete_event(ev.id).await.unwrap());
  assert!(!s.delete_event(ev.id).await.unwrap());
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn list_orders_and_filters_by_year() {
  let s = store().await;
  for ev in [
    event("2023-05", "Stable Ford", ["A", "B", "C"]),
    event("2024-05", "Stable Ford", ["A", "B", "C"]),
    event("2024-05", "Net Stroke Play", ["A", "B", "C"]),
    event("2024-11", "Stable Ford", ["A", "B", "C"]),
  ] {
    s.insert_event(ev).await.unwrap();
  }

  let all: Vec<(String, Category)> = s
    .list_events(&YearFilter::All)
    .await
    .unwrap()
    .into_iter()
    .map(|e| (e.month.to_string(), e.category))
    .collect();
  assert_eq!(
    all,
    [
      ("2024-11".to_string(), Category::StableFord),
      ("2024-05".to_string(), Category::NetStrokePlay),
      ("2024-05".to_string(), Category::StableFord),
      ("2023-05".to_string(), Category::StableFord),
    ]
  );

  let only_2023 = s.list_events(&YearFilter::Year("2023".into())).await.unwrap();
  assert_eq!(only_2023.len(), 1);
  assert_eq!(only_2023[0].year(), "2023");

  let none = s.list_events(&YearFilter::Year("1990".into())).await.unwrap();
  assert!(none.is_empty());
}

#[tokio::test]
async fn replace_all_swaps_contents() {
  let s = store().await;
  s.insert_event(event("2020-01", "Stable Ford", ["A", "B", "C"])).await.unwrap();

  let replacement = vec![
    event("2024-01", "Stable Ford", ["X", "Y", "Z"]),
    event("2024-02", "Stable Ford", ["X", "Y", "Z"]),
  ];
  s.replace_all(replacement).await.unwrap();

  let events = s.list_events(&YearFilter::All).await.unwrap();
  assert_eq!(events.len(), 2);
  assert!(events.iter().all(|e| e.year() == "2024"));
}

#[tokio::test]
async fn failed_replace_rolls_back() {
  let s = store().await;
  let kept = event("2020-01", "Stable Ford", ["A", "B", "C"]);
  s.insert_event(kept.clone()).await.unwrap();

  // Two events in one slot violate the UNIQUE constraint mid-transaction.
  let clash = vec![
    event("2024-01", "Stable Ford", ["X", "Y", "Z"]),
    event("2024-01", "Stable Ford", ["P", "Q", "R"]),
  ];
  assert!(s.replace_all(clash).await.is_err());

  let events = s.list_events(&YearFilter::All).await.unwrap();
  assert_eq!(events, [kept]);
}

#[tokio::test]
async fn data_survives_reopen() {
  let dir = std::env::temp_dir().join(format!("clubhouse-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("ledger.db");

  let ev = event("2024-01", "Stable Ford", ["A", "B", "C"]);
  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_event(ev.clone()).await.unwrap();
  }
  let reopened = SqliteStore::open(&path).await.unwrap();
  assert_eq!(reopened.get_event(ev.id).await.unwrap(), Some(ev));

  drop(reopened);
  std::fs::remove_dir_all(&dir).ok();
}

// ─── Ledger over SQLite ──────────────────────────────────────────────────────

#[tokio::test]
async fn ledger_conflict_leaves_original_in_place() {
  let l = ledger().await;
  let original = l
    .create(EventInput::new("2024-01", "Net Stroke Play", ["Alice", "Bob", "Carol"]))
    .await
    .unwrap();

  let err = l
    .create(EventInput::new("2024-01", "Net Stroke Play", ["Dan", "Erin", "Fay"]))
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::Conflict { .. }));

  let events = l.list(&YearFilter::All).await.unwrap();
  assert_eq!(events, [original]);
}

#[tokio::test]
async fn concurrent_ledger_creates_admit_exactly_one() {
  let l = Arc::new(ledger().await);

  let a = {
    let l = l.clone();
    tokio::spawn(async move {
      l.create(EventInput::new("2024-07", "Stable Ford", ["A", "B", "C"])).await
    })
  };
  let b = {
    let l = l.clone();
    tokio::spawn(async move {
      l.create(EventInput::new("2024-07", "Stable Ford", ["D", "E", "F"])).await
    })
  };

  let results = [a.await.unwrap(), b.await.unwrap()];
  let ok = results.iter().filter(|r| r.is_ok()).count();
  let conflicts = results
    .iter()
    .filter(|r| matches!(r, Err(CoreError::Conflict { .. })))
    .count();
  assert_eq!((ok, conflicts), (1, 1));
  assert_eq!(l.store().count().await.unwrap(), 1);
}

#[tokio::test]
async fn ledger_scoring_scenario() {
  let l = ledger().await;
  l.create(EventInput::new("2024-01", "Net Stroke Play", ["Alice", "Bob", "Carol"]))
    .await
    .unwrap();

  let r = l.rankings(&YearFilter::All).await.unwrap();
  let overall: Vec<(&str, u32)> =
    r.overall.iter().map(|s| (s.player.as_str(), s.points)).collect();
  assert_eq!(overall, [("Alice", 3), ("Bob", 2), ("Carol", 1)]);
  assert_eq!(r.category(Category::NetStrokePlay), r.overall.as_slice());
  assert!(r.category(Category::StableFord).is_empty());
}

#[tokio::test]
async fn ledger_import_round_trip() {
  let source = ledger().await;
  source
    .create(EventInput::new("2023-05", "Stable Ford", ["A", "B", "C"]))
    .await
    .unwrap();
  source
    .create(EventInput::new("2024-05", "Net Stroke Play", ["C", "B", "A"]))
    .await
    .unwrap();
  let json = source.export().await.unwrap().to_json_pretty().unwrap();

  let target = ledger().await;
  let imported = target.import(LedgerSnapshot::from_json(&json).unwrap()).await.unwrap();
  assert_eq!(imported, 2);
  assert_eq!(
    target.list(&YearFilter::All).await.unwrap(),
    source.list(&YearFilter::All).await.unwrap()
  );
  assert_eq!(target.years().await.unwrap(), ["2024", "2023"]);
}
