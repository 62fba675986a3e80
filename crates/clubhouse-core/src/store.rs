//! The `EventStore` trait, the durable home of the ledger.
//!
//! The trait is implemented by storage backends (e.g.
//! `clubhouse-store-sqlite`, or [`crate::memory::MemoryStore`]). Stores hold
//! already-validated events; all input checking happens in
//! [`crate::ledger::Ledger`].

use std::future::Future;

use uuid::Uuid;

use crate::{event::Event, year::YearFilter};

/// Result of an atomic check-then-insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
  Inserted,
  /// The `(month, category)` slot is already taken by this event; nothing
  /// was written.
  Occupied(Event),
}

/// Abstraction over a durable event store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait EventStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist `event` unless another event already holds its
  /// `(month, category)`. The check and the insert form one atomic unit:
  /// of two concurrent inserts for the same slot, exactly one succeeds.
  fn insert_event(
    &self,
    event: Event,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// Remove an event. Returns whether a row was removed.
  fn delete_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Retrieve an event by id. Returns `None` if not found.
  fn get_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Event>, Self::Error>> + Send + '_;

  /// Events matching `filter`, ordered by month descending, then category
  /// ascending.
  fn list_events<'a>(
    &'a self,
    filter: &'a YearFilter,
  ) -> impl Future<Output = Result<Vec<Event>, Self::Error>> + Send + 'a;

  /// Atomically replace the entire contents of the store with `events`.
  /// Callers guarantee the set already satisfies slot uniqueness.
  fn replace_all(
    &self,
    events: Vec<Event>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

/// Sort into the canonical list order: month descending, then category
/// ascending.
pub fn sort_events(events: &mut [Event]) {
  events.sort_by(|a, b| {
    b.month
      .cmp(&a.month)
      .then_with(|| a.category.as_str().cmp(b.category.as_str()))
  });
}
