//! [`MemoryStore`], an in-process [`EventStore`].
//!
//! Holds the whole ledger behind one mutex, which makes every operation,
//! including the check-then-insert of [`EventStore::insert_event`], a single
//! critical section. Used for tests and for embedding the ledger without a
//! database file.

use std::{
  convert::Infallible,
  sync::{Mutex, MutexGuard, PoisonError},
};

use uuid::Uuid;

use crate::{
  event::Event,
  store::{EventStore, InsertOutcome, sort_events},
  year::{YearFilter, filter_by_year},
};

#[derive(Debug, Default)]
pub struct MemoryStore {
  events: Mutex<Vec<Event>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A store pre-populated with `events`, which are trusted as-is.
  pub fn with_events(events: Vec<Event>) -> Self {
    Self { events: Mutex::new(events) }
  }

  pub fn len(&self) -> usize { self.lock().len() }

  pub fn is_empty(&self) -> bool { self.lock().is_empty() }

  // A panic while holding the guard cannot leave the Vec half-modified, so
  // a poisoned lock is still safe to use.
  fn lock(&self) -> MutexGuard<'_, Vec<Event>> {
    self.events.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl EventStore for MemoryStore {
  type Error = Infallible;

  async fn insert_event(&self, event: Event) -> Result<InsertOutcome, Infallible> {
    let mut events = self.lock();
    if let Some(existing) = events
      .iter()
      .find(|e| e.month == event.month && e.category == event.category)
    {
      return Ok(InsertOutcome::Occupied(existing.clone()));
    }
    events.push(event);
    Ok(InsertOutcome::Inserted)
  }

  async fn delete_event(&self, id: Uuid) -> Result<bool, Infallible> {
    let mut events = self.lock();
    let before = events.len();
    events.retain(|e| e.id != id);
    Ok(events.len() != before)
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<Event>, Infallible> {
    Ok(self.lock().iter().find(|e| e.id == id).cloned())
  }

  async fn list_events(&self, filter: &YearFilter) -> Result<Vec<Event>, Infallible> {
    let mut selected: Vec<Event> =
      filter_by_year(self.lock().iter(), filter).cloned().collect();
    sort_events(&mut selected);
    Ok(selected)
  }

  async fn replace_all(&self, events: Vec<Event>) -> Result<(), Infallible> {
    *self.lock() = events;
    Ok(())
  }
}
