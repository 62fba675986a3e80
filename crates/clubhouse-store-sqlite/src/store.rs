//! [`SqliteStore`]: the SQLite implementation of [`EventStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use clubhouse_core::{
  event::Event,
  store::{EventStore, InsertOutcome},
  year::YearFilter,
};

use crate::{
  Result,
  encode::{EVENT_COLUMNS, RawEvent, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An event ledger backed by a single SQLite file.
///
/// Clones share one reference-counted connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What the insert transaction observed.
enum RawInsert {
  Inserted,
  Occupied(RawEvent),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Total number of stored events.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM events", [], |r| r.get(0))?))
      .await?;
    Ok(usize::try_from(n).unwrap_or_default())
  }
}

fn insert_raw(conn: &rusqlite::Connection, raw: &RawEvent) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO events (event_id, month, category, first, second, third, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    rusqlite::params![
      raw.event_id,
      raw.month,
      raw.category,
      raw.first,
      raw.second,
      raw.third,
      raw.created_at,
    ],
  )?;
  Ok(())
}

// ─── EventStore impl ─────────────────────────────────────────────────────────

impl EventStore for SqliteStore {
  type Error = crate::Error;

  async fn insert_event(&self, event: Event) -> Result<InsertOutcome> {
    let raw = RawEvent::from_event(&event);

    let outcome = self
      .conn
      .call(move |conn| {
        // The slot check and the insert share one transaction; the
        // UNIQUE (month, category) constraint backs it up.
        let tx = conn.transaction()?;
        let existing = tx
          .query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE month = ?1 AND category = ?2"),
            rusqlite::params![raw.month, raw.category],
            RawEvent::from_row,
          )
          .optional()?;

        if let Some(existing) = existing {
          return Ok(RawInsert::Occupied(existing));
        }

        insert_raw(&tx, &raw)?;
        tx.commit()?;
        Ok(RawInsert::Inserted)
      })
      .await?;

    match outcome {
      RawInsert::Inserted => {
        tracing::debug!(id = %event.id, month = %event.month, category = %event.category, "event inserted");
        Ok(InsertOutcome::Inserted)
      }
      RawInsert::Occupied(raw) => Ok(InsertOutcome::Occupied(raw.into_event()?)),
    }
  }

  async fn delete_event(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM events WHERE event_id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<Event>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawEvent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {EVENT_COLUMNS} FROM events WHERE event_id = ?1"),
            rusqlite::params![id_str],
            RawEvent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawEvent::into_event).transpose()
  }

  async fn list_events(&self, filter: &YearFilter) -> Result<Vec<Event>> {
    let year = match filter {
      YearFilter::All => None,
      YearFilter::Year(y) => Some(y.clone()),
    };

    let raws: Vec<RawEvent> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(y) = year {
          let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events
             WHERE substr(month, 1, 4) = ?1
             ORDER BY month DESC, category ASC"
          ))?;
          stmt
            .query_map(rusqlite::params![y], RawEvent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY month DESC, category ASC"
          ))?;
          stmt
            .query_map([], RawEvent::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEvent::into_event).collect()
  }

  async fn replace_all(&self, events: Vec<Event>) -> Result<()> {
    let raws: Vec<RawEvent> = events.iter().map(RawEvent::from_event).collect();
    let count = raws.len();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM events", [])?;
        for raw in &raws {
          insert_raw(&tx, raw)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    tracing::info!(count, "ledger contents replaced");
    Ok(())
  }
}
