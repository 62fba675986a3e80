//! SQL schema for the Clubhouse SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per result set. Placements are stored as three name columns in
-- position order; points are never stored.
CREATE TABLE IF NOT EXISTS events (
    event_id    TEXT PRIMARY KEY,
    month       TEXT NOT NULL,   -- YYYY-MM
    category    TEXT NOT NULL,   -- 'Net Stroke Play' | 'Stable Ford'
    first       TEXT NOT NULL,
    second      TEXT NOT NULL,
    third       TEXT NOT NULL,
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC; ledger-assigned
    UNIQUE (month, category)
);

CREATE INDEX IF NOT EXISTS events_month_idx ON events(month);

PRAGMA user_version = 1;
";
