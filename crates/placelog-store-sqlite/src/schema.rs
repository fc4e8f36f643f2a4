//! SQL schema for the placelog SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Locations are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS locations (
    location_id TEXT PRIMARY KEY,
    address     TEXT NOT NULL,
    latitude    REAL NOT NULL,
    longitude   REAL NOT NULL,
    history     TEXT NOT NULL,
    created_at  TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS locations_created_idx ON locations(created_at);

PRAGMA user_version = 1;
";
