//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings (lexicographic order matches
//! chronological order for a fixed UTC offset, so `ORDER BY created_at` works
//! on the raw column). UUIDs are stored as hyphenated lowercase strings.

use chrono::{DateTime, Utc};
use placelog_core::Location;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw values read directly from a `locations` row.
pub struct RawLocation {
  pub location_id: String,
  pub address:     String,
  pub latitude:    f64,
  pub longitude:   f64,
  pub history:     String,
  pub created_at:  String,
}

impl RawLocation {
  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      id:         decode_uuid(&self.location_id)?,
      address:    self.address,
      latitude:   self.latitude,
      longitude:  self.longitude,
      history:    self.history,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
