//! [`SqliteStore`] — the SQLite implementation of [`LocationStore`].

use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use placelog_core::{
  location::{Location, NewLocation},
  store::{LocationQuery, LocationStore},
};

use crate::{
  encode::{encode_dt, encode_uuid, RawLocation},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A placelog location store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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
}

// ─── LocationStore impl ──────────────────────────────────────────────────────

impl LocationStore for SqliteStore {
  type Error = Error;

  async fn create_location(&self, input: NewLocation) -> Result<Location> {
    let location = Location {
      id:         Uuid::new_v4(),
      address:    input.address,
      latitude:   input.latitude,
      longitude:  input.longitude,
      history:    input.history,
      created_at: Utc::now(),
    };

    let id_str    = encode_uuid(location.id);
    let address   = location.address.clone();
    let latitude  = location.latitude;
    let longitude = location.longitude;
    let history   = location.history.clone();
    let at_str    = encode_dt(location.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (
             location_id, address, latitude, longitude, history, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, address, latitude, longitude, history, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(location)
  }

  async fn list_locations(&self, query: &LocationQuery) -> Result<Vec<Location>> {
    let filter = query.address_contains.clone();

    let raws: Vec<RawLocation> = self
      .conn
      .call(move |conn| {
        // instr() keeps the filter a literal substring — unlike LIKE, the
        // user's input is never interpreted as wildcards. lower() makes the
        // match case-insensitive.
        let rows = if let Some(f) = filter {
          let mut stmt = conn.prepare(
            "SELECT location_id, address, latitude, longitude, history, created_at
             FROM locations
             WHERE instr(lower(address), lower(?1)) > 0
             ORDER BY created_at DESC",
          )?;
          stmt
            .query_map(rusqlite::params![f], |row| {
              Ok(RawLocation {
                location_id: row.get(0)?,
                address:     row.get(1)?,
                latitude:    row.get(2)?,
                longitude:   row.get(3)?,
                history:     row.get(4)?,
                created_at:  row.get(5)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(
            "SELECT location_id, address, latitude, longitude, history, created_at
             FROM locations
             ORDER BY created_at DESC",
          )?;
          stmt
            .query_map([], |row| {
              Ok(RawLocation {
                location_id: row.get(0)?,
                address:     row.get(1)?,
                latitude:    row.get(2)?,
                longitude:   row.get(3)?,
                history:     row.get(4)?,
                created_at:  row.get(5)?,
              })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLocation::into_location).collect()
  }
}
