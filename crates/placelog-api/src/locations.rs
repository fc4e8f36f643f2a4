//! Handlers for `/locations` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/locations` | Optional `?address=<substring>` filter |
//! | `POST` | `/locations` | Body: `{"address","latitude","longitude","history"}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use placelog_core::{
  location::{Location, LocationDraft},
  store::{LocationQuery, LocationStore},
};
use serde::Deserialize;

use crate::error::ApiError;

// ─── List / search ────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Case-insensitive substring filter over saved addresses.
  pub address: Option<String>,
}

/// `GET /locations[?address=<substring>]`
///
/// An empty `address` param means "no filter" — clients submit the search
/// box verbatim, and an empty box lists everything.
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Location>>, ApiError>
where
  S: LocationStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = LocationQuery {
    address_contains: params.address.filter(|a| !a.is_empty()),
  };
  let locations = store
    .list_locations(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(locations))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /locations` — body: `{"address","latitude","longitude","history"}`
///
/// Responds 200 with the created record, or 400 `{"error":"Missing fields"}`
/// when address/history are missing or empty or either coordinate is absent.
/// A coordinate of exactly zero is present.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(draft): Json<LocationDraft>,
) -> Result<Json<Location>, ApiError>
where
  S: LocationStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = draft.validate()?;
  let location = store
    .create_location(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(location))
}
