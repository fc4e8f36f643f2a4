//! Location — the single persisted entity.
//!
//! A location is an append-only record of an address, its coordinates, and a
//! free-text history note. Rows are never updated or deleted; "editing" a
//! saved location and re-saving it produces a new row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::MissingFields;

/// A persisted location record.
///
/// `id` and `created_at` are assigned by the store at creation and are
/// immutable. Wire names are camelCase (`createdAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
  pub id:         Uuid,
  pub address:    String,
  pub latitude:   f64,
  pub longitude:  f64,
  pub history:    String,
  pub created_at: DateTime<Utc>,
}

/// Validated input for the create operation. Obtained only through
/// [`LocationDraft::validate`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLocation {
  pub address:   String,
  pub latitude:  f64,
  pub longitude: f64,
  pub history:   String,
}

/// An unvalidated create request, exactly as received on the wire.
///
/// Every field is optional so that validation can distinguish an absent
/// coordinate from a coordinate of exactly zero — geographic (0, 0) is a
/// valid point.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
  pub address:   Option<String>,
  pub latitude:  Option<f64>,
  pub longitude: Option<f64>,
  pub history:   Option<String>,
}

impl LocationDraft {
  /// Validate the draft into a [`NewLocation`].
  ///
  /// `address` and `history` must be present and non-empty; `latitude` and
  /// `longitude` must be present (the check is "not null", not "truthy").
  /// On failure, returns the names of all missing fields.
  pub fn validate(self) -> Result<NewLocation, MissingFields> {
    let mut missing = Vec::new();

    let address = match self.address {
      Some(a) if !a.is_empty() => Some(a),
      _ => {
        missing.push("address");
        None
      }
    };
    if self.latitude.is_none() {
      missing.push("latitude");
    }
    if self.longitude.is_none() {
      missing.push("longitude");
    }
    let history = match self.history {
      Some(h) if !h.is_empty() => Some(h),
      _ => {
        missing.push("history");
        None
      }
    };

    if !missing.is_empty() {
      return Err(MissingFields(missing));
    }

    // All four options are `Some` when `missing` is empty.
    Ok(NewLocation {
      address:   address.unwrap_or_default(),
      latitude:  self.latitude.unwrap_or_default(),
      longitude: self.longitude.unwrap_or_default(),
      history:   history.unwrap_or_default(),
    })
  }
}
