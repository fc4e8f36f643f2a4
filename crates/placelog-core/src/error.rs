//! Error types for `placelog-core`.

use thiserror::Error;

/// The set of required create fields that were missing or empty.
///
/// Field names are the wire names (`address`, `latitude`, `longitude`,
/// `history`), in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing fields: {}", self.0.join(", "))]
pub struct MissingFields(pub Vec<&'static str>);

impl MissingFields {
  pub fn contains(&self, field: &str) -> bool {
    self.0.iter().any(|f| *f == field)
  }
}
