//! The `LocationStore` trait and supporting query type.
//!
//! The trait is implemented by storage backends (e.g.
//! `placelog-store-sqlite`). Higher layers (`placelog-api`, `placelog-cli`)
//! depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::location::{Location, NewLocation};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`LocationStore::list_locations`].
#[derive(Debug, Clone, Default)]
pub struct LocationQuery {
  /// Case-insensitive substring filter over the address field.
  /// `None` returns every row.
  pub address_contains: Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a placelog storage backend.
///
/// The store is append-only: `create_location` is the only write, and no
/// update or delete operation exists. Listing is a full scan ordered by
/// creation time, newest first — acceptable at this system's intended scale.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait LocationStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a validated location, assigning its id and creation timestamp.
  ///
  /// No duplicate detection: identical inputs produce independent rows with
  /// distinct ids.
  fn create_location(
    &self,
    input: NewLocation,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  /// List locations matching `query`, ordered by `created_at` descending.
  ///
  /// No matches is an empty vec, never an error.
  fn list_locations<'a>(
    &'a self,
    query: &'a LocationQuery,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + 'a;
}
