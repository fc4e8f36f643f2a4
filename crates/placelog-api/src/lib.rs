//! JSON REST API for placelog.
//!
//! Exposes an axum [`Router`] backed by any
//! [`placelog_core::store::LocationStore`]. Transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", placelog_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod locations;

use std::sync::Arc;

use axum::{Router, routing::get};
use placelog_core::store::LocationStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: LocationStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route(
      "/locations",
      get(locations::list::<S>).post(locations::create::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use placelog_core::Location;
  use placelog_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn router() -> Router<()> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    api_router(Arc::new(store))
  }

  async fn get_json(app: &Router<()>, uri: &str) -> (StatusCode, Value) {
    let resp = app
      .clone()
      .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  async fn post_json(app: &Router<()>, uri: &str, body: Value) -> (StatusCode, Value) {
    let resp = app
      .clone()
      .oneshot(
        Request::builder()
          .method("POST")
          .uri(uri)
          .header(header::CONTENT_TYPE, "application/json")
          .body(Body::from(body.to_string()))
          .unwrap(),
      )
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
  }

  fn full_body() -> Value {
    json!({
      "address": "123 Main St",
      "latitude": 40.7128,
      "longitude": -74.006,
      "history": "Former bakery, demolished 1987",
    })
  }

  // ── Create + list round-trip ──────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_list_roundtrips_all_fields() {
    let app = router().await;

    let (status, created) = post_json(&app, "/locations", full_body()).await;
    assert_eq!(status, StatusCode::OK);
    let created: Location = serde_json::from_value(created).unwrap();
    assert_eq!(created.address, "123 Main St");

    let (status, listed) = get_json(&app, "/locations").await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<Location> = serde_json::from_value(listed).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0], created);
  }

  #[tokio::test]
  async fn created_record_uses_camel_case_wire_names() {
    let app = router().await;

    let (_, created) = post_json(&app, "/locations", full_body()).await;
    assert!(created.get("createdAt").is_some());
    assert!(created.get("id").is_some());
    assert!(created.get("created_at").is_none());
  }

  // ── Validation ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_missing_any_field_returns_400_and_persists_nothing() {
    let app = router().await;

    for field in ["address", "latitude", "longitude", "history"] {
      let mut body = full_body();
      body.as_object_mut().unwrap().remove(field);

      let (status, err) = post_json(&app, "/locations", body).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "field: {field}");
      assert_eq!(err, json!({ "error": "Missing fields" }), "field: {field}");
    }

    let (_, listed) = get_json(&app, "/locations").await;
    assert_eq!(listed, json!([]));
  }

  #[tokio::test]
  async fn create_with_empty_address_returns_400() {
    let app = router().await;
    let mut body = full_body();
    body["address"] = json!("");

    let (status, err) = post_json(&app, "/locations", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err, json!({ "error": "Missing fields" }));
  }

  #[tokio::test]
  async fn zero_coordinates_are_accepted() {
    let app = router().await;
    let mut body = full_body();
    body["latitude"] = json!(0);
    body["longitude"] = json!(0);

    let (status, created) = post_json(&app, "/locations", body).await;
    assert_eq!(status, StatusCode::OK);
    let created: Location = serde_json::from_value(created).unwrap();
    assert_eq!(created.latitude, 0.0);
    assert_eq!(created.longitude, 0.0);
  }

  // ── Substring filter ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn address_filter_is_case_insensitive() {
    let app = router().await;

    for address in ["123 Main St", "456 MAIN Ave", "456 Elm Ave"] {
      let mut body = full_body();
      body["address"] = json!(address);
      post_json(&app, "/locations", body).await;
    }

    let (status, hits) = get_json(&app, "/locations?address=main").await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Location> = serde_json::from_value(hits).unwrap();
    assert_eq!(hits.len(), 2);
    assert!(hits.iter().all(|l| l.address.to_lowercase().contains("main")));
  }

  #[tokio::test]
  async fn empty_address_param_lists_everything() {
    let app = router().await;
    post_json(&app, "/locations", full_body()).await;

    let (status, hits) = get_json(&app, "/locations?address=").await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Location> = serde_json::from_value(hits).unwrap();
    assert_eq!(hits.len(), 1);
  }

  #[tokio::test]
  async fn no_matches_is_empty_array_not_error() {
    let app = router().await;
    post_json(&app, "/locations", full_body()).await;

    let (status, hits) = get_json(&app, "/locations?address=zanzibar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits, json!([]));
  }

  // ── Ordering ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn listing_is_newest_first() {
    let app = router().await;

    let mut created_ids = Vec::new();
    for address in ["First St", "Second St", "Third St"] {
      let mut body = full_body();
      body["address"] = json!(address);
      let (_, created) = post_json(&app, "/locations", body).await;
      let created: Location = serde_json::from_value(created).unwrap();
      created_ids.push(created.id);
      tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, listed) = get_json(&app, "/locations").await;
    let listed: Vec<Location> = serde_json::from_value(listed).unwrap();
    let listed_ids: Vec<_> = listed.iter().map(|l| l.id).collect();

    created_ids.reverse();
    assert_eq!(listed_ids, created_ids);
  }

  // ── Duplicates ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn identical_creates_produce_distinct_records() {
    let app = router().await;

    let (_, first) = post_json(&app, "/locations", full_body()).await;
    let (_, second) = post_json(&app, "/locations", full_body()).await;
    let first: Location = serde_json::from_value(first).unwrap();
    let second: Location = serde_json::from_value(second).unwrap();

    assert_ne!(first.id, second.id);

    let (_, listed) = get_json(&app, "/locations").await;
    let listed: Vec<Location> = serde_json::from_value(listed).unwrap();
    assert_eq!(listed.len(), 2);
  }
}
