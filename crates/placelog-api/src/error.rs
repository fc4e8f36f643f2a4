//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use placelog_core::MissingFields;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Create-request validation failure. The response body is the fixed
  /// payload `{"error":"Missing fields"}` regardless of which fields were
  /// missing; the detail is only carried for logging.
  #[error("missing fields: {0}")]
  MissingFields(#[from] MissingFields),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::MissingFields(_) => {
        (StatusCode::BAD_REQUEST, "Missing fields".to_string())
      }
      ApiError::Store(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
