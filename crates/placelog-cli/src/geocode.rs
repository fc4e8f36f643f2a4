//! Forward and reverse geocoding behind an injectable trait.
//!
//! Both lookups return `Option` at the interface boundary: a transport
//! failure, a provider rejection (e.g. missing API key), or an empty result
//! set are all `None`. Callers decide how to degrade — the app leaves the
//! address blank on a failed reverse lookup and shows "Address not found."
//! on a failed forward lookup. Neither is ever a hard error.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A coordinate match for a forward (address → point) lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardHit {
  pub latitude:     f64,
  pub longitude:    f64,
  pub display_name: String,
}

/// An external geocoding capability.
///
/// Injected into the app so tests can substitute a mock and assert the
/// empty-on-failure behaviour deterministically.
pub trait Geocoder {
  /// Coordinate → human-readable address. `None` on failure or no result.
  async fn reverse(&self, latitude: f64, longitude: f64) -> Option<String>;

  /// Free-text address → best coordinate match. `None` on failure or no
  /// result.
  async fn forward(&self, query: &str) -> Option<ForwardHit>;
}

// ─── HTTP implementation ─────────────────────────────────────────────────────

/// Connection settings for the geocoding service.
///
/// The API key is optional and its presence is not validated: without one, a
/// provider that requires it will reject requests, which surfaces as `None`
/// results (degraded features, not a crash).
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
  pub base_url: String,
  pub api_key:  Option<String>,
}

/// Geocoder backed by a Nominatim-compatible HTTP endpoint
/// (`/reverse` and `/search` with `format=jsonv2`).
#[derive(Clone)]
pub struct HttpGeocoder {
  client: Client,
  config: GeocoderConfig,
}

impl HttpGeocoder {
  pub fn new(config: GeocoderConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .user_agent("placelog")
      .build()
      .context("failed to build geocoder HTTP client")?;
    Ok(Self { client, config })
  }

  fn request(&self, path: &str) -> reqwest::RequestBuilder {
    let url = format!("{}{path}", self.config.base_url.trim_end_matches('/'));
    let mut req = self.client.get(url).query(&[("format", "jsonv2")]);
    if let Some(key) = &self.config.api_key {
      req = req.query(&[("key", key.as_str())]);
    }
    req
  }
}

impl Geocoder for HttpGeocoder {
  async fn reverse(&self, latitude: f64, longitude: f64) -> Option<String> {
    let resp = self
      .request("/reverse")
      .query(&[
        ("lat", latitude.to_string()),
        ("lon", longitude.to_string()),
      ])
      .send()
      .await
      .ok()?;
    if !resp.status().is_success() {
      return None;
    }
    let body: ReverseResponse = resp.json().await.ok()?;
    (!body.display_name.is_empty()).then_some(body.display_name)
  }

  async fn forward(&self, query: &str) -> Option<ForwardHit> {
    let resp = self
      .request("/search")
      .query(&[("limit", "1"), ("q", query)])
      .send()
      .await
      .ok()?;
    if !resp.status().is_success() {
      return None;
    }
    let hits: Vec<SearchHit> = resp.json().await.ok()?;
    first_hit(hits)
  }
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ReverseResponse {
  #[serde(default)]
  display_name: String,
}

/// One entry of a `/search` response. Nominatim serialises coordinates as
/// strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
  lat:          String,
  lon:          String,
  display_name: String,
}

fn first_hit(hits: Vec<SearchHit>) -> Option<ForwardHit> {
  let hit = hits.into_iter().next()?;
  let latitude = hit.lat.parse().ok()?;
  let longitude = hit.lon.parse().ok()?;
  Some(ForwardHit {
    latitude,
    longitude,
    display_name: hit.display_name,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn search_response_parses_string_coordinates() {
    let hits: Vec<SearchHit> = serde_json::from_str(
      r#"[{"lat":"40.7128","lon":"-74.0060","display_name":"New York, USA"}]"#,
    )
    .unwrap();
    let hit = first_hit(hits).unwrap();
    assert_eq!(hit.latitude, 40.7128);
    assert_eq!(hit.longitude, -74.006);
    assert_eq!(hit.display_name, "New York, USA");
  }

  #[test]
  fn empty_search_response_is_none() {
    let hits: Vec<SearchHit> = serde_json::from_str("[]").unwrap();
    assert!(first_hit(hits).is_none());
  }

  #[test]
  fn unparsable_coordinates_are_none() {
    let hits: Vec<SearchHit> = serde_json::from_str(
      r#"[{"lat":"not-a-number","lon":"-74.0060","display_name":"x"}]"#,
    )
    .unwrap();
    assert!(first_hit(hits).is_none());
  }

  #[test]
  fn reverse_response_tolerates_missing_display_name() {
    let body: ReverseResponse = serde_json::from_str(r#"{"error":"no result"}"#).unwrap();
    assert!(body.display_name.is_empty());
  }
}
