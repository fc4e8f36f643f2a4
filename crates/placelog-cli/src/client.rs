//! Async HTTP client wrapping the placelog JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use placelog_core::{Location, NewLocation};
use reqwest::Client;

/// Connection settings for the placelog API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the placelog JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// `GET /api/locations[?address=<substring>]`
  pub async fn list_locations(&self, filter: Option<&str>) -> Result<Vec<Location>> {
    let mut req = self.client.get(self.url("/locations"));
    if let Some(f) = filter {
      req = req.query(&[("address", f)]);
    }

    let resp = req.send().await.context("GET /locations failed")?;
    if !resp.status().is_success() {
      return Err(anyhow!("GET /locations → {}", resp.status()));
    }
    resp.json().await.context("deserialising locations")
  }

  /// `POST /api/locations`
  pub async fn create_location(&self, input: &NewLocation) -> Result<Location> {
    let resp = self
      .client
      .post(self.url("/locations"))
      .json(input)
      .send()
      .await
      .context("POST /locations failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("POST /locations → {}", resp.status()));
    }
    resp.json().await.context("deserialising created location")
  }
}
