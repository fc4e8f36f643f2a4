//! `placelog` — terminal UI for the placelog location store.
//!
//! # Usage
//!
//! ```
//! placelog --url http://localhost:8080
//! placelog --config ~/.config/placelog/config.toml
//! ```

// Native `async fn` in traits; no `Send` bound is needed because the app
// runs on the main task and is never spawned.
#![allow(async_fn_in_trait)]

mod app;
mod client;
mod geocode;
mod ui;

use std::{io, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use geocode::{Geocoder, GeocoderConfig, HttpGeocoder};
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "placelog", about = "Terminal UI for the placelog location store")]
struct Args {
  /// Path to a TOML config file (url, geocoder_url, geocoder_key).
  #[arg(short, long, value_name = "FILE")]
  config: Option<std::path::PathBuf>,

  /// Base URL of the placelog server (default: http://localhost:8080).
  #[arg(long, env = "PLACELOG_URL")]
  url: Option<String>,

  /// Base URL of the geocoding service (Nominatim-compatible).
  #[arg(long, env = "PLACELOG_GEOCODER_URL")]
  geocoder_url: Option<String>,

  /// API key for the geocoding service, if it requires one.
  #[arg(long, env = "PLACELOG_GEOCODER_KEY")]
  geocoder_key: Option<String>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  geocoder_url: String,
  #[serde(default)]
  geocoder_key: String,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
      .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
  };
  let geocoder_config = GeocoderConfig {
    base_url: args
      .geocoder_url
      .or_else(|| (!file_cfg.geocoder_url.is_empty()).then(|| file_cfg.geocoder_url.clone()))
      .unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string()),
    api_key:  args
      .geocoder_key
      .or_else(|| (!file_cfg.geocoder_key.is_empty()).then(|| file_cfg.geocoder_key.clone())),
  };

  let client = ApiClient::new(api_config)?;
  let geocoder = HttpGeocoder::new(geocoder_config)?;
  let mut app = App::new(client, geocoder);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Load initial data.
  let load_result = app.load_locations(None).await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop<G: Geocoder>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<G>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}
