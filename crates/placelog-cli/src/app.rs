//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use placelog_core::{Location, NewLocation};

use crate::{client::ApiClient, geocode::Geocoder};

/// Map center on first launch (New York City), and the initial latitude span
/// of the map viewport in degrees.
pub const DEFAULT_CENTER: (f64, f64) = (40.7128, -74.006);
pub const DEFAULT_SPAN: f64 = 0.5;

/// Span used when jumping to a found or selected location — the analog of
/// zooming the map in on a marker.
const FOCUS_SPAN: f64 = 0.05;

const MSG_FILL_ALL: &str = "Please select a location on the map and fill all fields.";
const MSG_SAVED: &str = "Saved!";
const MSG_SAVE_FAILED: &str = "Error saving location.";
const MSG_NOT_FOUND: &str = "Address not found.";

// ─── Focus ────────────────────────────────────────────────────────────────────

/// Which pane owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
  Map,
  Form,
  List,
}

/// Which text buffer is being edited, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
  /// The form's address field.
  Address,
  /// The form's history note.
  History,
  /// The saved-list substring search.
  Search,
  /// The forward-geocode ("find address on map") query.
  Find,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<G> {
  /// Pane with keyboard focus.
  pub pane: Pane,

  /// Active text input, if the user is typing into a buffer.
  pub input: Option<InputField>,

  /// Geographic coordinate at the middle of the map viewport. Panning moves
  /// this; dropping a pin marks it.
  pub center: (f64, f64),

  /// Degrees of latitude covered by the viewport vertically.
  pub span: f64,

  /// The selected point, set by dropping a pin, finding an address, or
  /// selecting a saved row. Required for saving.
  pub marker: Option<(f64, f64)>,

  /// Form fields.
  pub address: String,
  pub history: String,

  /// Saved-list search text.
  pub search: String,

  /// Forward-geocode query text.
  pub find: String,

  /// Locations returned by the most recent list fetch.
  pub locations: Vec<Location>,

  /// Cursor position within the saved-location list.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub message: String,

  /// Shared HTTP client for the placelog API.
  pub client: Arc<ApiClient>,

  /// External geocoding capability.
  geocoder: G,
}

impl<G: Geocoder> App<G> {
  /// Create an [`App`] with an empty location list.
  pub fn new(client: ApiClient, geocoder: G) -> Self {
    Self {
      pane: Pane::Map,
      input: None,
      center: DEFAULT_CENTER,
      span: DEFAULT_SPAN,
      marker: None,
      address: String::new(),
      history: String::new(),
      search: String::new(),
      find: String::new(),
      locations: Vec::new(),
      list_cursor: 0,
      message: String::new(),
      client: Arc::new(client),
      geocoder,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch locations from the API and replace `self.locations`.
  pub async fn load_locations(&mut self, filter: Option<&str>) -> anyhow::Result<()> {
    self.message = "Loading…".into();
    match self.client.list_locations(filter).await {
      Ok(locations) => {
        self.locations = locations;
        self.list_cursor = 0;
        self.message = String::new();
        Ok(())
      }
      Err(e) => {
        self.message = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Submit the current search text to the list endpoint. An empty search
  /// box lists everything.
  pub async fn search_saved(&mut self) {
    let filter = (!self.search.is_empty()).then(|| self.search.clone());
    let _ = self.load_locations(filter.as_deref()).await;
  }

  // ── Map actions ───────────────────────────────────────────────────────────

  /// Drop a pin at the viewport center — the map-click gesture. Sets the
  /// marker and reverse-geocodes it into the address field; a failed or
  /// empty lookup leaves the address blank rather than surfacing an error.
  pub async fn drop_pin(&mut self) {
    let (lat, lng) = self.center;
    self.marker = Some((lat, lng));
    self.message.clear();
    self.address = self.geocoder.reverse(lat, lng).await.unwrap_or_default();
  }

  /// Forward-geocode the find query: recenter and mark the map and fill the
  /// address field, or report that nothing matched.
  pub async fn find_address(&mut self) {
    if self.find.is_empty() {
      return;
    }
    match self.geocoder.forward(&self.find).await {
      Some(hit) => {
        self.center = (hit.latitude, hit.longitude);
        self.marker = Some((hit.latitude, hit.longitude));
        self.address = hit.display_name;
        self.span = FOCUS_SPAN;
        self.message.clear();
      }
      None => self.message = MSG_NOT_FOUND.into(),
    }
  }

  // ── Form actions ──────────────────────────────────────────────────────────

  /// Whether the form can be submitted: address, a dropped pin, and history
  /// must all be present. The API enforces the same rule independently.
  pub fn can_submit(&self) -> bool {
    !self.address.is_empty() && self.marker.is_some() && !self.history.is_empty()
  }

  /// Save the current form as a new location. On success the form and
  /// marker are cleared and the list re-fetched.
  pub async fn save(&mut self) {
    if !self.can_submit() {
      self.message = MSG_FILL_ALL.into();
      return;
    }
    // can_submit guarantees the marker is set.
    let Some((latitude, longitude)) = self.marker else {
      return;
    };
    let input = NewLocation {
      address: self.address.clone(),
      latitude,
      longitude,
      history: self.history.clone(),
    };
    match self.client.create_location(&input).await {
      Ok(_) => {
        self.address.clear();
        self.history.clear();
        self.marker = None;
        let _ = self.load_locations(None).await;
        self.message = MSG_SAVED.into();
      }
      Err(_) => self.message = MSG_SAVE_FAILED.into(),
    }
  }

  // ── List actions ──────────────────────────────────────────────────────────

  /// Show the row under the cursor on the map and copy it into the form.
  /// Purely local — no network call. Re-saving creates a new row.
  pub fn select_location(&mut self) {
    let Some(loc) = self.locations.get(self.list_cursor).cloned() else {
      return;
    };
    self.center = (loc.latitude, loc.longitude);
    self.marker = Some((loc.latitude, loc.longitude));
    self.address = loc.address;
    self.history = loc.history;
    self.span = FOCUS_SPAN;
    self.message.clear();
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Text input mode: all printable keys go into the active buffer.
    if let Some(field) = self.input {
      self.handle_input_key(field, key).await;
      return Ok(true);
    }

    match self.pane {
      Pane::Map => self.handle_map_key(key).await,
      Pane::Form => self.handle_form_key(key).await,
      Pane::List => self.handle_list_key(key),
    }
  }

  async fn handle_input_key(&mut self, field: InputField, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.input = None;
      }
      KeyCode::Enter => {
        self.input = None;
        match field {
          InputField::Find => self.find_address().await,
          InputField::Search => self.search_saved().await,
          InputField::Address | InputField::History => {}
        }
      }
      KeyCode::Backspace => {
        self.buffer_mut(field).pop();
      }
      KeyCode::Char(c) => {
        self.buffer_mut(field).push(c);
      }
      _ => {}
    }
  }

  async fn handle_map_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let lat_step = self.span / 8.0;
    let lng_step = lat_step * 2.0;

    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab => self.pane = Pane::Form,

      // Panning
      KeyCode::Up | KeyCode::Char('k') => self.center.0 += lat_step,
      KeyCode::Down | KeyCode::Char('j') => self.center.0 -= lat_step,
      KeyCode::Left | KeyCode::Char('h') => self.center.1 -= lng_step,
      KeyCode::Right | KeyCode::Char('l') => self.center.1 += lng_step,

      // Zoom
      KeyCode::Char('+') | KeyCode::Char('=') => {
        self.span = (self.span / 2.0).max(0.001);
      }
      KeyCode::Char('-') => {
        self.span = (self.span * 2.0).min(180.0);
      }

      // Drop a pin at the crosshair.
      KeyCode::Enter => self.drop_pin().await,

      // Find an address on the map.
      KeyCode::Char('f') => {
        self.find.clear();
        self.input = Some(InputField::Find);
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab => self.pane = Pane::List,

      KeyCode::Char('a') => self.input = Some(InputField::Address),
      KeyCode::Char('h') => self.input = Some(InputField::History),
      KeyCode::Char('s') => self.save().await,

      _ => {}
    }
    Ok(true)
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Tab => self.pane = Pane::Map,

      KeyCode::Down | KeyCode::Char('j') => {
        if !self.locations.is_empty() && self.list_cursor + 1 < self.locations.len() {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
        }
      }

      KeyCode::Enter => self.select_location(),

      KeyCode::Char('/') => {
        self.search.clear();
        self.input = Some(InputField::Search);
      }

      _ => {}
    }
    Ok(true)
  }

  fn buffer_mut(&mut self, field: InputField) -> &mut String {
    match field {
      InputField::Address => &mut self.address,
      InputField::History => &mut self.history,
      InputField::Search => &mut self.search,
      InputField::Find => &mut self.find,
    }
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;
  use uuid::Uuid;

  use crate::{client::ApiConfig, geocode::ForwardHit};

  /// Geocoder with canned answers; `None` simulates failure or no result.
  struct MockGeocoder {
    reverse: Option<String>,
    forward: Option<ForwardHit>,
  }

  impl Geocoder for MockGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Option<String> {
      self.reverse.clone()
    }

    async fn forward(&self, _query: &str) -> Option<ForwardHit> {
      self.forward.clone()
    }
  }

  fn app(geocoder: MockGeocoder) -> App<MockGeocoder> {
    // Never dialled in these tests.
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:0".into(),
    })
    .unwrap();
    App::new(client, geocoder)
  }

  fn saved(address: &str, lat: f64, lng: f64) -> Location {
    Location {
      id: Uuid::new_v4(),
      address: address.into(),
      latitude: lat,
      longitude: lng,
      history: format!("history of {address}"),
      created_at: Utc::now(),
    }
  }

  // ── Pin drop / reverse geocoding ──────────────────────────────────────────

  #[tokio::test]
  async fn drop_pin_sets_marker_and_fills_address() {
    let mut app = app(MockGeocoder {
      reverse: Some("1 Example Plaza".into()),
      forward: None,
    });
    app.center = (51.5, -0.1);

    app.drop_pin().await;

    assert_eq!(app.marker, Some((51.5, -0.1)));
    assert_eq!(app.address, "1 Example Plaza");
  }

  #[tokio::test]
  async fn failed_reverse_lookup_leaves_address_blank() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });
    app.address = "stale".into();

    app.drop_pin().await;

    // Marker still placed; address silently blank, no error message.
    assert!(app.marker.is_some());
    assert!(app.address.is_empty());
    assert!(app.message.is_empty());
  }

  // ── Find / forward geocoding ──────────────────────────────────────────────

  #[tokio::test]
  async fn find_recenters_marks_and_fills_address() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: Some(ForwardHit {
        latitude: 48.8566,
        longitude: 2.3522,
        display_name: "Paris, France".into(),
      }),
    });
    app.find = "paris".into();

    app.find_address().await;

    assert_eq!(app.center, (48.8566, 2.3522));
    assert_eq!(app.marker, Some((48.8566, 2.3522)));
    assert_eq!(app.address, "Paris, France");
    assert!(app.message.is_empty());
  }

  #[tokio::test]
  async fn failed_find_reports_not_found() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });
    app.find = "nowhere at all".into();
    let before = app.center;

    app.find_address().await;

    assert_eq!(app.message, "Address not found.");
    assert_eq!(app.center, before);
    assert!(app.marker.is_none());
  }

  #[tokio::test]
  async fn empty_find_query_is_a_no_op() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });

    app.find_address().await;

    assert!(app.message.is_empty());
  }

  // ── Save gating ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn save_is_blocked_until_all_fields_present() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });

    // No pin, no address, no history.
    assert!(!app.can_submit());
    app.save().await;
    assert_eq!(
      app.message,
      "Please select a location on the map and fill all fields."
    );

    // Each field alone is not enough.
    app.address = "123 Main St".into();
    assert!(!app.can_submit());
    app.marker = Some((40.7128, -74.006));
    assert!(!app.can_submit());
    app.history = "Former bakery".into();
    assert!(app.can_submit());
  }

  #[tokio::test]
  async fn save_transport_failure_shows_literal_message() {
    // Port 0 is unroutable, so the create call fails at the transport layer.
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });
    app.address = "123 Main St".into();
    app.marker = Some((40.7128, -74.006));
    app.history = "Former bakery".into();

    app.save().await;

    assert_eq!(app.message, "Error saving location.");
    // Form kept so the user can retry.
    assert_eq!(app.address, "123 Main St");
  }

  // ── Row selection ─────────────────────────────────────────────────────────

  #[test]
  fn selecting_a_row_repopulates_form_and_recenters() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });
    app.locations = vec![
      saved("123 Main St", 40.7128, -74.006),
      saved("456 Elm Ave", 34.0522, -118.2437),
    ];
    app.list_cursor = 1;
    app.message = "old message".into();

    app.select_location();

    assert_eq!(app.center, (34.0522, -118.2437));
    assert_eq!(app.marker, Some((34.0522, -118.2437)));
    assert_eq!(app.address, "456 Elm Ave");
    assert_eq!(app.history, "history of 456 Elm Ave");
    assert!(app.message.is_empty());
  }

  #[test]
  fn selecting_on_an_empty_list_is_a_no_op() {
    let mut app = app(MockGeocoder {
      reverse: None,
      forward: None,
    });
    app.select_location();
    assert!(app.marker.is_none());
  }
}
