//! TUI rendering — orchestrates all panes.

pub mod form;
pub mod location_list;
pub mod map;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::{
  app::{App, InputField, Pane},
  geocode::Geocoder,
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<G: Geocoder>(f: &mut Frame, app: &App<G>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " placelog  [Tab] pane  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<G: Geocoder>(f: &mut Frame, area: Rect, app: &App<G>) {
  // Map on the left, form and saved list stacked on the right.
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
    .split(area);

  map::draw(f, cols[0], app);

  let right = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(9), Constraint::Min(0)])
    .split(cols[1]);

  form::draw(f, right[0], app);
  location_list::draw(f, right[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<G: Geocoder>(f: &mut Frame, area: Rect, app: &App<G>) {
  let (mode_label, hints) = match (app.input, app.pane) {
    (Some(InputField::Find), _) => ("FIND", "Type an address  Esc cancel  Enter search"),
    (Some(InputField::Search), _) => ("SEARCH", "Type to filter  Esc cancel  Enter search"),
    (Some(InputField::Address), _) | (Some(InputField::History), _) => {
      ("EDIT", "Type text  Esc/Enter done")
    }
    (None, Pane::Map) => (
      "MAP",
      "↑↓←→/hjkl pan  +/- zoom  Enter drop pin  f find address",
    ),
    (None, Pane::Form) => ("FORM", "a address  h history  s save"),
    (None, Pane::List) => ("LIST", "↑↓/jk navigate  Enter show on map  / search"),
  };

  let status = if app.message.is_empty() {
    hints.to_string()
  } else {
    app.message.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::Gray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
