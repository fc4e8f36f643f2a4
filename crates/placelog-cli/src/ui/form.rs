//! Location form pane — address, history note, and the pinned coordinate.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
  app::{App, InputField, Pane},
  geocode::Geocoder,
};

/// Render the form into `area`.
pub fn draw<G: Geocoder>(f: &mut Frame, area: Rect, app: &App<G>) {
  let border_color = if app.pane == Pane::Form {
    Color::Cyan
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(" New Location ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color));

  let inner = block.inner(area);
  f.render_widget(block, area);

  let label = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

  let pin = match app.marker {
    Some((lat, lng)) => format!("{lat:.4}, {lng:.4}"),
    None => "— (drop a pin on the map)".to_string(),
  };

  let lines = vec![
    field_line("Address", &app.address, label, app.input == Some(InputField::Address)),
    field_line("History", &app.history, label, app.input == Some(InputField::History)),
    Line::from(vec![
      Span::styled("Pin:     ", label),
      Span::raw(pin),
    ]),
    Line::raw(""),
    Line::styled(
      "[a] address  [h] history  [s] save",
      Style::default().fg(Color::Gray),
    ),
  ];

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn field_line<'a>(
  name: &'a str,
  value: &'a str,
  label: Style,
  editing: bool,
) -> Line<'a> {
  let mut spans = vec![
    Span::styled(format!("{name}: "), label),
    Span::raw(value),
  ];
  if editing {
    spans.push(Span::styled("_", Style::default().fg(Color::Yellow)));
  }
  Line::from(spans)
}
