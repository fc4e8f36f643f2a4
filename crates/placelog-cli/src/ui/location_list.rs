//! Saved-location list pane with its substring search bar.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, InputField, Pane},
  geocode::Geocoder,
};

/// Render the saved-location list into `area`.
pub fn draw<G: Geocoder>(f: &mut Frame, area: Rect, app: &App<G>) {
  let border_color = if app.pane == Pane::List {
    Color::Cyan
  } else {
    Color::DarkGray
  };
  let block = Block::default()
    .title(format!(" Saved Locations ({}) ", app.locations.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(border_color));

  let items: Vec<ListItem> = app
    .locations
    .iter()
    .map(|loc| {
      let date = loc.created_at.format("%Y-%m-%d").to_string();
      ListItem::new(vec![
        Line::from(Span::styled(
          loc.address.clone(),
          Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
          Span::styled(format!("{date}  "), Style::default().fg(Color::DarkGray)),
          Span::styled(preview(&loc.history), Style::default().fg(Color::Gray)),
        ]),
      ])
    })
    .collect();

  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Search bar at the bottom while typing, or when a filter is in effect.
  let searching = app.input == Some(InputField::Search);
  if (searching || !app.search.is_empty()) && inner.height > 2 {
    let search_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height -= 1;

    let search_text = if searching {
      format!("/{}_", app.search)
    } else {
      format!("/{}", app.search)
    };
    f.render_widget(
      Paragraph::new(search_text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  let mut state = ListState::default();
  state.select(if app.locations.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}

/// First line of the history note, truncated the way the list renders it.
fn preview(history: &str) -> String {
  let first = history.lines().next().unwrap_or_default();
  if first.chars().count() > 80 {
    let mut s: String = first.chars().take(80).collect();
    s.push('…');
    s
  } else {
    first.to_string()
  }
}
