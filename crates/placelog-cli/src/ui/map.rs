//! Map pane — a pannable geographic viewport with a crosshair and a marker.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::{App, InputField},
  geocode::Geocoder,
};

/// Render the map viewport into `area`.
pub fn draw<G: Geocoder>(f: &mut Frame, area: Rect, app: &App<G>) {
  let title = format!(" Map  {:.4}, {:.4} ", app.center.0, app.center.1);
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner = block.inner(area);
  f.render_widget(block, area);
  if inner.width == 0 || inner.height == 0 {
    return;
  }

  // Find-address bar at the bottom of the pane while typing.
  if app.input == Some(InputField::Find) && inner.height > 2 {
    let find_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height -= 1;
    f.render_widget(
      Paragraph::new(format!("find: {}_", app.find))
        .style(Style::default().fg(Color::Yellow)),
      find_area,
    );
  }

  // Graticule backdrop.
  let rows: Vec<Line> = (0..inner.height)
    .map(|y| {
      let line: String = (0..inner.width)
        .map(|x| if x % 6 == 0 && y % 3 == 0 { '·' } else { ' ' })
        .collect();
      Line::from(line)
    })
    .collect();
  f.render_widget(
    Paragraph::new(rows).style(Style::default().fg(Color::DarkGray)),
    inner,
  );

  // Marker, if it falls inside the viewport.
  if let Some(marker) = app.marker
    && let Some((x, y)) = project(inner, app.center, app.span, marker)
  {
    f.render_widget(
      Paragraph::new("×").style(
        Style::default()
          .fg(Color::Red)
          .add_modifier(Modifier::BOLD),
      ),
      Rect { x, y, width: 1, height: 1 },
    );
  }

  // Crosshair at the viewport center — where Enter drops a pin.
  let cx = inner.x + inner.width / 2;
  let cy = inner.y + inner.height / 2;
  f.render_widget(
    Paragraph::new("+").style(Style::default().fg(Color::Yellow)),
    Rect { x: cx, y: cy, width: 1, height: 1 },
  );
}

/// Project a geographic point into a cell of `area`, or `None` when it lies
/// outside the viewport. `span` is the latitude coverage of the full height;
/// longitude coverage is twice that (terminal cells are roughly 2:1).
fn project(
  area: Rect,
  center: (f64, f64),
  span: f64,
  point: (f64, f64),
) -> Option<(u16, u16)> {
  let span_lng = span * 2.0;
  // Latitude grows upward, rows grow downward.
  let fy = (center.0 - point.0) / span + 0.5;
  let fx = (point.1 - center.1) / span_lng + 0.5;
  if !(0.0..1.0).contains(&fx) || !(0.0..1.0).contains(&fy) {
    return None;
  }
  let x = area.x + (fx * f64::from(area.width)) as u16;
  let y = area.y + (fy * f64::from(area.height)) as u16;
  Some((
    x.min(area.x + area.width - 1),
    y.min(area.y + area.height - 1),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;

  const AREA: Rect = Rect {
    x:      10,
    y:      5,
    width:  40,
    height: 20,
  };

  #[test]
  fn center_projects_to_middle_cell() {
    let center = (40.0, -74.0);
    let (x, y) = project(AREA, center, 1.0, center).unwrap();
    assert_eq!((x, y), (30, 15));
  }

  #[test]
  fn north_of_center_is_a_lower_row_index() {
    let center = (40.0, -74.0);
    let (_, y_mid) = project(AREA, center, 1.0, center).unwrap();
    let (_, y_north) = project(AREA, center, 1.0, (40.25, -74.0)).unwrap();
    assert!(y_north < y_mid);
  }

  #[test]
  fn point_outside_viewport_is_none() {
    let center = (40.0, -74.0);
    assert!(project(AREA, center, 1.0, (45.0, -74.0)).is_none());
    assert!(project(AREA, center, 1.0, (40.0, -80.0)).is_none());
  }
}
