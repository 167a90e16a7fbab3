//! Spot detail screen and the full-screen photo gallery.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::{muted, panel};
use crate::app::{App, Field};

// ─── Detail ───────────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(spot) = app.controller.nav.selected_spot() else {
    return;
  };
  let saved = app.controller.state.saved.contains(&spot.id);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(8), Constraint::Percentage(45)])
    .split(area);

  let bold = Style::default().add_modifier(Modifier::BOLD);
  let mut lines = vec![
    Line::from(vec![
      Span::styled(spot.name.clone(), bold),
      Span::raw(if saved { "  ★ guardado" } else { "" }),
    ]),
    Line::from(Span::styled(
      format!("{} · {} · {}", spot.location, spot.province, spot.kind),
      muted(app),
    )),
    Line::from(""),
    Line::from(spot.description.clone()),
    Line::from(""),
    Line::from(vec![Span::styled("Por ", muted(app)), Span::raw(spot.user.clone())]),
  ];
  if let Some(at) = app.controller.selected_coordinate() {
    lines.push(Line::from(Span::styled(
      format!("📍 {:.4}, {:.4}", at.latitude, at.longitude),
      muted(app),
    )));
  }
  if !spot.map_url.is_empty() {
    lines.push(Line::from(Span::styled(spot.map_url.clone(), muted(app))));
  }
  lines.push(Line::from(Span::styled(
    format!("{} foto(s)", spot.photos.len()),
    muted(app),
  )));

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .block(panel(" Detalle ", app)),
    rows[0],
  );

  draw_comments(f, rows[1], app);
}

fn draw_comments(f: &mut Frame, area: Rect, app: &App) {
  let comments = app.controller.selected_comments();
  let mut lines: Vec<Line> = Vec::new();

  if app.editing == Some(Field::Comment) || !app.controller.nav.comment_draft.is_empty() {
    lines.push(Line::from(Span::styled(
      format!("> {}_", app.controller.nav.comment_draft),
      Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
  }

  if comments.is_empty() {
    lines.push(Line::from(Span::styled("Sé el primero en comentar.", muted(app))));
  }
  for comment in comments {
    lines.push(Line::from(vec![
      Span::styled(format!("{}  ", comment.user), Style::default().add_modifier(Modifier::BOLD)),
      Span::raw(comment.text.clone()),
    ]));
  }

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: true })
      .block(panel(format!(" Comentarios ({}) ", comments.len()), app)),
    area,
  );
}

// ─── Gallery ──────────────────────────────────────────────────────────────────

pub fn draw_gallery(f: &mut Frame, area: Rect, app: &App) {
  let Some(gallery) = app.controller.nav.gallery() else {
    return;
  };
  let title = format!(" Foto {} de {} ", gallery.index + 1, gallery.images.len());
  let lines = vec![
    Line::from(""),
    Line::from(gallery.current().unwrap_or_default().to_owned()),
    Line::from(""),
    Line::from(Span::styled("← anterior   siguiente →", muted(app))),
  ];
  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .block(panel(title, app)),
    area,
  );
}
