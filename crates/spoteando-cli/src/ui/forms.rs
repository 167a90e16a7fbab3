//! The "add a spot" form and the profile screen.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Modifier, Style},
  text::{Line, Span},
  widgets::{Paragraph, Wrap},
};

use super::{cursor_style, muted, panel, spot_list};
use crate::app::{App, Field};

/// One line per form field; the field under the form cursor is highlighted.
fn field_lines<'a>(app: &'a App, fields: &[Field]) -> Vec<Line<'a>> {
  fields
    .iter()
    .enumerate()
    .map(|(i, field)| {
      let editing = app.editing == Some(*field);
      let value = format!("{}{}", app.field(*field), if editing { "_" } else { "" });
      let label = Span::styled(format!("{:<16}", field.label()), muted(app));
      let value = if i == app.form_cursor {
        Span::styled(value, cursor_style(app))
      } else {
        Span::raw(value)
      };
      Line::from(vec![label, value])
    })
    .collect()
}

// ─── Add ──────────────────────────────────────────────────────────────────────

pub fn draw_add(f: &mut Frame, area: Rect, app: &App) {
  let state = &app.controller.state;
  let draft = &state.spot_draft;

  let mut lines = field_lines(app, &Field::SPOT_FORM);
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Provincia"), muted(app)),
    Span::raw(draft.province.to_string()),
  ]));
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Tipo"), muted(app)),
    Span::raw(draft.kind.to_string()),
  ]));
  lines.push(Line::from(""));

  let region = app.controller.map_region();
  let location = match state.selected_location {
    _ if app.editing == Some(Field::SpotCoordinates) => format!("{}_", app.coordinate_input),
    Some(at) => format!(
      "{:.4}, {:.4}  (mapa ±{:.2}°)",
      at.latitude, at.longitude, region.latitude_delta
    ),
    None => "sin ubicación".to_owned(),
  };
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Ubicación GPS"), muted(app)),
    Span::raw(location),
  ]));
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Fotos"), muted(app)),
    Span::raw(format!("{} seleccionada(s)", draft.photos.len())),
  ]));
  for photo in &draft.photos {
    lines.push(Line::from(Span::styled(format!("  {photo}"), muted(app))));
  }

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .block(panel(" Nuevo spot ", app)),
    area,
  );
}

// ─── Profile ──────────────────────────────────────────────────────────────────

pub fn draw_profile(f: &mut Frame, area: Rect, app: &App) {
  if app.controller.state.profile_edit_mode {
    draw_profile_editor(f, area, app);
    return;
  }

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(6), Constraint::Min(0)])
    .split(area);

  let profile = app.controller.public_profile();
  let header = vec![
    Line::from(Span::styled(
      profile.full_name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(profile.username.clone(), muted(app))),
    Line::from(profile.bio.clone()),
    Line::from(Span::styled(
      format!("{} foto(s)", profile.photos.len()),
      muted(app),
    )),
  ];
  f.render_widget(Paragraph::new(header).block(panel(" Perfil ", app)), rows[0]);

  let spots = app.controller.profile_spots();
  let title = format!(" Mis spots ({}) ", spots.len());
  spot_list::draw(f, rows[1], app, title, &spots, "Publica tu primer spot.");
}

fn draw_profile_editor(f: &mut Frame, area: Rect, app: &App) {
  let draft = &app.controller.state.profile_draft;
  let mut lines = field_lines(app, &Field::PROFILE_FORM);
  lines.push(Line::from(""));
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Avatar"), muted(app)),
    Span::raw(if draft.avatar_url.is_empty() {
      "sin avatar".to_owned()
    } else {
      draft.avatar_url.clone()
    }),
  ]));
  lines.push(Line::from(vec![
    Span::styled(format!("{:<16}", "Fotos"), muted(app)),
    Span::raw(draft.photos.len().to_string()),
  ]));
  for photo in &draft.photos {
    lines.push(Line::from(Span::styled(format!("  {photo}"), muted(app))));
  }

  f.render_widget(
    Paragraph::new(lines)
      .wrap(Wrap { trim: false })
      .block(panel(" Editar perfil ", app)),
    area,
  );
}
