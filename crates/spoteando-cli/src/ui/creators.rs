//! Creator search and the creator page.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph},
};

use super::{cursor_style, muted, panel, spot_list};
use crate::app::{App, Field};

pub fn draw_search(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(area);

  let query = &app.controller.state.view.creator_search_text;
  let cursor = if app.editing == Some(Field::CreatorSearch) { "_" } else { "" };
  f.render_widget(
    Paragraph::new(format!("/{query}{cursor}")).style(Style::default().fg(Color::Yellow)),
    rows[0],
  );

  let creators = app.controller.filtered_creators();
  let block = panel(format!(" Creadores ({}) ", creators.len()), app);
  if creators.is_empty() {
    f.render_widget(
      Paragraph::new("Ningún creador coincide.").style(muted(app)).block(block),
      rows[1],
    );
    return;
  }

  let items: Vec<ListItem> = creators
    .iter()
    .map(|creator| {
      ListItem::new(Line::from(vec![
        Span::raw(creator.full_name.clone()),
        Span::styled(format!("  {}  {}", creator.username, creator.display_bio()), muted(app)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor.min(creators.len() - 1)));
  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style(app)),
    rows[1],
    &mut state,
  );
}

pub fn draw_creator(f: &mut Frame, area: Rect, app: &App) {
  let Some(creator) = app.controller.nav.selected_creator() else {
    return;
  };
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(5), Constraint::Min(0)])
    .split(area);

  let header = vec![
    Line::from(Span::styled(
      creator.full_name.clone(),
      Style::default().add_modifier(Modifier::BOLD),
    )),
    Line::from(Span::styled(creator.username.clone(), muted(app))),
    Line::from(creator.display_bio().to_owned()),
  ];
  f.render_widget(Paragraph::new(header).block(panel(" Creador ", app)), rows[0]);

  let spots = app.controller.creator_spots();
  let title = format!(
    " Spots ({}) · orden: {} ",
    spots.len(),
    app.controller.nav.creator_sort
  );
  spot_list::draw(f, rows[1], app, title, &spots, "Este creador aún no tiene spots.");
}
