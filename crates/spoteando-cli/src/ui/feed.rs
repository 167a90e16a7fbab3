//! Viewed-spot history and settings screens.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph},
};
use spoteando_core::{history::RECENT_ACTIVITY, settings::SettingKey};
use strum::IntoEnumIterator;

use super::{cursor_style, muted, panel};
use crate::app::App;

pub fn draw_history(f: &mut Frame, area: Rect, app: &App) {
  let feed = app.controller.state.history.feed();
  let block = panel(" Vistos recientemente ", app);
  if feed.is_empty() {
    f.render_widget(
      Paragraph::new("Los spots que abras aparecerán aquí.")
        .style(muted(app))
        .block(block),
      area,
    );
    return;
  }

  let items: Vec<ListItem> = feed
    .iter()
    .map(|viewed| {
      ListItem::new(Line::from(vec![
        Span::raw(viewed.name.clone()),
        Span::styled(
          format!("  {} · {} · {}", viewed.province, viewed.kind, viewed.date_label),
          muted(app),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor.min(feed.len() - 1)));
  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style(app)),
    area,
    &mut state,
  );
}

pub fn draw_settings(f: &mut Frame, area: Rect, app: &App) {
  let key_count = SettingKey::iter().count() as u16;
  let chunks = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(key_count + 2), Constraint::Min(3)])
    .split(area);

  let settings = &app.controller.state.settings;
  let items: Vec<ListItem> = SettingKey::iter()
    .map(|key| {
      let mark = if settings.get(key) { "[x]" } else { "[ ]" };
      ListItem::new(format!("{mark} {key}"))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor));
  f.render_stateful_widget(
    List::new(items)
      .block(panel(" Configuración ", app))
      .highlight_style(cursor_style(app)),
    chunks[0],
    &mut state,
  );

  draw_recent_activity(f, chunks[1], app);
}

fn draw_recent_activity(f: &mut Frame, area: Rect, app: &App) {
  let block = panel(format!(" Actividad reciente (últimos {RECENT_ACTIVITY} vistos) "), app);
  let recent = app.controller.state.history.recent_activity();
  let lines: Vec<Line> = if recent.is_empty() {
    vec![Line::from(Span::styled("Aún no has visto spots.", muted(app)))]
  } else {
    recent
      .iter()
      .map(|viewed| {
        Line::from(vec![
          Span::raw(viewed.name.clone()),
          Span::styled(format!("  {}", viewed.date_label), muted(app)),
        ])
      })
      .collect()
  };
  f.render_widget(Paragraph::new(lines).block(block), area);
}
