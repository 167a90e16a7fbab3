//! Spot list pane, shared by every screen that lists spots.

use ratatui::{
  Frame,
  layout::Rect,
  text::{Line, Span},
  widgets::{List, ListItem, ListState, Paragraph},
};
use spoteando_core::spot::Spot;

use super::{cursor_style, muted, panel};
use crate::app::App;

/// Render `spots` with the app cursor highlighted. `empty` is shown when
/// there is nothing to list.
pub fn draw(f: &mut Frame, area: Rect, app: &App, title: String, spots: &[Spot], empty: &str) {
  let block = panel(title, app);

  if spots.is_empty() {
    f.render_widget(Paragraph::new(empty.to_owned()).style(muted(app)).block(block), area);
    return;
  }

  let saved = &app.controller.state.saved;
  let comments = &app.controller.state.comments;
  let items: Vec<ListItem> = spots
    .iter()
    .map(|spot| {
      let marker = if saved.contains(&spot.id) { "★ " } else { "  " };
      let count = comments.count(&spot.id);
      ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::raw(spot.name.clone()),
        Span::styled(
          format!("  {} · {} · {} · 💬{count}", spot.province, spot.kind, spot.user),
          muted(app),
        ),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cursor.min(spots.len() - 1)));

  f.render_stateful_widget(
    List::new(items).block(block).highlight_style(cursor_style(app)),
    area,
    &mut state,
  );
}
