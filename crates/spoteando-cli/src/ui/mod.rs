//! TUI rendering; orchestrates all panes.

pub mod creators;
pub mod feed;
pub mod forms;
pub mod spot_detail;
pub mod spot_list;

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use spoteando_core::{navigation::Tab, settings::Theme, view::Filter};

use crate::app::App;

/// Parse one of the theme's `#rrggbb` colours.
pub fn color(hex: &str) -> Color { hex.parse().unwrap_or(Color::Reset) }

pub fn theme(app: &App) -> Theme { app.controller.state.settings.theme() }

/// A bordered block in the current theme.
pub fn panel<'a>(title: impl Into<Line<'a>>, app: &App) -> Block<'a> {
  let theme = theme(app);
  Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(color(theme.border)))
    .style(Style::default().fg(color(theme.text)).bg(color(theme.surface)))
}

/// Style of the row under a cursor.
pub fn cursor_style(app: &App) -> Style {
  Style::default()
    .bg(color(theme(app).accent))
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

pub fn muted(app: &App) -> Style { Style::default().fg(color(theme(app).muted)) }

fn filter_label<T: std::fmt::Display>(filter: &Filter<T>, wildcard: &'static str) -> String {
  match filter {
    Filter::Any => wildcard.to_owned(),
    Filter::Only(value) => value.to_string(),
  }
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();
  f.render_widget(
    Block::default().style(Style::default().bg(color(theme(app).background))),
    area,
  );

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let screen = app.screen();
  let header_style = Style::default().fg(Color::White).bg(color(theme(app).header));

  let mut spans = vec![Span::styled(
    " Spoteando ",
    header_style.add_modifier(Modifier::BOLD),
  )];
  for (i, tab) in Tab::BAR.iter().enumerate() {
    let label = format!(" {} {} ", i + 1, tab.title());
    let style = if *tab == screen {
      header_style.add_modifier(Modifier::REVERSED)
    } else {
      header_style
    };
    spans.push(Span::styled(label, style));
  }
  if !Tab::BAR.contains(&screen) {
    spans.push(Span::styled(format!("  › {}", screen.title()), header_style));
  }

  let block = Block::default().style(header_style);
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen() {
    Tab::Home => draw_home(f, area, app),
    Tab::Search => creators::draw_search(f, area, app),
    Tab::Creator => creators::draw_creator(f, area, app),
    Tab::Detail => spot_detail::draw(f, area, app),
    Tab::Gallery => spot_detail::draw_gallery(f, area, app),
    Tab::Favorites => {
      let spots = app.controller.saved_spots();
      let title = format!(" Favoritos ({}) ", spots.len());
      spot_list::draw(f, area, app, title, &spots, "Aún no guardas spots.");
    }
    Tab::Notifications => feed::draw_history(f, area, app),
    Tab::Profile => forms::draw_profile(f, area, app),
    Tab::Add => forms::draw_add(f, area, app),
    Tab::Settings => feed::draw_settings(f, area, app),
  }
}

fn draw_home(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
    .split(area);

  let view = &app.controller.state.view;
  let spots = app.controller.filtered_spots();
  let mut title = format!(
    " Spots ({}) · {} · {} ",
    spots.len(),
    filter_label(&view.province_filter, "Todas"),
    filter_label(&view.kind_filter, "Todos"),
  );
  if view.nearby_only {
    title.push_str(&format!("· cerca de {} ", view.nearby_province));
  }

  let list_area = if app.editing.is_some() || !view.search_text.is_empty() {
    let parts = Layout::default()
      .direction(Direction::Vertical)
      .constraints([Constraint::Min(0), Constraint::Length(1)])
      .split(cols[0]);
    let cursor = if app.editing.is_some() { "_" } else { "" };
    f.render_widget(
      Paragraph::new(format!("/{}{cursor}", view.search_text))
        .style(Style::default().fg(Color::Yellow)),
      parts[1],
    );
    parts[0]
  } else {
    cols[0]
  };
  spot_list::draw(f, list_area, app, title, &spots, "Sin resultados.");

  let nearby = app.controller.nearby_recommendations();
  let lines: Vec<Line> = nearby
    .iter()
    .map(|spot| {
      Line::from(vec![
        Span::raw(format!("• {}", spot.name)),
        Span::styled(format!("  {}", spot.kind), muted(app)),
      ])
    })
    .collect();
  let block = panel(format!(" Cerca de {} ", view.nearby_province), app);
  f.render_widget(Paragraph::new(lines).block(block), cols[1]);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match (app.editing, app.screen()) {
    (Some(field), _) => (field.label(), "Escribe  Enter listo  Esc salir"),
    (None, Tab::Home) => (
      "INICIO",
      "jk mover  Enter ver  / buscar  p provincia  t tipo  n cerca  s guardar  m mapa",
    ),
    (None, Tab::Search) => ("BUSCAR", "jk mover  / buscar  Enter ver creador"),
    (None, Tab::Creator) => ("CREADOR", "jk mover  o orden  Enter ver  Esc volver"),
    (None, Tab::Detail) => ("DETALLE", "c comentar  s guardar  m mapa  g fotos  Esc volver"),
    (None, Tab::Gallery) => ("GALERÍA", "hl anterior/siguiente  Esc volver"),
    (None, Tab::Favorites) => ("FAVORITOS", "jk mover  Enter ver  s quitar"),
    (None, Tab::Notifications) => ("VISTOS", "jk mover  Enter ver"),
    (None, Tab::Profile) if app.controller.state.profile_edit_mode => (
      "PERFIL",
      "jk campo  Enter editar  a avatar  f foto  w guardar",
    ),
    (None, Tab::Profile) => ("PERFIL", "e editar  jk mover  Enter ver  g fotos"),
    (None, Tab::Add) => (
      "AGREGAR",
      "jk campo  Enter editar  p provincia  t tipo  f fotos  u ubicación  HJKL mover pin  c coordenadas  x quitar pin  m abrir mapa  w publicar",
    ),
    (None, Tab::Settings) => ("AJUSTES", "jk mover  Espacio cambiar"),
  };

  let status = if app.status_msg.is_empty() {
    format!("{hints}  Tab pestañas  q salir")
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::DarkGray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
