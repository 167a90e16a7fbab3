//! Application shell and key dispatcher.
//!
//! All domain behaviour lives in [`Controller`]; this module maps keys to
//! controller commands and keeps the terminal-only state (cursors, which text
//! field is receiving input, the status line).

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use spoteando_core::{
  Notice,
  controller::Controller,
  geo::Coordinate,
  navigation::Tab,
  province::Province,
  settings::SettingKey,
  spot::{Spot, SpotKind},
  state::AppState,
};
use strum::IntoEnumIterator;

use crate::device::TerminalDevice;

// ─── Text fields ──────────────────────────────────────────────────────────────

/// A text field that can receive typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
  Search,
  CreatorSearch,
  Comment,
  SpotName,
  SpotDescription,
  SpotLocation,
  /// A typed `"<lat>, <lng>"` pin.
  SpotCoordinates,
  ProfileName,
  ProfileUsername,
  ProfileBio,
}

impl Field {
  pub const SPOT_FORM: [Field; 3] = [Field::SpotName, Field::SpotDescription, Field::SpotLocation];
  pub const PROFILE_FORM: [Field; 3] =
    [Field::ProfileName, Field::ProfileUsername, Field::ProfileBio];

  pub fn label(self) -> &'static str {
    match self {
      Field::Search => "Buscar",
      Field::CreatorSearch => "Buscar creadores",
      Field::Comment => "Comentario",
      Field::SpotName => "Nombre",
      Field::SpotDescription => "Descripción",
      Field::SpotLocation => "Ubicación",
      Field::SpotCoordinates => "Coordenadas",
      Field::ProfileName => "Nombre completo",
      Field::ProfileUsername => "Usuario",
      Field::ProfileBio => "Biografía",
    }
  }
}

/// The next item after `current` in `items`, wrapping around.
fn cycle<T: PartialEq + Copy>(items: impl Iterator<Item = T>, current: T) -> T {
  let items: Vec<T> = items.collect();
  match items.iter().position(|item| *item == current) {
    Some(i) => items[(i + 1) % items.len()],
    None => items.first().copied().unwrap_or(current),
  }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level terminal state.
pub struct App {
  pub controller: Controller,

  /// Capability stand-ins handed to device commands.
  pub device: TerminalDevice,

  /// Cursor within the list the current screen shows.
  pub cursor: usize,

  /// Cursor within the current screen's form fields.
  pub form_cursor: usize,

  /// Field receiving typed characters, if any.
  pub editing: Option<Field>,

  /// Typed pin coordinates, applied when the field is committed.
  pub coordinate_input: String,

  /// One-line status message shown in the status bar.
  pub status_msg: String,
}

impl App {
  pub fn new(state: AppState, device: TerminalDevice) -> Self {
    Self {
      controller: Controller::new(state),
      device,
      cursor: 0,
      form_cursor: 0,
      editing: None,
      coordinate_input: String::new(),
      status_msg: String::new(),
    }
  }

  pub fn screen(&self) -> Tab { self.controller.nav.screen() }

  pub fn field(&self, field: Field) -> &str {
    let state = &self.controller.state;
    match field {
      Field::Search => &state.view.search_text,
      Field::CreatorSearch => &state.view.creator_search_text,
      Field::Comment => &self.controller.nav.comment_draft,
      Field::SpotName => &state.spot_draft.name,
      Field::SpotDescription => &state.spot_draft.description,
      Field::SpotLocation => &state.spot_draft.location_label,
      Field::SpotCoordinates => &self.coordinate_input,
      Field::ProfileName => &state.profile_draft.full_name,
      Field::ProfileUsername => &state.profile_draft.username,
      Field::ProfileBio => &state.profile_draft.bio,
    }
  }

  fn field_mut(&mut self, field: Field) -> &mut String {
    let controller = &mut self.controller;
    match field {
      Field::Search => &mut controller.state.view.search_text,
      Field::CreatorSearch => &mut controller.state.view.creator_search_text,
      Field::Comment => &mut controller.nav.comment_draft,
      Field::SpotName => &mut controller.state.spot_draft.name,
      Field::SpotDescription => &mut controller.state.spot_draft.description,
      Field::SpotLocation => &mut controller.state.spot_draft.location_label,
      Field::SpotCoordinates => &mut self.coordinate_input,
      Field::ProfileName => &mut controller.state.profile_draft.full_name,
      Field::ProfileUsername => &mut controller.state.profile_draft.username,
      Field::ProfileBio => &mut controller.state.profile_draft.bio,
    }
  }

  // ── Screen contents ───────────────────────────────────────────────────────

  /// Spots listed on the current screen, in display order.
  pub fn listed_spots(&self) -> Vec<Spot> {
    let c = &self.controller;
    match self.screen() {
      Tab::Home => c.filtered_spots(),
      Tab::Creator => c.creator_spots(),
      Tab::Favorites => c.saved_spots(),
      Tab::Profile if !c.state.profile_edit_mode => c.profile_spots(),
      _ => Vec::new(),
    }
  }

  fn list_len(&self) -> usize {
    match self.screen() {
      Tab::Search => self.controller.filtered_creators().len(),
      Tab::Notifications => self.controller.state.history.feed().len(),
      Tab::Settings => SettingKey::iter().count(),
      _ => self.listed_spots().len(),
    }
  }

  fn cursor_spot(&self) -> Option<Spot> { self.listed_spots().into_iter().nth(self.cursor) }

  fn move_cursor(&mut self, down: bool) {
    let len = self.list_len();
    if down {
      if self.cursor + 1 < len {
        self.cursor += 1;
      }
    } else {
      self.cursor = self.cursor.saturating_sub(1);
    }
  }

  fn move_form_cursor(&mut self, down: bool, len: usize) {
    if down {
      if self.form_cursor + 1 < len {
        self.form_cursor += 1;
      }
    } else {
      self.form_cursor = self.form_cursor.saturating_sub(1);
    }
  }

  fn notify(&mut self, result: Result<(), Notice>) {
    if let Err(notice) = result {
      self.status_msg = notice.to_string();
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Text input mode: printable keys go into the field.
    if let Some(field) = self.editing {
      self.handle_edit_key(field, key);
      return true;
    }

    self.status_msg.clear();
    let before = self.screen();

    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => self.step_tab(1),
      KeyCode::BackTab => self.step_tab(Tab::BAR.len() - 1),
      KeyCode::Char(d @ '1'..='7') => {
        let index = d as usize - '1' as usize;
        self.controller.nav.switch_tab(Tab::BAR[index]);
      }
      _ => match before {
        Tab::Home => self.handle_home_key(key).await,
        Tab::Search => self.handle_search_key(key),
        Tab::Creator => self.handle_creator_key(key),
        Tab::Detail => self.handle_detail_key(key).await,
        Tab::Gallery => self.handle_gallery_key(key),
        Tab::Favorites => self.handle_favorites_key(key),
        Tab::Notifications => self.handle_notifications_key(key),
        Tab::Profile => self.handle_profile_key(key).await,
        Tab::Add => self.handle_add_key(key).await,
        Tab::Settings => self.handle_settings_key(key),
      },
    }

    if self.screen() != before {
      self.cursor = 0;
      self.form_cursor = 0;
    }
    true
  }

  /// Move `offset` places along the tab bar. Screens outside the bar step
  /// from Home.
  fn step_tab(&mut self, offset: usize) {
    let current = Tab::BAR
      .iter()
      .position(|tab| *tab == self.screen())
      .unwrap_or(0);
    let next = Tab::BAR[(current + offset) % Tab::BAR.len()];
    self.controller.nav.switch_tab(next);
  }

  fn handle_edit_key(&mut self, field: Field, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.editing = None,
      KeyCode::Enter => {
        self.editing = None;
        match field {
          Field::Comment => {
            let result = self.controller.add_comment();
            self.notify(result);
          }
          Field::SpotCoordinates => self.commit_coordinates(),
          _ => {}
        }
      }
      KeyCode::Backspace => {
        self.field_mut(field).pop();
      }
      KeyCode::Char(c) => self.field_mut(field).push(c),
      _ => {}
    }
    if matches!(field, Field::Search | Field::CreatorSearch) {
      self.cursor = 0;
    }
  }

  async fn handle_home_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(spot) = self.cursor_spot() {
          self.controller.open_spot(spot, Tab::Home);
        }
      }
      KeyCode::Char('/') => self.editing = Some(Field::Search),
      KeyCode::Char('p') => {
        let next = self.controller.state.view.province_filter.next();
        self.controller.set_province_filter(next);
        self.cursor = 0;
      }
      KeyCode::Char('t') => {
        let next = self.controller.state.view.kind_filter.next();
        self.controller.set_kind_filter(next);
        self.cursor = 0;
      }
      KeyCode::Char('n') => {
        let result = self.controller.toggle_nearby(&self.device).await;
        self.notify(result);
        self.cursor = 0;
      }
      KeyCode::Char('s') => self.toggle_saved(self.cursor_spot()),
      KeyCode::Char('m') => self.open_map(self.cursor_spot()).await,
      _ => {}
    }
  }

  fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Char('/') => self.editing = Some(Field::CreatorSearch),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(creator) = self.controller.filtered_creators().into_iter().nth(self.cursor) {
          self.controller.open_creator(creator);
        }
      }
      _ => {}
    }
  }

  fn handle_creator_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.controller.nav.close_creator(),
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Char('o') => {
        self.controller.nav.creator_sort = self.controller.nav.creator_sort.next();
        self.cursor = 0;
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(spot) = self.cursor_spot() {
          self.controller.open_spot(spot, Tab::Creator);
        }
      }
      _ => {}
    }
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) {
    let selected = self.controller.nav.selected_spot().cloned();
    match key.code {
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.controller.nav.close_detail(),
      KeyCode::Char('s') => self.toggle_saved(selected),
      KeyCode::Char('m') => self.open_map(selected).await,
      KeyCode::Char('g') => {
        self.controller.open_spot_gallery(0);
      }
      KeyCode::Char('c') => self.editing = Some(Field::Comment),
      _ => {}
    }
  }

  fn handle_gallery_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => self.controller.nav.close_gallery(),
      KeyCode::Right | KeyCode::Char('l') => self.controller.nav.gallery_step(1),
      KeyCode::Left | KeyCode::Char('h') => self.controller.nav.gallery_step(-1),
      _ => {}
    }
  }

  fn handle_favorites_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(spot) = self.cursor_spot() {
          self.controller.open_spot(spot, Tab::Favorites);
        }
      }
      KeyCode::Char('s') => {
        self.toggle_saved(self.cursor_spot());
        self.cursor = self.cursor.min(self.list_len().saturating_sub(1));
      }
      _ => {}
    }
  }

  fn handle_notifications_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        let id = self
          .controller
          .state
          .history
          .feed()
          .get(self.cursor)
          .map(|viewed| viewed.id.clone());
        if let Some(id) = id {
          self.controller.open_spot_by_id(&id, Tab::Notifications);
        }
      }
      _ => {}
    }
  }

  async fn handle_profile_key(&mut self, key: KeyEvent) {
    if !self.controller.state.profile_edit_mode {
      match key.code {
        KeyCode::Char('e') => self.controller.edit_profile(),
        KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
        KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
          if let Some(spot) = self.cursor_spot() {
            self.controller.open_spot(spot, Tab::Profile);
          }
        }
        KeyCode::Char('g') => {
          if !self.controller.open_profile_gallery(0) {
            self.status_msg = "Sin fotos todavía".into();
          }
        }
        _ => {}
      }
      return;
    }

    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_form_cursor(true, Field::PROFILE_FORM.len()),
      KeyCode::Up | KeyCode::Char('k') => self.move_form_cursor(false, Field::PROFILE_FORM.len()),
      KeyCode::Enter => self.editing = Some(Field::PROFILE_FORM[self.form_cursor]),
      KeyCode::Char('a') => {
        let result = self.controller.pick_profile_avatar(&self.device).await;
        self.notify(result);
      }
      KeyCode::Char('f') => {
        let result = self.controller.add_profile_photo(&self.device).await;
        self.notify(result);
      }
      KeyCode::Char('w') => {
        self.status_msg = match self.controller.save_profile() {
          Ok(notice) | Err(notice) => notice.to_string(),
        };
        self.cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_add_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_form_cursor(true, Field::SPOT_FORM.len()),
      KeyCode::Up | KeyCode::Char('k') => self.move_form_cursor(false, Field::SPOT_FORM.len()),
      KeyCode::Enter => self.editing = Some(Field::SPOT_FORM[self.form_cursor]),
      KeyCode::Char('p') => {
        let draft = &mut self.controller.state.spot_draft;
        draft.province = cycle(Province::iter(), draft.province);
      }
      KeyCode::Char('t') => {
        let draft = &mut self.controller.state.spot_draft;
        draft.kind = cycle(SpotKind::selectable(), draft.kind);
      }
      KeyCode::Char('f') => {
        let result = self.controller.pick_spot_photos(&self.device).await;
        self.notify(result);
      }
      KeyCode::Char('u') => {
        let result = self.controller.use_current_location(&self.device).await;
        self.notify(result);
      }
      KeyCode::Char('K') => self.controller.nudge_location(1, 0),
      KeyCode::Char('J') => self.controller.nudge_location(-1, 0),
      KeyCode::Char('L') => self.controller.nudge_location(0, 1),
      KeyCode::Char('H') => self.controller.nudge_location(0, -1),
      KeyCode::Char('c') => {
        self.coordinate_input.clear();
        self.editing = Some(Field::SpotCoordinates);
      }
      KeyCode::Char('x') => self.controller.clear_location(),
      KeyCode::Char('m') => {
        if !self.controller.open_selected_location(&self.device).await {
          self.status_msg = "No se pudo abrir el mapa".into();
        }
      }
      KeyCode::Char('w') => match self.controller.create_spot() {
        Ok(_) => self.status_msg = "Spot publicado".into(),
        Err(notice) => self.status_msg = notice.to_string(),
      },
      _ => {}
    }
  }

  fn commit_coordinates(&mut self) {
    match Coordinate::parse(&self.coordinate_input) {
      Some(at) => self.controller.select_location(at),
      None => self.status_msg = "Coordenadas inválidas".into(),
    }
  }

  fn handle_settings_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') => self.move_cursor(false),
      KeyCode::Enter | KeyCode::Char(' ') => {
        if let Some(setting) = SettingKey::iter().nth(self.cursor) {
          self.controller.toggle_setting(setting);
        }
      }
      _ => {}
    }
  }

  // ── Shared actions ────────────────────────────────────────────────────────

  fn toggle_saved(&mut self, spot: Option<Spot>) {
    let Some(spot) = spot else { return };
    self.status_msg = if self.controller.toggle_saved(&spot.id) {
      format!("{} guardado en favoritos", spot.name)
    } else {
      format!("{} quitado de favoritos", spot.name)
    };
  }

  async fn open_map(&mut self, spot: Option<Spot>) {
    let Some(spot) = spot else { return };
    let url = spot.map_url.clone();
    if !self.controller.open_map(&self.device, &url, Some(&spot)).await {
      self.status_msg = "No se pudo abrir el mapa".into();
    }
  }
}
