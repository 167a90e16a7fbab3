//! Screen navigation state machine.
//!
//! The detail and gallery screens remember which screen opened them, two
//! levels deep: closing the gallery returns to the detail, and closing the
//! detail returns to the list it was opened from.

use serde::{Deserialize, Serialize};

use crate::{creator::Creator, spot::Spot, view::CreatorSort};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
  #[default]
  Home,
  Search,
  Add,
  Profile,
  Settings,
  Favorites,
  Notifications,
  Creator,
  Detail,
  Gallery,
}

impl Tab {
  /// Tabs reachable directly from the tab bar, in bar order.
  pub const BAR: [Tab; 7] = [
    Tab::Home,
    Tab::Search,
    Tab::Add,
    Tab::Favorites,
    Tab::Notifications,
    Tab::Profile,
    Tab::Settings,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Tab::Home => "Inicio",
      Tab::Search => "Buscar",
      Tab::Add => "Agregar",
      Tab::Profile => "Perfil",
      Tab::Settings => "Configuración",
      Tab::Favorites => "Favoritos",
      Tab::Notifications => "Notificaciones",
      Tab::Creator => "Creador",
      Tab::Detail => "Detalle",
      Tab::Gallery => "Galería",
    }
  }
}

/// Photos being browsed full-screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
  pub images: Vec<String>,
  pub index:  usize,
}

impl Gallery {
  pub fn current(&self) -> Option<&str> { self.images.get(self.index).map(String::as_str) }
}

/// Which screen is showing, and what it is showing.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
  active:           Tab,
  detail_source:    Tab,
  gallery_source:   Tab,
  selected_spot:    Option<Spot>,
  gallery:          Option<Gallery>,
  selected_creator: Option<Creator>,
  /// Ordering of the selected creator's spots.
  pub creator_sort: CreatorSort,
  /// Text typed into the comment box on the detail screen.
  pub comment_draft: String,
}

impl Navigator {
  /// The screen to render. A detail or creator screen with nothing selected
  /// falls back to the list it would have come from.
  pub fn screen(&self) -> Tab {
    match self.active {
      Tab::Detail if self.selected_spot.is_none() => Tab::Home,
      Tab::Creator if self.selected_creator.is_none() => Tab::Search,
      Tab::Gallery if self.gallery.is_none() => self.gallery_source,
      other => other,
    }
  }

  pub fn selected_spot(&self) -> Option<&Spot> { self.selected_spot.as_ref() }

  pub fn selected_creator(&self) -> Option<&Creator> { self.selected_creator.as_ref() }

  pub fn gallery(&self) -> Option<&Gallery> { self.gallery.as_ref() }

  pub fn detail_source(&self) -> Tab { self.detail_source }

  pub fn switch_tab(&mut self, tab: Tab) { self.active = tab; }

  /// Show `spot` in the detail screen. Closing it returns to `source`.
  pub fn open_detail(&mut self, spot: Spot, source: Tab) {
    self.selected_spot = Some(spot);
    self.gallery = None;
    self.comment_draft.clear();
    self.detail_source = source;
    self.active = Tab::Detail;
  }

  pub fn close_detail(&mut self) {
    self.gallery = None;
    self.active = self.detail_source;
  }

  /// Browse `images` starting at `index`. Does nothing for an empty set.
  pub fn open_gallery(&mut self, images: Vec<String>, index: usize, source: Tab) -> bool {
    if images.is_empty() {
      return false;
    }
    let index = index.min(images.len() - 1);
    self.gallery = Some(Gallery { images, index });
    self.gallery_source = source;
    self.active = Tab::Gallery;
    true
  }

  pub fn close_gallery(&mut self) { self.active = self.gallery_source; }

  /// Move the gallery cursor by `delta`, clamped to the photo range.
  pub fn gallery_step(&mut self, delta: isize) {
    if let Some(gallery) = &mut self.gallery {
      let last = gallery.images.len().saturating_sub(1);
      gallery.index = gallery.index.saturating_add_signed(delta).min(last);
    }
  }

  /// Show `creator`'s page, sorted by popularity.
  pub fn open_creator(&mut self, creator: Creator) {
    self.selected_creator = Some(creator);
    self.creator_sort = CreatorSort::Popular;
    self.active = Tab::Creator;
  }

  pub fn close_creator(&mut self) { self.active = Tab::Search; }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::spot::{RawSpot, normalize};

  fn spot() -> Spot {
    normalize(&RawSpot {
      id: "1".into(),
      name: "Catarata".into(),
      photos: Some(vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()]),
      ..RawSpot::default()
    })
  }

  #[test]
  fn closing_gallery_then_detail_returns_to_origin() {
    let mut nav = Navigator::default();
    nav.switch_tab(Tab::Favorites);
    let s = spot();
    nav.open_detail(s.clone(), Tab::Favorites);
    assert_eq!(nav.screen(), Tab::Detail);

    assert!(nav.open_gallery(s.photos.clone(), 1, Tab::Detail));
    assert_eq!(nav.screen(), Tab::Gallery);
    assert_eq!(nav.gallery().unwrap().current(), Some("b.jpg"));

    nav.close_gallery();
    assert_eq!(nav.screen(), Tab::Detail);
    nav.close_detail();
    assert_eq!(nav.screen(), Tab::Favorites);
  }

  #[test]
  fn empty_gallery_is_ignored() {
    let mut nav = Navigator::default();
    nav.open_detail(spot(), Tab::Home);
    assert!(!nav.open_gallery(vec![], 0, Tab::Detail));
    assert_eq!(nav.screen(), Tab::Detail);
  }

  #[test]
  fn gallery_cursor_is_clamped() {
    let mut nav = Navigator::default();
    nav.open_gallery(spot().photos, 7, Tab::Profile);
    assert_eq!(nav.gallery().unwrap().index, 2);
    nav.gallery_step(-5);
    assert_eq!(nav.gallery().unwrap().index, 0);
    nav.gallery_step(1);
    assert_eq!(nav.gallery().unwrap().index, 1);
    nav.close_gallery();
    assert_eq!(nav.screen(), Tab::Profile);
  }

  #[test]
  fn opening_detail_clears_comment_draft() {
    let mut nav = Navigator::default();
    nav.comment_draft = "hola".into();
    nav.open_detail(spot(), Tab::Search);
    assert!(nav.comment_draft.is_empty());
  }

  #[test]
  fn detail_without_spot_renders_home() {
    let mut nav = Navigator::default();
    nav.switch_tab(Tab::Detail);
    assert_eq!(nav.screen(), Tab::Home);
  }

  #[test]
  fn creator_page_resets_sort() {
    let mut nav = Navigator::default();
    nav.creator_sort = CreatorSort::Alphabetical;
    nav.open_creator(Creator::from_spot(&spot()));
    assert_eq!(nav.creator_sort, CreatorSort::Popular);
    assert_eq!(nav.screen(), Tab::Creator);
    nav.close_creator();
    assert_eq!(nav.screen(), Tab::Search);
  }
}
