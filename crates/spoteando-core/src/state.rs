//! [`AppState`]: everything the controller owns, in one serializable value.

use serde::{Deserialize, Serialize};

use crate::{
  comment::CommentBook,
  geo::Coordinate,
  history::ViewHistory,
  profile::{Profile, ProfileDraft},
  saved::SavedSpotIds,
  seed::{seed_comments, seed_spots},
  settings::Settings,
  spot::{RawSpot, SpotDraft},
  store::PersistedState,
  view::ViewState,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
  /// Raw records, newest first. Never normalised in place.
  pub spots:             Vec<RawSpot>,
  pub comments:          CommentBook,
  pub view:              ViewState,
  pub spot_draft:        SpotDraft,
  /// Coordinate picked for the spot being created; `None` until chosen.
  pub selected_location: Option<Coordinate>,
  pub profile_draft:     ProfileDraft,
  pub profile:           Option<Profile>,
  pub profile_edit_mode: bool,
  pub saved:             SavedSpotIds,
  pub history:           ViewHistory,
  pub settings:          Settings,
}

impl Default for AppState {
  fn default() -> Self {
    Self {
      spots:             Vec::new(),
      comments:          CommentBook::default(),
      view:              ViewState::default(),
      spot_draft:        SpotDraft::default(),
      selected_location: Some(Coordinate::DEFAULT),
      profile_draft:     ProfileDraft::default(),
      profile:           None,
      profile_edit_mode: true,
      saved:             SavedSpotIds::default(),
      history:           ViewHistory::default(),
      settings:          Settings::default(),
    }
  }
}

impl AppState {
  /// A fresh state holding the seed catalogue.
  pub fn seeded() -> Self {
    Self {
      spots: seed_spots(),
      comments: seed_comments(),
      ..Self::default()
    }
  }

  /// The slice of state that is persisted remotely.
  pub fn persisted(&self) -> PersistedState {
    PersistedState {
      spots:          Some(self.spots.clone()),
      comments:       Some(self.comments.clone()),
      profile:        self.profile.clone(),
      saved_spot_ids: Some(self.saved.clone()),
      viewed_spots:   Some(self.history.clone()),
      settings:       Some(self.settings),
      updated_at:     None,
    }
  }

  /// Overlay a loaded document. Fields the document lacks keep their local
  /// value; a stored profile also refills the editor and leaves edit mode.
  pub fn apply(&mut self, doc: PersistedState) {
    if let Some(spots) = doc.spots {
      self.spots = spots;
    }
    if let Some(comments) = doc.comments {
      self.comments = comments;
    }
    if let Some(profile) = doc.profile {
      self.profile_draft = ProfileDraft::from(&profile);
      self.profile = Some(profile);
      self.profile_edit_mode = false;
    }
    if let Some(saved) = doc.saved_spot_ids {
      self.saved = saved;
    }
    if let Some(history) = doc.viewed_spots {
      self.history = history;
    }
    if let Some(settings) = doc.settings {
      self.settings = settings;
    }
  }
}
