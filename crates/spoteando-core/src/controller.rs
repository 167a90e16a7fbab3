//! [`Controller`] owns the application state and turns user intents into
//! state changes.
//!
//! Synchronous commands validate and apply immediately. Device commands await
//! a single capability request each and apply the result wholesale when it
//! resolves; a rejected command returns a [`Notice`] and changes nothing.

use chrono::{Local, Utc};

use crate::{
  Notice,
  comment::Comment,
  creator::Creator,
  device::{Capability, ImagePicker, LocationProvider, MapLinkOpener, PickMode, PickResult},
  geo::{Coordinate, MapRegion, spot_coordinate},
  navigation::{Navigator, Tab},
  profile::{Profile, normalize_username},
  province::{Province, match_province_label},
  settings::SettingKey,
  spot::{
    MAX_SPOT_PHOTOS, Spot, SpotDraft, SpotId, SpotKind, next_spot_id, normalize, normalize_all,
  },
  state::AppState,
  view::{self, Engagement, Filter},
};

/// Format of the timestamp stored with each viewed spot.
const VIEW_LABEL_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

#[derive(Debug, Clone, Default)]
pub struct Controller {
  pub state: AppState,
  pub nav:   Navigator,
}

impl Controller {
  pub fn new(state: AppState) -> Self {
    Self {
      state,
      nav: Navigator::default(),
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn all_spots(&self) -> Vec<Spot> { normalize_all(&self.state.spots).collect() }

  pub fn filtered_spots(&self) -> Vec<Spot> {
    view::filtered_spots(&self.state.spots, &self.state.view)
  }

  pub fn nearby_recommendations(&self) -> Vec<Spot> {
    view::nearby_recommendations(&self.state.spots, self.state.view.nearby_province)
  }

  pub fn creators(&self) -> Vec<Creator> {
    view::creators(&self.state.spots, self.state.profile.as_ref())
  }

  pub fn filtered_creators(&self) -> Vec<Creator> {
    view::filtered_creators(self.creators(), &self.state.view.creator_search_text)
  }

  pub fn saved_spots(&self) -> Vec<Spot> { view::saved_spots(&self.state.spots, &self.state.saved) }

  pub fn engagement(&self) -> Engagement<'_> {
    Engagement {
      comments: &self.state.comments,
      saved:    &self.state.saved,
      history:  &self.state.history,
    }
  }

  /// The selected creator's spots in the current sort order.
  pub fn creator_spots(&self) -> Vec<Spot> {
    match self.nav.selected_creator() {
      Some(creator) => view::creator_spots(
        &self.state.spots,
        &creator.username,
        self.nav.creator_sort,
        self.engagement(),
      ),
      None => Vec::new(),
    }
  }

  /// The saved profile, or the placeholder shown before one exists.
  pub fn public_profile(&self) -> Profile {
    self.state.profile.clone().unwrap_or_else(Profile::placeholder)
  }

  /// Spots authored under the public profile's handle.
  pub fn profile_spots(&self) -> Vec<Spot> {
    view::spots_by(&self.state.spots, &self.public_profile().username)
  }

  /// Comments on the spot in the detail screen.
  pub fn selected_comments(&self) -> &[Comment] {
    match self.nav.selected_spot() {
      Some(spot) => self.state.comments.for_spot(&spot.id),
      None => &[],
    }
  }

  /// Where the detail screen's map pin goes.
  pub fn selected_coordinate(&self) -> Option<Coordinate> {
    self.nav.selected_spot().map(spot_coordinate)
  }

  /// Framing for the location picker map.
  pub fn map_region(&self) -> MapRegion {
    MapRegion::around(self.state.selected_location.unwrap_or(Coordinate::DEFAULT))
  }

  /// Handle used to sign comments and new spots; empty when there is none.
  pub fn author_handle(&self) -> String {
    let raw = match &self.state.profile {
      Some(profile) if !profile.username.is_empty() => &profile.username,
      _ => &self.state.profile_draft.username,
    };
    normalize_username(raw)
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Open `spot`'s detail screen and record the view.
  pub fn open_spot(&mut self, spot: Spot, source: Tab) {
    let label = Local::now().format(VIEW_LABEL_FORMAT).to_string();
    self.state.history.record(&spot, label);
    self.nav.open_detail(spot, source);
  }

  /// Open a spot by id, preferring the live record over a history snapshot.
  pub fn open_spot_by_id(&mut self, id: &SpotId, source: Tab) -> bool {
    let spot = self
      .state
      .spots
      .iter()
      .find(|raw| &raw.id == id)
      .map(normalize)
      .or_else(|| self.state.history.get(id).map(|v| normalize(&v.to_raw())));
    match spot {
      Some(spot) => {
        self.open_spot(spot, source);
        true
      }
      None => false,
    }
  }

  /// Browse the selected spot's photos from the detail screen.
  pub fn open_spot_gallery(&mut self, index: usize) -> bool {
    let Some(images) = self.nav.selected_spot().map(|s| s.photos.clone()) else {
      return false;
    };
    self.nav.open_gallery(images, index, Tab::Detail)
  }

  /// Browse the public profile's photos from the profile screen.
  pub fn open_profile_gallery(&mut self, index: usize) -> bool {
    let images = self.public_profile().photos;
    self.nav.open_gallery(images, index, Tab::Profile)
  }

  pub fn open_creator(&mut self, creator: Creator) { self.nav.open_creator(creator); }

  // ── Filters ───────────────────────────────────────────────────────────────

  pub fn set_search_text(&mut self, text: impl Into<String>) {
    self.state.view.search_text = text.into();
  }

  pub fn set_province_filter(&mut self, filter: Filter<Province>) {
    self.state.view.province_filter = filter;
  }

  pub fn set_kind_filter(&mut self, filter: Filter<SpotKind>) {
    self.state.view.kind_filter = filter;
  }

  pub fn set_creator_search_text(&mut self, text: impl Into<String>) {
    self.state.view.creator_search_text = text.into();
  }

  // ── Synchronous commands ──────────────────────────────────────────────────

  /// Post the detail screen's comment draft on the selected spot.
  pub fn add_comment(&mut self) -> Result<(), Notice> {
    let spot_id = self
      .nav
      .selected_spot()
      .map(|s| s.id.clone())
      .ok_or(Notice::NO_SPOT_SELECTED)?;
    let author = self.author_handle();
    self.state.comments.add(
      &spot_id,
      &self.nav.comment_draft,
      &author,
      Utc::now().timestamp_millis(),
    )?;
    self.nav.comment_draft.clear();
    tracing::debug!(spot = %spot_id, "comment added");
    Ok(())
  }

  /// Save or unsave a spot. Returns whether it is now saved.
  pub fn toggle_saved(&mut self, id: &SpotId) -> bool { self.state.saved.toggle(id) }

  pub fn toggle_setting(&mut self, key: SettingKey) { self.state.settings.toggle(key); }

  /// Submit the creation form: prepend the new spot, reset the form and go
  /// home.
  pub fn create_spot(&mut self) -> Result<SpotId, Notice> {
    let id = next_spot_id(Utc::now().timestamp_millis(), &self.state.spots);
    let raw = self.state.spot_draft.submit(
      id.clone(),
      &self.author_handle(),
      self.state.selected_location,
    )?;
    self.state.spots.insert(0, raw);
    self.state.spot_draft = SpotDraft::default();
    self.nav.switch_tab(Tab::Home);
    tracing::info!(spot = %id, "spot created");
    Ok(id)
  }

  /// Validate and save the profile editor. On success the editor is refilled
  /// with the normalised values and edit mode ends.
  pub fn save_profile(&mut self) -> Result<Notice, Notice> {
    let profile = self.state.profile_draft.validate()?;
    self.state.profile_draft = (&profile).into();
    tracing::info!(username = %profile.username, "profile saved");
    self.state.profile = Some(profile);
    self.state.profile_edit_mode = false;
    Ok(Notice::PROFILE_SAVED)
  }

  pub fn edit_profile(&mut self) { self.state.profile_edit_mode = true; }

  // ── Location picking ──────────────────────────────────────────────────────

  /// Drop the new spot's pin at `at`.
  pub fn select_location(&mut self, at: Coordinate) { self.state.selected_location = Some(at); }

  /// Move the pin by whole [`crate::geo::PIN_STEP`]s. Without a pin, start
  /// from the centre of the visible map.
  pub fn nudge_location(&mut self, north: i32, east: i32) {
    let from = self.state.selected_location.unwrap_or(Coordinate::DEFAULT);
    self.select_location(from.nudged(north, east));
  }

  pub fn clear_location(&mut self) { self.state.selected_location = None; }

  // ── Device commands ───────────────────────────────────────────────────────

  /// Switch the "nearby only" filter.
  ///
  /// Turning it off is immediate. Turning it on needs the location
  /// permission; the current position becomes the selected location, and a
  /// best-effort reverse lookup may update the reference province.
  pub async fn toggle_nearby<L: LocationProvider>(&mut self, location: &L) -> Result<(), Notice> {
    if self.state.view.nearby_only {
      self.state.view.nearby_only = false;
      return Ok(());
    }

    if !location.request_permission().await.is_granted() {
      return Err(Notice::NEARBY_PERMISSION);
    }
    let Some(position) = location.current_position().await.granted() else {
      tracing::debug!("no position fix; nearby filter left off");
      return Ok(());
    };
    self.state.selected_location = Some(position);

    match location.reverse_geocode(position).await {
      Capability::Granted(place) => {
        if let Some(label) = place.label() {
          let current = self.state.view.nearby_province;
          self.state.view.nearby_province = match_province_label(label, current);
        }
      }
      Capability::Denied | Capability::Unavailable => {
        tracing::debug!("reverse geocoding unavailable; keeping reference province");
      }
    }

    self.state.view.nearby_only = true;
    Ok(())
  }

  /// Use the device position as the new spot's location.
  pub async fn use_current_location<L: LocationProvider>(
    &mut self,
    location: &L,
  ) -> Result<(), Notice> {
    if !location.request_permission().await.is_granted() {
      return Err(Notice::LOCATION_PERMISSION);
    }
    if let Some(position) = location.current_position().await.granted() {
      self.state.selected_location = Some(position);
    }
    Ok(())
  }

  async fn pick_photos<P: ImagePicker>(picker: &P, mode: PickMode) -> Result<Vec<String>, Notice> {
    if !picker.request_permission().await.is_granted() {
      return Err(Notice::PHOTOS_PERMISSION);
    }
    Ok(match picker.pick(mode).await {
      Capability::Granted(PickResult::Picked(uris)) => {
        uris.into_iter().filter(|uri| !uri.is_empty()).collect()
      }
      _ => Vec::new(),
    })
  }

  /// Attach photos to the spot being created.
  pub async fn pick_spot_photos<P: ImagePicker>(&mut self, picker: &P) -> Result<(), Notice> {
    let uris = Self::pick_photos(picker, PickMode::Multiple {
      limit: MAX_SPOT_PHOTOS,
    })
    .await?;
    self.state.spot_draft.add_photos(uris);
    Ok(())
  }

  /// Replace the profile editor's avatar.
  pub async fn pick_profile_avatar<P: ImagePicker>(&mut self, picker: &P) -> Result<(), Notice> {
    let uris = Self::pick_photos(picker, PickMode::Single).await?;
    if let Some(uri) = uris.into_iter().next() {
      self.state.profile_draft.avatar_url = uri;
    }
    Ok(())
  }

  /// Add one photo to the front of the profile editor's photo list.
  pub async fn add_profile_photo<P: ImagePicker>(&mut self, picker: &P) -> Result<(), Notice> {
    let uris = Self::pick_photos(picker, PickMode::Single).await?;
    if let Some(uri) = uris.into_iter().next() {
      self.state.profile_draft.push_photo(uri);
    }
    Ok(())
  }

  /// Open a map link externally. When `spot` is given the view is recorded
  /// first, whether or not a handler accepts the link.
  pub async fn open_map<M: MapLinkOpener>(
    &mut self,
    opener: &M,
    url: &str,
    spot: Option<&Spot>,
  ) -> bool {
    if url.is_empty() {
      return false;
    }
    if let Some(spot) = spot {
      let label = Local::now().format(VIEW_LABEL_FORMAT).to_string();
      self.state.history.record(spot, label);
    }
    if !opener.can_open(url).await {
      return false;
    }
    opener.open(url).await.is_granted()
  }

  /// Open the new spot's pin in the external map. No view is recorded.
  pub async fn open_selected_location<M: MapLinkOpener>(&mut self, opener: &M) -> bool {
    match self.state.selected_location {
      Some(at) => self.open_map(opener, &at.map_url(), None).await,
      None => false,
    }
  }
}
