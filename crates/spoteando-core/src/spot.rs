//! Spots: the points of interest at the heart of the catalogue.
//!
//! Records arrive as [`RawSpot`]s with any field other than `id` and `name`
//! possibly missing. [`normalize`] is the single boundary where defaults are
//! substituted; it never mutates its input and never fails.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{
  Error, Notice, Result,
  geo::Coordinate,
  label::{Label, Vocabulary},
  province::Province,
  text::fold,
};

// ─── Defaults ────────────────────────────────────────────────────────────────

pub const FALLBACK_IMAGE_URL: &str = "https://images.unsplash.com/photo-1469474968028-56623f02e42e?auto=format&fit=crop&w=800&q=80";
pub const DEFAULT_DESCRIPTION: &str = "Sin descripción por ahora.";
pub const DEFAULT_LOCATION: &str = "Costa Rica";
pub const DEFAULT_USER: &str = "@CR_Adventures";
/// Author handle for spots created before a profile exists.
pub const ANONYMOUS_AUTHOR: &str = "@TuUsuario";
/// Upper bound on the photos attached to a new spot.
pub const MAX_SPOT_PHOTOS: usize = 10;

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque spot identifier. Spots created locally carry the Unix-millis time of
/// their creation; seed spots use small sequential numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(String);

impl SpotId {
  pub fn as_str(&self) -> &str { &self.0 }

  /// Numeric value for recency ordering; non-numeric ids count as oldest.
  pub fn recency(&self) -> u64 { self.0.trim().parse().unwrap_or(0) }
}

impl fmt::Display for SpotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for SpotId {
  fn from(value: &str) -> Self { Self(value.to_owned()) }
}

impl From<String> for SpotId {
  fn from(value: String) -> Self { Self(value) }
}

// ─── Category ────────────────────────────────────────────────────────────────

/// What sort of place a spot is. The "all types" wildcard is
/// [`crate::view::Filter::Any`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
  IntoStaticStr,
)]
pub enum SpotKind {
  Playa,
  #[serde(rename = "Montaña")]
  #[strum(serialize = "Montaña")]
  Montana,
  Catarata,
  Urbano,
  Sendero,
  /// Uncategorised.
  #[default]
  Spot,
}

impl SpotKind {
  pub fn name(self) -> &'static str { self.into() }

  /// The categories offered when creating a spot.
  pub fn selectable() -> impl Iterator<Item = Self> {
    Self::iter().filter(|kind| *kind != Self::Spot)
  }

  /// Strict parse, then an accent- and case-insensitive comparison.
  pub fn parse_lenient(value: &str) -> Result<Self> {
    Self::from_str(value)
      .ok()
      .or_else(|| {
        let folded = fold(value);
        Self::iter().find(|kind| fold(kind.name()) == folded)
      })
      .ok_or_else(|| Error::UnknownSpotKind(value.to_owned()))
  }
}

impl Vocabulary for SpotKind {
  fn resolve(value: &str) -> Result<Self> { Self::parse_lenient(value) }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A spot as stored or received, possibly incomplete. Empty strings count as
/// absent, exactly like `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSpot {
  pub id:          SpotId,
  pub name:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub province:    Option<String>,
  #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
  pub kind:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub map_url:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image_url:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub photos:      Option<Vec<String>>,
}

/// A spot with every display field populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
  pub id:          SpotId,
  pub name:        String,
  pub description: String,
  /// Free-text sub-area label.
  pub location:    String,
  /// Unrecognised remote values are kept as written.
  pub province:    Label<Province>,
  #[serde(rename = "type")]
  pub kind:        Label<SpotKind>,
  /// Author handle, `@`-prefixed.
  pub user:        String,
  /// External map link; may be empty.
  pub map_url:     String,
  pub image_url:   String,
  /// Never empty.
  pub photos:      Vec<String>,
}

impl From<Spot> for RawSpot {
  fn from(spot: Spot) -> Self {
    Self {
      id:          spot.id,
      name:        spot.name,
      description: Some(spot.description),
      location:    Some(spot.location),
      province:    Some(spot.province.name().to_owned()),
      kind:        Some(spot.kind.name().to_owned()),
      user:        Some(spot.user),
      map_url:     Some(spot.map_url),
      image_url:   Some(spot.image_url),
      photos:      Some(spot.photos),
    }
  }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

fn present(value: Option<&String>) -> Option<&str> {
  value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Produce the canonical form of `raw`, substituting defaults for every
/// missing field. Idempotent: normalising an already-normalised spot (via
/// [`RawSpot::from`]) yields the same record.
pub fn normalize(raw: &RawSpot) -> Spot {
  let image_url = raw
    .image_url
    .as_deref()
    .filter(|url| !url.trim().is_empty())
    .unwrap_or(FALLBACK_IMAGE_URL)
    .to_owned();

  let photos = match &raw.photos {
    Some(photos) if !photos.is_empty() => photos.clone(),
    _ => vec![image_url.clone()],
  };

  let province = present(raw.province.as_ref())
    .map(Label::resolve)
    .unwrap_or_default();

  let kind = present(raw.kind.as_ref())
    .map(Label::resolve)
    .unwrap_or_default();

  Spot {
    id: raw.id.clone(),
    name: raw.name.clone(),
    description: present(raw.description.as_ref())
      .unwrap_or(DEFAULT_DESCRIPTION)
      .to_owned(),
    location: present(raw.location.as_ref())
      .unwrap_or(DEFAULT_LOCATION)
      .to_owned(),
    province,
    kind,
    user: present(raw.user.as_ref()).unwrap_or(DEFAULT_USER).to_owned(),
    map_url: raw.map_url.clone().unwrap_or_default(),
    image_url,
    photos,
  }
}

/// Normalise every record, preserving order.
pub fn normalize_all(spots: &[RawSpot]) -> impl Iterator<Item = Spot> + '_ {
  spots.iter().map(normalize)
}

// ─── Creation form ───────────────────────────────────────────────────────────

/// The in-progress "add a spot" form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotDraft {
  pub name:           String,
  pub description:    String,
  pub province:       Province,
  pub kind:           SpotKind,
  pub photos:         Vec<String>,
  pub location_label: String,
}

impl Default for SpotDraft {
  fn default() -> Self {
    Self {
      name:           String::new(),
      description:    String::new(),
      province:       Province::SanJose,
      kind:           SpotKind::Playa,
      photos:         Vec::new(),
      location_label: String::new(),
    }
  }
}

impl SpotDraft {
  /// Append picked photos, keeping at most [`MAX_SPOT_PHOTOS`].
  pub fn add_photos(&mut self, uris: impl IntoIterator<Item = String>) {
    self
      .photos
      .extend(uris.into_iter().filter(|uri| !uri.is_empty()));
    self.photos.truncate(MAX_SPOT_PHOTOS);
  }

  /// Validate the form and build the record to store.
  ///
  /// `location` is the coordinate picked on the map; `author` is the already
  /// normalised handle of the local user, or empty.
  pub fn submit(
    &self,
    id: SpotId,
    author: &str,
    location: Option<Coordinate>,
  ) -> Result<RawSpot, Notice> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(Notice::MISSING_SPOT_NAME);
    }
    let location = location.ok_or(Notice::MISSING_LOCATION)?;

    let label = self.location_label.trim();
    let photos = if self.photos.is_empty() {
      vec![FALLBACK_IMAGE_URL.to_owned()]
    } else {
      self.photos.clone()
    };

    Ok(RawSpot {
      id,
      name: name.to_owned(),
      description: Some(self.description.trim().to_owned()),
      location: Some(if label.is_empty() {
        self.province.name().to_owned()
      } else {
        label.to_owned()
      }),
      province: Some(self.province.name().to_owned()),
      kind: Some(self.kind.name().to_owned()),
      user: Some(if author.is_empty() {
        ANONYMOUS_AUTHOR.to_owned()
      } else {
        author.to_owned()
      }),
      map_url: Some(location.map_url()),
      image_url: Some(photos[0].clone()),
      photos: Some(photos),
    })
  }
}

/// A fresh time-derived id that collides with none of `existing`.
pub fn next_spot_id(now_millis: i64, existing: &[RawSpot]) -> SpotId {
  let mut candidate = now_millis.max(0);
  loop {
    let id = SpotId::from(candidate.to_string());
    if existing.iter().all(|spot| spot.id != id) {
      return id;
    }
    candidate += 1;
  }
}
