//! The provinces of Costa Rica and the lookups keyed on them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{Error, Result, geo::Coordinate, label::Vocabulary, text::fold};

/// A first-level administrative region. The "all provinces" wildcard is not a
/// province; filters express it as [`crate::view::Filter::Any`].
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
pub enum Province {
  #[default]
  #[serde(rename = "San José")]
  #[strum(serialize = "San José")]
  SanJose,
  Alajuela,
  Cartago,
  Heredia,
  Guanacaste,
  Puntarenas,
  #[serde(rename = "Limón")]
  #[strum(serialize = "Limón")]
  Limon,
}

impl Province {
  /// The province assumed to be "nearby" until the device says otherwise.
  pub const DEFAULT_REFERENCE: Self = Self::SanJose;

  /// Display name, e.g. `"San José"`.
  pub fn name(self) -> &'static str { self.into() }

  /// Representative coordinate used when a spot has no explicit one.
  pub fn coordinate(self) -> Coordinate {
    let (latitude, longitude) = match self {
      Self::SanJose => (9.9281, -84.0907),
      Self::Alajuela => (10.0163, -84.2116),
      Self::Cartago => (9.8644, -83.9194),
      Self::Heredia => (10.0024, -84.1165),
      Self::Guanacaste => (10.6346, -85.4407),
      Self::Puntarenas => (9.9763, -84.8384),
      Self::Limon => (9.991, -83.0379),
    };
    Coordinate { latitude, longitude }
  }

  /// Find the first province whose folded name contains, or is contained in,
  /// the folded `label`. Blank labels never match.
  pub fn from_label(label: &str) -> Option<Self> {
    let label = fold(label);
    if label.is_empty() {
      return None;
    }
    Self::iter().find(|province| {
      let name = fold(province.name());
      label.contains(&name) || name.contains(&label)
    })
  }

  /// Strict parse of a canonical name; anything else falls back to
  /// [`Province::from_label`].
  pub fn parse_lenient(value: &str) -> Result<Self> {
    Self::from_str(value)
      .ok()
      .or_else(|| Self::from_label(value))
      .ok_or_else(|| Error::UnknownProvince(value.to_owned()))
  }
}

impl Vocabulary for Province {
  fn resolve(value: &str) -> Result<Self> { Self::parse_lenient(value) }
}

/// Resolve a reverse-geocoded place label to a reference province.
///
/// When nothing matches, `current` is returned unchanged.
pub fn match_province_label(label: &str, current: Province) -> Province {
  Province::from_label(label).unwrap_or(current)
}
