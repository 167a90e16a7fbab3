//! Device capabilities consumed by the controller.
//!
//! Each capability is an injected trait with async methods. Every request is
//! a single attempt; there is no retry and no cancellation, so when the same
//! action is triggered twice the last answer to arrive wins.

use crate::geo::Coordinate;

/// The answer to a capability request.
#[derive(Debug, Clone, PartialEq)]
pub enum Capability<T> {
  Granted(T),
  /// The user refused.
  Denied,
  /// The device could not answer (no hardware, no fix, lookup failed, ...).
  Unavailable,
}

impl<T> Capability<T> {
  pub fn granted(self) -> Option<T> {
    match self {
      Self::Granted(value) => Some(value),
      Self::Denied | Self::Unavailable => None,
    }
  }

  pub fn is_granted(&self) -> bool { matches!(self, Self::Granted(_)) }
}

/// A reverse-geocoded place. Any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeoPlace {
  pub region:    Option<String>,
  pub subregion: Option<String>,
  pub city:      Option<String>,
}

impl GeoPlace {
  /// The most specific usable label: region, then subregion, then city.
  pub fn label(&self) -> Option<&str> {
    [&self.region, &self.subregion, &self.city]
      .into_iter()
      .flatten()
      .map(String::as_str)
      .find(|s| !s.is_empty())
  }
}

/// Opens external map links.
pub trait MapLinkOpener {
  /// Whether some handler accepts `url`.
  async fn can_open(&self, url: &str) -> bool;

  async fn open(&self, url: &str) -> Capability<()>;
}

/// Foreground location services.
pub trait LocationProvider {
  async fn request_permission(&self) -> Capability<()>;

  async fn current_position(&self) -> Capability<Coordinate>;

  async fn reverse_geocode(&self, at: Coordinate) -> Capability<GeoPlace>;
}

/// How many images a picker call may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickMode {
  Single,
  Multiple { limit: usize },
}

/// The outcome of a picker session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResult {
  Picked(Vec<String>),
  Cancelled,
}

/// The photo library.
pub trait ImagePicker {
  async fn request_permission(&self) -> Capability<()>;

  async fn pick(&self, mode: PickMode) -> Capability<PickResult>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn label_prefers_region() {
    let place = GeoPlace {
      region:    Some(String::new()),
      subregion: Some("Cantón Central".into()),
      city:      Some("Heredia".into()),
    };
    assert_eq!(place.label(), Some("Cantón Central"));
    assert_eq!(GeoPlace::default().label(), None);
  }
}
