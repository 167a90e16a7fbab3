//! Coordinates, map framing and map-link parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{province::Province, spot::Spot};

/// Angular span used to frame the map around the selected coordinate.
pub const MAP_SPAN: f64 = 0.08;

/// How far one nudge moves the selected pin, a quarter of the visible span.
pub const PIN_STEP: f64 = MAP_SPAN / 4.0;

/// A WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinate {
  /// The coordinate selected before the user picks one: central San José.
  pub const DEFAULT: Self = Self {
    latitude:  9.9281,
    longitude: -84.0907,
  };

  /// An external map link centred on this coordinate.
  pub fn map_url(&self) -> String {
    format!("https://maps.google.com/?q={},{}", self.latitude, self.longitude)
  }

  /// This coordinate moved by whole [`PIN_STEP`]s, clamped to valid ranges.
  pub fn nudged(self, north: i32, east: i32) -> Self {
    Self {
      latitude:  (self.latitude + f64::from(north) * PIN_STEP).clamp(-90.0, 90.0),
      longitude: (self.longitude + f64::from(east) * PIN_STEP).clamp(-180.0, 180.0),
    }
  }

  /// Parse a typed `"<lat>, <lng>"` pair. Out-of-range values are rejected.
  pub fn parse(text: &str) -> Option<Self> {
    let (latitude, longitude) = text.split_once(',')?;
    let latitude: f64 = latitude.trim().parse().ok()?;
    let longitude: f64 = longitude.trim().parse().ok()?;
    ((-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude))
      .then_some(Self { latitude, longitude })
  }
}

/// The visible region of a map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapRegion {
  pub latitude:        f64,
  pub longitude:       f64,
  pub latitude_delta:  f64,
  pub longitude_delta: f64,
}

impl MapRegion {
  pub fn around(center: Coordinate) -> Self {
    Self {
      latitude:        center.latitude,
      longitude:       center.longitude,
      latitude_delta:  MAP_SPAN,
      longitude_delta: MAP_SPAN,
    }
  }
}

static MAP_QUERY: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"q=(-?\d+\.?\d*),(-?\d+\.?\d*)").expect("map query pattern is valid")
});

/// Extract a `q=<lat>,<lng>` pair from a map link.
pub fn coordinate_from_map_url(url: &str) -> Option<Coordinate> {
  let caps = MAP_QUERY.captures(url)?;
  let latitude = caps.get(1)?.as_str().parse().ok()?;
  let longitude = caps.get(2)?.as_str().parse().ok()?;
  Some(Coordinate { latitude, longitude })
}

/// Where to drop the pin for `spot`: its map link if it carries coordinates,
/// otherwise the centre of its province. A province outside the table falls
/// back to [`Province::DEFAULT_REFERENCE`].
pub fn spot_coordinate(spot: &Spot) -> Coordinate {
  coordinate_from_map_url(&spot.map_url).unwrap_or_else(|| {
    spot
      .province
      .known()
      .unwrap_or(Province::DEFAULT_REFERENCE)
      .coordinate()
  })
}

/// Framing for a map centred on the reference province.
pub fn province_region(province: Province) -> MapRegion {
  MapRegion::around(province.coordinate())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::spot::{RawSpot, normalize};

  #[test]
  fn parses_coordinates_from_query() {
    let c = coordinate_from_map_url("https://maps.google.com/?q=10.4712,-84.6453").unwrap();
    assert_eq!(c.latitude, 10.4712);
    assert_eq!(c.longitude, -84.6453);
  }

  #[test]
  fn place_name_query_is_not_a_coordinate() {
    assert!(coordinate_from_map_url("https://maps.google.com/?q=Parque+La+Sabana").is_none());
    assert!(coordinate_from_map_url("").is_none());
  }

  #[test]
  fn map_url_round_trips_through_parser() {
    let c = Coordinate { latitude: 9.75, longitude: -83.5 };
    assert_eq!(coordinate_from_map_url(&c.map_url()), Some(c));
  }

  #[test]
  fn typed_coordinates_parse() {
    assert_eq!(
      Coordinate::parse(" 10.3, -84.8 "),
      Some(Coordinate { latitude: 10.3, longitude: -84.8 })
    );
    assert_eq!(Coordinate::parse("10.3"), None);
    assert_eq!(Coordinate::parse("abc, -84"), None);
    assert_eq!(Coordinate::parse("95, -84"), None);
  }

  #[test]
  fn nudging_moves_by_quarter_span() {
    let start = Coordinate { latitude: 10.0, longitude: -84.0 };
    let moved = start.nudged(2, -1);
    assert!((moved.latitude - 10.04).abs() < 1e-9);
    assert!((moved.longitude - -84.02).abs() < 1e-9);
    assert_eq!(Coordinate { latitude: 89.99, longitude: 0.0 }.nudged(1, 0).latitude, 90.0);
  }

  #[test]
  fn spot_without_coordinates_falls_back_to_province() {
    let spot = normalize(&RawSpot {
      id: "9".into(),
      name: "Playa Tamarindo".into(),
      province: Some("Guanacaste".into()),
      map_url: Some("https://maps.google.com/?q=Tamarindo".into()),
      ..RawSpot::default()
    });
    assert_eq!(spot_coordinate(&spot), Province::Guanacaste.coordinate());
  }

  #[test]
  fn spot_with_unknown_province_uses_default_reference() {
    let spot = normalize(&RawSpot {
      id: "9".into(),
      name: "Isla del Coco".into(),
      province: Some("Atlántida".into()),
      ..RawSpot::default()
    });
    assert_eq!(spot_coordinate(&spot), Province::DEFAULT_REFERENCE.coordinate());
  }

  #[test]
  fn region_uses_fixed_span() {
    let region = MapRegion::around(Coordinate::DEFAULT);
    assert_eq!(region.latitude_delta, MAP_SPAN);
    assert_eq!(region.longitude_delta, MAP_SPAN);
    assert_eq!(region.latitude, Coordinate::DEFAULT.latitude);
  }
}
