//! View derivation: pure functions from records and interaction state to the
//! lists the presentation layer renders.
//!
//! Nothing here is cached. Every function normalises its input afresh and
//! returns owned results in a deterministic order.

use std::{cmp::Reverse, collections::HashSet};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
  comment::CommentBook,
  creator::Creator,
  history::ViewHistory,
  label::Label,
  profile::Profile,
  province::Province,
  saved::SavedSpotIds,
  spot::{RawSpot, Spot, SpotId, SpotKind, normalize_all},
  text::{contains_query, search_query, sort_key},
};

// ─── Filters ─────────────────────────────────────────────────────────────────

/// Either the wildcard or one specific value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter<T> {
  #[default]
  Any,
  Only(T),
}

impl<T: PartialEq> Filter<T> {
  /// A specific filter never admits an unrecognised value.
  pub fn admits(&self, value: &Label<T>) -> bool {
    match (self, value) {
      (Self::Any, _) => true,
      (Self::Only(expected), Label::Known(value)) => expected == value,
      (Self::Only(_), Label::Unknown(_)) => false,
    }
  }
}

impl<T: IntoEnumIterator + PartialEq + Copy> Filter<T> {
  /// Cycle `Any → first → … → last → Any`.
  pub fn next(self) -> Self {
    let mut all = T::iter();
    match self {
      Self::Any => all.next().map_or(Self::Any, Self::Only),
      Self::Only(current) => {
        all.find(|v| *v == current);
        all.next().map_or(Self::Any, Self::Only)
      }
    }
  }
}

/// The search, filter and toggle state of the spot and creator browsers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
  pub search_text:         String,
  pub province_filter:     Filter<Province>,
  pub kind_filter:         Filter<SpotKind>,
  pub nearby_only:         bool,
  /// The province treated as "nearby".
  pub nearby_province:     Province,
  pub creator_search_text: String,
}

impl Default for ViewState {
  fn default() -> Self {
    Self {
      search_text:         String::new(),
      province_filter:     Filter::Any,
      kind_filter:         Filter::Any,
      nearby_only:         false,
      nearby_province:     Province::DEFAULT_REFERENCE,
      creator_search_text: String::new(),
    }
  }
}

impl ViewState {
  /// The conjunction of every active spot filter.
  pub fn admits(&self, spot: &Spot, query: Option<&str>) -> bool {
    query.is_none_or(|q| contains_query(&spot.name, q))
      && self.province_filter.admits(&spot.province)
      && self.kind_filter.admits(&spot.kind)
      && (!self.nearby_only || spot.province.is(self.nearby_province))
  }
}

// ─── Spot lists ──────────────────────────────────────────────────────────────

/// Spots passing every active filter, in record order.
pub fn filtered_spots(spots: &[RawSpot], view: &ViewState) -> Vec<Spot> {
  let query = search_query(&view.search_text);
  normalize_all(spots)
    .filter(|spot| view.admits(spot, query.as_deref()))
    .collect()
}

/// Spots in the reference province, in record order.
pub fn nearby_recommendations(spots: &[RawSpot], province: Province) -> Vec<Spot> {
  normalize_all(spots)
    .filter(|spot| spot.province.is(province))
    .collect()
}

/// Saved spots in record order, not save order.
pub fn saved_spots(spots: &[RawSpot], saved: &SavedSpotIds) -> Vec<Spot> {
  normalize_all(spots)
    .filter(|spot| saved.contains(&spot.id))
    .collect()
}

/// Spots authored by `username`, in record order.
pub fn spots_by(spots: &[RawSpot], username: &str) -> Vec<Spot> {
  normalize_all(spots)
    .filter(|spot| spot.user == username)
    .collect()
}

// ─── Creators ────────────────────────────────────────────────────────────────

/// Every distinct author, keyed by handle. The saved profile goes in first,
/// so it wins over any spot-derived entry with the same handle. Entries with
/// an empty handle are skipped.
pub fn creators(spots: &[RawSpot], profile: Option<&Profile>) -> Vec<Creator> {
  let candidates = profile
    .map(Creator::from_profile)
    .into_iter()
    .chain(normalize_all(spots).map(|spot| Creator::from_spot(&spot)));

  let mut seen = HashSet::new();
  candidates
    .filter(|creator| !creator.username.is_empty())
    .filter(|creator| seen.insert(creator.username.clone()))
    .collect()
}

/// Creators whose handle or full name contains the search text.
pub fn filtered_creators(creators: Vec<Creator>, search_text: &str) -> Vec<Creator> {
  let Some(query) = search_query(search_text) else {
    return creators;
  };
  creators
    .into_iter()
    .filter(|c| contains_query(&c.username, &query) || contains_query(&c.full_name, &query))
    .collect()
}

// ─── Creator spots ───────────────────────────────────────────────────────────

/// Orderings offered on a creator's page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CreatorSort {
  #[default]
  #[strum(serialize = "Más popular")]
  Popular,
  #[strum(serialize = "Más reciente")]
  Recent,
  #[strum(serialize = "A-Z")]
  Alphabetical,
}

impl CreatorSort {
  pub fn next(self) -> Self {
    match self {
      Self::Popular => Self::Recent,
      Self::Recent => Self::Alphabetical,
      Self::Alphabetical => Self::Popular,
    }
  }
}

/// The signals that make a spot popular.
#[derive(Debug, Clone, Copy)]
pub struct Engagement<'a> {
  pub comments: &'a CommentBook,
  pub saved:    &'a SavedSpotIds,
  pub history:  &'a ViewHistory,
}

impl Engagement<'_> {
  /// Comment count, plus one if saved, plus one if recently viewed.
  pub fn score(&self, id: &SpotId) -> usize {
    self.comments.count(id)
      + usize::from(self.saved.contains(id))
      + usize::from(self.history.contains(id))
  }
}

/// Sort key approximating a Spanish collation: accents and case are ignored
/// except that ñ sorts as its own letter after n, then the raw name breaks
/// ties.
fn collation_key(name: &str) -> (String, &str) { (sort_key(name), name) }

/// Spots authored by `username`, ordered by `sort`. All orderings are stable.
///
/// [`CreatorSort::Recent`] compares ids numerically, so locally created
/// (timestamp) ids always rank above the small seed ids.
pub fn creator_spots(
  spots: &[RawSpot],
  username: &str,
  sort: CreatorSort,
  engagement: Engagement<'_>,
) -> Vec<Spot> {
  let mut result = spots_by(spots, username);
  match sort {
    CreatorSort::Alphabetical => {
      result.sort_by(|a, b| collation_key(&a.name).cmp(&collation_key(&b.name)))
    }
    CreatorSort::Recent => result.sort_by_key(|spot| Reverse(spot.id.recency())),
    CreatorSort::Popular => result.sort_by_key(|spot| Reverse(engagement.score(&spot.id))),
  }
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    seed::{seed_comments, seed_spots},
    spot::normalize,
  };

  fn names(spots: &[Spot]) -> Vec<&str> { spots.iter().map(|s| s.name.as_str()).collect() }

  fn ids(spots: &[Spot]) -> Vec<&str> { spots.iter().map(|s| s.id.as_str()).collect() }

  fn authored(id: &str, name: &str, user: &str) -> RawSpot {
    RawSpot {
      id: id.into(),
      name: name.into(),
      user: Some(user.into()),
      ..RawSpot::default()
    }
  }

  #[test]
  fn default_view_keeps_everything_in_order() {
    let spots = seed_spots();
    let result = filtered_spots(&spots, &ViewState::default());
    assert_eq!(ids(&result), ["1", "2", "3", "4", "5"]);
  }

  #[test]
  fn province_filter_alone() {
    let view = ViewState {
      province_filter: Filter::Only(Province::Alajuela),
      ..ViewState::default()
    };
    assert_eq!(names(&filtered_spots(&seed_spots(), &view)), ["Catarata La Fortuna"]);
  }

  #[test]
  fn nearby_only_uses_reference_province() {
    let view = ViewState {
      nearby_only: true,
      nearby_province: Province::SanJose,
      ..ViewState::default()
    };
    assert_eq!(names(&filtered_spots(&seed_spots(), &view)), ["Parque La Sabana"]);
  }

  #[test]
  fn unknown_province_matches_no_specific_filter() {
    let spots = vec![RawSpot {
      id: "9".into(),
      name: "Isla del Coco".into(),
      province: Some("Atlántida".into()),
      ..RawSpot::default()
    }];

    let nearby = ViewState {
      nearby_only: true,
      nearby_province: Province::SanJose,
      ..ViewState::default()
    };
    assert!(filtered_spots(&spots, &nearby).is_empty());

    let only = ViewState {
      province_filter: Filter::Only(Province::SanJose),
      ..ViewState::default()
    };
    assert!(filtered_spots(&spots, &only).is_empty());
    assert!(nearby_recommendations(&spots, Province::SanJose).is_empty());

    assert_eq!(names(&filtered_spots(&spots, &ViewState::default())), ["Isla del Coco"]);
  }

  #[test]
  fn unknown_kind_matches_no_specific_filter() {
    let spots = vec![RawSpot {
      id: "9".into(),
      name: "Rincón de la Vieja".into(),
      kind: Some("Volcán".into()),
      ..RawSpot::default()
    }];
    for kind in SpotKind::iter() {
      let view = ViewState {
        kind_filter: Filter::Only(kind),
        ..ViewState::default()
      };
      assert!(filtered_spots(&spots, &view).is_empty());
    }
  }

  #[test]
  fn search_is_trimmed_and_case_insensitive() {
    let view = ViewState {
      search_text: "  PARQUE ".into(),
      ..ViewState::default()
    };
    assert_eq!(ids(&filtered_spots(&seed_spots(), &view)), ["3", "5"]);
  }

  #[test]
  fn filters_combine_conjunctively() {
    let spots = seed_spots();
    let view = ViewState {
      search_text: "parque".into(),
      kind_filter: Filter::Only(SpotKind::Montana),
      ..ViewState::default()
    };
    let result = filtered_spots(&spots, &view);
    assert_eq!(ids(&result), ["3"]);

    let all: Vec<Spot> = normalize_all(&spots).collect();
    for spot in &result {
      assert!(all.contains(spot));
      assert!(view.admits(spot, Some("parque")));
    }
  }

  #[test]
  fn conflicting_filters_yield_nothing() {
    let view = ViewState {
      province_filter: Filter::Only(Province::Alajuela),
      kind_filter: Filter::Only(SpotKind::Playa),
      ..ViewState::default()
    };
    assert!(filtered_spots(&seed_spots(), &view).is_empty());
  }

  #[test]
  fn nearby_recommendations_by_province() {
    let result = nearby_recommendations(&seed_spots(), Province::Limon);
    assert_eq!(names(&result), ["Puerto Viejo"]);
  }

  #[test]
  fn saved_spots_follow_record_order() {
    let mut saved = SavedSpotIds::default();
    saved.toggle(&"4".into());
    saved.toggle(&"2".into());
    assert_eq!(ids(&saved_spots(&seed_spots(), &saved)), ["2", "4"]);
  }

  #[test]
  fn creators_are_unique_and_profile_wins() {
    let mut spots = seed_spots();
    spots.push(authored("6", "Otro", "@CR_Adventures"));
    spots.push(authored("7", "Mío", "@ana"));

    let profile = Profile {
      full_name:  "Ana Mora".into(),
      username:   "@ana".into(),
      bio:        "Viajera".into(),
      avatar_url: "ana.jpg".into(),
      photos:     vec![],
    };
    let result = creators(&spots, Some(&profile));

    let handles: Vec<_> = result.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(handles, [
      "@ana",
      "@CR_Adventures",
      "@BeachExplorer7",
      "@MountainViews",
      "@WildcrViews",
      "@NatureLoverCR",
    ]);
    assert_eq!(result[0].bio, "Viajera");
    assert_eq!(result[0].avatar_url, "ana.jpg");
    assert_eq!(result[1].bio, crate::creator::SPOT_CREATOR_BIO);
  }

  #[test]
  fn creators_without_profile_come_from_spots() {
    let result = creators(&seed_spots(), None);
    assert_eq!(result.len(), 5);
    assert_eq!(result[0].username, "@CR_Adventures");
    assert_eq!(result[0].full_name, "@CR_Adventures");
  }

  #[test]
  fn creator_search_matches_handle_or_name() {
    let all = creators(&seed_spots(), None);
    assert_eq!(filtered_creators(all.clone(), "   ").len(), 5);

    let beach = filtered_creators(all.clone(), " beach ");
    assert_eq!(beach.len(), 1);
    assert_eq!(beach[0].username, "@BeachExplorer7");

    assert_eq!(filtered_creators(all, "views").len(), 2);
  }

  #[test]
  fn alphabetical_sort_ignores_accents() {
    let spots = vec![
      authored("1", "Zarcero", "@a"),
      authored("2", "Árbol Grande", "@a"),
      authored("3", "bahía", "@a"),
      authored("4", "Ajeno", "@b"),
    ];
    let empty = (CommentBook::default(), SavedSpotIds::default(), ViewHistory::default());
    let engagement = Engagement { comments: &empty.0, saved: &empty.1, history: &empty.2 };
    let result = creator_spots(&spots, "@a", CreatorSort::Alphabetical, engagement);
    assert_eq!(names(&result), ["Árbol Grande", "bahía", "Zarcero"]);
  }

  #[test]
  fn alphabetical_sort_places_enye_after_n() {
    let spots = vec![
      authored("1", "Ñandú", "@a"),
      authored("2", "Oropéndola", "@a"),
      authored("3", "Nube", "@a"),
    ];
    let empty = (CommentBook::default(), SavedSpotIds::default(), ViewHistory::default());
    let engagement = Engagement { comments: &empty.0, saved: &empty.1, history: &empty.2 };
    let result = creator_spots(&spots, "@a", CreatorSort::Alphabetical, engagement);
    assert_eq!(names(&result), ["Nube", "Ñandú", "Oropéndola"]);
  }

  #[test]
  fn recent_sort_is_numeric_descending() {
    let spots = vec![
      authored("2", "Semilla dos", "@a"),
      authored("1700000000000", "Nuevo", "@a"),
      authored("10", "Semilla diez", "@a"),
    ];
    let empty = (CommentBook::default(), SavedSpotIds::default(), ViewHistory::default());
    let engagement = Engagement { comments: &empty.0, saved: &empty.1, history: &empty.2 };
    let result = creator_spots(&spots, "@a", CreatorSort::Recent, engagement);
    assert_eq!(ids(&result), ["1700000000000", "10", "2"]);
  }

  #[test]
  fn popularity_counts_comments_saves_and_views() {
    let spots = vec![
      authored("1", "Uno", "@a"),
      authored("2", "Dos", "@a"),
      authored("3", "Tres", "@a"),
    ];
    let comments = seed_comments();
    let mut saved = SavedSpotIds::default();
    saved.toggle(&"3".into());
    let mut history = ViewHistory::default();
    history.record(&normalize(&spots[2]), String::new());
    history.record(&normalize(&spots[1]), String::new());

    let engagement = Engagement { comments: &comments, saved: &saved, history: &history };
    assert_eq!(engagement.score(&"1".into()), 2);
    assert_eq!(engagement.score(&"2".into()), 2);
    assert_eq!(engagement.score(&"3".into()), 3);

    let result = creator_spots(&spots, "@a", CreatorSort::Popular, engagement);
    // Ties keep record order.
    assert_eq!(ids(&result), ["3", "1", "2"]);
  }

  #[test]
  fn filter_cycles_through_all_values() {
    let mut filter = Filter::<Province>::Any;
    let mut seen = Vec::new();
    loop {
      filter = filter.next();
      if filter == Filter::Any {
        break;
      }
      seen.push(filter);
    }
    assert_eq!(seen.len(), Province::iter().count());
    assert_eq!(seen[0], Filter::Only(Province::SanJose));
  }
}
