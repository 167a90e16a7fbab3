//! Recently viewed spots, shown as the notification feed.

use serde::{Deserialize, Serialize};

use crate::{
  label::Label,
  province::Province,
  spot::{RawSpot, Spot, SpotId, SpotKind},
};

/// How many entries the notification feed lists.
pub const FEED_LENGTH: usize = 10;
/// How many entries the settings screen lists as recent activity.
pub const RECENT_ACTIVITY: usize = 3;

/// A snapshot of a spot taken when it was opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewedSpot {
  pub id:         SpotId,
  pub name:       String,
  pub province:   Label<Province>,
  #[serde(rename = "type")]
  pub kind:       Label<SpotKind>,
  pub image_url:  String,
  pub map_url:    String,
  /// Human-readable local time of the view.
  pub date_label: String,
}

impl ViewedSpot {
  pub fn capture(spot: &Spot, date_label: String) -> Self {
    Self {
      id: spot.id.clone(),
      name: spot.name.clone(),
      province: spot.province.clone(),
      kind: spot.kind.clone(),
      image_url: spot.image_url.clone(),
      map_url: spot.map_url.clone(),
      date_label,
    }
  }

  /// The snapshot as a raw record, for reopening a spot that no longer
  /// exists in the live collection.
  pub fn to_raw(&self) -> RawSpot {
    RawSpot {
      id: self.id.clone(),
      name: self.name.clone(),
      province: Some(self.province.name().to_owned()),
      kind: Some(self.kind.name().to_owned()),
      image_url: Some(self.image_url.clone()),
      map_url: Some(self.map_url.clone()),
      ..RawSpot::default()
    }
  }
}

/// Most-recently-viewed first, at most one entry per spot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHistory(Vec<ViewedSpot>);

impl ViewHistory {
  /// Move `spot` to the front, replacing any earlier entry for it.
  pub fn record(&mut self, spot: &Spot, date_label: String) {
    self.0.retain(|entry| entry.id != spot.id);
    self.0.insert(0, ViewedSpot::capture(spot, date_label));
  }

  pub fn contains(&self, id: &SpotId) -> bool {
    self.0.iter().any(|entry| &entry.id == id)
  }

  pub fn get(&self, id: &SpotId) -> Option<&ViewedSpot> {
    self.0.iter().find(|entry| &entry.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ViewedSpot> { self.0.iter() }

  /// The `n` most recent entries.
  pub fn recent(&self, n: usize) -> &[ViewedSpot] { &self.0[..self.0.len().min(n)] }

  /// The entries shown in the notification feed.
  pub fn feed(&self) -> &[ViewedSpot] { self.recent(FEED_LENGTH) }

  /// The entries shown under recent activity in settings.
  pub fn recent_activity(&self) -> &[ViewedSpot] { self.recent(RECENT_ACTIVITY) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::spot::normalize;

  fn spot(id: &str) -> Spot {
    normalize(&RawSpot {
      id: id.into(),
      name: format!("Spot {id}"),
      ..RawSpot::default()
    })
  }

  #[test]
  fn revisiting_moves_entry_to_front() {
    let mut history = ViewHistory::default();
    history.record(&spot("3"), "a".into());
    history.record(&spot("1"), "b".into());
    history.record(&spot("3"), "c".into());

    let ids: Vec<_> = history.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["3", "1"]);
    assert_eq!(history.get(&"3".into()).unwrap().date_label, "c");
  }

  #[test]
  fn feed_is_bounded() {
    let mut history = ViewHistory::default();
    for i in 0..15 {
      history.record(&spot(&i.to_string()), String::new());
    }
    assert_eq!(history.len(), 15);
    assert_eq!(history.feed().len(), FEED_LENGTH);
    assert_eq!(history.feed()[0].id.as_str(), "14");
  }

  #[test]
  fn recent_activity_lists_last_three() {
    let mut history = ViewHistory::default();
    history.record(&spot("1"), String::new());
    assert_eq!(history.recent_activity().len(), 1);

    for id in ["2", "3", "4", "2"] {
      history.record(&spot(id), String::new());
    }
    let ids: Vec<_> = history.recent_activity().iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["2", "4", "3"]);
    assert!(ViewHistory::default().recent(RECENT_ACTIVITY).is_empty());
  }

  #[test]
  fn snapshot_keeps_unrecognised_categories() {
    let spot = normalize(&RawSpot {
      id: "9".into(),
      name: "Isla del Coco".into(),
      province: Some("Atlántida".into()),
      ..RawSpot::default()
    });
    let mut history = ViewHistory::default();
    history.record(&spot, String::new());
    let raw = history.get(&"9".into()).unwrap().to_raw();
    assert_eq!(raw.province.as_deref(), Some("Atlántida"));
  }
}
