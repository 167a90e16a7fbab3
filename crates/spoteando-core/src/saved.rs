//! Bookmarked spots.

use serde::{Deserialize, Serialize};

use crate::spot::SpotId;

/// Saved spot ids, most recently saved first. Duplicates cannot occur because
/// the only mutation is [`SavedSpotIds::toggle`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedSpotIds(Vec<SpotId>);

impl SavedSpotIds {
  /// Add `id` if absent, remove it if present. Returns whether it is now saved.
  pub fn toggle(&mut self, id: &SpotId) -> bool {
    if self.contains(id) {
      self.0.retain(|saved| saved != id);
      false
    } else {
      self.0.insert(0, id.clone());
      true
    }
  }

  pub fn contains(&self, id: &SpotId) -> bool { self.0.contains(id) }

  pub fn iter(&self) -> impl Iterator<Item = &SpotId> { self.0.iter() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn toggle_twice_restores_membership() {
    let mut saved = SavedSpotIds::default();
    let a = SpotId::from("1");
    let b = SpotId::from("2");
    saved.toggle(&b);

    assert!(saved.toggle(&a));
    assert!(saved.contains(&a));
    assert!(!saved.toggle(&a));
    assert!(!saved.contains(&a));
    assert!(saved.contains(&b));
    assert_eq!(saved.len(), 1);
  }

  #[test]
  fn newest_save_first() {
    let mut saved = SavedSpotIds::default();
    saved.toggle(&"1".into());
    saved.toggle(&"2".into());
    let ids: Vec<_> = saved.iter().map(SpotId::as_str).collect();
    assert_eq!(ids, ["2", "1"]);
  }
}
