//! Comments left on spots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Notice, spot::SpotId};

/// Author used when the local user has no handle yet.
pub const GUEST_AUTHOR: &str = "@Visitante";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id:   String,
  pub user: String,
  pub text: String,
}

/// Every spot's comments, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentBook(BTreeMap<SpotId, Vec<Comment>>);

impl CommentBook {
  pub fn for_spot(&self, spot_id: &SpotId) -> &[Comment] {
    self.0.get(spot_id).map(Vec::as_slice).unwrap_or_default()
  }

  pub fn count(&self, spot_id: &SpotId) -> usize { self.for_spot(spot_id).len() }

  /// Prepend a comment to `spot_id`'s thread.
  ///
  /// Whitespace-only drafts are rejected. The id is derived from `now_millis`
  /// and bumped until it is unique within the thread.
  pub fn add(
    &mut self,
    spot_id: &SpotId,
    draft: &str,
    author: &str,
    now_millis: i64,
  ) -> Result<&Comment, Notice> {
    let text = draft.trim();
    if text.is_empty() {
      return Err(Notice::EMPTY_COMMENT);
    }

    let thread = self.0.entry(spot_id.clone()).or_default();
    let mut stamp = now_millis;
    let id = loop {
      let candidate = format!("{spot_id}-{stamp}");
      if thread.iter().all(|c| c.id != candidate) {
        break candidate;
      }
      stamp += 1;
    };

    thread.insert(0, Comment {
      id,
      user: if author.is_empty() { GUEST_AUTHOR.to_owned() } else { author.to_owned() },
      text: text.to_owned(),
    });
    Ok(&thread[0])
  }

  /// Seed a thread wholesale; used for fixture data.
  pub fn with_thread(mut self, spot_id: impl Into<SpotId>, comments: Vec<Comment>) -> Self {
    self.0.insert(spot_id.into(), comments);
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn blank_comment_changes_nothing() {
    let mut book = CommentBook::default();
    let id = SpotId::from("1");
    assert_eq!(book.add(&id, "   \n", "@ana", 1).unwrap_err(), Notice::EMPTY_COMMENT);
    assert_eq!(book.count(&id), 0);
  }

  #[test]
  fn newest_comment_comes_first() {
    let mut book = CommentBook::default();
    let id = SpotId::from("1");
    book.add(&id, "primero", "@ana", 10).unwrap();
    book.add(&id, "  segundo ", "", 10).unwrap();

    let thread = book.for_spot(&id);
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0].text, "segundo");
    assert_eq!(thread[0].user, GUEST_AUTHOR);
    assert_ne!(thread[0].id, thread[1].id);
  }
}
