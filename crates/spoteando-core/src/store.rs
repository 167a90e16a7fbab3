//! The optional remote state store and the document it holds.
//!
//! The store is best-effort: [`load_remote`] and [`save_remote`] turn a
//! missing configuration or any backend failure into "unavailable" and log
//! it. Nothing is retried.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  comment::CommentBook,
  history::ViewHistory,
  profile::Profile,
  saved::SavedSpotIds,
  settings::Settings,
  spot::RawSpot,
};

// ─── Document ────────────────────────────────────────────────────────────────

/// The persisted slice of application state.
///
/// Every field is optional: a document written by an older client, or
/// merged from partial saves, simply leaves the corresponding local state
/// untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub spots:          Option<Vec<RawSpot>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comments:       Option<CommentBook>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub profile:        Option<Profile>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub saved_spot_ids: Option<SavedSpotIds>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub viewed_spots:   Option<ViewHistory>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub settings:       Option<Settings>,
  /// Assigned by the store on every save; ignored on write.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub updated_at:     Option<DateTime<Utc>>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A single-document store for [`PersistedState`].
///
/// Saves merge into the existing document key by key, so fields absent from
/// the payload survive. Concurrent writers resolve last-write-wins.
pub trait StateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the document; `None` if nothing was ever saved.
  fn load(
    &self,
  ) -> impl Future<Output = Result<Option<PersistedState>, Self::Error>> + Send + '_;

  /// Merge `state` into the document and stamp its update time.
  fn save<'a>(
    &'a self,
    state: &'a PersistedState,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Best-effort access ──────────────────────────────────────────────────────

/// Load the remote document, or `None` when unconfigured or unreachable.
pub async fn load_remote<S: StateStore>(store: Option<&S>) -> Option<PersistedState> {
  let store = store?;
  match store.load().await {
    Ok(state) => state,
    Err(e) => {
      tracing::warn!(error = %e, "remote state load failed");
      None
    }
  }
}

/// Save to the remote document. Returns whether the write happened.
pub async fn save_remote<S: StateStore>(store: Option<&S>, state: &PersistedState) -> bool {
  let Some(store) = store else {
    return false;
  };
  match store.save(state).await {
    Ok(()) => true,
    Err(e) => {
      tracing::warn!(error = %e, "remote state save failed");
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use thiserror::Error;

  use super::*;

  #[derive(Debug, Error)]
  #[error("store offline")]
  struct Offline;

  #[derive(Default)]
  struct MemoryStore {
    doc:     Mutex<Option<PersistedState>>,
    offline: bool,
  }

  impl StateStore for MemoryStore {
    type Error = Offline;

    async fn load(&self) -> Result<Option<PersistedState>, Offline> {
      if self.offline {
        return Err(Offline);
      }
      Ok(self.doc.lock().unwrap().clone())
    }

    async fn save(&self, state: &PersistedState) -> Result<(), Offline> {
      if self.offline {
        return Err(Offline);
      }
      *self.doc.lock().unwrap() = Some(state.clone());
      Ok(())
    }
  }

  #[tokio::test]
  async fn unconfigured_store_is_unavailable() {
    assert!(load_remote::<MemoryStore>(None).await.is_none());
    assert!(!save_remote::<MemoryStore>(None, &PersistedState::default()).await);
  }

  #[tokio::test]
  async fn failures_are_swallowed() {
    let store = MemoryStore { offline: true, ..MemoryStore::default() };
    assert!(load_remote(Some(&store)).await.is_none());
    assert!(!save_remote(Some(&store), &PersistedState::default()).await);
  }

  #[tokio::test]
  async fn saved_document_loads_back() {
    let store = MemoryStore::default();
    let state = PersistedState {
      settings: Some(Settings { dark_mode: true, ..Settings::default() }),
      ..PersistedState::default()
    };
    assert!(save_remote(Some(&store), &state).await);
    assert_eq!(load_remote(Some(&store)).await, Some(state));
  }

  #[test]
  fn absent_fields_stay_absent_in_json() {
    let json = serde_json::to_value(PersistedState::default()).unwrap();
    assert_eq!(json, serde_json::json!({}));
  }
}
