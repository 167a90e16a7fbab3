//! Integration tests for `SqliteStateStore` against an in-memory database.

use spoteando_core::{
  profile::ProfileDraft,
  settings::{SettingKey, Settings},
  state::AppState,
  store::{PersistedState, StateStore, load_remote, save_remote},
};

use crate::SqliteStateStore;

async fn store() -> SqliteStateStore {
  SqliteStateStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── Load / save ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn load_before_any_save_returns_none() {
  let s = store().await;
  assert!(s.load().await.unwrap().is_none());
}

#[tokio::test]
async fn save_then_load_round_trips() {
  let s = store().await;
  let state = AppState::seeded().persisted();
  s.save(&state).await.unwrap();

  let loaded = s.load().await.unwrap().unwrap();
  assert_eq!(loaded.spots, state.spots);
  assert_eq!(loaded.comments, state.comments);
  assert_eq!(loaded.saved_spot_ids, state.saved_spot_ids);
  assert_eq!(loaded.settings, state.settings);
  assert!(loaded.profile.is_none());
  assert!(loaded.updated_at.is_some());
}

#[tokio::test]
async fn partial_save_keeps_other_fields() {
  let s = store().await;
  s.save(&AppState::seeded().persisted()).await.unwrap();

  let mut settings = Settings::default();
  settings.toggle(SettingKey::DarkMode);
  s.save(&PersistedState {
    settings: Some(settings),
    ..PersistedState::default()
  })
  .await
  .unwrap();

  let loaded = s.load().await.unwrap().unwrap();
  assert_eq!(loaded.spots.map(|spots| spots.len()), Some(5));
  assert!(loaded.settings.unwrap().dark_mode);
}

#[tokio::test]
async fn every_save_restamps_updated_at() {
  let s = store().await;
  let stale = PersistedState {
    updated_at: Some(chrono::DateTime::UNIX_EPOCH),
    ..PersistedState::default()
  };
  s.save(&stale).await.unwrap();
  let first = s.load().await.unwrap().unwrap().updated_at.unwrap();
  assert!(first > chrono::DateTime::UNIX_EPOCH);

  s.save(&PersistedState::default()).await.unwrap();
  let second = s.load().await.unwrap().unwrap().updated_at.unwrap();
  assert!(second >= first);
}

#[tokio::test]
async fn unknown_keys_survive_saves() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO documents (collection, doc_id, body_json, updated_at)
         VALUES ('appState', 'main', '{\"legacyFlag\":true}', '2024-01-01T00:00:00Z')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  s.save(&AppState::seeded().persisted()).await.unwrap();
  let raw = s.raw_document().await.unwrap().unwrap();
  assert!(raw.contains("\"legacyFlag\":true"));
  assert!(s.load().await.unwrap().unwrap().spots.is_some());
}

#[tokio::test]
async fn corrupt_document_fails_load() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute(
        "INSERT INTO documents (collection, doc_id, body_json, updated_at)
         VALUES ('appState', 'main', 'not json', '2024-01-01T00:00:00Z')",
        [],
      )?;
      Ok(())
    })
    .await
    .unwrap();

  assert!(matches!(s.load().await, Err(crate::Error::Json(_))));
  assert!(matches!(
    s.save(&PersistedState::default()).await,
    Err(crate::Error::Json(_))
  ));
  assert_eq!(s.raw_document().await.unwrap().as_deref(), Some("not json"));
}

// ─── Best-effort helpers ─────────────────────────────────────────────────────

#[tokio::test]
async fn unconfigured_store_is_unavailable() {
  let none: Option<&SqliteStateStore> = None;
  assert!(load_remote(none).await.is_none());
  assert!(!save_remote(none, &PersistedState::default()).await);
}

#[tokio::test]
async fn restored_state_matches_saved_state() {
  let s = store().await;

  let mut state = AppState::seeded();
  state.profile_draft = ProfileDraft {
    full_name: "Ana Mora".into(),
    username: "ana".into(),
    ..ProfileDraft::default()
  };
  state.profile = Some(state.profile_draft.validate().unwrap());
  state.saved.toggle(&"3".into());
  assert!(save_remote(Some(&s), &state.persisted()).await);

  let mut fresh = AppState::seeded();
  fresh.apply(load_remote(Some(&s)).await.unwrap());
  assert_eq!(fresh.profile.as_ref().unwrap().username, "@ana");
  assert_eq!(fresh.profile_draft.username, "@ana");
  assert!(!fresh.profile_edit_mode);
  assert!(fresh.saved.contains(&"3".into()));
}
