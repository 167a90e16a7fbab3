//! [`SqliteStateStore`], the SQLite implementation of [`StateStore`].

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::OptionalExtension as _;
use serde_json::{Map, Value};

use spoteando_core::store::{PersistedState, StateStore};

use crate::{Error, Result, schema::SCHEMA};

/// Collection holding the application state document.
pub const COLLECTION: &str = "appState";
/// The single document every client reads and merges into.
pub const DOCUMENT: &str = "main";

const UPDATED_AT_KEY: &str = "updatedAt";

// ─── Store ───────────────────────────────────────────────────────────────────

/// The remote state document backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStateStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStateStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The raw stored JSON body, including keys this client does not know.
  pub async fn raw_document(&self) -> Result<Option<String>> {
    let body = self
      .conn
      .call(|conn| {
        Ok(
          conn
            .query_row(
              "SELECT body_json FROM documents WHERE collection = ?1 AND doc_id = ?2",
              rusqlite::params![COLLECTION, DOCUMENT],
              |row| row.get::<_, String>(0),
            )
            .optional()?,
        )
      })
      .await?;
    Ok(body)
  }
}

// ─── Merge ───────────────────────────────────────────────────────────────────

fn not_an_object() -> Error {
  Error::NotAnObject {
    collection: COLLECTION,
    doc_id:     DOCUMENT,
  }
}

/// The top-level keys `state` would write. Absent fields produce no key.
fn patch_of(state: &PersistedState) -> Result<Map<String, Value>> {
  match serde_json::to_value(state)? {
    Value::Object(mut map) => {
      map.remove(UPDATED_AT_KEY);
      Ok(map)
    }
    _ => Err(not_an_object()),
  }
}

/// Overlay `patch` onto the stored body key by key and restamp it.
fn merge_body(existing: Option<&str>, patch: Map<String, Value>, stamp: &str) -> Result<String> {
  let mut body = match existing {
    Some(json) => match serde_json::from_str(json)? {
      Value::Object(map) => map,
      _ => return Err(not_an_object()),
    },
    None => Map::new(),
  };
  body.extend(patch);
  body.insert(UPDATED_AT_KEY.to_owned(), Value::String(stamp.to_owned()));
  Ok(serde_json::to_string(&body)?)
}

// ─── StateStore impl ─────────────────────────────────────────────────────────

impl StateStore for SqliteStateStore {
  type Error = Error;

  async fn load(&self) -> Result<Option<PersistedState>> {
    let Some(body) = self.raw_document().await? else {
      tracing::debug!("no stored state document");
      return Ok(None);
    };
    Ok(Some(serde_json::from_str(&body)?))
  }

  async fn save(&self, state: &PersistedState) -> Result<()> {
    let patch = patch_of(state)?;
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    // Read, merge and write inside one transaction. Merge failures travel
    // back as the inner result so the transaction is dropped uncommitted.
    let outcome: Result<()> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let existing: Option<String> = tx
          .query_row(
            "SELECT body_json FROM documents WHERE collection = ?1 AND doc_id = ?2",
            rusqlite::params![COLLECTION, DOCUMENT],
            |row| row.get(0),
          )
          .optional()?;

        let body = match merge_body(existing.as_deref(), patch, &stamp) {
          Ok(body) => body,
          Err(e) => return Ok(Err(e)),
        };

        tx.execute(
          "INSERT INTO documents (collection, doc_id, body_json, updated_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (collection, doc_id)
           DO UPDATE SET body_json = excluded.body_json, updated_at = excluded.updated_at",
          rusqlite::params![COLLECTION, DOCUMENT, body, stamp],
        )?;
        tx.commit()?;
        Ok(Ok(()))
      })
      .await?;

    outcome?;
    tracing::debug!("state document saved");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn patch(json: &str) -> Map<String, Value> {
    match serde_json::from_str(json).unwrap() {
      Value::Object(map) => map,
      other => panic!("not an object: {other}"),
    }
  }

  #[test]
  fn merge_keeps_unknown_keys() {
    let body = merge_body(
      Some(r#"{"spots":[],"legacy":1}"#),
      patch(r#"{"settings":{"darkMode":true}}"#),
      "2026-01-01T00:00:00.000Z",
    )
    .unwrap();
    let value: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["legacy"], 1);
    assert_eq!(value["spots"], Value::Array(vec![]));
    assert_eq!(value["settings"]["darkMode"], true);
    assert_eq!(value["updatedAt"], "2026-01-01T00:00:00.000Z");
  }

  #[test]
  fn merge_rejects_non_object_body() {
    let err = merge_body(Some("[1,2]"), Map::new(), "now").unwrap_err();
    assert!(matches!(err, Error::NotAnObject { .. }));
  }

  #[test]
  fn patch_omits_absent_fields() {
    let map = patch_of(&PersistedState::default()).unwrap();
    assert!(map.is_empty());
  }
}
