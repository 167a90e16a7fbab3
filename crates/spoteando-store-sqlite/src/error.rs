//! Error type for `spoteando-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The stored body is valid JSON but not an object.
  #[error("document {collection}/{doc_id} is not a JSON object")]
  NotAnObject {
    collection: &'static str,
    doc_id:     &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
