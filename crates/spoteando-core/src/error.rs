//! Error types for `spoteando-core`.
//!
//! These surface only in logs: normalisation keeps unresolved values as
//! [`crate::label::Label::Unknown`] and reports the error at `debug` level.
//! User-facing rejections (missing name, denied permission, ...) are not
//! errors; they are reported as [`crate::Notice`] values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown province: {0:?}")]
  UnknownProvince(String),

  #[error("unknown spot type: {0:?}")]
  UnknownSpotKind(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
