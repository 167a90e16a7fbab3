//! SQLite backend for the Spoteando remote state document.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{COLLECTION, DOCUMENT, SqliteStateStore};

#[cfg(test)]
mod tests;
