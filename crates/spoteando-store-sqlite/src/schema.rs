//! SQL schema for the Spoteando SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One JSON document per (collection, doc_id). Saves merge top-level keys
-- into body_json and restamp updated_at.
CREATE TABLE IF NOT EXISTS documents (
    collection  TEXT NOT NULL,
    doc_id      TEXT NOT NULL,
    body_json   TEXT NOT NULL,   -- JSON object
    updated_at  TEXT NOT NULL,   -- ISO 8601 UTC; server-assigned
    PRIMARY KEY (collection, doc_id)
);
";
