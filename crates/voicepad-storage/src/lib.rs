//! VoicePad storage crate - durable keyed list persistence.
//!
//! Provides a WAL-mode SQLite database holding JSON-encoded string lists
//! keyed by logical name, plus an in-memory implementation for tests.
//! The reminder store talks to the [`ListStore`] trait only.

pub mod db;
pub mod kv;

pub use db::Database;
pub use kv::{ListStore, MemoryListStore, SqliteListStore};
