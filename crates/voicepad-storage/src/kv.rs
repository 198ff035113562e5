//! Keyed list persistence boundary.
//!
//! The reminder store persists its full list through [`ListStore`] after
//! every mutation. The durable implementation keeps one row per key in the
//! `kv_lists` table with a JSON-encoded string array, mirroring the shape a
//! browser would keep under a localStorage key.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rusqlite::OptionalExtension;

use voicepad_core::error::{Result, VoicepadError};

use crate::db::Database;

/// Durable ordered-list persistence keyed by logical name.
pub trait ListStore: Send + Sync {
    /// Read the list stored under `key`. `Ok(None)` means nothing was ever
    /// stored; corrupt stored data is an error (callers degrade to empty).
    fn read_list(&self, key: &str) -> Result<Option<Vec<String>>>;

    /// Replace the list stored under `key` with `items`.
    fn write_list(&self, key: &str, items: &[String]) -> Result<()>;
}

/// SQLite-backed list store.
pub struct SqliteListStore {
    db: Arc<Database>,
}

impl SqliteListStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl ListStore for SqliteListStore {
    fn read_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let raw: Option<String> = self.db.with_conn(|conn| {
            conn.query_row(
                "SELECT value FROM kv_lists WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| VoicepadError::Storage(format!("Failed to read list '{}': {}", key, e)))
        })?;

        match raw {
            Some(json) => {
                let items: Vec<String> = serde_json::from_str(&json)?;
                Ok(Some(items))
            }
            None => Ok(None),
        }
    }

    fn write_list(&self, key: &str, items: &[String]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_lists (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, json.as_str()],
            )
            .map_err(|e| VoicepadError::Storage(format!("Failed to write list '{}': {}", key, e)))?;
            Ok(())
        })?;
        tracing::debug!(key, count = items.len(), "List persisted");
        Ok(())
    }
}

/// In-memory list store for tests and capability-less environments.
#[derive(Default)]
pub struct MemoryListStore {
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryListStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryListStore {
    fn read_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let lists = self
            .lists
            .lock()
            .map_err(|e| VoicepadError::Storage(format!("List store lock poisoned: {}", e)))?;
        Ok(lists.get(key).cloned())
    }

    fn write_list(&self, key: &str, items: &[String]) -> Result<()> {
        let mut lists = self
            .lists
            .lock()
            .map_err(|e| VoicepadError::Storage(format!("List store lock poisoned: {}", e)))?;
        lists.insert(key.to_string(), items.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite_store() -> SqliteListStore {
        SqliteListStore::new(Arc::new(Database::in_memory().unwrap()))
    }

    #[test]
    fn test_absent_key_reads_none() {
        let store = sqlite_store();
        assert_eq!(store.read_list("reminders").unwrap(), None);
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let store = sqlite_store();
        let items = vec!["Drink water".to_string(), "Call therapist".to_string()];
        store.write_list("reminders", &items).unwrap();
        assert_eq!(store.read_list("reminders").unwrap(), Some(items));
    }

    #[test]
    fn test_empty_list_round_trips() {
        let store = sqlite_store();
        store.write_list("reminders", &[]).unwrap();
        // An empty list is a stored value, not absence.
        assert_eq!(store.read_list("reminders").unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_write_replaces_previous_value() {
        let store = sqlite_store();
        store
            .write_list("reminders", &["a".to_string(), "b".to_string()])
            .unwrap();
        store.write_list("reminders", &["b".to_string()]).unwrap();
        assert_eq!(
            store.read_list("reminders").unwrap(),
            Some(vec!["b".to_string()])
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let store = sqlite_store();
        store.write_list("reminders", &["x".to_string()]).unwrap();
        store.write_list("other", &["y".to_string()]).unwrap();
        assert_eq!(
            store.read_list("reminders").unwrap(),
            Some(vec!["x".to_string()])
        );
        assert_eq!(
            store.read_list("other").unwrap(),
            Some(vec!["y".to_string()])
        );
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let db = Arc::new(Database::in_memory().unwrap());
        db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_lists (key, value) VALUES ('reminders', 'not json')",
                [],
            )
            .map_err(|e| VoicepadError::Storage(e.to_string()))?;
            Ok(())
        })
        .unwrap();

        let store = SqliteListStore::new(db);
        let err = store.read_list("reminders").unwrap_err();
        assert!(matches!(err, VoicepadError::Serialization(_)));
    }

    #[test]
    fn test_list_survives_database_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lists.db");

        {
            let store = SqliteListStore::new(Arc::new(Database::new(&path).unwrap()));
            store
                .write_list("reminders", &["persisted".to_string()])
                .unwrap();
        }

        let store = SqliteListStore::new(Arc::new(Database::new(&path).unwrap()));
        assert_eq!(
            store.read_list("reminders").unwrap(),
            Some(vec!["persisted".to_string()])
        );
    }

    #[test]
    fn test_memory_store_round_trips() {
        let store = MemoryListStore::new();
        assert_eq!(store.read_list("reminders").unwrap(), None);
        store.write_list("reminders", &["m".to_string()]).unwrap();
        assert_eq!(
            store.read_list("reminders").unwrap(),
            Some(vec!["m".to_string()])
        );
    }

    #[test]
    fn test_unicode_and_whitespace_preserved() {
        let store = sqlite_store();
        let items = vec!["  padded  ".to_string(), "ta en promenad 🚶".to_string()];
        store.write_list("reminders", &items).unwrap();
        assert_eq!(store.read_list("reminders").unwrap(), Some(items));
    }
}
