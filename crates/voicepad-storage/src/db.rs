//! Database connection management.
//!
//! Wraps a single rusqlite Connection in a Mutex for thread-safe access.
//! Configures WAL mode and recommended PRAGMAs on initialization.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::info;

use voicepad_core::error::VoicepadError;

/// Schema for the keyed list table. A row per logical key, the value being
/// a JSON-encoded array of strings.
const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS kv_lists (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// Thread-safe SQLite database wrapper.
///
/// Uses WAL mode for concurrent read/write safety. The connection is
/// wrapped in a Mutex since rusqlite Connection is not Sync.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) a database at the given path.
    ///
    /// Configures WAL mode, synchronous=NORMAL, foreign keys, and creates
    /// the schema if missing.
    pub fn new(path: &Path) -> Result<Self, VoicepadError> {
        // Ensure parent directory exists.
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)
            .map_err(|e| VoicepadError::Storage(format!("Failed to open database: {}", e)))?;

        Self::configure(&conn)?;
        info!("Database opened at {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn in_memory() -> Result<Self, VoicepadError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| VoicepadError::Storage(format!("Failed to open in-memory db: {}", e)))?;

        Self::configure(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn configure(conn: &Connection) -> Result<(), VoicepadError> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|e| VoicepadError::Storage(format!("Failed to set pragmas: {}", e)))?;

        conn.execute_batch(SCHEMA)
            .map_err(|e| VoicepadError::Storage(format!("Failed to create schema: {}", e)))?;

        Ok(())
    }

    /// Execute a closure with a reference to the underlying connection.
    ///
    /// This is the primary way to interact with the database. The mutex
    /// is held for the duration of the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, VoicepadError>
    where
        F: FnOnce(&Connection) -> Result<T, VoicepadError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| VoicepadError::Storage(format!("Database lock poisoned: {}", e)))?;
        f(&conn)
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish()
    }
}
