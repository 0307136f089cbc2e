//! Storage module for the persisted preferences (currently only the theme)
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, warn};

use crate::core::Result;

const PREFERENCES_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)"#;

/// A small string key-value store.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Whether values survive a restart.
    fn is_persistent(&self) -> bool {
        false
    }
}

/// Preferences kept in a SQLite database.
pub struct SqlitePreferenceStore {
    conn: Connection,
}

impl SqlitePreferenceStore {
    /// Opens (or creates) the preference database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening preference store at {:?}", path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> Result<()> {
        self.conn.execute(PREFERENCES_TABLE_SQL, [])?;
        Ok(())
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn is_persistent(&self) -> bool {
        true
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let result = self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        );

        match result {
            Ok(_) => {
                debug!("Stored preference {} = {}", key, value);
                Ok(())
            }
            Err(e) => {
                error!("Failed to store preference {}: {}", key, e);
                Err(e.into())
            }
        }
    }
}

/// Process-local preferences. Used when no database can be opened.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `<data_dir>/gitsheet/preferences.db`, when the platform has a data dir.
pub fn default_store_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("gitsheet").join("preferences.db"))
}

/// Opens the SQLite store at `path` (or the default location), falling back
/// to an in-memory store when that fails. Preferences then last for the
/// current session only.
pub fn open_store(path: Option<&Path>) -> Box<dyn PreferenceStore> {
    let path = path.map(Path::to_path_buf).or_else(default_store_path);
    match path {
        Some(path) => match SqlitePreferenceStore::open(&path) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("Preference store unavailable at {:?}: {}", path, e);
                Box::new(MemoryPreferenceStore::new())
            }
        },
        None => {
            warn!("No data directory; preferences will not persist");
            Box::new(MemoryPreferenceStore::new())
        }
    }
}
