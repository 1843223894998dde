//! Snapshot persistence
//!
//! The table state is stored as one JSON document under a single versioned
//! key in a small key-value store. Loading fails closed: anything that does
//! not validate is treated as "no snapshot" so the caller falls back to seed
//! data instead of rehydrating a half-valid state.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::model::{Column, EditSession, QueryParams, RecordStore, Row, SortSpec, TableModel};

/// Key the snapshot is stored under
pub const SNAPSHOT_KEY: &str = "rowdesk.table.v1";

/// Errors writing a snapshot
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal durable key-value interface
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write then rename so a crash never leaves a truncated snapshot
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// In-memory store; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Serialized form of the table state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version for forward compatibility
    pub version: u32,
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
    pub search_text: String,
    pub sort: SortSpec,
    pub page: usize,
    pub page_size: usize,
    /// In-progress drafts; older snapshots may not carry any
    #[serde(default)]
    pub editing: EditSession,
}

impl Snapshot {
    pub const CURRENT_VERSION: u32 = 1;

    pub fn from_model(model: &TableModel) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            rows: model.store.rows().to_vec(),
            columns: model.store.columns().to_vec(),
            search_text: model.query.search_text.clone(),
            sort: model.query.sort.clone(),
            page: model.query.page,
            page_size: model.query.page_size,
            editing: model.edits.clone(),
        }
    }

    /// Check the invariants a deserialized snapshot cannot express in types
    pub fn validate(&self) -> Result<(), String> {
        self.check_settings()?;
        RecordStore::check_parts(&self.rows, &self.columns).map_err(|e| e.to_string())
    }

    fn check_settings(&self) -> Result<(), String> {
        if self.version != Self::CURRENT_VERSION {
            return Err(format!("unsupported snapshot version {}", self.version));
        }
        if self.page_size == 0 {
            return Err("page size must be positive".to_string());
        }
        for id in self.editing.ids() {
            if self.editing.draft(id).map(|d| d.id.as_str()) != Some(id) {
                return Err(format!("draft for {:?} carries a different id", id));
            }
        }
        Ok(())
    }

    /// Rehydrate into `model`, keeping the model's configured defaults
    ///
    /// On error `model` is left untouched.
    pub fn apply_to(self, model: &mut TableModel) -> Result<(), String> {
        self.check_settings()?;
        let store = RecordStore::from_parts(self.rows, self.columns).map_err(|e| e.to_string())?;
        model.store = store;
        model.query = QueryParams {
            search_text: self.search_text,
            sort: self.sort,
            page: self.page,
            page_size: self.page_size,
        };
        model.edits = self.editing;
        model.pending_delete = None;
        Ok(())
    }
}

/// Saves and restores table snapshots through a key-value store
#[derive(Debug)]
pub struct PersistenceGateway<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: SNAPSHOT_KEY.to_string(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Write the current state
    pub fn save(&mut self, model: &TableModel) -> Result<(), PersistError> {
        let contents = serde_json::to_string_pretty(&Snapshot::from_model(model))?;
        self.store.set(&self.key, &contents)?;
        tracing::debug!(key = %self.key, rows = model.store.len(), "saved snapshot");
        Ok(())
    }

    /// Read the stored snapshot
    ///
    /// Returns `None` when there is no snapshot, when it cannot be read, and
    /// when it fails to parse or validate.
    pub fn load(&self) -> Option<Snapshot> {
        let contents = match self.store.get(&self.key) {
            Ok(Some(contents)) => contents,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no snapshot stored");
                return None;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to read snapshot: {}", e);
                return None;
            }
        };

        let snapshot: Snapshot = match serde_json::from_str(&contents) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(key = %self.key, "discarding unparseable snapshot: {}", e);
                return None;
            }
        };

        if let Err(reason) = snapshot.validate() {
            tracing::warn!(key = %self.key, "discarding invalid snapshot: {}", reason);
            return None;
        }

        tracing::info!(key = %self.key, rows = snapshot.rows.len(), "loaded snapshot");
        Some(snapshot)
    }

    /// Restore `model` from storage; leaves it untouched and returns false
    /// if there is nothing usable
    pub fn restore_into(&self, model: &mut TableModel) -> bool {
        match self.load() {
            Some(snapshot) => match snapshot.apply_to(model) {
                Ok(()) => true,
                Err(reason) => {
                    tracing::warn!("snapshot rejected during restore: {}", reason);
                    false
                }
            },
            None => false,
        }
    }

    /// Remove the stored snapshot
    pub fn clear(&mut self) -> Result<(), PersistError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}
