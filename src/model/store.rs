//! Record store: the committed rows and the column definitions

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::row::{normalize_key, Column, Row, Value, ID_KEY};
use super::seed::{default_columns, seed_rows};

/// Structural problems found when validating a store built from outside data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate row id {0:?}")]
    DuplicateRowId(String),
    #[error("duplicate column key {0:?}")]
    DuplicateColumnKey(String),
    #[error("empty row id")]
    EmptyRowId,
}

/// Committed rows plus ordered column definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    rows: Vec<Row>,
    columns: Vec<Column>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl RecordStore {
    /// Store holding the built-in seed rows and default columns
    pub fn seeded() -> Self {
        Self {
            rows: seed_rows(),
            columns: default_columns(),
        }
    }

    /// Build a store from external parts, checking id and key uniqueness
    pub fn from_parts(rows: Vec<Row>, columns: Vec<Column>) -> Result<Self, StoreError> {
        Self::check_parts(&rows, &columns)?;
        Ok(Self { rows, columns })
    }

    /// The checks `from_parts` runs, without taking ownership
    pub fn check_parts(rows: &[Row], columns: &[Column]) -> Result<(), StoreError> {
        let mut ids = HashSet::new();
        for row in rows {
            if row.id.is_empty() {
                return Err(StoreError::EmptyRowId);
            }
            if !ids.insert(row.id.as_str()) {
                return Err(StoreError::DuplicateRowId(row.id.clone()));
            }
        }

        let mut keys = HashSet::new();
        for col in columns {
            if !keys.insert(col.key.as_str()) {
                return Err(StoreError::DuplicateColumnKey(col.key.clone()));
            }
        }
        Ok(())
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns currently shown, in display order
    pub fn visible_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub(crate) fn row_mut(&mut self, id: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace every row. Columns are left as they are.
    pub fn replace_all(&mut self, rows: Vec<Row>) {
        tracing::debug!(old = self.rows.len(), new = rows.len(), "replacing all rows");
        self.rows = rows;
    }

    /// Add a user-defined column
    ///
    /// The key is normalized first. Blank keys, the reserved `id` key and
    /// keys that already exist are ignored. On success every row without a
    /// value for the key gets an empty string so rows stay rectangular.
    pub fn add_column(&mut self, raw_key: &str, label: Option<String>) -> bool {
        let key = normalize_key(raw_key);
        if key.is_empty() || key == ID_KEY {
            tracing::debug!(raw_key, "ignoring add_column with unusable key");
            return false;
        }
        if self.column(&key).is_some() {
            tracing::debug!(%key, "column already exists");
            return false;
        }

        for row in &mut self.rows {
            if !row.fields.contains_key(&key) {
                row.fields.insert(key.clone(), Value::text(""));
            }
        }
        self.columns.push(Column::new(key, label));
        true
    }

    /// Register columns for keys not yet known, verbatim and visible
    ///
    /// Used after an import so headers from the file show up in the table.
    /// Returns the number of columns added.
    pub fn register_columns<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> usize {
        let mut added = 0;
        for key in keys {
            if key.is_empty() || key == ID_KEY || self.column(key).is_some() {
                continue;
            }
            self.columns.push(Column::new(key, None));
            added += 1;
        }
        added
    }

    /// Flip a column's visibility. Returns false if the key is unknown.
    pub fn toggle_column_visibility(&mut self, key: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.key == key) {
            Some(col) => {
                col.visible = !col.visible;
                true
            }
            None => {
                tracing::debug!(key, "toggle on unknown column");
                false
            }
        }
    }

    /// Remove the row with `id`. Returns false if no such row exists.
    pub fn delete_row(&mut self, id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.id != id);
        let removed = self.rows.len() != before;
        if !removed {
            tracing::debug!(id, "delete of unknown row");
        }
        removed
    }

    /// Restore seed rows and default columns
    pub fn reset_to_seed(&mut self) {
        *self = Self::seeded();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_store() -> RecordStore {
        RecordStore::from_parts(
            vec![
                Row::new("a").with("name", "Ann"),
                Row::new("b").with("name", "Ben"),
            ],
            vec![Column::new("name", Some("Name".into()))],
        )
        .unwrap()
    }

    #[test]
    fn test_add_column_normalizes_and_backfills() {
        let mut store = small_store();
        assert!(store.add_column("  Full Name ", Some("Full name".into())));

        let col = store.column("full_name").unwrap();
        assert!(col.visible);
        assert_eq!(col.header(), "Full name");
        for row in store.rows() {
            assert_eq!(row.fields.get("full_name"), Some(&Value::text("")));
        }
    }

    #[test]
    fn test_add_column_duplicate_is_noop() {
        let mut store = small_store();
        assert!(store.add_column("dept", None));
        assert!(!store.add_column("DEPT", None));
        assert_eq!(store.columns().len(), 2);
    }

    #[test]
    fn test_add_column_keeps_existing_values() {
        let mut store = small_store();
        store.row_mut("a").unwrap().set("dept", Value::text("R&D"));
        store.add_column("dept", None);
        assert_eq!(store.row("a").unwrap().display("dept"), "R&D");
        assert_eq!(store.row("b").unwrap().display("dept"), "");
    }

    #[test]
    fn test_add_column_rejects_blank_and_id() {
        let mut store = small_store();
        assert!(!store.add_column("   ", None));
        assert!(!store.add_column(" ID ", None));
        assert_eq!(store.columns().len(), 1);
    }

    #[test]
    fn test_toggle_column_visibility() {
        let mut store = small_store();
        assert!(store.toggle_column_visibility("name"));
        assert!(!store.column("name").unwrap().visible);
        assert_eq!(store.visible_columns().count(), 0);
        assert!(store.toggle_column_visibility("name"));
        assert!(store.column("name").unwrap().visible);
        assert!(!store.toggle_column_visibility("missing"));
    }

    #[test]
    fn test_delete_row() {
        let mut store = small_store();
        assert!(store.delete_row("a"));
        assert!(!store.delete_row("a"));
        assert_eq!(store.len(), 1);
        assert!(store.row("a").is_none());
    }

    #[test]
    fn test_from_parts_rejects_duplicates() {
        let err = RecordStore::from_parts(vec![Row::new("x"), Row::new("x")], vec![]);
        assert_eq!(err, Err(StoreError::DuplicateRowId("x".into())));

        let err = RecordStore::from_parts(
            vec![],
            vec![Column::new("k", None), Column::new("k", None)],
        );
        assert_eq!(err, Err(StoreError::DuplicateColumnKey("k".into())));
    }

    #[test]
    fn test_check_parts_matches_from_parts() {
        let rows = vec![Row::new("a"), Row::new("")];
        assert_eq!(
            RecordStore::check_parts(&rows, &[]),
            Err(StoreError::EmptyRowId)
        );
        let columns = vec![Column::new("k", None), Column::new("j", None)];
        let rows = vec![Row::new("a"), Row::new("b")];
        assert_eq!(RecordStore::check_parts(&rows, &columns), Ok(()));
        let store = RecordStore::from_parts(rows.clone(), columns.clone()).unwrap();
        assert_eq!(store.rows(), &rows[..]);
        assert_eq!(store.columns(), &columns[..]);
    }

    #[test]
    fn test_register_columns_skips_known_and_id() {
        let mut store = small_store();
        let added = store.register_columns(["name", "id", "city", "city"]);
        assert_eq!(added, 1);
        let keys: Vec<_> = store.columns().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "city"]);
    }

    #[test]
    fn test_reset_to_seed() {
        let mut store = small_store();
        store.reset_to_seed();
        assert_eq!(store.len(), 11);
        assert_eq!(store.columns().len(), 4);
    }
}
