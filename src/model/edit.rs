//! Edit session: the overlay of in-progress row drafts
//!
//! The overlay is kept apart from the record store. Drafts are full copies of
//! the committed row and only flow back into the store on `commit_all`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::row::{Row, Value};
use super::store::RecordStore;

/// Drafts keyed by row id. An entry means "this row is being edited".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditSession {
    drafts: BTreeMap<String, Row>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) editing a row with a fresh copy of its committed state
    ///
    /// Restarting discards unsaved changes to that row. Returns false if the
    /// store has no such row.
    pub fn begin(&mut self, store: &RecordStore, id: &str) -> bool {
        match store.row(id) {
            Some(row) => {
                self.drafts.insert(id.to_string(), row.clone());
                true
            }
            None => {
                tracing::debug!(id, "begin edit on unknown row");
                false
            }
        }
    }

    /// Change one field of a draft
    ///
    /// Does nothing if the row is not being edited, so a partial draft is
    /// never created. The reserved `id` field cannot be changed.
    pub fn set_field(&mut self, id: &str, key: &str, value: Value) -> bool {
        let Some(draft) = self.drafts.get_mut(id) else {
            tracing::debug!(id, key, "set_field on row that is not being edited");
            return false;
        };
        let changed = draft.set(key, value);
        if !changed {
            tracing::debug!(id, key, "refusing to edit reserved field");
        }
        changed
    }

    /// Write every draft back into the store and clear the overlay
    ///
    /// Drafts replace committed rows in place. Drafts whose row no longer
    /// exists are dropped. Returns the number of rows written.
    pub fn commit_all(&mut self, store: &mut RecordStore) -> usize {
        let mut written = 0;
        for (id, draft) in std::mem::take(&mut self.drafts) {
            match store.row_mut(&id) {
                Some(row) => {
                    *row = draft;
                    written += 1;
                }
                None => tracing::debug!(%id, "dropping draft for deleted row"),
            }
        }
        written
    }

    /// Drop every draft. Returns how many were discarded.
    pub fn discard_all(&mut self) -> usize {
        let count = self.drafts.len();
        self.drafts.clear();
        count
    }

    /// Drop the draft for one row, if any
    pub fn purge(&mut self, id: &str) -> bool {
        self.drafts.remove(id).is_some()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.drafts.contains_key(id)
    }

    pub fn draft(&self, id: &str) -> Option<&Row> {
        self.drafts.get(id)
    }

    /// Ids with an open draft, in id order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.drafts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
