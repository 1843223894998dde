//! Application model - the complete state of the table
//!
//! This module contains all the state types following the Elm Architecture pattern.
//!
//! ```text
//! TableModel
//! ├── RecordStore   (committed rows + columns)
//! ├── QueryParams   (search, sort, page, page size)
//! └── EditSession   (drafts keyed by row id)
//! ```

pub mod edit;
pub mod query;
pub mod row;
pub mod seed;
pub mod store;

pub use edit::EditSession;
pub use query::{QueryParams, SortOrder, SortSpec};
pub use row::{normalize_key, Column, Row, Value, ID_KEY};
pub use seed::{default_columns, seed_rows, DEFAULT_PAGE_SIZE};
pub use store::{RecordStore, StoreError};

use crate::config::AppConfig;
use crate::view::{view, TableView};

/// The complete application model
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
    /// Committed rows and column definitions
    pub store: RecordStore,
    /// Search / sort / pagination state
    pub query: QueryParams,
    /// In-progress row drafts
    pub edits: EditSession,
    /// Row awaiting delete confirmation
    pub pending_delete: Option<String>,
    /// Page size restored by "reset"
    pub default_page_size: usize,
    /// Register unknown CSV headers as columns after an import
    pub sync_columns_on_import: bool,
}

impl Default for TableModel {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl TableModel {
    /// Seeded model with the given default page size
    pub fn new(default_page_size: usize) -> Self {
        let query = QueryParams::with_page_size(default_page_size);
        Self {
            store: RecordStore::seeded(),
            default_page_size: query.page_size,
            query,
            edits: EditSession::new(),
            pending_delete: None,
            sync_columns_on_import: true,
        }
    }

    /// Seeded model configured from user settings
    pub fn from_config(config: &AppConfig) -> Self {
        let mut model = Self::new(config.default_page_size);
        model.sync_columns_on_import = config.sync_columns_on_import;
        model
    }

    /// Compute the currently visible page
    pub fn view(&self) -> TableView {
        view(self.store.rows(), &self.query)
    }

    /// Restore seed data and initial query state, dropping all drafts
    pub fn reset_to_seed(&mut self) {
        self.store.reset_to_seed();
        self.query = QueryParams::with_page_size(self.default_page_size);
        self.edits.discard_all();
        self.pending_delete = None;
    }

    /// Short description of the state, used for logging state transitions
    pub fn summary(&self) -> StateSummary {
        StateSummary {
            rows: self.store.len(),
            columns: self.store.columns().len(),
            drafts: self.edits.len(),
            page: self.query.page,
            page_size: self.query.page_size,
            search: self.query.search_text.clone(),
            sort: self.query.sort.clone(),
        }
    }
}

/// Lightweight snapshot of model counters for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSummary {
    pub rows: usize,
    pub columns: usize,
    pub drafts: usize,
    pub page: usize,
    pub page_size: usize,
    pub search: String,
    pub sort: SortSpec,
}

impl StateSummary {
    /// Describe what changed between two summaries
    pub fn diff(&self, other: &StateSummary) -> Option<String> {
        let mut changes = Vec::new();
        if self.rows != other.rows {
            changes.push(format!("rows: {} → {}", self.rows, other.rows));
        }
        if self.columns != other.columns {
            changes.push(format!("columns: {} → {}", self.columns, other.columns));
        }
        if self.drafts != other.drafts {
            changes.push(format!("drafts: {} → {}", self.drafts, other.drafts));
        }
        if self.page != other.page || self.page_size != other.page_size {
            changes.push(format!(
                "page: {}/{} → {}/{}",
                self.page, self.page_size, other.page, other.page_size
            ));
        }
        if self.search != other.search {
            changes.push(format!("search: {:?} → {:?}", self.search, other.search));
        }
        if self.sort != other.sort {
            changes.push(format!(
                "sort: {}:{:?} → {}:{:?}",
                self.sort.key, self.sort.order, other.sort.key, other.sort.order
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
