//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::model::{SortSpec, Value};

/// Record store messages (rows and columns)
#[derive(Debug, Clone, PartialEq)]
pub enum TableMsg {
    /// Replace all rows with the contents of CSV text
    ImportCsv(String),
    /// Add a user-defined column (key is normalized)
    AddColumn { key: String, label: Option<String> },
    /// Show/hide a column
    ToggleColumn(String),
    /// Ask to delete a row; nothing happens until confirmed
    RequestDelete(String),
    /// Delete the row awaiting confirmation
    ConfirmDelete,
    /// Forget the row awaiting confirmation
    CancelDelete,
    /// Delete a row without the confirmation gate
    DeleteRow(String),
    /// Restore seed rows, default columns and initial query state
    ResetToSeed,
}

/// Query messages (search, sort, pagination)
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMsg {
    /// Set the global search text (returns to the first page)
    SetSearch(String),
    /// Set the sort spec directly
    SetSort(SortSpec),
    /// Header click: asc → desc → none → asc on the same column
    CycleSort(String),
    /// Jump to a page (0-indexed)
    SetPage(usize),
    /// Change rows per page (returns to the first page)
    SetPageSize(usize),
}

/// Edit session messages
#[derive(Debug, Clone, PartialEq)]
pub enum EditMsg {
    /// Start editing a row (or restart with a fresh copy)
    Begin(String),
    /// Change a field of a row being edited
    SetField {
        id: String,
        key: String,
        value: Value,
    },
    /// Write all drafts back into the store
    CommitAll,
    /// Drop all drafts
    DiscardAll,
}

/// Application-level messages (file operations)
#[derive(Debug, Clone, PartialEq)]
pub enum AppMsg {
    /// Import a CSV file
    ImportFile(PathBuf),
    /// File load completed
    FileLoaded {
        path: PathBuf,
        result: Result<String, String>,
    },
    /// Export the full table to a CSV file
    ExportFile(PathBuf),
    /// File save completed
    ExportCompleted {
        path: PathBuf,
        result: Result<(), String>,
    },
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Record store messages
    Table(TableMsg),
    /// Search / sort / paging messages
    Query(QueryMsg),
    /// Edit session messages
    Edit(EditMsg),
    /// App messages (file I/O)
    App(AppMsg),
}

// Convenience constructors for common messages
impl Msg {
    pub fn search(text: impl Into<String>) -> Self {
        Msg::Query(QueryMsg::SetSearch(text.into()))
    }

    pub fn sort(spec: SortSpec) -> Self {
        Msg::Query(QueryMsg::SetSort(spec))
    }

    pub fn page(page: usize) -> Self {
        Msg::Query(QueryMsg::SetPage(page))
    }

    pub fn page_size(size: usize) -> Self {
        Msg::Query(QueryMsg::SetPageSize(size))
    }

    pub fn add_column(key: impl Into<String>, label: Option<String>) -> Self {
        Msg::Table(TableMsg::AddColumn {
            key: key.into(),
            label,
        })
    }

    pub fn delete_row(id: impl Into<String>) -> Self {
        Msg::Table(TableMsg::DeleteRow(id.into()))
    }

    pub fn begin_edit(id: impl Into<String>) -> Self {
        Msg::Edit(EditMsg::Begin(id.into()))
    }

    pub fn set_field(
        id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        Msg::Edit(EditMsg::SetField {
            id: id.into(),
            key: key.into(),
            value: value.into(),
        })
    }
}
