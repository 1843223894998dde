//! Command-line argument parsing
//!
//! Each subcommand maps to one or more messages dispatched against the
//! persisted table, so a sequence of invocations behaves like a session.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::messages::{AppMsg, EditMsg, Msg, QueryMsg, TableMsg};
use crate::model::Value;

/// A small CRUD data table manager
#[derive(Parser, Debug)]
#[command(name = "rowdesk", version, about = "A small CRUD data table manager")]
pub struct CliArgs {
    /// Directory holding the table snapshot (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/rowdesk/config.yaml
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the current page (default)
    Show {
        /// Temporarily search for this text
        #[arg(long)]
        search: Option<String>,
        /// Temporarily show this page (1-indexed)
        #[arg(long)]
        page: Option<usize>,
        /// Temporarily use this page size
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Replace all rows with the contents of a CSV file
    Import { file: PathBuf },
    /// Write all rows (visible columns only) to a CSV file
    Export { file: Option<PathBuf> },
    /// Restore the sample data and default settings
    Reset,
    /// Add a column; the key is trimmed, lowercased and underscored
    AddColumn {
        key: String,
        #[arg(long)]
        label: Option<String>,
    },
    /// Show or hide a column
    ToggleColumn { key: String },
    /// List columns and their visibility
    Columns,
    /// Set the search text (empty string clears it)
    Search { text: String },
    /// Cycle sorting on a column: ascending → descending → none
    Sort { key: String },
    /// Go to a page (1-indexed)
    Page { page: usize },
    /// Set rows per page
    PageSize { size: usize },
    /// Start editing a row and set fields (key=value), left pending until commit
    Edit {
        id: String,
        #[arg(value_name = "KEY=VALUE")]
        assignments: Vec<String>,
    },
    /// Write all pending edits into the table
    Commit,
    /// Drop all pending edits
    Discard,
    /// List rows with pending edits
    Status,
    /// Delete a row (asks for --yes)
    Delete {
        id: String,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Show {
            search: None,
            page: None,
            page_size: None,
        }
    }
}

/// Split `key=value` into its parts
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("Expected KEY=VALUE, got {:?}", raw)),
    }
}

impl Command {
    /// Reject arguments the config does not allow
    pub fn validate(&self, config: &AppConfig) -> Result<(), String> {
        match self {
            Command::PageSize { size }
            | Command::Show {
                page_size: Some(size),
                ..
            } => config.check_page_size(*size),
            _ => Ok(()),
        }
    }

    /// Messages to dispatch for this command
    ///
    /// `Show`, `Columns` and `Status` are read-only and produce none;
    /// `Export` needs the resolved output path and is handled by the caller.
    pub fn into_messages(self) -> Result<Vec<Msg>, String> {
        let msgs = match self {
            Command::Show { .. } | Command::Columns | Command::Status | Command::Export { .. } => {
                vec![]
            }
            Command::Import { file } => vec![Msg::App(AppMsg::ImportFile(file))],
            Command::Reset => vec![Msg::Table(TableMsg::ResetToSeed)],
            Command::AddColumn { key, label } => vec![Msg::add_column(key, label)],
            Command::ToggleColumn { key } => vec![Msg::Table(TableMsg::ToggleColumn(key))],
            Command::Search { text } => vec![Msg::search(text)],
            Command::Sort { key } => vec![Msg::Query(QueryMsg::CycleSort(key))],
            Command::Page { page } => vec![Msg::page(page.saturating_sub(1))],
            Command::PageSize { size } => {
                if size == 0 {
                    return Err("Page size must be at least 1".to_string());
                }
                vec![Msg::page_size(size)]
            }
            Command::Edit { id, assignments } => {
                let mut msgs = vec![Msg::begin_edit(id.clone())];
                for raw in &assignments {
                    let (key, value) = parse_assignment(raw)?;
                    msgs.push(Msg::set_field(id.clone(), key, Value::Text(value)));
                }
                msgs
            }
            Command::Commit => vec![Msg::Edit(EditMsg::CommitAll)],
            Command::Discard => vec![Msg::Edit(EditMsg::DiscardAll)],
            Command::Delete { id, yes } => {
                let mut msgs = vec![Msg::Table(TableMsg::RequestDelete(id))];
                if yes {
                    msgs.push(Msg::Table(TableMsg::ConfirmDelete));
                }
                msgs
            }
        };
        Ok(msgs)
    }
}
