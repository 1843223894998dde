//! Rowdesk - Elm-style CRUD data table manager
//!
//! This crate provides the core types and logic for a small data table
//! (rows, columns, search/sort/paging, staged edits, CSV and snapshots)
//! implementing the Elm Architecture pattern.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod messages;
pub mod model;
pub mod persistence;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use commands::{Cmd, Notice};
pub use config::AppConfig;
pub use messages::Msg;
pub use model::TableModel;
pub use persistence::{FileStore, MemoryStore, PersistenceGateway};
pub use runtime::Runtime;
pub use view::TableView;
