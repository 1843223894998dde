//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::fmt;
use std::path::PathBuf;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user, produced by explicit actions like import/export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => f.write_str(&self.text),
            NoticeLevel::Error => write!(f, "Error: {}", self.text),
        }
    }
}

/// Commands returned by update functions
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Snapshot the current state to durable storage
    Persist,
    /// Read a file and report back with `AppMsg::FileLoaded`
    LoadFile { path: PathBuf },
    /// Write a file and report back with `AppMsg::ExportCompleted`
    SaveFile { path: PathBuf, content: String },
    /// Show a notice to the user
    Notify(Notice),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Cmd::Notify(Notice::info(text))
    }

    pub fn error(text: impl Into<String>) -> Self {
        Cmd::Notify(Notice::error(text))
    }

    /// Check if this command (or any command in a batch) persists state
    pub fn persists(&self) -> bool {
        match self {
            Cmd::Persist => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.persists()),
            _ => false,
        }
    }

    /// Notices carried by this command, in order
    pub fn notices(&self) -> Vec<&Notice> {
        match self {
            Cmd::Notify(notice) => vec![notice],
            Cmd::Batch(cmds) => cmds.iter().flat_map(|c| c.notices()).collect(),
            _ => Vec::new(),
        }
    }
}
