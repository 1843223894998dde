//! Application configuration persistence
//!
//! Stores user preferences in `~/.config/rowdesk/config.yaml`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::DEFAULT_PAGE_SIZE;

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rows per page on first run and after "reset"
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Page sizes offered by the pager
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,

    /// Register CSV headers that have no column yet as visible columns
    #[serde(default = "default_true")]
    pub sync_columns_on_import: bool,

    /// Where snapshots are stored (defaults to `~/.config/rowdesk/data`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Suggested file name for exports
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 25, 50]
}

fn default_true() -> bool {
    true
}

fn default_export_file_name() -> String {
    "table_export.csv".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            sync_columns_on_import: true,
            data_dir: None,
            export_file_name: default_export_file_name(),
        }
    }
}

impl AppConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<AppConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to `path`
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Check `size` against the pager's choices
    ///
    /// The configured default page size is always accepted.
    pub fn check_page_size(&self, size: usize) -> Result<(), String> {
        if size == self.default_page_size || self.page_size_options.contains(&size) {
            return Ok(());
        }
        let choices: Vec<String> = self
            .page_size_options
            .iter()
            .map(|n| n.to_string())
            .collect();
        Err(format!(
            "Page size {} is not one of {}",
            size,
            choices.join(", ")
        ))
    }

    /// Replace nonsensical values with defaults
    fn sanitized(mut self) -> Self {
        if self.default_page_size == 0 {
            tracing::warn!("default_page_size must be positive, using {}", DEFAULT_PAGE_SIZE);
            self.default_page_size = DEFAULT_PAGE_SIZE;
        }
        self.page_size_options.retain(|&n| n > 0);
        if self.page_size_options.is_empty() {
            self.page_size_options = default_page_size_options();
        }
        self
    }
}
