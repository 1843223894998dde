//! Where rowdesk keeps its files
//!
//! Everything lives under one directory:
//! - Unix/macOS: `$XDG_CONFIG_HOME/rowdesk/` or `~/.config/rowdesk/`
//! - Windows: `%APPDATA%\rowdesk\`
//!
//! with `config.yaml`, the snapshot store in `data/` and logs in `logs/`.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "rowdesk";
const CONFIG_FILE: &str = "config.yaml";
const DATA_SUBDIR: &str = "data";
const LOGS_SUBDIR: &str = "logs";

/// Base directory for config, data and logs
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    let base = env::var_os("APPDATA").map(PathBuf::from);

    #[cfg(not(target_os = "windows"))]
    let base = env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

    base.map(|base| base.join(APP_DIR))
}

fn in_config_dir(name: &str) -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(name))
}

pub fn config_file() -> Option<PathBuf> {
    in_config_dir(CONFIG_FILE)
}

/// Default snapshot directory
pub fn data_dir() -> Option<PathBuf> {
    in_config_dir(DATA_SUBDIR)
}

/// Directory for the rotating log file
pub fn logs_dir() -> Option<PathBuf> {
    in_config_dir(LOGS_SUBDIR)
}

/// Create `dir` and its parents; `None` means there is no home to put it in
fn create(dir: Option<PathBuf>) -> Result<PathBuf, String> {
    let dir = dir.ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

/// Create the logs dir, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    create(logs_dir())
}

/// Create the data dir, returning it
///
/// `override_dir` wins over the default location under the config dir.
pub fn ensure_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, String> {
    create(override_dir.map(Path::to_path_buf).or_else(data_dir))
}
