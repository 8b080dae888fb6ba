//! Platform locations for config, preferences and logs.

use std::path::PathBuf;

use directories::ProjectDirs;

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "nightsky")
}

/// `config.toml` in the platform config directory.
pub fn config_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.config_dir().join("config.toml"))
}

/// `preferences.toml` in the platform data directory.
pub fn preferences_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.data_dir().join("preferences.toml"))
}

/// `nightsky.log` in the platform cache directory.
pub fn log_file() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().join("nightsky.log"))
}
