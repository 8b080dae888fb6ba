//! Configuration and persisted preferences for the nightsky page.

mod config;
mod paths;
mod store;
mod theme;

pub use config::{Config, Profile, Section};
pub use paths::{config_file, log_file, preferences_file};
pub use store::{FileStore, MemoryStore, PreferenceStore};
pub use theme::{THEME_KEY, ThemePreference};
