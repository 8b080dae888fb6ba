//! The `config.toml` file.

use std::path::Path;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// Page owner details shown in the header and used by the copy button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    /// Address copied by the copy button. Empty disables copying.
    pub email: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Ada Example".to_string(),
            tagline: "Systems programmer. Occasional stargazer.".to_string(),
            email: "ada@example.com".to_string(),
        }
    }
}

/// One content section of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

impl Section {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

fn default_sections() -> Vec<Section> {
    vec![
        Section::new(
            "About",
            "I build small, fast tools and write about how they work. \
             This page is a terminal rendition of my personal site.",
        ),
        Section::new(
            "Projects",
            "nightsky - an animated terminal homepage.\n\
             tinydb - an embedded key-value store.\n\
             lexi - a lexer generator with good error messages.",
        ),
        Section::new(
            "Writing",
            "Notes on parsers, caches and the occasional deep dive into \
             frame scheduling.",
        ),
        Section::new(
            "Contact",
            "Press y to copy my email address. I read everything, \
             eventually.",
        ),
    ]
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Disable the animated background and reveal effects.
    pub reduced_motion: bool,
    /// Device pixel ratio for the background surface. Capped at 2.
    pub pixel_density: Option<f64>,
    /// Background frame rate.
    pub fps: u32,
    pub profile: Profile,
    pub sections: Vec<Section>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            pixel_density: None,
            fps: 60,
            profile: Profile::default(),
            sections: default_sections(),
        }
    }
}

impl Config {
    pub const MIN_FPS: u32 = 1;
    pub const MAX_FPS: u32 = 240;

    /// Load from the platform config file, or defaults if there is none.
    pub fn load() -> Result<Self> {
        match crate::paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .wrap_err_with(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Time between background frames.
    pub fn frame_interval(&self) -> Duration {
        let fps = self.fps.clamp(Self::MIN_FPS, Self::MAX_FPS);
        Duration::from_secs_f64(1.0 / fps as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
reduced_motion = true
fps = 30

[profile]
email = "me@example.org"
"#,
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert!(config.reduced_motion);
        assert_eq!(config.fps, 30);
        assert_eq!(config.profile.email, "me@example.org");
        assert_eq!(config.profile.name, Profile::default().name);
        assert_eq!(config.sections.len(), 4);
        assert_eq!(config.pixel_density, None);
    }

    #[test]
    fn test_sections_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[sections]]
title = "Now"
body = "Reading."
"#,
        )
        .unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sections, vec![Section::new("Now", "Reading.")]);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "fps = \"fast\"").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("failed to parse config"));
    }

    #[test]
    fn test_frame_interval_clamped() {
        let mut config = Config::default();
        assert_eq!(config.frame_interval(), Duration::from_secs_f64(1.0 / 60.0));
        config.fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_secs(1));
        config.fps = 10_000;
        assert_eq!(config.frame_interval(), Duration::from_secs_f64(1.0 / 240.0));
    }
}
