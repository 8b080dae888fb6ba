//! Core types shared by the nightsky crates.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Page color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The string stored in the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Flip between dark and light.
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Page background. Background animation colors are blended over this.
    pub fn background(self) -> Color {
        let (r, g, b) = self.background_rgb();
        Color::Rgb(r, g, b)
    }

    /// Page background as raw components.
    pub fn background_rgb(self) -> (u8, u8, u8) {
        match self {
            Theme::Dark => (11, 13, 23),
            Theme::Light => (246, 247, 251),
        }
    }

    /// Body text color.
    pub fn foreground(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(226, 232, 240),
            Theme::Light => Color::Rgb(30, 41, 59),
        }
    }

    /// Accent color for headings and key hints.
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(106, 168, 255),
            Theme::Light => Color::Rgb(111, 66, 193),
        }
    }

    /// Secondary text color.
    pub fn muted(self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(120, 130, 150),
            Theme::Light => Color::Rgb(100, 110, 125),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored theme string is neither "dark" nor "light".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTheme(pub String);

impl fmt::Display for UnknownTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme: {:?}", self.0)
    }
}

impl std::error::Error for UnknownTheme {}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// Logical viewport size in CSS-style pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }
}

/// Page visibility as reported by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Visible,
    Hidden,
}
