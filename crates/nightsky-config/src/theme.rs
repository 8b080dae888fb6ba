//! Persisted dark/light theme preference.

use color_eyre::eyre::Result;
use nightsky_core::Theme;

use crate::store::PreferenceStore;

/// Key the theme is stored under.
pub const THEME_KEY: &str = "theme-preference";

/// The current theme, backed by a preference store.
#[derive(Debug)]
pub struct ThemePreference<S> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemePreference<S> {
    /// Read the stored theme. Missing or unrecognized values mean dark.
    pub fn load(store: S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it.
    ///
    /// The in-session theme changes even when persisting fails.
    pub fn toggle(&mut self) -> Result<Theme> {
        self.theme = self.theme.toggle();
        self.store.set(THEME_KEY, self.theme.as_str())?;
        Ok(self.theme)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
