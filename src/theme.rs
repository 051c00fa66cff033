//! Theme preference, persisted across runs.
//!
//! The client remembers whether the user last picked the light or dark
//! theme, under the single key `theme`. Storage is a small JSON file in the
//! platform config directory:
//!
//! - Linux: `~/.config/pdfsplit/preferences.json`
//! - macOS: `~/Library/Application Support/pdfsplit/preferences.json`
//! - Windows: `%APPDATA%\pdfsplit\preferences.json`
//!
//! Loading is forgiving: a missing or corrupt file falls back to the
//! default (dark) with a warning in the logs, never an error. Saving
//! propagates failures, since losing a just-made choice is worth telling
//! the user about.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SplitClientError;

/// The two display themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    /// Default for first runs and unreadable preference files.
    #[default]
    Dark,
}

impl ThemeMode {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeMode::Light => write!(f, "light"),
            ThemeMode::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme '{other}' (expected 'light' or 'dark')")),
        }
    }
}

/// On-disk shape: `{"theme": "dark"}`.
#[derive(Serialize, Deserialize)]
struct PreferencesFile {
    theme: ThemeMode,
}

/// The persisted theme preference and where it lives.
#[derive(Debug, Clone)]
pub struct ThemePreferences {
    mode: ThemeMode,
    storage_path: PathBuf,
}

impl ThemePreferences {
    /// Load from the platform config directory, falling back to the default
    /// theme if the file is missing or unreadable.
    pub fn load() -> Self {
        Self::load_from(Self::default_storage_path())
    }

    /// Load from a custom path (useful in tests).
    pub fn load_from(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();
        let mode = Self::read_mode(&storage_path).unwrap_or_else(|reason| {
            tracing::warn!(path = %storage_path.display(), %reason, "theme preference unreadable, using default");
            ThemeMode::default()
        });
        Self { mode, storage_path }
    }

    fn default_storage_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("pdfsplit").join("preferences.json")
        } else {
            PathBuf::from("pdfsplit-preferences.json")
        }
    }

    fn read_mode(path: &Path) -> Result<ThemeMode, String> {
        if !path.exists() {
            return Ok(ThemeMode::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let file: PreferencesFile = serde_json::from_str(&contents).map_err(|e| e.to_string())?;
        Ok(file.theme)
    }

    /// The current theme.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Set and persist the theme.
    pub fn set_mode(&mut self, mode: ThemeMode) -> Result<(), SplitClientError> {
        self.mode = mode;
        self.save()
    }

    /// Flip between light and dark, persist, and return the new theme.
    pub fn toggle(&mut self) -> Result<ThemeMode, SplitClientError> {
        self.set_mode(self.mode.toggled())?;
        Ok(self.mode)
    }

    fn save(&self) -> Result<(), SplitClientError> {
        if let Some(parent) = self.storage_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SplitClientError::Preferences {
                path: self.storage_path.clone(),
                action: "written",
                reason: e.to_string(),
            })?;
        }
        let file = PreferencesFile { theme: self.mode };
        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            SplitClientError::Preferences {
                path: self.storage_path.clone(),
                action: "written",
                reason: e.to_string(),
            }
        })?;
        fs::write(&self.storage_path, json).map_err(|e| SplitClientError::Preferences {
            path: self.storage_path.clone(),
            action: "written",
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_theme_is_dark() {
        assert_eq!(ThemeMode::default(), ThemeMode::Dark);
    }

    #[test]
    fn parse_and_display_round() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("solarized".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::Light.to_string(), "light");
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();
        let prefs = ThemePreferences::load_from(dir.path().join("nope.json"));
        assert_eq!(prefs.mode(), ThemeMode::Dark);
    }

    #[test]
    fn corrupt_file_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{not json").unwrap();

        let prefs = ThemePreferences::load_from(&path);
        assert_eq!(prefs.mode(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_persists_across_loads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let mut prefs = ThemePreferences::load_from(&path);
        assert_eq!(prefs.toggle().unwrap(), ThemeMode::Light);

        let reloaded = ThemePreferences::load_from(&path);
        assert_eq!(reloaded.mode(), ThemeMode::Light);

        let mut prefs = reloaded;
        assert_eq!(prefs.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(
            ThemePreferences::load_from(&path).mode(),
            ThemeMode::Dark
        );
    }

    #[test]
    fn stored_file_uses_the_theme_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let mut prefs = ThemePreferences::load_from(&path);
        prefs.set_mode(ThemeMode::Light).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["theme"], "light");
    }
}
