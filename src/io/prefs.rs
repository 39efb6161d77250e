//! Durable key-value preference store.
//!
//! A single small JSON file holds client-side preferences. The only key
//! today is `darkMode` with the string values `"true"`/`"false"`; every
//! mutation is written back immediately so the preference survives restarts.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::domain::AppSettings;
use crate::error::AppError;

pub const DARK_MODE_KEY: &str = "darkMode";

const DEFAULT_PREFS_FILE: &str = "linqa-prefs.json";

#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl Preferences {
    /// Load the store, treating a missing file as empty.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path = path.into();
        let values = if path.exists() {
            let file = File::open(&path).map_err(|e| {
                AppError::new(2, format!("Failed to open preferences '{}': {e}", path.display()))
            })?;
            serde_json::from_reader(file).map_err(|e| {
                AppError::new(2, format!("Invalid preferences file '{}': {e}", path.display()))
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Store path from `LINQA_PREFS`, falling back to `linqa-prefs.json`.
    pub fn default_path() -> PathBuf {
        dotenvy::dotenv().ok();
        std::env::var("LINQA_PREFS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PREFS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a key and persist immediately.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), AppError> {
        self.values.insert(key.to_string(), value.into());
        self.save()
    }

    fn save(&self) -> Result<(), AppError> {
        let file = File::create(&self.path).map_err(|e| {
            AppError::new(2, format!("Failed to write preferences '{}': {e}", self.path.display()))
        })?;
        serde_json::to_writer_pretty(file, &self.values).map_err(|e| {
            AppError::new(2, format!("Failed to write preferences '{}': {e}", self.path.display()))
        })
    }
}

/// Read the stored theme into settings.
///
/// First load with no stored preference activates dark mode and initializes
/// the store to `"true"` right away.
pub fn load_settings(prefs: &mut Preferences) -> Result<AppSettings, AppError> {
    let dark_mode = match prefs.get(DARK_MODE_KEY) {
        Some(value) => value == "true",
        None => {
            prefs.set(DARK_MODE_KEY, "true")?;
            true
        }
    };
    Ok(AppSettings { dark_mode })
}

/// Persist a theme change.
pub fn store_dark_mode(prefs: &mut Preferences, dark_mode: bool) -> Result<(), AppError> {
    prefs.set(DARK_MODE_KEY, if dark_mode { "true" } else { "false" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("linqa-prefs-{tag}-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn first_load_defaults_to_dark_and_initializes_the_store() {
        let path = temp_store("first-load");
        let mut prefs = Preferences::load(&path).unwrap();

        let settings = load_settings(&mut prefs).unwrap();
        assert!(settings.dark_mode);

        // The store must already hold "true" on disk.
        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.get(DARK_MODE_KEY), Some("true"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn double_toggle_restores_the_persisted_value() {
        let path = temp_store("double-toggle");
        let mut prefs = Preferences::load(&path).unwrap();
        let settings = load_settings(&mut prefs).unwrap();

        store_dark_mode(&mut prefs, !settings.dark_mode).unwrap();
        assert_eq!(prefs.get(DARK_MODE_KEY), Some("false"));

        store_dark_mode(&mut prefs, settings.dark_mode).unwrap();
        assert_eq!(prefs.get(DARK_MODE_KEY), Some("true"));

        let reloaded = Preferences::load(&path).unwrap();
        assert_eq!(reloaded.get(DARK_MODE_KEY), Some("true"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn stored_light_preference_is_respected() {
        let path = temp_store("light");
        let mut prefs = Preferences::load(&path).unwrap();
        prefs.set(DARK_MODE_KEY, "false").unwrap();

        let mut reloaded = Preferences::load(&path).unwrap();
        let settings = load_settings(&mut reloaded).unwrap();
        assert!(!settings.dark_mode);

        let _ = std::fs::remove_file(&path);
    }
}
