use crate::config::setup;
use crate::error::{AppError, AppResult};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Storage key of the dark-mode preference.
pub const DARK_MODE_KEY: &str = "theme-dark-mode";

/// Persistence for the user's explicit dark-mode choice.
///
/// `Ok(None)` means no choice has been stored yet and the controller should
/// follow the environment signal.
pub trait PreferenceStore: Send + Sync {
    fn load_dark_mode(&self) -> AppResult<Option<bool>>;

    fn save_dark_mode(&self, dark: bool) -> AppResult<()>;
}

/// Process-local preference store.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    value: Mutex<Option<bool>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(dark: bool) -> Self {
        Self {
            value: Mutex::new(Some(dark)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load_dark_mode(&self) -> AppResult<Option<bool>> {
        let value = self
            .value
            .lock()
            .map_err(|e| AppError::Preference(format!("Preference lock poisoned: {e}")))?;
        Ok(*value)
    }

    fn save_dark_mode(&self, dark: bool) -> AppResult<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|e| AppError::Preference(format!("Preference lock poisoned: {e}")))?;
        *value = Some(dark);
        Ok(())
    }
}

/// Preferences kept as a JSON object on disk.
///
/// Other keys in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/schoolhub/preferences.json`.
    pub fn default_location() -> AppResult<Self> {
        setup::get_preference_file_path()
            .map(Self::new)
            .map_err(|e| AppError::Preference(e.to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> AppResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Preference(format!(
                "Failed to read preferences from {}: {e}",
                self.path.display()
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(AppError::Preference(format!(
                "Preference file {} is not a JSON object",
                self.path.display()
            ))),
            Err(e) => Err(AppError::Preference(format!(
                "Failed to parse preferences from {}: {e}",
                self.path.display()
            ))),
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load_dark_mode(&self) -> AppResult<Option<bool>> {
        let map = self.read_map()?;
        Ok(map.get(DARK_MODE_KEY).and_then(Value::as_bool))
    }

    fn save_dark_mode(&self, dark: bool) -> AppResult<()> {
        let mut map = self.read_map()?;
        map.insert(DARK_MODE_KEY.to_string(), Value::Bool(dark));

        if let Some(parent) = self.path.parent() {
            setup::create_dir_if_not_exists(parent)
                .map_err(|e| AppError::Preference(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| AppError::Preference(format!("Failed to serialize preferences: {e}")))?;
        fs::write(&self.path, content).map_err(|e| {
            AppError::Preference(format!(
                "Failed to write preferences to {}: {e}",
                self.path.display()
            ))
        })?;

        log::debug!("Saved dark mode preference ({dark}) to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_matches, assert_none, assert_ok, assert_some_eq};

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryPreferenceStore::new();
        assert_none!(assert_ok!(store.load_dark_mode()));

        assert_ok!(store.save_dark_mode(true));
        assert_some_eq!(assert_ok!(store.load_dark_mode()), true);
    }

    #[test]
    fn file_store_creates_parent_and_keeps_other_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("preferences.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"language":"pl"}"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_none!(assert_ok!(store.load_dark_mode()));
        assert_ok!(store.save_dark_mode(false));

        let reopened = FilePreferenceStore::new(&path);
        assert_some_eq!(assert_ok!(reopened.load_dark_mode()), false);

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["language"], "pl");
        assert_eq!(raw[DARK_MODE_KEY], false);
    }

    #[test]
    fn missing_directory_is_created_on_save() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("a").join("b").join("preferences.json");

        let store = FilePreferenceStore::new(&path);
        assert_ok!(store.save_dark_mode(true));
        assert!(path.is_file());
    }

    #[test]
    fn corrupt_file_is_a_preference_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("preferences.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_matches!(store.load_dark_mode(), Err(AppError::Preference(_)));
    }
}
