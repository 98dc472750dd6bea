use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "schoolhub.toml";
pub const PREFERENCE_FILE_NAME: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Failed to determine config directory: {0}")]
    ConfigDir(String),
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The configuration directory for the current platform
pub fn get_config_dir() -> Result<PathBuf, SetupError> {
    // Prefer ~/.config/schoolhub on Unix-like systems
    if cfg!(unix) {
        if let Some(mut home_path) = dirs::home_dir() {
            home_path.push(".config");
            home_path.push("schoolhub");
            return Ok(home_path);
        }
    }

    dirs::config_dir()
        .map(|mut path| {
            path.push("schoolhub");
            path
        })
        .ok_or_else(|| SetupError::ConfigDir("Unable to determine config directory".to_string()))
}

pub fn get_config_file_path() -> Result<PathBuf, SetupError> {
    Ok(get_config_dir()?.join(CONFIG_FILE_NAME))
}

/// Default location of the stored dark-mode preference
pub fn get_preference_file_path() -> Result<PathBuf, SetupError> {
    Ok(get_config_dir()?.join(PREFERENCE_FILE_NAME))
}

pub fn create_dir_if_not_exists(path: &Path) -> Result<(), SetupError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|source| SetupError::CreateDir {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Find the config file: `./schoolhub.toml` first, then the config directory.
pub fn find_config_file() -> Option<PathBuf> {
    let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
    if current_dir_config.exists() {
        return Some(current_dir_config);
    }

    match get_config_file_path() {
        Ok(standard_config) if standard_config.exists() => Some(standard_config),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_live_under_schoolhub_dir() {
        let config_dir = get_config_dir().unwrap();
        assert!(config_dir.to_string_lossy().contains("schoolhub"));

        let preference = get_preference_file_path().unwrap();
        assert!(preference.starts_with(&config_dir));
        assert!(preference.ends_with(PREFERENCE_FILE_NAME));
    }

    #[test]
    fn nested_directories_are_created() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");

        create_dir_if_not_exists(&nested).unwrap();
        create_dir_if_not_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
