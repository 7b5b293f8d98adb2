//! Preference persistence
//!
//! Stores [`Preferences`] as a TOML file in the platform config directory.
//! Store failures are reported as errors for the caller to log; the widget
//! keeps working from in-memory state when the store is unavailable.

use directories::ProjectDirs;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::prefs::Preferences;

const PREFS_FILE: &str = "preferences.toml";

/// Error type for preference store operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to determine the config directory
    NoConfigDir,
    /// IO error while reading/writing the store
    Io(io::Error),
    /// Failed to parse the stored file
    Parse(toml::de::Error),
    /// Failed to serialize preferences
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Could not determine config directory"),
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        ConfigError::Serialize(e)
    }
}

/// Path of the preferences file
pub fn preferences_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "spindlo", "spindlo")
        .map(|dirs| dirs.config_dir().join(PREFS_FILE))
}

/// Load stored preferences
///
/// Returns `None` when nothing has been stored yet. Returns an error if the
/// file exists but cannot be read or parsed.
pub fn load_preferences() -> Result<Option<Preferences>, ConfigError> {
    let path = preferences_path().ok_or(ConfigError::NoConfigDir)?;

    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&path)?;
    let prefs: Preferences = toml::from_str(&contents)?;
    Ok(Some(prefs))
}

/// Persist preferences, creating the config directory as needed
pub fn save_preferences(prefs: &Preferences) -> Result<(), ConfigError> {
    let path = preferences_path().ok_or(ConfigError::NoConfigDir)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(prefs)?;
    fs::write(&path, contents)?;
    Ok(())
}

/// Remove stored preferences
pub fn delete_preferences() -> Result<(), ConfigError> {
    let path = preferences_path().ok_or(ConfigError::NoConfigDir)?;

    if path.exists() {
        fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::TimeFormat;

    #[test]
    fn test_preferences_path() {
        let path = preferences_path();
        assert!(path.is_some());
        assert!(path
            .unwrap()
            .to_string_lossy()
            .contains("preferences.toml"));
    }

    #[test]
    fn test_preferences_toml_round_trip() {
        let prefs = Preferences {
            cities: vec!["Asia/Tokyo".to_string(), "Europe/London".to_string()],
            time_format: TimeFormat::TwelveHour,
        };
        let contents = toml::to_string_pretty(&prefs).unwrap();
        let parsed: Preferences = toml::from_str(&contents).unwrap();
        assert_eq!(parsed, prefs);
    }
}
