//! Configuration file support for Gym Notes.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/gymnotes/config.toml`.

use crate::menus::FeatureMenus;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub menus: FeatureMenus,
}

/// Table storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("gymnotes")
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            path => {
                tracing::info!("No config file found at {:?}, using defaults", path);
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("gymnotes").join("config.toml"))
    }

    /// Reject configurations the prompts cannot work with
    pub fn validate(&self) -> Result<()> {
        let errors = self.menus.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Config(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.storage.data_dir.ends_with("gymnotes"));
        assert_eq!(config.menus, FeatureMenus::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.storage.data_dir, parsed.storage.data_dir);
        assert_eq!(config.menus, parsed.menus);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[storage]
data_dir = "/tmp/gym"

[menus]
exercises = ["Kettlebell Swing", "Squat"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/gym"));
        assert_eq!(config.menus.exercises, vec!["Kettlebell Swing", "Squat"]);
        assert_eq!(config.menus.periods, FeatureMenus::default().periods); // default
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[menus]\nreps = [\"3\", \"6\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.menus.reps, vec!["3", "6"]);
    }

    #[test]
    fn test_invalid_menus_rejected() {
        let toml_str = r#"
[menus]
rest_times = []
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        match config.validate() {
            Err(Error::Config(msg)) => assert!(msg.contains("rest_times")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[menus\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Toml(_))));
    }
}
