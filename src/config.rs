//! Configuration management for the parking core.
//!
//! Settings live in `config.json` inside the config directory. A missing or
//! unreadable file falls back to defaults, and the defaults are written out on
//! first run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ParkingError, ParkingResult};

const CONFIG_FILE: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "parking.json";

/// Persisted settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigData {
    /// Path of the registry snapshot
    #[serde(default)]
    pub data_file: String,
    /// Save the snapshot after every mutation
    #[serde(default)]
    pub autosave: bool,
}

impl ConfigData {
    fn defaults_for(config_dir: &Path) -> Self {
        Self {
            data_file: config_dir
                .join(DEFAULT_DATA_FILE)
                .to_string_lossy()
                .to_string(),
            autosave: false,
        }
    }
}

/// Configuration manager
#[derive(Debug, Clone)]
pub struct Config {
    config_dir: PathBuf,
    config_file: PathBuf,
    data: ConfigData,
}

impl Config {
    /// Create a new configuration manager
    ///
    /// Without the `desktop` feature, `config_dir` is required.
    pub fn new(config_dir: Option<PathBuf>) -> ParkingResult<Self> {
        let config_dir = match config_dir {
            Some(dir) => dir,
            None => {
                #[cfg(feature = "desktop")]
                {
                    dirs::config_dir()
                        .unwrap_or_else(|| PathBuf::from("."))
                        .join("parkcore")
                }
                #[cfg(not(feature = "desktop"))]
                {
                    return Err(ParkingError::Config(
                        "config_dir is required without the desktop feature".to_string(),
                    ));
                }
            }
        };

        fs::create_dir_all(&config_dir)?;
        let config_file = config_dir.join(CONFIG_FILE);

        let data = match fs::read_to_string(&config_file) {
            Ok(content) => match serde_json::from_str::<ConfigData>(&content) {
                Ok(mut data) => {
                    if data.data_file.is_empty() {
                        data.data_file = ConfigData::defaults_for(&config_dir).data_file;
                    }
                    data
                }
                Err(e) => {
                    tracing::warn!("Ignoring invalid {}: {}", config_file.display(), e);
                    ConfigData::defaults_for(&config_dir)
                }
            },
            Err(_) => ConfigData::defaults_for(&config_dir),
        };

        let config = Self {
            config_dir,
            config_file,
            data,
        };

        // Save default config if it doesn't exist
        if !config.config_file.exists() {
            config.save()?;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> ParkingResult<()> {
        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.config_file, content)?;
        Ok(())
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the snapshot file path
    pub fn data_file(&self) -> PathBuf {
        PathBuf::from(&self.data.data_file)
    }

    /// Set the snapshot file path
    pub fn set_data_file(&mut self, path: &str) -> ParkingResult<()> {
        if path.trim().is_empty() {
            return Err(ParkingError::validation("data_file", "must not be empty"));
        }
        self.data.data_file = path.trim().to_string();
        self.save()
    }

    /// Whether every mutation is persisted immediately
    pub fn autosave(&self) -> bool {
        self.data.autosave
    }

    /// Enable or disable autosave
    pub fn set_autosave(&mut self, enabled: bool) -> ParkingResult<()> {
        self.data.autosave = enabled;
        self.save()
    }

    /// Get a configuration value
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_file" => Some(self.data.data_file.clone()),
            "autosave" => Some(self.data.autosave.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: &str, value: &str) -> ParkingResult<()> {
        match key {
            "data_file" => self.set_data_file(value),
            "autosave" => {
                let enabled = value.trim().parse::<bool>().map_err(|_| {
                    ParkingError::Config(format!("autosave must be true or false, got '{}'", value))
                })?;
                self.set_autosave(enabled)
            }
            _ => Err(ParkingError::Config(format!("Unknown config key: {}", key))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(config.data_file(), temp_dir.path().join("parking.json"));
        assert!(!config.autosave());
        assert!(temp_dir.path().join("config.json").exists());
    }

    #[test]
    fn test_config_persistence() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
            config.set_data_file("/srv/parking/data.json").unwrap();
            config.set_autosave(true).unwrap();
        }

        {
            let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
            assert_eq!(config.data_file(), PathBuf::from("/srv/parking/data.json"));
            assert!(config.autosave());
        }
    }

    #[test]
    fn test_get_set() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();

        assert_eq!(config.get("autosave"), Some("false".to_string()));
        config.set("autosave", "true").unwrap();
        assert_eq!(config.get("autosave"), Some("true".to_string()));

        config.set("data_file", "other.json").unwrap();
        assert_eq!(config.get("data_file"), Some("other.json".to_string()));

        assert!(config.get("nope").is_none());
        assert!(matches!(config.set("nope", "x"), Err(ParkingError::Config(_))));
        assert!(matches!(config.set("autosave", "maybe"), Err(ParkingError::Config(_))));
        assert!(config.set("data_file", "  ").is_err());
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("config.json"), "not json").unwrap();

        let config = Config::new(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(config.data_file(), temp_dir.path().join("parking.json"));
        assert!(!config.autosave());
    }
}
