//! Configuration management module.
//!
//! Handles loading and saving application configuration from a JSON file
//! stored next to the executable. Missing or malformed files fall back to
//! defaults silently; the utility must start either way.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use tracing::warn;

/// The clipboard must settle after Ctrl+C before we read it; anything below
/// this races the source application.
pub const MIN_CAPTURE_DELAY_MS: u64 = 100;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum number of history entries kept in memory.
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// Delay between Ctrl+C release and the clipboard read, in milliseconds.
    #[serde(default = "default_capture_delay_ms")]
    pub capture_delay_ms: u64,
}

fn default_history_capacity() -> usize {
    100
}

fn default_capture_delay_ms() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
            capture_delay_ms: default_capture_delay_ms(),
        }
    }
}

impl Config {
    /// Effective capture delay, clamped to the minimum the clipboard needs.
    pub fn capture_delay_ms(&self) -> u64 {
        self.capture_delay_ms.max(MIN_CAPTURE_DELAY_MS)
    }
}

/// Configuration manager for loading/saving config.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        let config_path = Self::get_exe_directory().join("clipcycle_config.json");
        Self { config_path }
    }

    /// Whether a config file is present on disk.
    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    /// Get the directory containing the executable.
    fn get_exe_directory() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Load configuration from file, falling back to defaults on any failure.
    pub fn load(&self) -> Config {
        match self.try_load() {
            Some(config) => config,
            None => Config::default(),
        }
    }

    fn try_load(&self) -> Option<Config> {
        if !self.config_path.exists() {
            return None;
        }
        let content = fs::read_to_string(&self.config_path).ok()?;
        match serde_json::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                warn!(
                    path = %self.config_path.display(),
                    "ignoring malformed config file: {err}"
                );
                None
            }
        }
    }

    /// Save configuration to file.
    pub fn save(&self, config: &Config) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.config_path, content)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.history_capacity, 100);
        assert_eq!(config.capture_delay_ms, 120);
    }

    #[test]
    fn test_capture_delay_is_clamped() {
        let config = Config {
            capture_delay_ms: 10,
            ..Config::default()
        };
        assert_eq!(config.capture_delay_ms(), MIN_CAPTURE_DELAY_MS);

        let config = Config {
            capture_delay_ms: 250,
            ..Config::default()
        };
        assert_eq!(config.capture_delay_ms(), 250);
    }

    #[test]
    fn test_partial_json_uses_field_defaults() {
        let config: Config = serde_json::from_str(r#"{"history_capacity": 20}"#).unwrap();
        assert_eq!(config.history_capacity, 20);
        assert_eq!(config.capture_delay_ms, 120);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let manager = ConfigManager {
            config_path: std::env::temp_dir().join("clipcycle_test_config.json"),
        };
        let config = Config {
            history_capacity: 42,
            capture_delay_ms: 150,
        };

        manager.save(&config).unwrap();
        assert!(manager.exists());

        let loaded = manager.load();
        assert_eq!(loaded.history_capacity, 42);
        assert_eq!(loaded.capture_delay_ms, 150);

        fs::remove_file(&manager.config_path).unwrap();
    }
}
