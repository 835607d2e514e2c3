//! Configuration manager for loading and saving application configuration
//!
//! Configuration lives in `<config dir>/ProximityMonitor/config.json`, where
//! `<config dir>` is `PROXIMITY_MONITOR_HOME` when set and the platform
//! configuration directory otherwise. Saves are atomic.

use crate::config::models::AppConfig;
use crate::error::{ProximityError, Result};
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{info, warn};

/// Environment variable that overrides the configuration base directory
pub const HOME_ENV_VAR: &str = "PROXIMITY_MONITOR_HOME";

/// Application directory name inside the base directory
const APP_DIR_NAME: &str = "ProximityMonitor";

/// Base directory chosen on the command line, takes precedence over the environment
static BASE_DIR_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Configuration manager
pub struct ConfigManager;

impl ConfigManager {
    /// Use `base` instead of `PROXIMITY_MONITOR_HOME` or the platform directory
    ///
    /// Only the first call takes effect; returns `false` if an override was
    /// already set.
    pub fn set_base_dir(base: PathBuf) -> bool {
        BASE_DIR_OVERRIDE.set(base).is_ok()
    }

    /// Get the application data directory
    ///
    /// Returns: `<config dir>/ProximityMonitor`
    pub fn get_app_dir() -> PathBuf {
        let base = BASE_DIR_OVERRIDE
            .get()
            .cloned()
            .or_else(|| std::env::var_os(HOME_ENV_VAR).map(PathBuf::from))
            .or_else(dirs::config_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        base.join(APP_DIR_NAME)
    }

    /// Get the path to the configuration file
    ///
    /// Returns: `<config dir>/ProximityMonitor/config.json`
    pub fn get_config_path() -> PathBuf {
        Self::get_app_dir().join("config.json")
    }

    /// Ensure the application directory exists
    pub fn ensure_config_dir() -> Result<PathBuf> {
        let dir = Self::get_app_dir();
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist or is corrupt, returns default
    /// configuration. Loaded values are validated.
    pub fn load() -> Result<AppConfig> {
        let config_path = Self::get_config_path();

        if !config_path.exists() {
            info!("Configuration file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let json = std::fs::read_to_string(&config_path)?;

        match serde_json::from_str::<AppConfig>(&json) {
            Ok(mut config) => {
                config.validate();
                info!("Configuration loaded from {}", config_path.display());
                Ok(config)
            }
            Err(e) => {
                warn!("Failed to parse configuration, using defaults: {}", e);
                Ok(AppConfig::default())
            }
        }
    }

    /// Save configuration to disk with atomic write
    ///
    /// Writes a temporary file in the same directory and persists it over
    /// the real one.
    pub fn save(config: &AppConfig) -> Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = Self::get_config_path();

        let json = serde_json::to_string_pretty(config)?;
        let mut temp = tempfile::NamedTempFile::new_in(&config_dir)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&config_path).map_err(|e| {
            // Preserve error chain by wrapping the source error
            ProximityError::ConfigError(Box::new(e.error))
        })?;

        info!("Configuration saved to {}", config_path.display());
        Ok(())
    }

    /// Write the default configuration if no file exists yet
    pub fn write_default_if_missing() -> Result<bool> {
        let config_path = Self::get_config_path();
        if config_path.exists() {
            return Ok(false);
        }
        Self::save(&AppConfig::default())?;
        Ok(true)
    }
}
