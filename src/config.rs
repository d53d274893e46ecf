use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for flpstat
///
/// # Example Configuration File
/// ```toml
/// # Directory names excluded from project discovery. FL Studio keeps its
/// # automatic backups in a "Backup" folder next to the project file.
/// skip_dirs = ["Backup"]
///
/// # Follow symbolic links while walking the scan directory
/// follow_links = true
///
/// # Logging level: error, warn, info, debug, trace
/// # (can be overridden by FLPSTAT_LOG_LEVEL)
/// log_level = "info"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Directory names skipped during discovery
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,
    /// Whether discovery follows symbolic links
    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_skip_dirs() -> Vec<String> {
    vec!["Backup".to_string()]
}

fn default_follow_links() -> bool {
    true
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
            follow_links: default_follow_links(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Creates a new Config instance, falling back to the defaults when no
    /// config file exists.
    pub fn new() -> Result<Self, ConfigError> {
        let config = match find_config_file()? {
            Some(path) => {
                let config_str = std::fs::read_to_string(&path).map_err(|e| {
                    ConfigError::IoError(std::io::Error::new(
                        e.kind(),
                        format!("Failed to read config file {}: {}", path.display(), e),
                    ))
                })?;
                toml::from_str(&config_str).map_err(ConfigError::ParseError)?
            }
            None => Config::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Returns the log level with environment variable override support
    pub fn log_level(&self) -> String {
        std::env::var("FLPSTAT_LOG_LEVEL").unwrap_or_else(|_| self.log_level.clone())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.skip_dirs.iter().any(|dir| dir.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "skip_dirs entries must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Finds the configuration file using the search strategy:
/// 1. Environment variable FLPSTAT_CONFIG
/// 2. User config directory (flpstat/config.toml)
///
/// Returns `None` when neither exists; defaults apply in that case.
pub fn find_config_file() -> Result<Option<PathBuf>, ConfigError> {
    if let Ok(config_path) = std::env::var("FLPSTAT_CONFIG") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirError)?;
    let config_path = config_dir.join("flpstat").join("config.toml");
    if config_path.exists() {
        return Ok(Some(config_path));
    }

    Ok(None)
}

/// Global configuration instance loaded lazily
pub static CONFIG: Lazy<Result<Config, ConfigError>> = Lazy::new(Config::new);
