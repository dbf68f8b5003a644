// Configuration - User settings stored as RON

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("RON error: {0}")]
    Ron(#[from] ron::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Sample rate of the simulated audio clock
    pub sample_rate: u32,
    /// Frames rendered per audio block
    pub block_size: usize,
    /// Capacity of the transport command queue
    pub transport_queue_capacity: usize,
    pub prompt: String,
    /// Separates several commands on one line
    pub command_separator: char,
    /// env_logger filter, overridden by RUST_LOG
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            block_size: 512,
            transport_queue_capacity: 64,
            prompt: "> ".to_string(),
            command_separator: ';',
            log_filter: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/stepline/config.ron`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stepline").join("config.ron"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        let config: AppConfig = ron::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Load from the default path. A missing or broken file gives the defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            log::info!("No config directory, using default configuration");
            return Self::default();
        };

        if !path.exists() {
            log::info!("No config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample_rate must be non-zero".into()));
        }
        if self.block_size == 0 {
            return Err(ConfigError::Invalid("block_size must be non-zero".into()));
        }
        if self.transport_queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "transport_queue_capacity must be non-zero".into(),
            ));
        }
        let separator = self.command_separator;
        if separator.is_whitespace()
            || separator == '"'
            || separator.is_ascii_alphanumeric()
            || separator == '_'
            || separator == '-'
        {
            return Err(ConfigError::Invalid(format!(
                "'{}' cannot separate commands",
                self.command_separator
            )));
        }
        Ok(())
    }
}
