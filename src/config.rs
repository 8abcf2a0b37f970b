use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5050";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "ROSTER_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_TIMEOUT_SECS";

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Client configuration with source tracking.
///
/// Built once by the caller and handed to the store client; nothing in the
/// library reads the environment on its own.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the remote record store
    pub base_url: ConfigValue<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default),
            timeout_secs: ConfigValue::new(DEFAULT_TIMEOUT_SECS, ConfigSource::Default),
            config_file: None,
        }
    }
}

impl Config {
    /// Config pointing at `base_url` with default everything else.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: ConfigValue::new(base_url.into(), ConfigSource::Default),
            ..Self::default()
        }
    }

    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, |key| std::env::var(key).ok())
    }

    /// Same as [`Config::load`], reading overrides through `env`.
    pub fn load_with_env<F>(config_path: Option<PathBuf>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                path: path.clone(),
                source,
            })?;
            let file_config: ConfigFile =
                serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
                    path: path.clone(),
                    source,
                })?;

            config.config_file = Some(path);

            if let Some(url) = file_config.base_url {
                config.base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(secs) = file_config.timeout_secs {
                config.timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }
        }

        if let Some(url) = env(ENV_BASE_URL) {
            config.base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.value)
    }

    /// Default config directory (platform-specific), e.g. ~/.config/roster/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("roster")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

/// One `key  value (source)` line per setting, config file first.
impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.config_file {
            Some(path) => writeln!(f, "{:<14}{} (loaded)", "config_file", path.display())?,
            None => writeln!(
                f,
                "{:<14}{} (not found)",
                "config_file",
                Self::default_config_path().display()
            )?,
        }
        writeln!(
            f,
            "{:<14}{} ({})",
            "base_url", self.base_url.value, self.base_url.source
        )?;
        writeln!(
            f,
            "{:<14}{} ({})",
            "timeout_secs", self.timeout_secs.value, self.timeout_secs.source
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
}
