//! Service configuration.
//!
//! Sources, lowest precedence first:
//! 1. Defaults
//! 2. A TOML file (optional, see [`ServiceConfig::load`])
//! 3. Environment variables prefixed `CRUD_`, e.g. `CRUD_CHANNEL_CAPACITY=64`
//!
//! ```toml
//! base_path = "/api"
//! channel_capacity = 64
//! log_filter = "resource_service=debug,info"
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

const ENV_PREFIX: &str = "CRUD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Prefix for every route, e.g. `/api`. Empty mounts routes at the root.
    #[serde(default)]
    pub base_path: String,

    /// Buffer size of each store actor's request channel.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Fallback `EnvFilter` directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            channel_capacity: default_channel_capacity(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_channel_capacity() -> usize {
    32
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl ServiceConfig {
    /// Loads `path` (TOML) over the defaults, then applies `CRUD_*` overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&ServiceConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_"))
            .build()?;

        let service_config: ServiceConfig = config.try_deserialize()?;
        service_config.validate()?;
        Ok(service_config)
    }

    /// Defaults with `CRUD_*` overrides only.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&ServiceConfig::default())?)
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("_"))
            .build()?;

        let service_config: ServiceConfig = config.try_deserialize()?;
        service_config.validate()?;
        Ok(service_config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.channel_capacity == 0 {
            return Err(ConfigLoadError::Invalid {
                message: "channel_capacity must be at least 1".to_string(),
            });
        }
        if !self.base_path.is_empty() && !self.base_path.starts_with('/') {
            return Err(ConfigLoadError::Invalid {
                message: format!("base_path '{}' must start with '/'", self.base_path),
            });
        }
        Ok(())
    }
}
