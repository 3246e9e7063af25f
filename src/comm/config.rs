//! 分层配置管理
//! Layered configuration: TOML files overlaid by `PORTAL__*` environment variables.

use config::{Config, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to initialise configuration: {message}")]
    InitializationError { message: String },

    #[error("configuration key not found: {key}")]
    KeyNotFound { key: String },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// 配置源
#[derive(Debug, Clone)]
pub enum ConfigSource {
    File {
        path: String,
        format: Option<FileFormat>,
        required: bool,
    },
    Env {
        prefix: String,
        separator: &'static str,
    },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File { path, required, .. } => {
                write!(f, "file {} (required: {})", path, required)
            }
            ConfigSource::Env { prefix, separator } => {
                write!(f, "env {}{}*", prefix, separator)
            }
        }
    }
}

/// 配置管理器
pub struct ConfigManager {
    config: Config,
    sources: Vec<ConfigSource>,
}

impl ConfigManager {
    pub fn with_sources(sources: Vec<ConfigSource>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for source in &sources {
            builder = match source {
                ConfigSource::File {
                    path,
                    format,
                    required,
                } => {
                    let file = File::with_name(path).required(*required);
                    match format {
                        Some(format) => builder.add_source(file.format(*format)),
                        None => builder.add_source(file),
                    }
                }
                ConfigSource::Env { prefix, separator } => builder.add_source(
                    Environment::with_prefix(prefix)
                        .prefix_separator(separator)
                        .separator(separator)
                        .try_parsing(true),
                ),
            };
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::InitializationError {
                message: e.to_string(),
            })?;

        Ok(Self { config, sources })
    }

    /// In-memory configuration, used by tests and the CLI defaults.
    pub fn empty() -> Self {
        Self {
            config: Config::default(),
            sources: Vec::new(),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.config.get::<T>(key).map_err(|e| match e {
            config::ConfigError::NotFound(_) => ConfigError::KeyNotFound {
                key: key.to_string(),
            },
            other => ConfigError::InvalidValue {
                key: key.to_string(),
                message: other.to_string(),
            },
        })
    }

    pub fn get_string(&self, key: &str) -> Result<String, ConfigError> {
        self.get::<String>(key)
    }

    /// 获取配置值，不存在或无法解析时返回默认值
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(value) => value,
            Err(ConfigError::KeyNotFound { .. }) => default,
            Err(e) => {
                warn!("{}, using default", e);
                default
            }
        }
    }

    pub fn exists(&self, key: &str) -> bool {
        self.config.get::<config::Value>(key).is_ok()
    }

    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    pub fn print_sources_info(&self) {
        for source in &self.sources {
            debug!("config source: {}", source);
        }
    }
}
