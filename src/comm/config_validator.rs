use crate::comm::config::{ConfigError, ConfigManager};
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 配置验证规则
#[derive(Debug, Clone)]
pub struct ConfigValidationRule {
    pub key: &'static str,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub allowed_values: Option<Vec<&'static str>>,
    pub description: &'static str,
}

/// Session storage backend selected by `session.storage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
}

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfiguration {
    pub server_host: String,
    pub server_port: u16,
    pub server_workers: Option<usize>,
    pub server_debug: bool,
    pub logging_level: String,
    pub logging_json_format: bool,
    pub session_storage: StorageBackend,
    pub session_file: Option<String>,
    pub login_delay_ms: u64,
    pub database_url_env: String,
    pub database_connect_timeout_secs: u64,
    pub database_idle_timeout_secs: u64,
    pub database_max_connections: u32,
}

impl Default for AppConfiguration {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            server_workers: Some(4),
            server_debug: false,
            logging_level: "info".to_string(),
            logging_json_format: false,
            session_storage: StorageBackend::Memory,
            session_file: None,
            login_delay_ms: 1000,
            database_url_env: "DATABASE_URL".to_string(),
            database_connect_timeout_secs: 10,
            database_idle_timeout_secs: 120,
            database_max_connections: 1,
        }
    }
}

impl AppConfiguration {
    /// 从配置管理器加载配置，缺失的键使用默认值
    pub fn from_manager(manager: &ConfigManager) -> AppResult<Self> {
        let defaults = Self::default();

        let session_storage = match manager.get_string("session.storage") {
            Ok(raw) => match raw.to_ascii_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                other => {
                    return Err(AppError::Config(ConfigError::InvalidValue {
                        key: "session.storage".to_string(),
                        message: format!("unknown backend '{}'", other),
                    }))
                }
            },
            Err(_) => defaults.session_storage,
        };

        Ok(Self {
            server_host: manager.get_or("server.host", defaults.server_host),
            server_port: manager.get_or("server.port", defaults.server_port),
            server_workers: manager
                .get::<usize>("server.workers")
                .ok()
                .or(defaults.server_workers),
            server_debug: manager.get_or("server.debug", defaults.server_debug),
            logging_level: manager.get_or("logging.level", defaults.logging_level),
            logging_json_format: manager
                .get_or("logging.json_format", defaults.logging_json_format),
            session_storage,
            session_file: manager.get_string("session.file").ok(),
            login_delay_ms: manager.get_or("session.login_delay_ms", defaults.login_delay_ms),
            database_url_env: manager.get_or("database.url_env", defaults.database_url_env),
            database_connect_timeout_secs: manager.get_or(
                "database.connect_timeout_secs",
                defaults.database_connect_timeout_secs,
            ),
            database_idle_timeout_secs: manager.get_or(
                "database.idle_timeout_secs",
                defaults.database_idle_timeout_secs,
            ),
            database_max_connections: manager
                .get_or("database.max_connections", defaults.database_max_connections),
        })
    }
}

/// 配置验证器
pub struct ConfigValidator {
    rules: HashMap<&'static str, ConfigValidationRule>,
}

impl ConfigValidator {
    /// 创建新的配置验证器
    pub fn new() -> Self {
        let mut rules = HashMap::new();

        rules.insert(
            "server.port",
            ConfigValidationRule {
                key: "server.port",
                min_value: Some(1.0),
                max_value: Some(65535.0),
                allowed_values: None,
                description: "HTTP listen port",
            },
        );

        rules.insert(
            "logging.level",
            ConfigValidationRule {
                key: "logging.level",
                min_value: None,
                max_value: None,
                allowed_values: Some(vec!["trace", "debug", "info", "warn", "error"]),
                description: "log level",
            },
        );

        rules.insert(
            "database.max_connections",
            ConfigValidationRule {
                key: "database.max_connections",
                min_value: Some(1.0),
                max_value: Some(16.0),
                allowed_values: None,
                description: "connections per probe pool",
            },
        );

        rules.insert(
            "database.connect_timeout_secs",
            ConfigValidationRule {
                key: "database.connect_timeout_secs",
                min_value: Some(1.0),
                max_value: Some(300.0),
                allowed_values: None,
                description: "database connect timeout",
            },
        );

        Self { rules }
    }

    /// 验证单个值
    pub fn validate_value(&self, key: &str, value: &serde_json::Value) -> AppResult<()> {
        let Some(rule) = self.rules.get(key) else {
            return Ok(());
        };

        if let Some(number) = value.as_f64() {
            let below = rule.min_value.is_some_and(|min| number < min);
            let above = rule.max_value.is_some_and(|max| number > max);
            if below || above {
                return Err(invalid(
                    rule,
                    format!(
                        "{} out of range [{:?}, {:?}]",
                        number, rule.min_value, rule.max_value
                    ),
                ));
            }
        }

        if let (Some(allowed), Some(text)) = (&rule.allowed_values, value.as_str()) {
            if !allowed.iter().any(|candidate| *candidate == text) {
                return Err(invalid(
                    rule,
                    format!("'{}' is not one of {:?}", text, allowed),
                ));
            }
        }

        Ok(())
    }

    /// 验证整个应用配置
    pub fn validate_config(&self, config: &AppConfiguration) -> AppResult<()> {
        self.validate_value("server.port", &serde_json::json!(config.server_port))?;
        self.validate_value("logging.level", &serde_json::json!(config.logging_level))?;
        self.validate_value(
            "database.max_connections",
            &serde_json::json!(config.database_max_connections),
        )?;
        self.validate_value(
            "database.connect_timeout_secs",
            &serde_json::json!(config.database_connect_timeout_secs),
        )?;

        if config.server_workers == Some(0) {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "server.workers".to_string(),
                message: "must be at least 1".to_string(),
            }));
        }

        if config.database_url_env.trim().is_empty() {
            return Err(AppError::Config(ConfigError::InvalidValue {
                key: "database.url_env".to_string(),
                message: "environment variable name cannot be empty".to_string(),
            }));
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn invalid(rule: &ConfigValidationRule, message: String) -> AppError {
    AppError::Config(ConfigError::InvalidValue {
        key: rule.key.to_string(),
        message: format!("{} ({})", message, rule.description),
    })
}
