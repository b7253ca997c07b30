use dashmap::DashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://products.db?mode=rwc";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    #[error("Failed to load {path}: {message}")]
    EnvFile { path: String, message: String },
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Configuration service
///
/// A snapshot of the process environment taken at startup. An optional
/// `.env` file in the working directory is loaded first; variables already
/// set in the environment win over it.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
    env_file: Option<PathBuf>,
}

impl ConfigService {
    /// Runs before logging is installed, so the loaded `.env` path is kept
    /// for the caller to report through [`ConfigService::env_file`].
    pub fn new() -> Self {
        let env_file = dotenvy::dotenv().ok();
        Self {
            env_file,
            ..Self::from_env()
        }
    }

    /// Load `path` into the environment, then snapshot it.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        dotenvy::from_path(path).map_err(|e| ConfigError::EnvFile {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            env_file: Some(path.to_path_buf()),
            ..Self::from_env()
        })
    }

    /// The `.env` file that was loaded, if any
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Snapshot of the current environment without touching `.env`
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a value, falling back to `default` when the key is unset.
    /// A value that is set but does not parse is an error, not a fallback.
    pub fn get_parsed<T: FromStr>(&self, key: &str, default: T) -> Result<T, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        }
    }

    pub fn host(&self) -> String {
        self.get_or("HOST", DEFAULT_HOST)
    }

    pub fn port(&self) -> Result<u16, ConfigError> {
        self.get_parsed("PORT", DEFAULT_PORT)
    }

    pub fn bind_addr(&self) -> Result<String, ConfigError> {
        Ok(format!("{}:{}", self.host(), self.port()?))
    }

    pub fn database_url(&self) -> String {
        self.get_or("DATABASE_URL", DEFAULT_DATABASE_URL)
    }

    pub fn database_max_connections(&self) -> Result<u32, ConfigError> {
        self.get_parsed("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)
    }

    pub fn database_log_statements(&self) -> Result<bool, ConfigError> {
        self.get_parsed("DATABASE_LOG_STATEMENTS", false)
    }

    pub fn log_level(&self) -> String {
        self.get_or("LOG_LEVEL", DEFAULT_LOG_LEVEL)
    }

    pub fn log_format(&self) -> Result<LogFormat, ConfigError> {
        match self.get("LOG_FORMAT") {
            None => Ok(LogFormat::Text),
            Some(raw) => match raw.to_ascii_lowercase().as_str() {
                "text" | "pretty" => Ok(LogFormat::Text),
                "json" => Ok(LogFormat::Json),
                _ => Err(ConfigError::InvalidValue {
                    key: "LOG_FORMAT".to_string(),
                    value: raw,
                }),
            },
        }
    }
}
