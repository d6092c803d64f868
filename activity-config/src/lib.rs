// Layered configuration for the activity services

pub mod config_service;
pub mod env;
pub mod error;
pub mod loader;
pub mod path;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Main configuration manager
///
/// A flat key -> JSON value store. Files contribute their top-level keys,
/// environment variables contribute lowercased keys with the prefix
/// stripped. Later loads overwrite earlier ones key by key.
#[derive(Clone)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: None,
        }
    }

    /// Create with environment variable prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::new(RwLock::new(HashMap::new())),
            env_prefix: Some(prefix.into()),
        }
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Load configuration from environment variables
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        let env_vars = loader.load();
        let count = env_vars.len();

        let mut config = self.config.write();
        for (key, value) in env_vars {
            config.insert(key, Value::String(value));
        }

        debug!(count, prefix = ?self.env_prefix, "Loaded environment variables");
        Ok(())
    }

    /// Load configuration from .env file, then the environment
    pub fn load_dotenv(&self, path: Option<&str>) -> Result<()> {
        if let Some(path) = path {
            dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
        } else {
            // A missing .env is fine
            dotenvy::dotenv().ok();
        }
        self.load_env()
    }

    /// Load configuration from file
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = path.as_ref();
        let data = ConfigLoader::new(format).load_file(path)?;
        self.merge_value(data);
        debug!(path = %path.display(), ?format, "Loaded configuration file");
        Ok(())
    }

    /// Load a file, detecting the format from its extension
    pub fn load_file_auto(&self, path: impl AsRef<Path>) -> Result<()> {
        let format = FileFormat::from_path(path.as_ref())?;
        self.load_file(path, format)
    }

    fn merge_value(&self, data: Value) {
        if let Value::Object(map) = data {
            let mut config = self.config.write();
            for (key, value) in map {
                config.insert(key, value);
            }
        }
    }

    /// Set a configuration value
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;

        self.config.write().insert(key.to_string(), json_value);

        Ok(())
    }

    /// Get a configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read();

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", key, e)))
    }

    /// Get a configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Get a value by dotted path.
    ///
    /// Tries the environment-style key (coerced), then the exact key, then
    /// nested traversal of file data.
    pub fn get_path<T: DeserializeOwned>(&self, dotted: &str) -> Result<T> {
        let value = {
            let config = self.config.read();
            config
                .get(&path::env_key(dotted))
                .map(path::coerce_scalar)
                .or_else(|| config.get(dotted).cloned())
                .or_else(|| path::lookup_nested(&config, dotted).cloned())
                .ok_or_else(|| ConfigError::KeyNotFound(dotted.to_string()))?
        };

        serde_json::from_value(value)
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", dotted, e)))
    }

    pub fn get_path_or<T: DeserializeOwned>(&self, dotted: &str, default: T) -> T {
        self.get_path(dotted).unwrap_or(default)
    }

    /// Raw object rooted at `prefix`; empty when nothing is configured under it
    pub fn section_value(&self, prefix: &str) -> Value {
        Value::Object(path::assemble_section(&self.config.read(), prefix))
    }

    /// Deserialize the object rooted at `prefix`
    pub fn get_section<T: DeserializeOwned>(&self, prefix: &str) -> Result<T> {
        serde_json::from_value(self.section_value(prefix))
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", prefix, e)))
    }

    /// Deserialize and validate the object rooted at `prefix`
    pub fn get_section_validated<T: DeserializeOwned + Validate>(&self, prefix: &str) -> Result<T> {
        let section: T = self.get_section(prefix)?;
        section.validate()?;
        Ok(section)
    }

    /// Get a string value
    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    /// Get an integer value
    pub fn get_int(&self, key: &str) -> Result<i64> {
        self.get(key)
    }

    /// Get a boolean value
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    /// Check if a key exists
    pub fn has(&self, key: &str) -> bool {
        self.config.read().contains_key(key)
    }

    /// Get all configuration keys
    pub fn keys(&self) -> Vec<String> {
        self.config.read().keys().cloned().collect()
    }

    /// Merge configuration from another manager; `other` wins on conflicts
    pub fn merge(&self, other: &ConfigManager) -> Result<()> {
        let snapshot = other.config.read().clone();
        let mut config = self.config.write();

        for (key, value) in snapshot {
            config.insert(key, value);
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
