// ConfigService - High-level configuration service

use crate::{ConfigManager, FileFormat, Result, Validate};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// High-level configuration service
///
/// Cheap to clone; clones share the underlying store.
#[derive(Clone)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    /// Create a new configuration service
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
        }
    }

    /// Create from an existing manager
    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    /// Builder for creating configured service
    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    /// Get configuration value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    /// Get configuration value with default
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    pub fn get_path<T: DeserializeOwned>(&self, dotted: &str) -> Result<T> {
        self.manager.get_path(dotted)
    }

    pub fn get_path_or<T: DeserializeOwned>(&self, dotted: &str, default: T) -> T {
        self.manager.get_path_or(dotted, default)
    }

    pub fn get_section<T: DeserializeOwned>(&self, prefix: &str) -> Result<T> {
        self.manager.get_section(prefix)
    }

    pub fn get_section_validated<T: DeserializeOwned + Validate>(&self, prefix: &str) -> Result<T> {
        self.manager.get_section_validated(prefix)
    }

    /// Set a value, overriding anything loaded
    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        self.manager.set(key, value)
    }

    /// Check if key exists
    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    /// Get underlying manager
    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for ConfigService
///
/// Load order: `.env`, environment, then files in the order added. Files
/// and `set` never replace environment-style keys since those live under
/// different names; `get_path` and `get_section` read them first.
pub struct ConfigServiceBuilder {
    manager: ConfigManager,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<String>,
    config_files: Vec<(PathBuf, Option<FileFormat>, bool)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self {
            manager: ConfigManager::new(),
            load_env: false,
            load_dotenv: false,
            dotenv_path: None,
            config_files: Vec::new(),
        }
    }

    /// Set environment variable prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.manager = ConfigManager::with_prefix(prefix);
        self
    }

    /// Enable loading from environment variables
    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Enable loading from .env file
    pub fn load_dotenv(mut self, path: Option<String>) -> Self {
        self.load_dotenv = true;
        self.dotenv_path = path;
        self
    }

    /// Add configuration file to load
    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), Some(format), true));
        self
    }

    /// Add a file that is skipped when absent; format from its extension
    pub fn add_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_files.push((path.into(), None, false));
        self
    }

    /// Build the configuration service
    pub fn build(self) -> Result<ConfigService> {
        // load_dotenv also pulls in the environment
        let mut env_loaded = false;
        if self.load_dotenv {
            match self.manager.load_dotenv(self.dotenv_path.as_deref()) {
                Ok(()) => env_loaded = true,
                Err(e) => warn!(error = %e, "Failed to load .env file"),
            }
        }

        if self.load_env && !env_loaded {
            self.manager.load_env()?;
        }

        for (path, format, required) in self.config_files {
            if !required && !Path::new(&path).exists() {
                debug!(path = %path.display(), "Optional configuration file not found, skipping");
                continue;
            }

            match format {
                Some(format) => self.manager.load_file(&path, format)?,
                None => self.manager.load_file_auto(&path)?,
            }
        }

        Ok(ConfigService::from_manager(self.manager))
    }
}

impl Default for ConfigServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
