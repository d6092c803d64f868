//! Typed views over the application configuration.

use activity_config::{ConfigError, ConfigService, ConfigValidator, Validate};
use activity_core::Error;
use activity_http_client::RestClientSettings;
use serde::Deserialize;

/// Environment variable prefix: `ACTIVITY_SERVER_PORT`, `ACTIVITY_REST_CLIENT_...`.
pub const ENV_PREFIX: &str = "ACTIVITY";

/// Variable naming the configuration file to load instead of the default.
pub const CONFIG_PATH_VAR: &str = "ACTIVITY_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "config/application.toml";

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> activity_config::Result<()> {
        ConfigValidator::not_empty(&self.host, "server.host")?;
        ConfigValidator::is_port(self.port, "server.port")
    }
}

impl ServerSettings {
    pub fn from_config(config: &ConfigService) -> activity_config::Result<Self> {
        config.get_section_validated("server")
    }
}

/// Build the layered configuration: `.env`, `ACTIVITY_*` variables and the
/// TOML file (`ACTIVITY_CONFIG` or `config/application.toml`, skipped when
/// absent).
pub fn load_config() -> activity_config::Result<ConfigService> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    ConfigService::builder()
        .with_prefix(ENV_PREFIX)
        .load_dotenv(None)
        .load_env()
        .add_optional_file(path)
        .build()
}

/// Name of the configuration section for a client config key.
pub fn rest_client_prefix(config_key: &str) -> String {
    format!("rest-client.{}", config_key)
}

/// The `rest-client.<key>` section. Any `url` present must be an absolute
/// http(s) URL.
pub fn rest_client_settings(
    config: &ConfigService,
    config_key: &str,
) -> Result<RestClientSettings, Error> {
    let prefix = rest_client_prefix(config_key);
    let settings: RestClientSettings = config
        .get_section(&prefix)
        .map_err(|e| config_error(&prefix, e))?;

    if let Some(url) = &settings.url {
        ConfigValidator::is_url(url, &format!("{}.url", prefix))
            .map_err(|e| config_error(&prefix, e))?;
    }

    Ok(settings)
}

/// The required `rest-client.<key>.url`.
pub fn rest_client_url(config: &ConfigService, config_key: &str) -> Result<String, Error> {
    let key = format!("{}.url", rest_client_prefix(config_key));
    let url: String = config.get_path(&key).map_err(|e| config_error(&key, e))?;

    ConfigValidator::is_url(&url, &key).map_err(|e| config_error(&key, e))?;
    Ok(url)
}

fn config_error(key: &str, err: ConfigError) -> Error {
    Error::DependencyInjection(format!("invalid configuration for {}: {}", key, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_defaults() {
        let config = ConfigService::new();
        assert_eq!(
            ServerSettings::from_config(&config).unwrap(),
            ServerSettings::default()
        );
    }

    #[test]
    fn test_server_from_nested_section() {
        let config = ConfigService::new();
        config
            .set("server", json!({"host": "127.0.0.1", "port": 9000}))
            .unwrap();

        let server = ServerSettings::from_config(&config).unwrap();
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 9000);
    }

    #[test]
    fn test_server_port_zero_rejected() {
        let config = ConfigService::new();
        config.set("server.port", 0).unwrap();
        assert!(ServerSettings::from_config(&config).is_err());
    }

    #[test]
    fn test_rest_client_url_required() {
        let config = ConfigService::new();
        let err = rest_client_url(&config, "activities-quarkus").unwrap_err();
        assert!(err.to_string().contains("rest-client.activities-quarkus.url"));

        config
            .set("rest-client.activities-quarkus.url", "localhost:8080")
            .unwrap();
        assert!(rest_client_url(&config, "activities-quarkus").is_err());

        config
            .set("rest-client.activities-quarkus.url", "http://localhost:8080/api")
            .unwrap();
        assert_eq!(
            rest_client_url(&config, "activities-quarkus").unwrap(),
            "http://localhost:8080/api"
        );
    }

    #[test]
    fn test_rest_client_settings_section() {
        let config = ConfigService::new();
        config
            .set(
                "rest-client",
                json!({"activities-simple": {"url": "http://localhost:1/api", "read-timeout": 300}}),
            )
            .unwrap();

        let settings = rest_client_settings(&config, "activities-simple").unwrap();
        assert_eq!(settings.url.as_deref(), Some("http://localhost:1/api"));
        assert_eq!(settings.read_timeout, Some(300));

        let empty = rest_client_settings(&config, "activities-none").unwrap();
        assert!(empty.url.is_none());
    }
}
