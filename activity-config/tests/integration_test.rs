//! Integration tests for activity-config

use activity_config::*;
use serde::Deserialize;
use std::env;
use std::io::Write;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RestClientSection {
    url: String,
    #[serde(default)]
    connect_timeout: Option<u64>,
    #[serde(default)]
    follow_redirects: Option<bool>,
}

fn toml_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_env_prefix_loading() {
    unsafe {
        env::set_var("ACTCFGTEST_SERVER_PORT", "9191");
    }

    let manager = ConfigManager::with_prefix("ACTCFGTEST");
    manager.load_env().unwrap();

    let port: u16 = manager.get_path("server.port").unwrap();
    assert_eq!(port, 9191);

    unsafe {
        env::remove_var("ACTCFGTEST_SERVER_PORT");
    }
}

#[test]
fn test_builder_loads_toml_file() {
    let file = toml_file(
        r#"
        [server]
        host = "127.0.0.1"
        port = 8081

        [rest-client.activities-simple]
        url = "http://localhost:8081/api"
        connect-timeout = 100
        "#,
    );

    let service = ConfigService::builder()
        .add_file(file.path(), FileFormat::Toml)
        .build()
        .unwrap();

    assert_eq!(service.get_path::<String>("server.host").unwrap(), "127.0.0.1");
    assert_eq!(service.get_path::<u16>("server.port").unwrap(), 8081);

    let section: RestClientSection = service
        .get_section("rest-client.activities-simple")
        .unwrap();
    assert_eq!(section.url, "http://localhost:8081/api");
    assert_eq!(section.connect_timeout, Some(100));
    assert_eq!(section.follow_redirects, None);
}

#[test]
fn test_environment_overrides_file_section() {
    unsafe {
        env::set_var("ACTCFGENV_REST_CLIENT_ACTIVITIES_SIMPLE_CONNECT_TIMEOUT", "750");
        env::set_var("ACTCFGENV_REST_CLIENT_ACTIVITIES_SIMPLE_FOLLOW_REDIRECTS", "true");
    }

    let file = toml_file(
        r#"
        [rest-client.activities-simple]
        url = "http://localhost:1/api"
        connect-timeout = 100
        "#,
    );

    let service = ConfigService::builder()
        .with_prefix("ACTCFGENV")
        .load_env()
        .add_file(file.path(), FileFormat::Toml)
        .build()
        .unwrap();

    let section: RestClientSection = service
        .get_section("rest-client.activities-simple")
        .unwrap();
    assert_eq!(section.url, "http://localhost:1/api");
    assert_eq!(section.connect_timeout, Some(750));
    assert_eq!(section.follow_redirects, Some(true));

    unsafe {
        env::remove_var("ACTCFGENV_REST_CLIENT_ACTIVITIES_SIMPLE_CONNECT_TIMEOUT");
        env::remove_var("ACTCFGENV_REST_CLIENT_ACTIVITIES_SIMPLE_FOLLOW_REDIRECTS");
    }
}

#[test]
fn test_optional_file_is_skipped_when_missing() {
    let service = ConfigService::builder()
        .add_optional_file("does/not/exist/application.toml")
        .build()
        .unwrap();

    assert!(service.manager().keys().is_empty());
}

#[test]
fn test_required_file_missing_is_error() {
    let result = ConfigService::builder()
        .add_file("does/not/exist/application.toml", FileFormat::Toml)
        .build();

    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_set_overrides_loaded_section_value() {
    let file = toml_file(
        r#"
        [rest-client.activities-quarkus]
        url = "http://localhost:8080/api"
        "#,
    );

    let service = ConfigService::builder()
        .add_optional_file(file.path())
        .build()
        .unwrap();
    service
        .set("rest-client.activities-quarkus.url", "http://127.0.0.1:5555/api")
        .unwrap();

    let section: RestClientSection = service
        .get_section("rest-client.activities-quarkus")
        .unwrap();
    assert_eq!(section.url, "http://127.0.0.1:5555/api");
}

#[test]
fn test_missing_section_fails_to_deserialize_required_fields() {
    let service = ConfigService::new();
    let result = service.get_section::<RestClientSection>("rest-client.nothing");
    assert!(matches!(result, Err(ConfigError::DeserializationError(_))));
}

#[test]
fn test_clones_share_state() {
    let service = ConfigService::new();
    let clone = service.clone();
    clone.set("shared", 1).unwrap();
    assert!(service.has("shared"));
}
