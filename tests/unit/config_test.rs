//! Unit tests for configuration module

use catalog_service::config::Settings;
use std::io::Write;

#[test]
fn test_default_settings() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "json");
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation_invalid_port() {
    let mut settings = Settings::default();
    settings.server.port = 0;

    assert!(settings.validate().is_err());
}

#[test]
fn test_settings_validation_missing_fixtures() {
    let mut settings = Settings::default();
    settings.storage.fixtures = Some("/nonexistent/fixtures.yaml".to_string());

    assert!(settings.validate().is_err());
}

#[test]
fn test_load_from_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "server:\n  host: 127.0.0.1\n  port: 9100\nlogging:\n  format: pretty\n"
    )
    .unwrap();

    let settings = Settings::load_from_path(file.path()).unwrap();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.logging.format, "pretty");
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.bind_address(), "127.0.0.1:9100");
}

#[test]
fn test_load_from_toml_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[server]\nport = 9200\n\n[storage]\nfixtures = \"seed.yaml\"\n").unwrap();

    let settings = Settings::load_from_path(file.path()).unwrap();
    assert_eq!(settings.server.port, 9200);
    assert_eq!(settings.storage.fixtures.as_deref(), Some("seed.yaml"));
}

#[test]
fn test_missing_file_uses_defaults() {
    let settings = Settings::load_from_path("/nonexistent/catalog.yaml").unwrap();
    assert_eq!(settings.server.port, 8000);
}
