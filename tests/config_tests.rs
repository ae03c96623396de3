//! Configuration resolution tests
//! Cover file loading, environment overlay, command line overrides and fail-fast validation

use bitbucket::config::{Config, ConfigOverrides};
use std::fs;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn write_config(dir: &TempDir, yaml: &str) -> String {
    let path = dir.path().join("bitbucket.yaml");
    fs::write(&path, yaml).expect("Failed to write config");
    path.to_str().expect("Config path not UTF-8").to_string()
}

#[test]
fn test_missing_url_fails_fast() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");

    let result = Config::resolve_with(path.to_str().unwrap(), &ConfigOverrides::default(), no_env);

    let error = result.unwrap_err().to_string();
    assert!(error.contains("BITBUCKET_URL is not set."), "{error}");
}

#[test]
fn test_file_values_are_loaded() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        "url: https://bitbucket.example.com/rest/api\nversion: latest\nread_timeout_secs: 30\n",
    );

    let config = Config::resolve_with(&path, &ConfigOverrides::default(), no_env).unwrap();

    assert_eq!(config.url, "https://bitbucket.example.com/rest/api");
    assert_eq!(config.version, "latest");
    assert_eq!(config.read_timeout_secs, 30);
    assert_eq!(config.connect_timeout_secs, 5);
    assert!(config.token.is_none());
}

#[test]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "url: https://file.example.com\ntoken: file-token\n");

    let config = Config::resolve_with(&path, &ConfigOverrides::default(), |key| match key {
        "BITBUCKET_URL" => Some("https://env.example.com".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.url, "https://env.example.com");
    assert_eq!(config.token.as_deref(), Some("file-token"));
}

#[test]
fn test_command_line_overrides_environment() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.yaml");
    let overrides = ConfigOverrides {
        url: Some("https://flag.example.com".to_string()),
        token: Some("flag-token".to_string()),
    };

    let config = Config::resolve_with(path.to_str().unwrap(), &overrides, |key| match key {
        "BITBUCKET_URL" => Some("https://env.example.com".to_string()),
        "BITBUCKET_TOKEN" => Some("env-token".to_string()),
        "BITBUCKET_API_VERSION" => Some("2.0".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.url, "https://flag.example.com");
    assert_eq!(config.token.as_deref(), Some("flag-token"));
    assert_eq!(config.version, "2.0");
}

#[test]
fn test_invalid_yaml_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "url: [unclosed");

    let result = Config::resolve_with(&path, &ConfigOverrides::default(), no_env);

    let error = format!("{:#}", result.unwrap_err());
    assert!(error.contains("Failed to parse config file"), "{error}");
}

#[test]
fn test_zero_timeout_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "url: https://host\nconnect_timeout_secs: 0\n");

    let result = Config::resolve_with(&path, &ConfigOverrides::default(), no_env);

    assert!(result.unwrap_err().to_string().contains("connect_timeout_secs"));
}

