//! Configuration loading tests

use glimpse_common::config::{GlimpseConfig, DEFAULT_ADMIN_SECRET, DEFAULT_PORT};
use std::io::Write;

#[test]
fn test_defaults() {
    let config = GlimpseConfig::default();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.admin_secret, DEFAULT_ADMIN_SECRET);
    assert_eq!(config.inference.model, "gemini-2.5-flash");
    assert!(config.inference.api_key.is_empty());
}

#[test]
fn test_load_from_toml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
host = "0.0.0.0"
port = 8080
admin_secret = "swordfish"

[inference]
model = "gemini-2.0-flash"
timeout_secs = 10
"#
    )
    .unwrap();

    let config = GlimpseConfig::load_from(file.path()).unwrap();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.admin_secret, "swordfish");
    assert_eq!(config.inference.model, "gemini-2.0-flash");
    assert_eq!(config.inference.timeout_secs, 10);
    // Unspecified fields fall back to defaults
    assert!(config.inference.api_key.is_empty());
}

#[test]
fn test_partial_toml_uses_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "port = 9000\n").unwrap();

    let config = GlimpseConfig::load_from(file.path()).unwrap();
    assert_eq!(config.port, 9000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.admin_secret, DEFAULT_ADMIN_SECRET);
}

#[test]
fn test_malformed_toml_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "port = \"not a number").unwrap();

    assert!(GlimpseConfig::load_from(file.path()).is_err());
}

#[test]
fn test_missing_file_is_an_error() {
    let result = GlimpseConfig::load_from(std::path::Path::new("/nonexistent/config.toml"));
    assert!(result.is_err());
}
