//! Integration tests for rtfm-config crate.

use rtfm_common::test_utils::{create_temp_dir, init_test_logging};
use rtfm_common::LogFormat;
use rtfm_config::ConfigLoader;
use std::path::PathBuf;

#[test]
fn test_load_full_yaml_file() {
    init_test_logging();

    let dir = create_temp_dir();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
database:
  path: /var/lib/rtfm/bot.db
  connect_timeout_seconds: 10
http:
  user_agent: test-agent
  request_timeout_seconds: 15
plugins:
  directory: /etc/rtfm/cogs
logging:
  level: debug
  format: pretty
"#,
    )
    .unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let config = ConfigLoader::from_yaml_str(&content).unwrap();

    assert_eq!(config.database.path, PathBuf::from("/var/lib/rtfm/bot.db"));
    assert_eq!(config.database.connect_timeout_seconds, 10);
    assert_eq!(config.http.user_agent, "test-agent");
    assert_eq!(config.http.request_timeout_seconds, 15);
    assert_eq!(config.plugins.directory, PathBuf::from("/etc/rtfm/cogs"));
    assert_eq!(config.logging.format, LogFormat::Pretty);
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = create_temp_dir();
    let err = ConfigLoader::load_from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let err = ConfigLoader::from_yaml_str("database: [unterminated").unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
fn test_shipped_example_matches_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config.example.yaml");
    let content = std::fs::read_to_string(path).unwrap();

    let config = ConfigLoader::from_yaml_str(&content).unwrap();
    assert_eq!(config, rtfm_config::Config::default());
}
