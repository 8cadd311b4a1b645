//! Tests for each supported configuration file format

use crate::{ConfigError, ConfigProvider};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
#[serial]
fn test_toml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo-store.toml");
    fs::write(
        &path,
        r#"
key = "todo-toml"
paths = ["todo.items"]
overwrite = true
"#,
    )
    .unwrap();

    let config = ConfigProvider::new().with_file(&path).load().unwrap();

    assert_eq!(config.key, "todo-toml");
    assert_eq!(config.paths, vec!["todo.items".to_string()]);
    assert!(config.overwrite);
}

#[test]
#[serial]
fn test_yaml_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo-store.yml");
    fs::write(
        &path,
        r#"
key: todo-yaml
paths:
  - todo.*
  - settings.theme
storage_dir: /var/lib/todo
"#,
    )
    .unwrap();

    let config = ConfigProvider::new().with_file(&path).load().unwrap();

    assert_eq!(config.key, "todo-yaml");
    assert_eq!(
        config.paths,
        vec!["todo.*".to_string(), "settings.theme".to_string()]
    );
    assert_eq!(
        config.storage_dir.as_deref(),
        Some(std::path::Path::new("/var/lib/todo"))
    );
    assert!(!config.overwrite);
}

#[test]
#[serial]
fn test_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo-store.json");
    fs::write(&path, r#"{ "key": "todo-json", "paths": [] }"#).unwrap();

    let config = ConfigProvider::new().with_file(&path).load().unwrap();

    assert_eq!(config.key, "todo-json");
    assert!(config.paths.is_empty());
}

#[test]
#[serial]
fn test_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo-store.ini");
    fs::write(&path, "key = todo").unwrap();

    let result = ConfigProvider::new().with_file(&path).load();
    assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
}

#[test]
#[serial]
fn test_invalid_values_fail_validation() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo-store.toml");
    fs::write(&path, r#"key = """#).unwrap();

    let result = ConfigProvider::new().with_file(&path).load();
    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}
