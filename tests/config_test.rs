use grind_timer::config::{
    Config, DisplayConfig, LoggingConfig, load_file_only, load_from_path, save_to_path,
};
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

#[test]
fn test_load_config_valid() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let config_content = r#"
        [notifications]
        enabled = false

        [display]
        bar_width = 12
        refresh_secs = 5

        [logging]
        level = "debug"
    "#;
    temp_file.write_all(config_content.as_bytes()).unwrap();

    let config = load_from_path(temp_file.path()).expect("Failed to load valid config");

    assert!(!config.notifications.enabled);
    assert_eq!(config.display.bar_width, 12);
    assert_eq!(config.display.refresh_secs, 5);
    assert_eq!(config.logging.level, "debug");
    assert!(config.state.state_dir_override.is_none());
}

#[test]
fn test_load_config_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"").unwrap();

    let config = load_from_path(temp_file.path()).unwrap();
    assert!(config.notifications.enabled);
    assert_eq!(config.display.bar_width, 30);
    assert_eq!(config.display.refresh_secs, 30);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_load_config_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let config = load_from_path(dir.path().join("config.toml")).unwrap();
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_config_partial_table() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file
        .write_all(b"[display]\nbar_width = 8\n")
        .unwrap();

    let config = load_from_path(temp_file.path()).unwrap();
    assert_eq!(config.display.bar_width, 8);
    assert_eq!(config.display.refresh_secs, 30);
}

#[test]
fn test_load_config_malformed() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[display\nbar_width = ").unwrap();

    assert!(load_from_path(temp_file.path()).is_err());
}

#[test]
fn test_display_validation() {
    let config = DisplayConfig {
        bar_width: 0,
        refresh_secs: 30,
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("bar_width"));

    let config = DisplayConfig {
        bar_width: 10,
        refresh_secs: 0,
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_logging_validation() {
    let ok = LoggingConfig {
        level: "INFO".to_string(),
    };
    assert!(ok.validate().is_ok());

    let bad = LoggingConfig {
        level: "loud".to_string(),
    };
    assert!(bad.validate().unwrap_err().to_string().contains("Invalid log level"));
}

#[test]
fn test_save_then_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sub").join("config.toml");

    let mut config = Config::default();
    config.display.bar_width = 44;
    config.state.state_dir_override = Some(dir.path().join("state"));
    save_to_path(&config, &path).unwrap();

    let loaded = load_from_path(&path).unwrap();
    assert_eq!(loaded.display.bar_width, 44);
    assert_eq!(loaded.state.state_dir_override, Some(dir.path().join("state")));
}

#[test]
fn test_load_file_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let config = load_file_only(&path).unwrap();
    assert_eq!(config.display.bar_width, 30);

    std::fs::write(&path, "[display]\nbar_width = 9\n").unwrap();
    let config = load_file_only(&path).unwrap();
    assert_eq!(config.display.bar_width, 9);
    assert!(config.notifications.enabled);

    std::fs::write(&path, "[display\n").unwrap();
    assert!(load_file_only(&path).is_err());
}
