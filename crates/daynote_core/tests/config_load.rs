use daynote_core::{Config, ConfigError};
use std::fs;
use std::path::PathBuf;

#[test]
fn missing_default_config_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path(), None).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(
        config.layout(dir.path()).memory_dir,
        dir.path().join("memory")
    );
}

#[test]
fn default_config_file_in_root_is_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("daynote.toml"),
        "memory_dir = \"journal\"\nlog_level = \"warn\"\n",
    )
    .unwrap();

    let config = Config::load(dir.path(), None).unwrap();
    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(config.memory_dir, Some(PathBuf::from("journal")));
    assert_eq!(
        config.layout(dir.path()).memory_dir,
        dir.path().join("journal")
    );
}

#[test]
fn explicit_config_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    let err = Config::load(dir.path(), Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn malformed_config_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("daynote.toml"), "search_limit = \"many\"\n").unwrap();

    let err = Config::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("daynote.toml"));
}
