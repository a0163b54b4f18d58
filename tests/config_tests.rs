//! Configuration system tests

use anyhow::Result;
use std::fs;
use tempfile::TempDir;

use ctoken_indexer::config::IndexerConfig;

fn write_config(temp_dir: &TempDir, content: &str) -> String {
    let path = temp_dir.path().join("indexer.toml");
    fs::write(&path, content).expect("write config");
    path.to_str().expect("utf-8 path").to_string()
}

#[test]
fn defaults_are_valid() {
    let config = IndexerConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.indexer.comptroller_id, "1");
    assert_eq!(config.monitoring.log_level, "info");
}

#[test]
fn loads_full_config_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_config(
        &temp_dir,
        r#"
[feed]
events_path = "./feed/events.ndjson"

[storage.rocksdb]
path = "./state/rocksdb"
enable_compression = false
max_open_files = 500
write_buffer_size_mb = 32
max_write_buffer_number = 2
block_cache_size_mb = 128

[monitoring]
log_level = "debug"
structured_logging = true

[indexer]
comptroller_id = "main"
"#,
    );

    let config = IndexerConfig::from_file(&path)?;
    assert_eq!(config.feed.events_path, std::path::PathBuf::from("./feed/events.ndjson"));
    assert!(!config.storage.rocksdb.enable_compression);
    assert_eq!(config.storage.rocksdb.max_open_files, 500);
    assert_eq!(config.monitoring.log_level, "debug");
    assert!(config.monitoring.structured_logging);
    assert_eq!(config.indexer.comptroller_id, "main");
    Ok(())
}

#[test]
fn partial_config_falls_back_to_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_config(
        &temp_dir,
        r#"
[monitoring]
log_level = "trace"
"#,
    );

    let config = IndexerConfig::from_file(&path)?;
    assert_eq!(config.monitoring.log_level, "trace");
    assert_eq!(config.indexer.comptroller_id, "1");
    assert_eq!(config.storage.rocksdb.max_open_files, 1000);
    Ok(())
}

#[test]
fn rejects_out_of_range_storage_settings() {
    let temp_dir = TempDir::new().expect("temp dir");
    let path = write_config(
        &temp_dir,
        r#"
[storage.rocksdb]
max_open_files = 5
"#,
    );

    assert!(IndexerConfig::from_file(&path).is_err());
}

#[test]
fn rejects_empty_comptroller_id() {
    let mut config = IndexerConfig::default();
    config.indexer.comptroller_id = String::new();
    assert!(config.validate().is_err());
}
