//! Global subscriber installation.
//!
//! Lives in its own test binary: the subscriber is process-wide, so every
//! assertion about it runs inside a single test.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;

use serde_json::Value;
use subrenamer_host::{
    LOG_FILE_PREFIX, LogFile, LogRotation, LoggingConfig, LoggingError, RenamerPlugin, init,
};
use tempfile::TempDir;
use tracing::Level;

#[test]
fn test_init_writes_json_file_and_refuses_second_install() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_dir = temp_dir.path().join("logs");
    let config = LoggingConfig::default()
        .with_level(Level::DEBUG)
        .with_file(LogFile::new(&log_dir).with_rotation(LogRotation::Never));

    let guard = init(&config).expect("first install succeeds");
    assert!(guard.writes_file());

    // Any naming run emits plugin events.
    let plugin = RenamerPlugin::default();
    plugin.handle_json(r#"{"abi": "current", "file": {"file_name": "x.mkv"}}"#);

    let second = init(&config.without_file());
    assert!(matches!(second, Err(LoggingError::AlreadyInitialized(_))));

    drop(guard);

    let log_file = log_dir.join(LOG_FILE_PREFIX);
    let contents = fs::read_to_string(&log_file).expect("log file written");
    let lines: Vec<Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).expect("JSON log line"))
        .collect();

    assert!(!lines.is_empty());
    assert!(lines.iter().all(|line| {
        line["target"]
            .as_str()
            .is_some_and(|target| target.starts_with("subrenamer_"))
    }));
}
