//! Integration tests for logging functionality
//!
//! The global subscriber can be installed once per process, so only
//! `test_file_logging_writes_json` installs one.

use shiftsync::config::LoggingConfig;
use shiftsync::domain::PatientId;
use shiftsync::log_record_created;
use shiftsync::logging::init_logging;
use shiftsync::logging::structured::LOG_FILE_PREFIX;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json_console);
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let config = LoggingConfig {
        local_enabled: false,
        ..LoggingConfig::default()
    };
    let err = init_logging("verbose", &config).unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_invalid_rotation_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = LoggingConfig {
        local_enabled: true,
        local_path: temp_dir.path().to_string_lossy().to_string(),
        local_rotation: "weekly".to_string(),
        json_console: false,
    };
    let err = init_logging("info", &config).unwrap_err();
    assert!(err.to_string().contains("Invalid log rotation"));
}

#[test]
fn test_file_logging_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "hourly".to_string(),
        json_console: false,
    };

    let guard = init_logging("info", &config).unwrap();
    log_record_created!("patient", PatientId::new());
    tracing::info!(target: "shiftsync::integration", "handoff saved");
    // Flushes the non-blocking writer
    drop(guard);

    assert!(log_path.exists());
    let files: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with(LOG_FILE_PREFIX))
        .collect();
    assert_eq!(files.len(), 1);

    let contents = std::fs::read_to_string(files[0].path()).unwrap();
    assert!(contents.contains("Logging initialized"));
    assert!(contents.contains("handoff saved"));
    for line in contents.lines() {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(parsed.get("level").is_some());
    }
}
