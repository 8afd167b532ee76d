//! Unit tests for config module

use std::fs;
use std::path::{Path, PathBuf};

use c2clog::parser::DEFAULT_PROGRESS_INTERVAL;
use c2clog::Config;
use tempfile::TempDir;

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    assert_eq!(config.input.primary_log, "BBAI.log");
    assert_eq!(config.input.evaluation_log, "AiEvaluation.log");
    assert_eq!(config.output.annotated_log, "BBAI_processed.log");
    assert_eq!(config.output.json_dir, "exports");
    assert!(config.output.export_json);
    assert!(config.output.export_csv);
    assert_eq!(config.processing.progress_interval, DEFAULT_PROGRESS_INTERVAL);
    assert!(config.processing.process_evaluations);
    assert!(config.logging.filter.is_none());
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.logging.filter = Some("c2clog=trace".to_string());
    config.processing.progress_interval = 500;

    let toml_str = config.to_toml().unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn missing_sections_and_fields_use_defaults() {
    let toml_str = r#"
[output]
export_csv = false

[processing]
progress_interval = 0
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert!(!config.output.export_csv);
    assert!(config.output.export_json);
    assert_eq!(config.output.annotated_log, "BBAI_processed.log");
    assert_eq!(config.processing.progress_interval, 0);
    assert!(config.processing.process_evaluations);
    assert_eq!(config.input.primary_log, "BBAI.log");
}

#[test]
fn load_from_missing_file_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load_from(Some(&temp.path().join("none.toml"))).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn save_then_load_from_explicit_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sub").join("config.toml");
    let mut config = Config::default();
    config.input.primary_log = "Game1.log".to_string();

    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(Some(&path)).unwrap(), config);
}

#[test]
fn invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[input]\nprimary_log = \"  \"\n").unwrap();

    let err = Config::load_from(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("input.primary_log"));
}

#[test]
fn malformed_toml_names_the_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    fs::write(&path, "[input\n").unwrap();

    let err = Config::load_from(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn sibling_paths_follow_the_primary_log() {
    let config = Config::default();
    let primary = Path::new("/games/c2c/Logs/BBAI.log");

    assert_eq!(
        config.evaluation_log_for(primary),
        PathBuf::from("/games/c2c/Logs/AiEvaluation.log")
    );
    let annotated = config.annotated_log_for(primary);
    assert_eq!(annotated, PathBuf::from("/games/c2c/Logs/BBAI_processed.log"));
    assert_eq!(
        config.export_dir_for(&annotated),
        PathBuf::from("/games/c2c/Logs/exports")
    );
}

#[test]
fn bare_file_name_resolves_in_current_directory() {
    let config = Config::default();
    assert_eq!(
        config.annotated_log_for(Path::new("BBAI.log")),
        PathBuf::from("BBAI_processed.log")
    );
}
