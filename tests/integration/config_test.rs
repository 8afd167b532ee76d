//! Config command tests

use std::fs;

use crate::helpers::{isolated_config, run_c2clog};

#[test]
fn show_prints_defaults_when_no_file_exists() {
    let temp = tempfile::TempDir::new().unwrap();
    let (stdout, _, exit_code) = run_c2clog(temp.path(), &["config", "show"]);
    assert_eq!(exit_code, 0);

    assert!(stdout.lines().next().unwrap().ends_with("(not found, defaults)"));
    assert!(stdout.contains("[input]"));
    assert!(stdout.contains("primary_log = \"BBAI.log\""));
    assert!(stdout.contains("progress_interval = 10000"));
}

#[test]
fn init_writes_once_and_show_reads_it_back() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = isolated_config(temp.path());

    let (stdout, _, exit_code) = run_c2clog(temp.path(), &["config", "init"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.starts_with("Wrote default config to"));
    assert!(path.is_file());

    fs::write(&path, "[input]\nprimary_log = \"Game.log\"\n").unwrap();
    let (stdout, _, _) = run_c2clog(temp.path(), &["config", "init"]);
    assert!(stdout.starts_with("Config already exists"));

    let (stdout, _, _) = run_c2clog(temp.path(), &["config", "show"]);
    assert!(stdout.contains("primary_log = \"Game.log\""));
    assert!(stdout.contains("evaluation_log = \"AiEvaluation.log\""));
}

#[test]
fn invalid_config_fails_processing() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(
        isolated_config(temp.path()),
        "[output]\nannotated_log = \"\"\n",
    )
    .unwrap();

    let (_, stderr, exit_code) = run_c2clog(temp.path(), &["process"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("output.annotated_log must not be empty"));
}
