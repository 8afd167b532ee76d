//! Process command tests
//!
//! Runs the binary against fixture logs in temporary directories.

use std::fs;

use crate::helpers::{fixtures_dir, run_c2clog, temp_fixtures};

const SMALL_LOG: &str = "\
[10.000] Player 0 (Alice) setTurnActive for turn 1
[10.100] Player 0 (Alice) founds new city Lutece at 10, 12
[10.200] City Lutece pushes production of unit Warrior
[10.300] Player 0 (Alice) turn ended
[20.000] Player 1 (Bob) setTurnActive for turn 1
hello world
";

// ============================================================================
// Full run
// ============================================================================

#[test]
fn process_writes_annotated_log_copy_and_exports() {
    let temp = temp_fixtures(&["BBAI.log", "AiEvaluation.log"]);
    let (stdout, stderr, exit_code) = run_c2clog(temp.path(), &["process", "BBAI.log"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let annotated = fs::read_to_string(temp.path().join("BBAI_processed.log")).unwrap();
    assert_eq!(annotated.lines().count(), 35);

    let copy = fs::read_to_string(temp.path().join("AiEvaluation_output.txt")).unwrap();
    let original = fs::read_to_string(fixtures_dir().join("AiEvaluation.log")).unwrap();
    assert_eq!(copy, original);

    let exports = temp.path().join("exports");
    for name in [
        "cities.json",
        "player_turn_timings.json",
        "game_data_summary.json",
        "game_turns_summary.json",
        "unit_evaluations.json",
        "players_summary.csv",
        "cities.csv",
        "city_history.csv",
        "city_produced.csv",
        "city_orders.csv",
        "player_turn_timings.csv",
        "game_turns_summary.csv",
        "unit_evaluations.csv",
    ] {
        assert!(exports.join(name).is_file(), "missing export {name}");
    }

    assert!(stdout.contains("Processing BBAI.log"));
    assert!(stdout.contains("Turns:        3"));
    assert!(stdout.contains("Evaluations:  4"));
    assert!(stdout.contains("Annotated log: BBAI_processed.log"));
}

#[test]
fn annotated_output_prefixes_turn_player_and_category() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(temp.path().join("BBAI.log"), SMALL_LOG).unwrap();

    let (_, stderr, exit_code) = run_c2clog(temp.path(), &["process", "--no-json"]);
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    let annotated = fs::read_to_string(temp.path().join("BBAI_processed.log")).unwrap();
    insta::assert_snapshot!(annotated.trim_end(), @r"
    [1|0|Empire] Player 0 (Alice) setTurnActive for turn 1
    [1|0|City] Player 0 (Alice) founds new city Lutece at 10, 12
    [1|0|City] City Lutece pushes production of unit Warrior
    [1|0|Unknown] Player 0 (Alice) turn ended
    [1|1|Empire] Player 1 (Bob) setTurnActive for turn 1
    [1|1|Unknown] hello world
    ");
    assert!(!temp.path().join("exports").exists());
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn no_eval_skips_the_second_pass() {
    let temp = temp_fixtures(&["BBAI.log", "AiEvaluation.log"]);
    let (stdout, _, exit_code) =
        run_c2clog(temp.path(), &["process", "BBAI.log", "--no-eval"]);
    assert_eq!(exit_code, 0);

    assert!(!temp.path().join("AiEvaluation_output.txt").exists());
    assert!(!stdout.contains("Evaluations:"));

    let summary = fs::read_to_string(temp.path().join("exports/game_turns_summary.json")).unwrap();
    let summary: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert!(summary["evaluationLines"].is_null());
}

#[test]
fn output_and_json_dir_overrides() {
    let temp = temp_fixtures(&["BBAI.log"]);
    let (_, stderr, exit_code) = run_c2clog(
        temp.path(),
        &["process", "BBAI.log", "-o", "annotated.txt", "--json-dir", "out"],
    );
    assert_eq!(exit_code, 0, "stderr: {stderr}");

    assert!(temp.path().join("annotated.txt").is_file());
    assert!(!temp.path().join("BBAI_processed.log").exists());
    assert!(temp.path().join("out/cities.json").is_file());
}

#[test]
fn config_disables_csv_export() {
    let temp = temp_fixtures(&["BBAI.log"]);
    fs::write(
        temp.path().join("c2clog.toml"),
        "[output]\nexport_csv = false\n",
    )
    .unwrap();

    let (_, _, exit_code) = run_c2clog(temp.path(), &["process"]);
    assert_eq!(exit_code, 0);
    assert!(temp.path().join("exports/cities.json").is_file());
    assert!(!temp.path().join("exports/players_summary.csv").exists());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn missing_input_fails() {
    let temp = tempfile::TempDir::new().unwrap();
    let (_, stderr, exit_code) = run_c2clog(temp.path(), &["process", "nope.log"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Log file not found: nope.log"));
}

#[test]
fn unconvertible_number_aborts_and_keeps_partial_output() {
    let temp = tempfile::TempDir::new().unwrap();
    fs::write(
        temp.path().join("BBAI.log"),
        "[1.0] Player 1 (Alice) setTurnActive for turn 1\n\
         [1.1] nothing here\n\
         [1.2] City Paris has threat level 99999999999 (highest 1, total 1)\n\
         [1.3] never reached\n",
    )
    .unwrap();

    let (_, stderr, exit_code) = run_c2clog(temp.path(), &["process"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Line 3"), "stderr: {stderr}");
    assert!(stderr.contains("threat level"));

    let partial = fs::read_to_string(temp.path().join("BBAI_processed.log")).unwrap();
    assert_eq!(partial.lines().count(), 2);
}
