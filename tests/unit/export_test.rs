//! Unit tests for JSON and CSV exports

use std::fs;
use std::time::Duration;

use c2clog::export::{self, export_all, ExportOptions};
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers::process_fixture_with_evaluations;

const ALL: ExportOptions = ExportOptions {
    json: true,
    csv: true,
};

fn read_json(path: &std::path::Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn export_all_writes_every_file() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");

    let written = export_all(&log, &dir, ALL, Duration::from_millis(42)).unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            export::CITIES_FILE,
            export::TIMINGS_FILE,
            export::PLAYERS_FILE,
            export::TURNS_SUMMARY_FILE,
            export::EVALUATIONS_FILE,
            export::PLAYERS_CSV_FILE,
            export::CITIES_CSV_FILE,
            export::CITY_HISTORY_CSV_FILE,
            export::CITY_PRODUCED_CSV_FILE,
            export::CITY_ORDERS_CSV_FILE,
            export::TIMINGS_CSV_FILE,
            export::TURNS_SUMMARY_CSV_FILE,
            export::EVALUATIONS_CSV_FILE,
        ]
    );
    assert!(written.iter().all(|p| p.is_file()));
}

#[test]
fn json_uses_camel_case_keys() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::ZERO).unwrap();

    let cities = read_json(&temp.path().join(export::CITIES_FILE));
    let lutece = cities
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "Lutece")
        .unwrap();
    assert_eq!(lutece["ownerId"], 0);
    assert_eq!(lutece["threatLevelHighest"], 7);
    assert_eq!(lutece["foundedTurn"], 1);

    let timings = read_json(&temp.path().join(export::TIMINGS_FILE));
    assert_eq!(timings.as_array().unwrap().len(), 3);
    assert_eq!(timings[0]["playerId"], 0);
}

#[test]
fn turns_summary_reports_both_passes() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::from_millis(1500)).unwrap();

    let summary = read_json(&temp.path().join(export::TURNS_SUMMARY_FILE));
    assert_eq!(summary["turnsFound"], 3);
    assert_eq!(summary["elapsedMilliseconds"], 1500);
    assert_eq!(summary["totalLines"], 35);
    assert_eq!(summary["evaluationLines"], 14);
    assert_eq!(summary["playerCount"], 2);
    assert_eq!(summary["cityCount"], 2);
    assert!(summary["generatedAt"].is_string());
}

#[test]
fn unit_evaluations_skip_players_without_any() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::ZERO).unwrap();

    let evaluations = read_json(&temp.path().join(export::EVALUATIONS_FILE));
    let players: Vec<i64> = evaluations
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["playerId"].as_i64().unwrap())
        .collect();
    assert_eq!(players, vec![0, 1]);
}

#[test]
fn players_csv_matches_fixture() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::ZERO).unwrap();

    let csv = fs::read_to_string(temp.path().join(export::PLAYERS_CSV_FILE)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Id,Name,IsHuman,Type,Score,Population,Cities,MetPlayers,AtWarWith",
            "0,Alice,true,Human,40,0,1,1,0",
            "1,Bob,true,Human,0,0,1,0,1",
        ]
    );
}

#[test]
fn disabled_exports_write_nothing() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");
    let none = ExportOptions {
        json: false,
        csv: false,
    };

    let written = export_all(&log, &dir, none, Duration::ZERO).unwrap();
    assert!(written.is_empty());
    assert!(!dir.exists());
}

#[test]
fn csv_only_export() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    let csv_only = ExportOptions {
        json: false,
        csv: true,
    };

    let written = export_all(&log, temp.path(), csv_only, Duration::ZERO).unwrap();
    assert_eq!(written.len(), 8);
    assert!(written.iter().all(|p| p.extension().unwrap() == "csv"));
    assert!(!temp.path().join(export::CITIES_FILE).exists());
}

fn read_lines(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn city_csvs_match_fixture() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::ZERO).unwrap();

    let cities = read_lines(&temp.path().join(export::CITIES_CSV_FILE));
    assert_eq!(cities[1], "Lutece,0,Alice,5,7,12,3,10,12,1,Warrior,1,2");
    assert_eq!(cities[2], "Babylon,1,Bob,0,0,0,1,30,8,1,,0,0");

    let history = read_lines(&temp.path().join(export::CITY_HISTORY_CSV_FILE));
    assert_eq!(history.len(), 2);
    assert!(history[1].starts_with("Lutece,1,3,4,"));

    let produced = read_lines(&temp.path().join(export::CITY_PRODUCED_CSV_FILE));
    assert_eq!(produced, vec!["City,Turn,ProductName", "Lutece,1,Warrior"]);

    let orders = read_lines(&temp.path().join(export::CITY_ORDERS_CSV_FILE));
    assert!(orders.is_empty());
}

#[test]
fn timing_and_turn_csvs_match_fixture() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::from_millis(1500)).unwrap();

    let timings = read_lines(&temp.path().join(export::TIMINGS_CSV_FILE));
    assert_eq!(
        timings,
        vec![
            "Turn,PlayerId,PlayerName,BeginTimestamp,EndTimestamp",
            "1,0,Alice,100.0,100.27",
            "1,1,Bob,110.0,110.03",
            "2,0,Alice,120.0,120.02",
        ]
    );

    let turns = read_lines(&temp.path().join(export::TURNS_SUMMARY_CSV_FILE));
    assert_eq!(turns[1], "3,1500,1.500");
}

#[test]
fn unit_evaluations_csv_lists_every_record() {
    let log = process_fixture_with_evaluations();
    let temp = TempDir::new().unwrap();
    export_all(&log, temp.path(), ALL, Duration::ZERO).unwrap();

    let rows = read_lines(&temp.path().join(export::EVALUATIONS_CSV_FILE));
    assert_eq!(rows.len(), 1 + log.evaluation_count());
    assert!(rows.iter().any(|r| r.starts_with("0,1,Lutece,") && r.ends_with(",true,40,50,Warrior")));
}
