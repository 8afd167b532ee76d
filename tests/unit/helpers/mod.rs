//! Test helper utilities

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use c2clog::{LogProcessor, ProcessedLog};

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Load a fixture file's contents
pub fn load_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to load fixture: {}", name))
}

/// Run the primary pass over `input`, returning the result and the annotated text
pub fn process_str(input: &str) -> (ProcessedLog, String) {
    let mut processor = LogProcessor::new().with_progress_interval(0);
    let mut out = Vec::new();
    processor
        .process_reader(input.as_bytes(), &mut out)
        .expect("primary pass failed");
    (processor.finish(), String::from_utf8(out).expect("annotated output is UTF-8"))
}

/// Run the primary pass over the BBAI.log fixture
pub fn process_fixture() -> (ProcessedLog, String) {
    process_str(&load_fixture("BBAI.log"))
}

/// Run both passes over the fixtures
pub fn process_fixture_with_evaluations() -> ProcessedLog {
    let (mut log, _) = process_fixture();
    let evaluations = load_fixture("AiEvaluation.log");
    log.process_evaluations(evaluations.as_bytes(), None, 0)
        .expect("evaluation pass failed");
    log
}
