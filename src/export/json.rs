use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parser::{LogCategory, ProcessedLog};

/// Pretty-print `value` as JSON into `path`.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let file =
        File::create(path).with_context(|| format!("Failed to create export file: {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to serialize {:?}", path))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write export file: {:?}", path))?;
    Ok(path.to_path_buf())
}

/// Run-level figures for `game_turns_summary.json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTurnsSummary<'a> {
    pub turns_found: i32,
    pub elapsed_milliseconds: u64,
    pub total_lines: usize,
    pub recognized_lines: usize,
    pub evaluation_lines: Option<usize>,
    pub category_counts: &'a BTreeMap<LogCategory, usize>,
    pub player_count: usize,
    pub city_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl<'a> GameTurnsSummary<'a> {
    pub fn new(log: &'a ProcessedLog, elapsed: Duration) -> Self {
        Self {
            turns_found: log.state.turns_found(),
            elapsed_milliseconds: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            total_lines: log.primary.total_lines,
            recognized_lines: log.primary.recognized_lines,
            evaluation_lines: log.evaluation.as_ref().map(|e| e.total_lines),
            category_counts: &log.primary.category_counts,
            player_count: log.state.players.len(),
            city_count: log.state.cities.len(),
            generated_at: Utc::now(),
        }
    }
}
