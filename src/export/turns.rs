use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;

use super::tables::write_csv;
use crate::model::{GameState, PlayerTurnTiming};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TimingRow<'a> {
    turn: i32,
    player_id: i32,
    player_name: &'a str,
    begin_timestamp: f64,
    end_timestamp: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TurnsRow {
    turns_found: i32,
    elapsed_milliseconds: u64,
    elapsed_seconds: String,
}

/// Turn timings ordered by turn, then player.
pub fn write_timings_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    let mut timings: Vec<&PlayerTurnTiming> = state.turn_timings.iter().collect();
    timings.sort_by_key(|t| (t.turn, t.player_id));
    let rows = timings.into_iter().map(|t| TimingRow {
        turn: t.turn,
        player_id: t.player_id,
        player_name: state
            .players
            .get(&t.player_id)
            .map_or("", |p| p.name.as_str()),
        begin_timestamp: t.begin,
        end_timestamp: t.end,
    });
    write_csv(path, rows)
}

/// Single-row run summary.
pub fn write_turns_csv(path: &Path, state: &GameState, elapsed: Duration) -> Result<PathBuf> {
    let row = TurnsRow {
        turns_found: state.turns_found(),
        elapsed_milliseconds: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        elapsed_seconds: format!("{:.3}", elapsed.as_secs_f64()),
    };
    write_csv(path, [row])
}
