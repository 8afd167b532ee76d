//! Writing the aggregated game model to JSON and CSV files.

mod cities;
mod evaluations;
mod json;
mod players;
mod tables;
mod turns;

pub use cities::{
    write_cities_csv, write_city_history_csv, write_city_orders_csv, write_city_produced_csv,
};
pub use evaluations::write_evaluations_csv;
pub use json::{write_json, GameTurnsSummary};
pub use players::write_players_csv;
pub use tables::write_csv;
pub use turns::{write_timings_csv, write_turns_csv};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

use crate::model::PlayerUnitEvaluation;
use crate::parser::ProcessedLog;

pub const CITIES_FILE: &str = "cities.json";
pub const TIMINGS_FILE: &str = "player_turn_timings.json";
pub const PLAYERS_FILE: &str = "game_data_summary.json";
pub const TURNS_SUMMARY_FILE: &str = "game_turns_summary.json";
pub const EVALUATIONS_FILE: &str = "unit_evaluations.json";
pub const PLAYERS_CSV_FILE: &str = "players_summary.csv";
pub const CITIES_CSV_FILE: &str = "cities.csv";
pub const CITY_HISTORY_CSV_FILE: &str = "city_history.csv";
pub const CITY_PRODUCED_CSV_FILE: &str = "city_produced.csv";
pub const CITY_ORDERS_CSV_FILE: &str = "city_orders.csv";
pub const TIMINGS_CSV_FILE: &str = "player_turn_timings.csv";
pub const TURNS_SUMMARY_CSV_FILE: &str = "game_turns_summary.csv";
pub const EVALUATIONS_CSV_FILE: &str = "unit_evaluations.csv";

/// Which export formats to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub json: bool,
    pub csv: bool,
}

impl ExportOptions {
    pub fn any(&self) -> bool {
        self.json || self.csv
    }
}

/// Write every enabled export into `dir` and return the files written.
pub fn export_all(
    log: &ProcessedLog,
    dir: &Path,
    options: ExportOptions,
    elapsed: Duration,
) -> Result<Vec<PathBuf>> {
    if !options.any() {
        return Ok(Vec::new());
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {:?}", dir))?;

    let state = &log.state;
    let mut written = Vec::new();

    if options.json {
        let cities: Vec<_> = state.cities.values().collect();
        written.push(write_json(&dir.join(CITIES_FILE), &cities)?);
        written.push(write_json(&dir.join(TIMINGS_FILE), &state.turn_timings)?);

        let players: Vec<_> = state.players.values().collect();
        written.push(write_json(&dir.join(PLAYERS_FILE), &players)?);

        let summary = GameTurnsSummary::new(log, elapsed);
        written.push(write_json(&dir.join(TURNS_SUMMARY_FILE), &summary)?);

        let evaluations: Vec<&PlayerUnitEvaluation> = state
            .players
            .values()
            .map(|p| &p.unit_evaluation)
            .filter(|e| !e.evaluations.is_empty() || !e.best_units_by_ai_type.is_empty())
            .collect();
        written.push(write_json(&dir.join(EVALUATIONS_FILE), &evaluations)?);
    }

    if options.csv {
        written.push(write_players_csv(&dir.join(PLAYERS_CSV_FILE), state)?);
        written.push(write_cities_csv(&dir.join(CITIES_CSV_FILE), state)?);
        written.push(write_city_history_csv(&dir.join(CITY_HISTORY_CSV_FILE), state)?);
        written.push(write_city_produced_csv(&dir.join(CITY_PRODUCED_CSV_FILE), state)?);
        written.push(write_city_orders_csv(&dir.join(CITY_ORDERS_CSV_FILE), state)?);
        written.push(write_timings_csv(&dir.join(TIMINGS_CSV_FILE), state)?);
        written.push(write_turns_csv(&dir.join(TURNS_SUMMARY_CSV_FILE), state, elapsed)?);
        written.push(write_evaluations_csv(&dir.join(EVALUATIONS_CSV_FILE), state)?);
    }

    info!(dir = %dir.display(), files = written.len(), "exports written");
    Ok(written)
}
