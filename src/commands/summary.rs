//! Summary command handler

use std::io;
use std::path::PathBuf;

use anyhow::Result;

use c2clog::model::Player;
use c2clog::{Config, ProcessedLog};

use super::{evaluation_log, resolve_input, run_evaluations, run_primary, truncate_string};

const NAME_WIDTH: usize = 24;

/// Handle the summary command: parse without writing anything and print
/// one row per player.
#[cfg(not(tarpaulin_include))]
pub fn handle(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let input = resolve_input(input, config)?;
    let mut log = run_primary(&input, &mut io::sink(), config)?;
    if let Some(eval_path) = evaluation_log(&input, config, false) {
        run_evaluations(&mut log, &eval_path, None, config)?;
    }
    print!("{}", render(&log));
    Ok(())
}

/// Render the player table and run totals.
pub fn render(log: &ProcessedLog) -> String {
    let state = &log.state;
    let mut out = String::new();
    out.push_str(&format!(
        "{:>4}  {:<width$}  {:<9}  {:>6}  {:>5}  {:>6}  {:>5}\n",
        "ID",
        "NAME",
        "TYPE",
        "CITIES",
        "POP",
        "SCORE",
        "EVALS",
        width = NAME_WIDTH
    ));
    for player in state.players.values() {
        out.push_str(&render_row(player));
    }
    out.push('\n');
    out.push_str(&format!(
        "{} players, {} cities, {} turns, {} lines ({} recognized)",
        state.players.len(),
        state.cities.len(),
        state.turns_found(),
        log.primary.total_lines,
        log.primary.recognized_lines
    ));
    if log.evaluation.is_some() {
        out.push_str(&format!(", {} unit evaluations", log.evaluation_count()));
    }
    out.push('\n');
    out
}

fn render_row(player: &Player) -> String {
    let population = player
        .latest_population()
        .map_or_else(|| "-".to_string(), |p| p.to_string());
    let score = player
        .score_history
        .last()
        .map_or_else(|| "-".to_string(), |s| s.total.to_string());
    format!(
        "{:>4}  {:<width$}  {:<9}  {:>6}  {:>5}  {:>6}  {:>5}\n",
        player.id,
        truncate_string(&player.name, NAME_WIDTH),
        player.kind.as_str(),
        player.owned_city_names.len(),
        population,
        score,
        player.unit_evaluation.evaluations.len(),
        width = NAME_WIDTH
    )
}
