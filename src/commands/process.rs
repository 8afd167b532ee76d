//! Process command handler

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use humansize::{format_size, BINARY};

use c2clog::export::{export_all, ExportOptions};
use c2clog::{Config, ProcessedLog};

use super::{evaluation_log, resolve_input, run_evaluations, run_primary};

/// Copy of the evaluation log, written next to the annotated output.
pub const EVALUATION_COPY_FILE: &str = "AiEvaluation_output.txt";

/// Handle the process command.
///
/// Annotates the primary log, runs the evaluation pass when the evaluation
/// log is present, then writes the enabled exports.
#[cfg(not(tarpaulin_include))]
pub fn handle(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json_dir: Option<PathBuf>,
    no_json: bool,
    no_eval: bool,
) -> Result<()> {
    let input = resolve_input(input, config)?;
    let size = fs::metadata(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?
        .len();
    println!("Processing {} ({})", input.display(), format_size(size, BINARY));

    let started = Instant::now();
    let annotated = output.unwrap_or_else(|| config.annotated_log_for(&input));
    let file = File::create(&annotated)
        .with_context(|| format!("Failed to create {}", annotated.display()))?;
    let mut out = BufWriter::new(file);
    let mut log = run_primary(&input, &mut out, config)?;
    out.flush()
        .with_context(|| format!("Failed to write {}", annotated.display()))?;

    if let Some(eval_path) = evaluation_log(&input, config, no_eval) {
        let copy_path = annotated.with_file_name(EVALUATION_COPY_FILE);
        run_evaluations(&mut log, &eval_path, Some(&copy_path), config)?;
    }
    let elapsed = started.elapsed();

    let options = export_options(config, no_json);
    let export_dir = json_dir.unwrap_or_else(|| config.export_dir_for(&annotated));
    let written = export_all(&log, &export_dir, options, elapsed)?;

    print_report(&log, &annotated, &written);
    println!("Done in {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

/// Exports enabled by the config, all off with `--no-json`.
fn export_options(config: &Config, no_json: bool) -> ExportOptions {
    ExportOptions {
        json: !no_json && config.output.export_json,
        csv: !no_json && config.output.export_csv,
    }
}

fn print_report(log: &ProcessedLog, annotated: &Path, written: &[PathBuf]) {
    let state = &log.state;
    println!();
    println!("  Lines:        {}", log.primary.total_lines);
    println!("  Recognized:   {}", log.primary.recognized_lines);
    println!("  Turns:        {}", state.turns_found());
    println!("  Players:      {}", state.players.len());
    println!("  Cities:       {}", state.cities.len());
    if let Some(evaluation) = &log.evaluation {
        println!("  Eval lines:   {}", evaluation.total_lines);
        println!("  Evaluations:  {}", log.evaluation_count());
    }
    println!();
    println!("Annotated log: {}", annotated.display());
    for path in written {
        println!("Exported:      {}", path.display());
    }
}
