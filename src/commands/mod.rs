//! Command handlers for the c2clog CLI.
//!
//! Each submodule handles a specific CLI command or command group.
//! The main dispatch logic remains in main.rs.

pub mod completions;
pub mod config;
pub mod process;
pub mod summary;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::info;

use c2clog::{Config, LogProcessor, ProcessedLog};

/// Truncate a string to a maximum length, adding ellipsis if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Resolve the primary log: the given path, or the configured name in the
/// current directory.
pub fn resolve_input(input: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    let path = input.unwrap_or_else(|| PathBuf::from(&config.input.primary_log));
    if !path.is_file() {
        bail!("Log file not found: {}", path.display());
    }
    Ok(path)
}

/// Evaluation log to process for `input`, if enabled and present.
pub fn evaluation_log(input: &Path, config: &Config, skip: bool) -> Option<PathBuf> {
    if skip || !config.processing.process_evaluations {
        return None;
    }
    let path = config.evaluation_log_for(input);
    if path.is_file() {
        Some(path)
    } else {
        info!(path = %path.display(), "no evaluation log, skipping second pass");
        None
    }
}

/// Run the primary pass over `input`, annotating into `out`.
pub fn run_primary<W: Write>(input: &Path, out: &mut W, config: &Config) -> Result<ProcessedLog> {
    let mut processor =
        LogProcessor::new().with_progress_interval(config.processing.progress_interval);
    processor.process_file(input, out)?;
    Ok(processor.finish())
}

/// Run the evaluation pass, copying each line to `copy_path` when given.
pub fn run_evaluations(
    log: &mut ProcessedLog,
    path: &Path,
    copy_path: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let interval = config.processing.progress_interval;
    match copy_path {
        Some(copy_path) => {
            let file = File::create(copy_path)
                .with_context(|| format!("Failed to create {}", copy_path.display()))?;
            let mut copy = BufWriter::new(file);
            log.process_evaluation_file(path, Some(&mut copy as &mut dyn Write), interval)?;
            copy.flush()
                .with_context(|| format!("Failed to write {}", copy_path.display()))?;
        }
        None => {
            log.process_evaluation_file(path, None, interval)?;
        }
    }
    Ok(())
}
