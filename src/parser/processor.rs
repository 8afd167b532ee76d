//! The two-pass driver.
//!
//! [`LogProcessor`] reads the primary BBAI log line by line, runs every
//! extractor and writes one annotated line per input line. Finishing it
//! yields a [`ProcessedLog`], the only value that can run the evaluation
//! pass, so evaluations are always binned against a complete timing table.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::categorize::{categorize, LogCategory};
use super::decode::DecodedLines;
use super::{
    AiEvaluationExtractor, CityExtractor, Extractor, ExtractorChain, LogLine,
    PlayerStatsExtractor, TeamExtractor, TurnTracker, UnitInventoryExtractor,
};
use crate::error::ParseError;
use crate::model::GameState;

/// Default number of lines between progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 10_000;

/// Line counts for one pass over a log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassStats {
    pub total_lines: usize,
    pub timestamped_lines: usize,
    /// Lines at least one extractor recognized.
    pub recognized_lines: usize,
    /// Annotated lines per category; empty for the evaluation pass.
    pub category_counts: BTreeMap<LogCategory, usize>,
}

impl PassStats {
    fn count(&mut self, line: &LogLine<'_>, recognized: bool) {
        self.total_lines += 1;
        if line.timestamp.is_some() {
            self.timestamped_lines += 1;
        }
        if recognized {
            self.recognized_lines += 1;
        }
    }
}

fn open_log(path: &Path) -> Result<BufReader<File>, ParseError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Single pass over the primary log.
pub struct LogProcessor {
    chain: ExtractorChain,
    state: GameState,
    stats: PassStats,
    progress_interval: usize,
}

impl LogProcessor {
    pub fn new() -> Self {
        Self {
            chain: ExtractorChain::new()
                .with(TurnTracker::new())
                .with(PlayerStatsExtractor::new())
                .with(CityExtractor::new())
                .with(UnitInventoryExtractor::new())
                .with(TeamExtractor::new()),
            state: GameState::new(),
            stats: PassStats::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Report progress every `interval` lines; `0` disables it.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// State accumulated so far.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Process one raw line and write its annotated form to `out`.
    pub fn process_line<W: Write>(
        &mut self,
        raw: &str,
        out: &mut W,
    ) -> Result<LogCategory, ParseError> {
        let line = LogLine::parse(raw);
        let line_no = self.stats.total_lines + 1;

        self.state.last_timestamp = line.timestamp;
        let recognized = self
            .chain
            .apply(&line, &mut self.state)
            .map_err(|e| e.at_line(line_no))?;
        if let Some(ts) = line.timestamp {
            self.state.advance_open_timing(ts);
        }

        let category = categorize(line.text);
        writeln!(
            out,
            "[{}|{}|{}] {}",
            self.state.current_turn, self.state.active_player_id, category, line.text
        )
        .map_err(ParseError::Output)?;

        self.stats.count(&line, recognized);
        *self.stats.category_counts.entry(category).or_insert(0) += 1;

        if self.progress_interval > 0 && line_no % self.progress_interval == 0 {
            info!(
                lines = line_no,
                turn = self.state.current_turn,
                players = self.state.players.len(),
                cities = self.state.cities.len(),
                "primary log progress"
            );
        }
        Ok(category)
    }

    /// Process every line of `reader`.
    pub fn process_reader<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        out: &mut W,
    ) -> Result<(), ParseError> {
        for raw in DecodedLines::new(reader) {
            let raw = raw.map_err(ParseError::Read)?;
            self.process_line(&raw, out)?;
        }
        Ok(())
    }

    /// Open `path` and process it.
    pub fn process_file<W: Write>(&mut self, path: &Path, out: &mut W) -> Result<(), ParseError> {
        let reader = open_log(path)?;
        self.process_reader(reader, out)
            .map_err(|e| e.in_file(path))
    }

    /// Flush open sections, close open timings and hand over the state.
    pub fn finish(mut self) -> ProcessedLog {
        self.chain.finish(&mut self.state);
        self.state.close_open_timings();
        info!(
            lines = self.stats.total_lines,
            turns = self.state.turns_found(),
            players = self.state.players.len(),
            cities = self.state.cities.len(),
            "primary log processed"
        );
        ProcessedLog {
            state: self.state,
            primary: self.stats,
            evaluation: None,
        }
    }
}

impl Default for LogProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of the primary pass, ready for the evaluation pass.
#[derive(Debug)]
pub struct ProcessedLog {
    pub state: GameState,
    pub primary: PassStats,
    /// Set once an evaluation log has been processed.
    pub evaluation: Option<PassStats>,
}

impl ProcessedLog {
    /// Run the evaluation log through [`AiEvaluationExtractor`].
    ///
    /// Every line is copied verbatim to `copy` when one is given.
    pub fn process_evaluations<R: BufRead>(
        &mut self,
        reader: R,
        mut copy: Option<&mut dyn Write>,
        progress_interval: usize,
    ) -> Result<&PassStats, ParseError> {
        let mut extractor = AiEvaluationExtractor::new().with_progress_interval(progress_interval);
        let mut stats = PassStats::default();

        for raw in DecodedLines::new(reader) {
            let raw = raw.map_err(ParseError::Read)?;
            let line = LogLine::parse(&raw);
            let line_no = stats.total_lines + 1;

            self.state.last_timestamp = line.timestamp;
            let recognized = extractor
                .apply(&line, &mut self.state)
                .map_err(|e| e.at_line(line_no))?;
            if let Some(out) = copy.as_mut() {
                writeln!(out, "{raw}").map_err(ParseError::Output)?;
            }
            stats.count(&line, recognized);
        }
        extractor.finish(&mut self.state);

        debug!(sites = extractor.city_sites_seen(), "city sites seen");
        info!(
            lines = stats.total_lines,
            recognized = stats.recognized_lines,
            "evaluation log processed"
        );
        Ok(self.evaluation.insert(stats))
    }

    /// Open `path` and run the evaluation pass over it.
    pub fn process_evaluation_file(
        &mut self,
        path: &Path,
        copy: Option<&mut dyn Write>,
        progress_interval: usize,
    ) -> Result<&PassStats, ParseError> {
        let reader = open_log(path)?;
        self.process_evaluations(reader, copy, progress_interval)
            .map_err(|e| e.in_file(path))
    }

    /// Total unit evaluation records across all players.
    pub fn evaluation_count(&self) -> usize {
        self.state
            .players
            .values()
            .map(|p| p.unit_evaluation.evaluations.len())
            .sum()
    }
}
