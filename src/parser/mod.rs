//! Line-by-line extraction of game facts from BBAI and AI evaluation logs.
//!
//! Each extractor implements [`Extractor`]: it sees every normalized line,
//! keeps its own section state, and writes what it recognizes into the shared
//! [`GameState`]. Extractors never see each other; ordering between them is
//! fixed by the [`ExtractorChain`] the processor builds.
//!
//! # Example
//!
//! ```
//! use c2clog::model::GameState;
//! use c2clog::parser::{Extractor, LogLine, TurnTracker};
//!
//! let mut state = GameState::new();
//! let mut turns = TurnTracker::new();
//! let line = LogLine::parse("[12.5] Player 1 (Alice) setTurnActive for turn 3");
//! turns.apply(&line, &mut state)?;
//!
//! assert_eq!(state.current_turn, 3);
//! assert_eq!(state.active_player_id, 1);
//! # Ok::<(), c2clog::ParseError>(())
//! ```

/// Define a function returning a lazily compiled, process-wide regex.
macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static regex::Regex {
            static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
            RE.get_or_init(|| {
                regex::Regex::new($pattern).expect(concat!("valid ", stringify!($name), " regex"))
            })
        }
    };
}

pub mod ai_eval;
pub mod categorize;
pub mod city;
pub mod decode;
pub mod normalize;
pub mod player;
pub mod processor;
pub mod team;
pub mod turn;
pub mod units;

pub use ai_eval::AiEvaluationExtractor;
pub use categorize::{categorize, LogCategory};
pub use city::CityExtractor;
pub use normalize::LogLine;
pub use player::PlayerStatsExtractor;
pub use processor::{LogProcessor, PassStats, ProcessedLog, DEFAULT_PROGRESS_INTERVAL};
pub use team::TeamExtractor;
pub use turn::TurnTracker;
pub use units::UnitInventoryExtractor;

use std::borrow::Cow;

use regex::Captures;

use crate::error::ParseError;
use crate::model::GameState;

/// A stateful recognizer for one family of log lines.
///
/// `apply` is called once per line, in log order. It returns `Ok(true)` when
/// the line contributed to the model (or moved the extractor's section
/// state) and `Ok(false)` when the line was not relevant. Errors are reserved
/// for captured numbers that fail to convert.
pub trait Extractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError>;

    /// Flush any section still open when the stream ends.
    fn finish(&mut self, _state: &mut GameState) {}
}

/// Extractors applied in sequence to every line.
pub struct ExtractorChain {
    extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorChain {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Add an extractor to the end of the chain.
    pub fn with<E: Extractor + 'static>(mut self, extractor: E) -> Self {
        self.extractors.push(Box::new(extractor));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.extractors.len()
    }
}

impl Default for ExtractorChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for ExtractorChain {
    /// Every extractor sees the line, even after an earlier one matched.
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let mut matched = false;
        for extractor in &mut self.extractors {
            matched |= extractor.apply(line, state)?;
        }
        Ok(matched)
    }

    fn finish(&mut self, state: &mut GameState) {
        for extractor in &mut self.extractors {
            extractor.finish(state);
        }
    }
}

/// Convert capture group `index` to an integer.
pub(crate) fn capture_i32(
    caps: &Captures<'_>,
    index: usize,
    field: &'static str,
) -> Result<i32, ParseError> {
    let raw = caps.get(index).map(|m| m.as_str()).unwrap_or_default();
    raw.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field,
        value: raw.to_string(),
    })
}

/// Capture group `index` as trimmed text, empty when the group did not take part.
pub(crate) fn capture_str<'t>(caps: &Captures<'t>, index: usize) -> &'t str {
    caps.get(index).map(|m| m.as_str().trim()).unwrap_or_default()
}

static_regex!(markup_re, r"<font=\d+>|<color=[^>]+>|</color>");

/// Remove the game's `<font=N>` and `<color=..>` chat markup.
pub(crate) fn strip_markup(text: &str) -> Cow<'_, str> {
    markup_re().replace_all(text, "")
}
