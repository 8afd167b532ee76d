//! Turn activation, turn end and the per-turn summary line.

use tracing::{debug, trace};

use super::{capture_i32, capture_str, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::{GameState, PlayerStats};

static_regex!(
    activation_re,
    r"(?i)Player\s+(\d+)\s*\(([^)]+)\)\s*setTurnActive\s*for\s*turn\s+(\d+)"
);
static_regex!(turn_end_re, r"Player\s+(\d+)\s*\(([^)]+)\)\s*turn ended");
static_regex!(
    summary_re,
    r"Player\s+(\d+)\s*\(([^)]+)\)\s*has\s+(\d+)\s+cities,\s+(\d+)\s+pop,\s+(\d+)\s+power,\s+(\d+)\s+tech percent"
);

/// Tracks whose turn it is and when each player's turn began and ended.
///
/// Also owns the one-line `Player N (name) has C cities, P pop, ...` summary,
/// which can appear before or after the activation line of the same turn.
#[derive(Debug, Default)]
pub struct TurnTracker;

impl TurnTracker {
    pub fn new() -> Self {
        Self
    }

    fn apply_activation(&self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = activation_re().captures(line.text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        let name = capture_str(&caps, 2);
        let turn = capture_i32(&caps, 3, "turn")?;

        state.current_turn = turn;
        state.active_player_id = player_id;
        state.active_player_name = name.to_string();
        if let Some(ts) = line.timestamp {
            state.begin_turn_timing(turn, player_id, ts);
        }

        state
            .player_entry(player_id, name)
            .observe_stats(PlayerStats::new(turn, player_id), turn);
        debug!(turn, player_id, player = name, "turn activated");
        Ok(true)
    }

    fn apply_turn_end(&self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = turn_end_re().captures(line.text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        if let Some(ts) = line.timestamp {
            if !state.end_turn_timing(player_id, ts) {
                trace!(player_id, "turn end without a recorded activation");
            }
        }
        Ok(true)
    }

    fn apply_summary(&self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = summary_re().captures(line.text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        let name = capture_str(&caps, 2);
        let turn = state.current_turn;
        let stats = PlayerStats {
            cities: Some(capture_i32(&caps, 3, "cities")?),
            population: Some(capture_i32(&caps, 4, "population")?),
            power: Some(capture_i32(&caps, 5, "power")?),
            tech_percent: Some(capture_i32(&caps, 6, "tech percent")?),
            ..PlayerStats::new(turn, player_id)
        };
        trace!(player_id, turn, "player summary");
        state.player_entry(player_id, name).observe_stats(stats, turn);
        Ok(true)
    }
}

impl Extractor for TurnTracker {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let mut matched = self.apply_activation(line, state)?;
        matched |= self.apply_turn_end(line, state)?;
        matched |= self.apply_summary(line, state)?;
        Ok(matched)
    }
}
