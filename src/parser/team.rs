//! Diplomacy: which teams have met and who is at war.

use tracing::{debug, trace};

use super::{capture_i32, capture_str, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::GameState;

static_regex!(met_re, r"Team\s+(\d+).*has met:\s*([^;]*)");
static_regex!(at_war_re, r"at war with:\s*([^;]*)");
static_regex!(
    war_expenses_re,
    r"Team\s+(\d+).*estimating warplan financial costs.*iExtraWarExpenses:\s+(\d+)"
);

/// Numeric ids of a comma separated list; anything else is skipped.
fn parse_id_list(list: &str) -> impl Iterator<Item = i32> + '_ {
    list.split(',').filter_map(|id| id.trim().parse().ok())
}

/// Records met players and wars from the team diplomacy lines.
///
/// Team ids are treated as player ids, which holds for games without
/// permanent alliances.
#[derive(Debug, Default)]
pub struct TeamExtractor;

impl TeamExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for TeamExtractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let text = line.text;
        let mut matched = false;

        if let Some(caps) = met_re().captures(text) {
            let team = capture_i32(&caps, 1, "team id")?;
            if let Some(player) = state.players.get_mut(&team) {
                player.met_players.extend(parse_id_list(capture_str(&caps, 2)));
                trace!(team, met = player.met_players.len(), "met players");
            }
            matched = true;
        }

        if let Some(caps) = at_war_re().captures(text) {
            if let Some(player) = state.active_player_mut() {
                player.at_war_with.extend(parse_id_list(capture_str(&caps, 1)));
            }
            matched = true;
        }

        if let Some(caps) = war_expenses_re().captures(text) {
            let team = capture_i32(&caps, 1, "team id")?;
            let expenses = capture_i32(&caps, 2, "war expenses")?;
            debug!(team, expenses, "warplan financial costs");
            matched = true;
        }

        Ok(matched)
    }
}
