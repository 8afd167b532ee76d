//! Unit evaluations and best-unit decisions from `AiEvaluation.log`.
//!
//! This log has no turn markers of its own. Every event is binned to a turn
//! through the timing table built while reading the primary log, so this
//! extractor must only run after that pass has finished.

use tracing::{info, trace, warn};

use super::{capture_i32, capture_str, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::{BestUnitRecord, GameState, Player, UnitEvaluationRecord, NO_CITY};

static_regex!(
    sites_begin_re,
    r"Player (\d+) \(([^)]+)\) begin Update City Sites"
);
static_regex!(sites_end_re, r"Player (\d+) \(([^)]+)\) end Update City Sites");
static_regex!(
    potential_site_re,
    r"Potential best city site \((\d+), (\d+)\) found value is (\d+) \(player modified value to (\d+)\)"
);
static_regex!(found_site_re, r"Found City Site at \((\d+), (\d+)\)");
static_regex!(
    unit_eval_re,
    r"AI Player (\d+) evaluate Value for unit (\S+) as type (\S+), combat value (\d+), moves (\d+), Calculated value (\d+)"
);
static_regex!(
    better_unit_re,
    r"Better AI Unit found for (\S+), type (\S+), ([^,]+), base value (\-?\d+), final value (\-?\d+)"
);
static_regex!(
    not_chosen_re,
    r"AI Unit not chosen \(not better\), type (\S+), ([^,]+), base value (\-?\d+), final value (\-?\d+)"
);
static_regex!(city_search_re, r"City ([^,]+), AI_bestUnitAI searching for (\S+)");

/// Player named by the enclosing `begin Update City Sites` section.
#[derive(Debug)]
struct SitesSection {
    player_id: i32,
    player_name: String,
}

/// Extracts unit evaluations and best-unit decisions.
#[derive(Debug)]
pub struct AiEvaluationExtractor {
    /// Open city-sites section; its player name is given to players first
    /// seen in this log.
    sites: Option<SitesSection>,
    /// City named by the latest `AI_bestUnitAI searching` line.
    current_city: Option<String>,
    /// Number of site lines seen; sites are counted but not stored.
    city_sites: usize,
    lines: usize,
    progress_interval: usize,
}

impl Default for AiEvaluationExtractor {
    fn default() -> Self {
        Self {
            sites: None,
            current_city: None,
            city_sites: 0,
            lines: 0,
            progress_interval: 10_000,
        }
    }
}

impl AiEvaluationExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an overview every `interval` lines; `0` disables it.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    /// City-site lines recognized so far.
    pub fn city_sites_seen(&self) -> usize {
        self.city_sites
    }

    fn player_for<'s>(&self, state: &'s mut GameState, player_id: i32) -> &'s mut Player {
        let name = self
            .sites
            .as_ref()
            .map_or("", |s| s.player_name.as_str());
        state.player_entry(player_id, name)
    }

    fn apply_sites(&mut self, text: &str) -> Result<bool, ParseError> {
        if let Some(caps) = sites_begin_re().captures(text) {
            let section = SitesSection {
                player_id: capture_i32(&caps, 1, "player id")?,
                player_name: capture_str(&caps, 2).to_string(),
            };
            trace!(player_id = section.player_id, "city sites update begins");
            self.sites = Some(section);
            return Ok(true);
        }
        if sites_end_re().is_match(text) {
            self.sites = None;
            return Ok(true);
        }
        if self.sites.is_some()
            && (potential_site_re().is_match(text) || found_site_re().is_match(text))
        {
            self.city_sites += 1;
            return Ok(true);
        }
        Ok(false)
    }

    fn apply_unit_eval(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = unit_eval_re().captures(text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        let record = UnitEvaluationRecord {
            turn: state.turn_for_timestamp(state.last_timestamp),
            player_id,
            city_name: NO_CITY.to_string(),
            unit_type: capture_str(&caps, 2).to_string(),
            unit_ai_type: capture_str(&caps, 3).to_string(),
            combat_value: capture_i32(&caps, 4, "combat value")?,
            moves: capture_i32(&caps, 5, "moves")?,
            calculated_value: capture_i32(&caps, 6, "calculated value")?,
            is_better_unit: false,
            base_value: None,
            final_value: None,
            unit_name: None,
        };
        self.player_for(state, player_id)
            .unit_evaluation
            .record(record);
        Ok(true)
    }

    fn apply_better_unit(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = better_unit_re().captures(text) else {
            return Ok(false);
        };
        let unit_ai_type = capture_str(&caps, 1).to_string();
        let unit_type = capture_str(&caps, 2).to_string();
        let unit_name = capture_str(&caps, 3).to_string();
        let base_value = capture_i32(&caps, 4, "base value")?;
        let final_value = capture_i32(&caps, 5, "final value")?;
        let turn = state.turn_for_timestamp(state.last_timestamp);

        let city_name = self.current_city.as_deref().unwrap_or(NO_CITY);
        let Some(&player_id) = state.city_to_player.get(city_name) else {
            warn!(city = city_name, turn, unit = %unit_type, "no owner known for city, better unit dropped");
            return Ok(false);
        };

        let evaluation = &mut self.player_for(state, player_id).unit_evaluation;
        evaluation.record(UnitEvaluationRecord {
            turn,
            player_id,
            city_name: city_name.to_string(),
            unit_type: unit_type.clone(),
            unit_ai_type: unit_ai_type.clone(),
            combat_value: 0,
            moves: 0,
            calculated_value: final_value,
            is_better_unit: true,
            base_value: Some(base_value),
            final_value: Some(final_value),
            unit_name: Some(unit_name.clone()),
        });
        let improved = evaluation.offer_best_unit(BestUnitRecord {
            unit_ai_type,
            unit_type,
            unit_name,
            first_turn: turn,
            final_value,
            base_value,
        });
        trace!(player_id, turn, final_value, improved, "better unit");
        Ok(true)
    }

    fn log_overview(&self, state: &GameState) {
        info!(lines = self.lines, "evaluation log progress");
        for player in state.players.values() {
            let evaluations = player.unit_evaluation.evaluations.len();
            if evaluations > 0 {
                info!(player_id = player.id, player = %player.name, evaluations, "unit evaluations");
            }
        }
    }
}

impl Extractor for AiEvaluationExtractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        self.lines += 1;
        if self.progress_interval > 0 && self.lines % self.progress_interval == 0 {
            self.log_overview(state);
        }

        let text = line.text;
        if self.apply_sites(text)? {
            return Ok(true);
        }

        if let Some(caps) = city_search_re().captures(text) {
            self.current_city = Some(capture_str(&caps, 1).to_string());
            trace!(city = capture_str(&caps, 1), ai_type = capture_str(&caps, 2), "best unit search");
            return Ok(true);
        }

        if self.apply_unit_eval(text, state)? || self.apply_better_unit(text, state)? {
            return Ok(true);
        }

        Ok(not_chosen_re().is_match(text))
    }
}
