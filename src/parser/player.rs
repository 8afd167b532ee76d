//! Player statistics, civics, score breakdowns and chat messages.
//!
//! A statistics dump looks like this (timestamps omitted):
//!
//! ```text
//! Player 1 (Alice) stats for turn 42:
//! Gold rate: 30
//! Treasury: 250
//! Is in financial difficulties: no
//! Total turns in anarchy: 2 (1.5%)
//! Current civics:
//!     Gouvernement: Despotisme
//!     Religion: Paganisme
//!
//! Civic switch history:
//!     Turn 12: Despotisme
//!
//! Units:
//! ```
//!
//! Score lines are independent of that dump: they follow a turn activation
//! and end at the first `has met:` line.

use tracing::{debug, trace, warn};

use super::{capture_i32, capture_str, strip_markup, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::{GameState, PlayerScore, PlayerStats, StatsMerge};

static_regex!(label_int_re, r"^(.*?)\s*:\s*(-?\d+)");
static_regex!(
    financial_re,
    r"(?i)^Is in financial difficulties:\s*(yes|no)"
);
static_regex!(
    anarchy_re,
    r"^Total turns in anarchy:\s*(\d+)\s*\(([\d.]+)%\)"
);
static_regex!(civic_re, r"^\s+(.+?):\s+(.+)");
static_regex!(civic_switch_re, r"^\s+(.+)");
static_regex!(
    message_re,
    r"Player\s+(\d+)\s*\([^)]+\)\s*get message\s*:\s*(.*)"
);

static_regex!(score_population_re, r"(\d+)\s+pour population");
static_regex!(score_territory_re, r"(\d+)\s+pour territoire");
static_regex!(score_tech_re, r"(\d+)\s+pour technologies");
static_regex!(score_wonders_re, r"(\d+)\s+pour Merveilles");
static_regex!(score_total_re, r"Score total\s*=\s*(\d+)");
static_regex!(score_victory_re, r"Score si victoire à ce tour\s*=\s*(\d+)");
static_regex!(
    score_summary_re,
    r"Total Score:\s*(\d+), Population Score:\s*(\d+).*Land Score:\s*(\d+), Tech Score:\s*(\d+), Wonder Score:\s*(\d+)"
);
static_regex!(
    score_averages_re,
    r"Economy avg:\s*(\d+),\s*Industry avg:\s*(\d+),\s*Agriculture avg:\s*(\d+)"
);

type StatSetter = fn(&mut PlayerStats, i32);

/// `<label>: <int>` lines of a statistics dump.
const STAT_LABELS: &[(&str, StatSetter)] = &[
    ("Total gold income from self", |s, v| s.total_gold_income_self = Some(v)),
    ("Total gold income from trade agreements", |s, v| s.total_gold_income_trade = Some(v)),
    ("Num units", |s, v| s.num_units = Some(v)),
    ("Num selection groups", |s, v| s.num_selection_groups = Some(v)),
    ("Unit Upkeep (pre inflation)", |s, v| s.unit_upkeep = Some(v)),
    ("Unit supply cost (pre inflation)", |s, v| s.unit_supply_cost = Some(v)),
    ("Maintenance cost (pre inflation)", |s, v| s.maintenance_cost = Some(v)),
    ("Civic upkeep cost (pre inflation)", |s, v| s.civic_upkeep_cost = Some(v)),
    ("Corporate maintenance (pre inflation)", |s, v| s.corporate_maintenance = Some(v)),
    ("Inflation effect", |s, v| s.inflation_effect = Some(v)),
    ("Total science output", |s, v| s.total_science_output = Some(v)),
    ("Total espionage output", |s, v| s.total_espionage_output = Some(v)),
    ("Total cultural output", |s, v| s.total_cultural_output = Some(v)),
    ("Total population", |s, v| s.population = Some(v)),
    ("Total food output", |s, v| s.total_food_output = Some(v)),
    ("Total production output", |s, v| s.total_production_output = Some(v)),
    ("Num cities", |s, v| s.cities = Some(v)),
    ("National rev index", |s, v| s.national_rev_index = Some(v)),
    ("Number of barbarian units killed", |s, v| s.barbarian_units_killed = Some(v)),
    ("Number of animals subdued", |s, v| s.animals_subdued = Some(v)),
    ("Civic switches", |s, v| s.civic_switches = Some(v)),
    ("Total num civics switched", |s, v| s.total_civics_switched = Some(v)),
    ("Gold rate", |s, v| s.gold_rate = Some(v)),
    ("Science rate", |s, v| s.science_rate = Some(v)),
    ("Espionage rate", |s, v| s.espionage_rate = Some(v)),
    ("Culture rate", |s, v| s.culture_rate = Some(v)),
    ("Treasury", |s, v| s.treasury = Some(v)),
    ("Total turns in anarchy", |s, v| s.turns_in_anarchy = Some(v)),
];

fn stat_setter(label: &str) -> Option<StatSetter> {
    STAT_LABELS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, setter)| *setter)
}

/// Where the extractor is inside a statistics dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Section {
    #[default]
    Idle,
    Stats,
    Civics,
    CivicSwitch,
}

/// Score components collected between a turn activation and `has met:`.
#[derive(Debug, Default)]
struct ScoreAccumulator {
    /// Turn the section was opened on; `None` while closed.
    turn: Option<i32>,
    population: Option<i32>,
    territory: Option<i32>,
    technologies: Option<i32>,
    wonders: Option<i32>,
    total: Option<i32>,
    victory: Option<i32>,
    /// One-line summary: total, population, land, tech, wonders.
    summary: Option<[i32; 5]>,
    /// Economy, industry, agriculture.
    averages: Option<[i32; 3]>,
}

impl ScoreAccumulator {
    fn has_data(&self) -> bool {
        self.population.is_some()
            || self.territory.is_some()
            || self.technologies.is_some()
            || self.wonders.is_some()
            || self.total.is_some()
            || self.victory.is_some()
            || self.summary.is_some()
            || self.averages.is_some()
    }

    fn to_score(&self, turn: i32) -> PlayerScore {
        let summary = |i: usize| self.summary.map(|s| s[i]);
        let averages = |i: usize| self.averages.map(|a| a[i]);
        PlayerScore {
            turn,
            population: self.population.or(summary(1)).unwrap_or(0),
            territory: self.territory.or(summary(2)).unwrap_or(0),
            technologies: self.technologies.or(summary(3)).unwrap_or(0),
            wonders: self.wonders.or(summary(4)).unwrap_or(0),
            total: self.total.or(summary(0)).unwrap_or(0),
            victory_score: self.victory,
            economy_avg: averages(0),
            industry_avg: averages(1),
            agriculture_avg: averages(2),
        }
    }

    /// Try every score pattern against `text`.
    fn collect(&mut self, text: &str) -> Result<bool, ParseError> {
        let mut matched = false;
        let singles = [
            (score_population_re(), &mut self.population, "score population"),
            (score_territory_re(), &mut self.territory, "score territory"),
            (score_tech_re(), &mut self.technologies, "score technologies"),
            (score_wonders_re(), &mut self.wonders, "score wonders"),
            (score_total_re(), &mut self.total, "score total"),
            (score_victory_re(), &mut self.victory, "victory score"),
        ];
        for (re, slot, field) in singles {
            if let Some(caps) = re.captures(text) {
                *slot = Some(capture_i32(&caps, 1, field)?);
                matched = true;
            }
        }
        if let Some(caps) = score_summary_re().captures(text) {
            self.summary = Some([
                capture_i32(&caps, 1, "total score")?,
                capture_i32(&caps, 2, "population score")?,
                capture_i32(&caps, 3, "land score")?,
                capture_i32(&caps, 4, "tech score")?,
                capture_i32(&caps, 5, "wonder score")?,
            ]);
            matched = true;
        }
        if let Some(caps) = score_averages_re().captures(text) {
            self.averages = Some([
                capture_i32(&caps, 1, "economy avg")?,
                capture_i32(&caps, 2, "industry avg")?,
                capture_i32(&caps, 3, "agriculture avg")?,
            ]);
            matched = true;
        }
        Ok(matched)
    }
}

/// Extracts per-turn player statistics, civics, scores and messages.
#[derive(Debug, Default)]
pub struct PlayerStatsExtractor {
    section: Section,
    score: ScoreAccumulator,
}

impl PlayerStatsExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn enter(&mut self, section: Section) {
        if self.section != section {
            debug!(from = ?self.section, to = ?section, "player section");
        }
        self.section = section;
    }

    /// Section headers. Returns true when the line was a header.
    fn apply_headers(&mut self, line: &LogLine<'_>, state: &mut GameState) -> bool {
        let trimmed = line.trimmed();

        if trimmed.to_lowercase().contains("stats for turn") {
            self.enter(Section::Stats);
            return true;
        }
        if trimmed.starts_with("Civic switch history:") {
            if let Some(player) = state.active_player_mut() {
                if let Some(current) = player.current_stats.clone() {
                    player.update_stats(current, StatsMerge::CompleteOnlyEmpty);
                }
            }
            self.enter(Section::CivicSwitch);
            return true;
        }
        if trimmed == "Units:" && self.section != Section::Idle {
            finalize_active(state);
            self.enter(Section::Idle);
            return true;
        }
        if trimmed.starts_with("Current civics:") {
            finalize_active(state);
            self.enter(Section::Civics);
            return true;
        }
        false
    }

    fn apply_stats_line(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let text = line.trimmed();
        let Some(stats) = state
            .active_player_mut()
            .and_then(|p| p.current_stats.as_mut())
        else {
            return Ok(false);
        };

        if let Some(caps) = financial_re().captures(text) {
            stats.in_financial_difficulties = caps[1].eq_ignore_ascii_case("yes");
            return Ok(true);
        }
        if let Some(caps) = anarchy_re().captures(text) {
            stats.turns_in_anarchy = Some(capture_i32(&caps, 1, "turns in anarchy")?);
            let raw = &caps[2];
            let percent = raw.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                field: "anarchy percent",
                value: raw.to_string(),
            })?;
            stats.anarchy_percent = Some(percent);
            return Ok(true);
        }
        let Some(caps) = label_int_re().captures(text) else {
            return Ok(false);
        };
        let label = capture_str(&caps, 1);
        match stat_setter(label) {
            Some(setter) => {
                let value = capture_i32(&caps, 2, "player stat")?;
                setter(stats, value);
                trace!(label, value, "player stat");
                Ok(true)
            }
            None => {
                warn!(label, line = text, "unknown player stat label");
                Ok(false)
            }
        }
    }

    fn apply_civic_line(&mut self, line: &LogLine<'_>, state: &mut GameState) -> bool {
        if line.is_blank() {
            self.enter(Section::Idle);
            return false;
        }
        let Some(caps) = civic_re().captures(line.text) else {
            return false;
        };
        let Some(stats) = state
            .active_player_mut()
            .and_then(|p| p.current_stats.as_mut())
        else {
            return false;
        };
        stats
            .civics
            .insert(capture_str(&caps, 1).to_string(), capture_str(&caps, 2).to_string());
        true
    }

    fn apply_civic_switch_line(&mut self, line: &LogLine<'_>, state: &mut GameState) -> bool {
        if line.is_blank() {
            self.enter(Section::Idle);
            return false;
        }
        let Some(caps) = civic_switch_re().captures(line.text) else {
            return false;
        };
        let Some(stats) = state
            .active_player_mut()
            .and_then(|p| p.current_stats.as_mut())
        else {
            return false;
        };
        stats.civic_switch_history.push(capture_str(&caps, 1).to_string());
        true
    }

    fn apply_score(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        if line.text.contains("setTurnActive for") && self.score.turn.is_none() {
            self.score.turn = Some(state.current_turn);
        }
        let Some(turn) = self.score.turn else {
            return Ok(false);
        };

        let matched = self.score.collect(line.text)?;
        if !line.text.contains("has met:") {
            return Ok(matched);
        }

        if self.score.has_data() {
            let score = self.score.to_score(turn);
            match state.active_player_mut() {
                Some(player) => {
                    trace!(player_id = player.id, turn, total = score.total, "score recorded");
                    player.score_history.push(score);
                }
                None => warn!(turn, "score section without an active player"),
            }
        }
        self.score = ScoreAccumulator::default();
        Ok(true)
    }

    fn apply_message(&self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = message_re().captures(line.text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        let Some(player) = state.players.get_mut(&player_id) else {
            return Ok(false);
        };
        let message = strip_markup(capture_str(&caps, 2));
        player.messages.push(message.trim().to_string());
        Ok(true)
    }
}

fn finalize_active(state: &mut GameState) {
    if let Some(player) = state.active_player_mut() {
        if let Some(current) = player.current_stats.clone() {
            player.update_stats(current, StatsMerge::Finalize);
        }
    }
}

impl Extractor for PlayerStatsExtractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let mut matched = self.apply_score(line, state)?;
        matched |= self.apply_message(line, state)?;

        if self.apply_headers(line, state) {
            return Ok(true);
        }
        let section_matched = match self.section {
            Section::Idle => false,
            Section::Stats => self.apply_stats_line(line, state)?,
            Section::Civics => self.apply_civic_line(line, state),
            Section::CivicSwitch => self.apply_civic_switch_line(line, state),
        };
        Ok(matched || section_matched)
    }
}
