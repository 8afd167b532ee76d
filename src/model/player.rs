//! Players, factions and score history.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::evaluation::PlayerUnitEvaluation;
use super::stats::{PlayerStats, StatsMerge};
use super::units::UnitInventory;

/// Player ids below this are civilizations; the rest are NPC factions.
pub const FIRST_NPC_ID: i32 = 40;

/// Faction classification of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Barbarian,
    Beast,
    Predator,
    Creature,
    Insectoid,
    Neanderthal,
    Npc,
}

/// Name fragments for NPC factions, French and English. First match wins.
const NPC_FRAGMENTS: &[(&[&str], PlayerKind)] = &[
    (&["Barbares", "Barbarian"], PlayerKind::Barbarian),
    (&["Bêtes", "Beast"], PlayerKind::Beast),
    (&["Prédateurs", "Predator"], PlayerKind::Predator),
    (&["Créatures", "Creature"], PlayerKind::Creature),
    (&["Insectoïdes", "Insectoid"], PlayerKind::Insectoid),
    (&["Néanderthaliens", "Neanderthal"], PlayerKind::Neanderthal),
];

impl PlayerKind {
    /// Classify a player from its id and display name.
    pub fn classify(id: i32, name: &str) -> Self {
        if id < FIRST_NPC_ID {
            return PlayerKind::Human;
        }
        NPC_FRAGMENTS
            .iter()
            .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
            .map(|(_, kind)| *kind)
            .unwrap_or(PlayerKind::Npc)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerKind::Human => "Human",
            PlayerKind::Barbarian => "Barbarian",
            PlayerKind::Beast => "Beast",
            PlayerKind::Predator => "Predator",
            PlayerKind::Creature => "Creature",
            PlayerKind::Insectoid => "Insectoid",
            PlayerKind::Neanderthal => "Neanderthal",
            PlayerKind::Npc => "NPC",
        }
    }
}

impl std::fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score breakdown recorded once per score section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerScore {
    pub turn: i32,
    pub population: i32,
    pub territory: i32,
    pub technologies: i32,
    pub wonders: i32,
    pub total: i32,
    pub victory_score: Option<i32>,
    pub economy_avg: Option<i32>,
    pub industry_avg: Option<i32>,
    pub agriculture_avg: Option<i32>,
}

/// A civilization or NPC faction seen in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub is_human: bool,
    #[serde(rename = "type")]
    pub kind: PlayerKind,
    pub current_stats: Option<PlayerStats>,
    pub stats_history: Vec<PlayerStats>,
    pub owned_city_names: Vec<String>,
    pub score_history: Vec<PlayerScore>,
    pub met_players: BTreeSet<i32>,
    pub at_war_with: BTreeSet<i32>,
    pub messages: Vec<String>,
    pub unit_inventories: Vec<UnitInventory>,
    pub unit_evaluation: PlayerUnitEvaluation,
}

impl Player {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            is_human: id < FIRST_NPC_ID,
            kind: PlayerKind::classify(id, &name),
            name,
            current_stats: None,
            stats_history: Vec::new(),
            owned_city_names: Vec::new(),
            score_history: Vec::new(),
            met_players: BTreeSet::new(),
            at_war_with: BTreeSet::new(),
            messages: Vec::new(),
            unit_inventories: Vec::new(),
            unit_evaluation: PlayerUnitEvaluation::new(id),
        }
    }

    /// Merge an incoming stats observation using `mode`.
    ///
    /// `ResetAndAdd` archives a copy of the in-progress record (or of the
    /// incoming one when nothing is in progress) and installs the incoming
    /// record as current. `CompleteOnlyEmpty` fills unobserved fields of both
    /// the current record and the newest history entry.
    pub fn update_stats(&mut self, incoming: PlayerStats, mode: StatsMerge) {
        match mode {
            StatsMerge::ResetAndAdd => {
                let archived = self
                    .current_stats
                    .clone()
                    .unwrap_or_else(|| incoming.clone());
                self.stats_history.push(archived);
                self.current_stats = Some(incoming);
            }
            StatsMerge::CompleteOnlyEmpty => {
                if let Some(current) = self.current_stats.as_mut() {
                    current.fill_missing_from(&incoming);
                }
                if let Some(last) = self.stats_history.last_mut() {
                    last.fill_missing_from(&incoming);
                }
            }
            StatsMerge::Finalize => {}
        }
    }

    /// Record a stats observation for `turn`, choosing the merge mode.
    ///
    /// A record already in progress for the same turn is completed, anything
    /// else starts a new one.
    pub fn observe_stats(&mut self, incoming: PlayerStats, turn: i32) {
        let same_turn = self
            .current_stats
            .as_ref()
            .is_some_and(|current| current.turn == turn);
        let mode = if same_turn {
            StatsMerge::CompleteOnlyEmpty
        } else {
            StatsMerge::ResetAndAdd
        };
        self.update_stats(incoming, mode);
    }

    /// Add a city to the owned list unless it is already there.
    pub fn add_owned_city(&mut self, name: &str) -> bool {
        if self.owned_city_names.iter().any(|c| c == name) {
            return false;
        }
        self.owned_city_names.push(name.to_string());
        true
    }

    /// Population from the in-progress stats record, if observed.
    pub fn latest_population(&self) -> Option<i32> {
        self.current_stats.as_ref().and_then(|s| s.population)
    }
}
