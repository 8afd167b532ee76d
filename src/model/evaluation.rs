//! AI unit-evaluation traces from the secondary log.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// City name used for evaluations that carry no city context.
pub const NO_CITY: &str = "NO_CITY";

/// One unit evaluation, or one "better unit found" decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitEvaluationRecord {
    pub turn: i32,
    pub player_id: i32,
    pub city_name: String,
    pub unit_type: String,
    pub unit_ai_type: String,
    pub combat_value: i32,
    pub moves: i32,
    pub calculated_value: i32,
    pub is_better_unit: bool,
    pub base_value: Option<i32>,
    pub final_value: Option<i32>,
    pub unit_name: Option<String>,
}

impl UnitEvaluationRecord {
    /// Whether two records describe the same decision, ignoring the turn.
    fn same_decision(&self, other: &Self) -> bool {
        self.player_id == other.player_id
            && self.city_name == other.city_name
            && self.unit_type == other.unit_type
            && self.unit_ai_type == other.unit_ai_type
            && self.calculated_value == other.calculated_value
            && self.is_better_unit == other.is_better_unit
    }
}

/// A unit that became the best known choice for an AI role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestUnitRecord {
    pub unit_ai_type: String,
    pub unit_type: String,
    pub unit_name: String,
    pub first_turn: i32,
    pub final_value: i32,
    pub base_value: i32,
}

/// Everything the evaluation log says about one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerUnitEvaluation {
    pub player_id: i32,
    pub last_turn: Option<i32>,
    pub evaluations: Vec<UnitEvaluationRecord>,
    /// Successive record holders per AI role, each strictly lower than all
    /// earlier ones.
    pub best_units_by_ai_type: BTreeMap<String, Vec<BestUnitRecord>>,
}

impl PlayerUnitEvaluation {
    pub fn new(player_id: i32) -> Self {
        Self {
            player_id,
            last_turn: None,
            evaluations: Vec::new(),
            best_units_by_ai_type: BTreeMap::new(),
        }
    }

    /// Store an evaluation, deduplicating within the current turn.
    ///
    /// While the record's turn equals `last_turn`, an identical decision
    /// already stored is not added again. When the turn moves on the record is
    /// appended without scanning. Returns whether the record was stored.
    pub fn record(&mut self, record: UnitEvaluationRecord) -> bool {
        if self.last_turn == Some(record.turn)
            && self.evaluations.iter().any(|e| e.same_decision(&record))
        {
            return false;
        }
        self.last_turn = Some(record.turn);
        self.evaluations.push(record);
        true
    }

    /// Offer a candidate best unit for its AI role.
    ///
    /// The candidate is kept only if its final value is strictly lower than
    /// every entry already recorded for that role.
    pub fn offer_best_unit(&mut self, candidate: BestUnitRecord) -> bool {
        let holders = self
            .best_units_by_ai_type
            .entry(candidate.unit_ai_type.clone())
            .or_default();
        if holders
            .iter()
            .all(|held| candidate.final_value < held.final_value)
        {
            holders.push(candidate);
            true
        } else {
            false
        }
    }
}
