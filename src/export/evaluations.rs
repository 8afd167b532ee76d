use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::tables::write_csv;
use crate::model::{GameState, UnitEvaluationRecord};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct EvaluationRow<'a> {
    player_id: i32,
    turn: i32,
    city_name: &'a str,
    unit_type: &'a str,
    #[serde(rename = "UnitAIType")]
    unit_ai_type: &'a str,
    combat_value: i32,
    moves: i32,
    calculated_value: i32,
    is_better_unit: bool,
    base_value: Option<i32>,
    final_value: Option<i32>,
    unit_name: Option<&'a str>,
}

impl<'a> From<&'a UnitEvaluationRecord> for EvaluationRow<'a> {
    fn from(record: &'a UnitEvaluationRecord) -> Self {
        Self {
            player_id: record.player_id,
            turn: record.turn,
            city_name: &record.city_name,
            unit_type: &record.unit_type,
            unit_ai_type: &record.unit_ai_type,
            combat_value: record.combat_value,
            moves: record.moves,
            calculated_value: record.calculated_value,
            is_better_unit: record.is_better_unit,
            base_value: record.base_value,
            final_value: record.final_value,
            unit_name: record.unit_name.as_deref(),
        }
    }
}

/// Every stored unit evaluation, player by player.
pub fn write_evaluations_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    let rows = state
        .players
        .values()
        .flat_map(|p| p.unit_evaluation.evaluations.iter())
        .map(EvaluationRow::from);
    write_csv(path, rows)
}
