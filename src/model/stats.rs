//! Per-turn player statistics and their merge rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How an incoming stats observation combines with what a player already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsMerge {
    /// Archive the in-progress record and make the incoming one current.
    ResetAndAdd,
    /// Fill fields that are still unobserved, never touching observed ones.
    CompleteOnlyEmpty,
    /// End-of-section hook. Currently leaves every field as is.
    Finalize,
}

/// One player's statistics for one turn.
///
/// Several log lines contribute to the same record, so every numeric field
/// starts as `None` ("not observed yet") and is filled as lines arrive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub turn: i32,
    pub player_id: i32,

    pub cities: Option<i32>,
    pub population: Option<i32>,
    pub power: Option<i32>,
    pub tech_percent: Option<i32>,

    pub gold_rate: Option<i32>,
    pub science_rate: Option<i32>,
    pub culture_rate: Option<i32>,
    pub espionage_rate: Option<i32>,
    pub treasury: Option<i32>,
    pub total_gold_income_self: Option<i32>,
    pub total_gold_income_trade: Option<i32>,

    pub num_units: Option<i32>,
    pub num_selection_groups: Option<i32>,
    pub unit_upkeep: Option<i32>,
    pub unit_supply_cost: Option<i32>,
    pub maintenance_cost: Option<i32>,
    pub civic_upkeep_cost: Option<i32>,
    pub corporate_maintenance: Option<i32>,
    pub inflation_effect: Option<i32>,
    pub in_financial_difficulties: bool,

    pub total_science_output: Option<i32>,
    pub total_espionage_output: Option<i32>,
    pub total_cultural_output: Option<i32>,
    pub total_food_output: Option<i32>,
    pub total_production_output: Option<i32>,
    pub national_rev_index: Option<i32>,
    pub barbarian_units_killed: Option<i32>,
    pub animals_subdued: Option<i32>,

    pub civic_switches: Option<i32>,
    pub total_civics_switched: Option<i32>,
    pub turns_in_anarchy: Option<i32>,
    pub anarchy_percent: Option<f64>,
    pub score: Option<i32>,

    pub civics: BTreeMap<String, String>,
    pub civic_switch_history: Vec<String>,
}

macro_rules! fill_missing {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if $target.$field.is_none() {
                $target.$field = $source.$field;
            }
        )+
    };
}

impl PlayerStats {
    /// Start an empty record for `player_id` on `turn`.
    pub fn new(turn: i32, player_id: i32) -> Self {
        Self {
            turn,
            player_id,
            ..Self::default()
        }
    }

    /// Copy every field that is unobserved here but observed in `source`.
    pub fn fill_missing_from(&mut self, source: &PlayerStats) {
        fill_missing!(
            self,
            source,
            cities,
            population,
            power,
            tech_percent,
            gold_rate,
            science_rate,
            culture_rate,
            espionage_rate,
            treasury,
            total_gold_income_self,
            total_gold_income_trade,
            num_units,
            num_selection_groups,
            unit_upkeep,
            unit_supply_cost,
            maintenance_cost,
            civic_upkeep_cost,
            corporate_maintenance,
            inflation_effect,
            total_science_output,
            total_espionage_output,
            total_cultural_output,
            total_food_output,
            total_production_output,
            national_rev_index,
            barbarian_units_killed,
            animals_subdued,
            civic_switches,
            total_civics_switched,
            turns_in_anarchy,
            anarchy_percent,
            score,
        );
    }
}
