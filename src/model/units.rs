//! Unit inventories reported in `Units:` blocks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCount {
    pub unit_type: String,
    pub unit_ai_type: String,
    pub count: i32,
}

/// Units a player held on one turn, keyed `"<unit type>|<AI type>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitInventory {
    pub player_id: i32,
    pub turn: i32,
    pub units: BTreeMap<String, UnitCount>,
}

impl UnitInventory {
    pub fn new(player_id: i32, turn: i32) -> Self {
        Self {
            player_id,
            turn,
            units: BTreeMap::new(),
        }
    }

    /// Set the count for a unit type and AI role. A repeated pair overwrites.
    pub fn set_count(&mut self, unit_type: &str, unit_ai_type: &str, count: i32) {
        self.units.insert(
            format!("{}|{}", unit_type, unit_ai_type),
            UnitCount {
                unit_type: unit_type.to_string(),
                unit_ai_type: unit_ai_type.to_string(),
                count,
            },
        );
    }

    pub fn total_units(&self) -> i32 {
        self.units.values().map(|u| u.count).sum()
    }
}
