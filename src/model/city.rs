//! Cities and their per-turn history.

use serde::{Deserialize, Serialize};

/// Kind of request a city sends to the central AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    Unit,
    Building,
    Unknown,
}

impl OrderKind {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "unit" => OrderKind::Unit,
            "building" => OrderKind::Building,
            _ => OrderKind::Unknown,
        }
    }
}

/// A tender or defender request put out by a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityOrder {
    pub ai_type: String,
    pub strength: i32,
    pub priority: i32,
    pub turn: i32,
    pub order_kind: OrderKind,
}

/// Something a city started or finished producing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityProduction {
    pub product_name: String,
    pub turn: i32,
}

/// Snapshot of one `City <name>:` property block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityTurnData {
    pub turn: i32,
    pub population: Option<i32>,
    pub production: Option<i32>,
    pub food_surplus: Option<i32>,
    pub local_rev_index: Option<i32>,
    pub maintenance: Option<i32>,
    pub income: Option<i32>,
    pub science: Option<i32>,
    pub espionage: Option<i32>,
    pub culture: Option<i32>,
    pub net_happiness: Option<i32>,
    pub net_health: Option<i32>,
    pub food_trade_yield: Option<i32>,
    pub production_trade_yield: Option<i32>,
    pub commerce_trade_yield: Option<i32>,

    pub crime: Option<i32>,
    pub crime_change: Option<i32>,
    pub disease: Option<i32>,
    pub disease_change: Option<i32>,
    pub water_pollution: Option<i32>,
    pub water_pollution_change: Option<i32>,
    pub air_pollution: Option<i32>,
    pub air_pollution_change: Option<i32>,
    pub education: Option<i32>,
    pub education_change: Option<i32>,
    pub flammability: Option<i32>,
    pub flammability_change: Option<i32>,
    pub tourism: Option<i32>,
    pub tourism_change: Option<i32>,
}

impl CityTurnData {
    pub fn new(turn: i32) -> Self {
        Self {
            turn,
            ..Self::default()
        }
    }
}

/// A city, identified by its exact name.
///
/// Two players founding cities with the same name share one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub name: String,
    /// -1 until an owner is observed.
    pub owner_id: i32,
    pub owner_name: String,
    pub threat_level: i32,
    pub threat_level_highest: i32,
    pub threat_level_total: i32,
    pub x: i32,
    pub y: i32,
    pub population: i32,
    pub founded_turn: Option<i32>,
    /// Last item the city pushed into production.
    pub current_production: Option<String>,
    pub workers_have: i32,
    pub workers_needed: i32,
    pub history: Vec<CityTurnData>,
    pub produced: Vec<CityProduction>,
    pub orders_to_central: Vec<CityOrder>,
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner_id: -1,
            owner_name: String::new(),
            threat_level: 0,
            threat_level_highest: 0,
            threat_level_total: 0,
            x: 0,
            y: 0,
            population: 1,
            founded_turn: None,
            current_production: None,
            workers_have: 0,
            workers_needed: 0,
            history: Vec::new(),
            produced: Vec::new(),
            orders_to_central: Vec::new(),
        }
    }

    /// Append a finished snapshot and sync the city population from it.
    pub fn commit_snapshot(&mut self, snapshot: CityTurnData) {
        if let Some(population) = snapshot.population {
            self.population = population;
        }
        self.history.push(snapshot);
    }
}
