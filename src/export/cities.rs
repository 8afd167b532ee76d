use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::tables::write_csv;
use crate::model::{City, CityTurnData, GameState, OrderKind};

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CityRow<'a> {
    name: &'a str,
    owner_id: i32,
    owner_name: &'a str,
    threat_level: i32,
    threat_highest: i32,
    threat_total: i32,
    population: i32,
    x: i32,
    y: i32,
    founded_turn: Option<i32>,
    current_production: Option<&'a str>,
    workers_have: i32,
    workers_needed: i32,
}

impl<'a> From<&'a City> for CityRow<'a> {
    fn from(city: &'a City) -> Self {
        Self {
            name: &city.name,
            owner_id: city.owner_id,
            owner_name: &city.owner_name,
            threat_level: city.threat_level,
            threat_highest: city.threat_level_highest,
            threat_total: city.threat_level_total,
            population: city.population,
            x: city.x,
            y: city.y,
            founded_turn: city.founded_turn,
            current_production: city.current_production.as_deref(),
            workers_have: city.workers_have,
            workers_needed: city.workers_needed,
        }
    }
}

/// One `City <name>:` snapshot, prefixed with the city it belongs to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct HistoryRow<'a> {
    city: &'a str,
    turn: i32,
    population: Option<i32>,
    production: Option<i32>,
    food_surplus: Option<i32>,
    local_rev_index: Option<i32>,
    maintenance: Option<i32>,
    income: Option<i32>,
    science: Option<i32>,
    espionage: Option<i32>,
    culture: Option<i32>,
    net_happiness: Option<i32>,
    net_health: Option<i32>,
    food_trade_yield: Option<i32>,
    production_trade_yield: Option<i32>,
    commerce_trade_yield: Option<i32>,
    crime: Option<i32>,
    disease: Option<i32>,
    water_pollution: Option<i32>,
    air_pollution: Option<i32>,
    education: Option<i32>,
    flammability: Option<i32>,
    tourism: Option<i32>,
}

impl<'a> HistoryRow<'a> {
    fn new(city: &'a str, data: &CityTurnData) -> Self {
        Self {
            city,
            turn: data.turn,
            population: data.population,
            production: data.production,
            food_surplus: data.food_surplus,
            local_rev_index: data.local_rev_index,
            maintenance: data.maintenance,
            income: data.income,
            science: data.science,
            espionage: data.espionage,
            culture: data.culture,
            net_happiness: data.net_happiness,
            net_health: data.net_health,
            food_trade_yield: data.food_trade_yield,
            production_trade_yield: data.production_trade_yield,
            commerce_trade_yield: data.commerce_trade_yield,
            crime: data.crime,
            disease: data.disease,
            water_pollution: data.water_pollution,
            air_pollution: data.air_pollution,
            education: data.education,
            flammability: data.flammability,
            tourism: data.tourism,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ProducedRow<'a> {
    city: &'a str,
    turn: i32,
    product_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OrderRow<'a> {
    city: &'a str,
    turn: i32,
    order_type: OrderKind,
    #[serde(rename = "AIType")]
    ai_type: &'a str,
    strength: i32,
    priority: i32,
}

/// Cities sorted by owner, then name.
fn sorted_cities(state: &GameState) -> Vec<&City> {
    let mut cities: Vec<&City> = state.cities.values().collect();
    cities.sort_by(|a, b| a.owner_id.cmp(&b.owner_id).then_with(|| a.name.cmp(&b.name)));
    cities
}

/// One row per city.
pub fn write_cities_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    write_csv(path, sorted_cities(state).into_iter().map(CityRow::from))
}

/// Every committed city snapshot, city by city in turn order.
pub fn write_city_history_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    let rows = sorted_cities(state).into_iter().flat_map(|city| {
        let mut history: Vec<&CityTurnData> = city.history.iter().collect();
        history.sort_by_key(|h| h.turn);
        history
            .into_iter()
            .map(move |data| HistoryRow::new(&city.name, data))
    });
    write_csv(path, rows)
}

/// Pushed and completed production, in the order it was seen.
pub fn write_city_produced_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    let rows = sorted_cities(state).into_iter().flat_map(|city| {
        city.produced.iter().map(move |p| ProducedRow {
            city: &city.name,
            turn: p.turn,
            product_name: &p.product_name,
        })
    });
    write_csv(path, rows)
}

/// Tenders and defender requests sent to the central AI.
pub fn write_city_orders_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    let rows = sorted_cities(state).into_iter().flat_map(|city| {
        city.orders_to_central.iter().map(move |o| OrderRow {
            city: &city.name,
            turn: o.turn,
            order_type: o.order_kind,
            ai_type: &o.ai_type,
            strength: o.strength,
            priority: o.priority,
        })
    });
    write_csv(path, rows)
}
