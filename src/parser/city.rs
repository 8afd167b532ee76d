//! City facts and per-turn city property blocks.
//!
//! Most city information arrives as single lines (threat level, founding,
//! production, tenders). Per-turn yields come as a block:
//!
//! ```text
//! City Lutece:
//!     Population: 5
//!     Production: 12
//!     Criminalité: value(3) change(1)
//! ```
//!
//! A block ends at a blank line, a turn activation, or a header for a
//! different city.

use tracing::{debug, trace, warn};

use super::{capture_i32, capture_str, strip_markup, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::{CityOrder, CityProduction, CityTurnData, GameState, OrderKind};

static_regex!(
    threat_re,
    r"City\s+(\S+)\s+has threat level\s+(\d+)\s+\(highest\s+(\d+),\s+total\s+(\d+)\)"
);
static_regex!(found_re, r"founds new city\s+(\S+)\s+at\s+(\d+),\s+(\d+)");
static_regex!(block_header_re, r"City\s+([^:]+):\s*$");
static_regex!(property_re, r"^\s*(\w[\w\s'\-]+):\s*(-?\d+)");
static_regex!(
    value_change_re,
    r"^\s*(\w[\w\s'\-]+):\s*value\((-?\d+)\)\s*change\((-?\d+)\)"
);
static_regex!(
    production_re,
    r"City\s+(.+?)\s+pushes production of (?:building|unit|project)\s+(.+)"
);
static_regex!(
    tender_re,
    r"City\s+(.+?)\s+pop\s+\d+\s+puts out tenders for\s+(-?\d+)\s+(unit|building)\s+strength of AIType:\s+(\w+)\s+at priority\s+(\d+)"
);
static_regex!(
    workers_re,
    r"Player\s+(\d+),\s*city:\s*(.+?),\s*workers have:\s*(\d+),\s*workers needed:\s*(\d+)"
);
static_regex!(
    built_plural_re,
    r"get message\s*:\s*<font=\d+>Des\s+<color=[^>]+>(.+?)</color>\s+ont été construites par les citoyens de\s+(.+)"
);
static_regex!(
    built_singular_re,
    r"get message\s*:\s*<font=\d+>Une\s+<color=[^>]+>(.+?)</color>\s+a été construite par les citoyens de\s+(.+)"
);
static_regex!(
    built_english_re,
    r"get message\s*:\s*(?:<font=\d+>)?(.+?)\s+has been built by the citizens of\s+(.+)"
);
static_regex!(
    defender_re,
    r"City\s+(.+?)\s+requests\s+(-?\d+)\s+floating defender strength at priority\s+(\d+)"
);

/// AI type recorded for floating defender requests, which name none.
const DEFENDER_AI_TYPE: &str = "AI_UNKNOWN";

type PropertySetter = fn(&mut CityTurnData, i32);
type ValueChangeSetter = fn(&mut CityTurnData, i32, i32);

/// `<label>: <int>` lines inside a city block. French and English labels
/// both appear depending on the game language.
const PROPERTY_LABELS: &[(&str, PropertySetter)] = &[
    ("Population", |d, v| d.population = Some(v)),
    ("Production", |d, v| d.production = Some(v)),
    ("Food surplus", |d, v| d.food_surplus = Some(v)),
    ("Local rev index", |d, v| d.local_rev_index = Some(v)),
    ("Maintenance", |d, v| d.maintenance = Some(v)),
    ("Income", |d, v| d.income = Some(v)),
    ("Science", |d, v| d.science = Some(v)),
    ("Espionage", |d, v| d.espionage = Some(v)),
    ("Culture", |d, v| d.culture = Some(v)),
    ("Net happyness", |d, v| d.net_happiness = Some(v)),
    ("Net health", |d, v| d.net_health = Some(v)),
    ("Food trade yield", |d, v| d.food_trade_yield = Some(v)),
    ("Production trade yield", |d, v| d.production_trade_yield = Some(v)),
    ("Commerce trade yield", |d, v| d.commerce_trade_yield = Some(v)),
    ("Criminalité", |d, v| d.crime = Some(v)),
    ("Crime", |d, v| d.crime = Some(v)),
    ("Maladie", |d, v| d.disease = Some(v)),
    ("Disease", |d, v| d.disease = Some(v)),
    ("Pollution de L'eau", |d, v| d.water_pollution = Some(v)),
    ("Water Pollution", |d, v| d.water_pollution = Some(v)),
    ("Pollution de L'air", |d, v| d.air_pollution = Some(v)),
    ("Air Pollution", |d, v| d.air_pollution = Some(v)),
    ("Education", |d, v| d.education = Some(v)),
    ("Risque d'incendie", |d, v| d.flammability = Some(v)),
    ("Flammability", |d, v| d.flammability = Some(v)),
    ("Tourisme", |d, v| d.tourism = Some(v)),
    ("Tourism", |d, v| d.tourism = Some(v)),
];

/// `<label>: value(<v>) change(<c>)` lines inside a city block.
const VALUE_CHANGE_LABELS: &[(&str, ValueChangeSetter)] = &[
    ("Criminalité", |d, v, c| (d.crime, d.crime_change) = (Some(v), Some(c))),
    ("Crime", |d, v, c| (d.crime, d.crime_change) = (Some(v), Some(c))),
    ("Maladie", |d, v, c| (d.disease, d.disease_change) = (Some(v), Some(c))),
    ("Disease", |d, v, c| (d.disease, d.disease_change) = (Some(v), Some(c))),
    ("Pollution de L'eau", |d, v, c| {
        (d.water_pollution, d.water_pollution_change) = (Some(v), Some(c))
    }),
    ("Water Pollution", |d, v, c| {
        (d.water_pollution, d.water_pollution_change) = (Some(v), Some(c))
    }),
    ("Pollution de L'air", |d, v, c| {
        (d.air_pollution, d.air_pollution_change) = (Some(v), Some(c))
    }),
    ("Air Pollution", |d, v, c| {
        (d.air_pollution, d.air_pollution_change) = (Some(v), Some(c))
    }),
    ("Education", |d, v, c| (d.education, d.education_change) = (Some(v), Some(c))),
    ("Risque d'incendie", |d, v, c| {
        (d.flammability, d.flammability_change) = (Some(v), Some(c))
    }),
    ("Flammability", |d, v, c| {
        (d.flammability, d.flammability_change) = (Some(v), Some(c))
    }),
    ("Tourisme", |d, v, c| (d.tourism, d.tourism_change) = (Some(v), Some(c))),
    ("Tourism", |d, v, c| (d.tourism, d.tourism_change) = (Some(v), Some(c))),
];

/// Block labels the game prints that carry nothing we keep.
const IGNORED_LABELS: &[&str] = &[
    "Unit value",
    "Build value",
    "Building value",
    "Promotion value",
    "Corporation value",
    "Misc value",
    "Tile improvement value",
    "Bonus reveal value",
    "Religion value",
    "Free on first discovery value",
];

fn lookup<T: Copy>(table: &[(&str, T)], label: &str) -> Option<T> {
    table
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, setter)| *setter)
}

/// The city block currently being filled.
#[derive(Debug)]
struct OpenBlock {
    city: String,
    data: CityTurnData,
}

/// Extracts city facts and `City <name>:` property blocks.
#[derive(Debug, Default)]
pub struct CityExtractor {
    open: Option<OpenBlock>,
}

impl CityExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    fn commit(&mut self, state: &mut GameState) {
        if let Some(block) = self.open.take() {
            debug!(city = %block.city, turn = block.data.turn, "city block committed");
            state.city_entry(&block.city).commit_snapshot(block.data);
        }
    }

    fn apply_threat(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = threat_re().captures(text) else {
            return Ok(false);
        };
        let owner = state.active_player_id;
        let city = state.city_entry(capture_str(&caps, 1));
        city.threat_level = capture_i32(&caps, 2, "threat level")?;
        city.threat_level_highest = capture_i32(&caps, 3, "highest threat level")?;
        city.threat_level_total = capture_i32(&caps, 4, "total threat level")?;
        city.owner_id = owner;
        trace!(city = %city.name, level = city.threat_level, "threat level");
        Ok(true)
    }

    fn apply_founding(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = found_re().captures(text) else {
            return Ok(false);
        };
        let name = capture_str(&caps, 1);
        let x = capture_i32(&caps, 2, "city x")?;
        let y = capture_i32(&caps, 3, "city y")?;
        let turn = state.current_turn;
        let owner_id = state.active_player_id;
        let owner_name = state.active_player_name.clone();

        let city = state.city_entry(name);
        city.x = x;
        city.y = y;
        city.founded_turn = Some(turn);
        city.owner_id = owner_id;
        city.owner_name = owner_name;
        state.assign_city(name, owner_id);
        debug!(city = name, x, y, turn, owner_id, "city founded");
        Ok(true)
    }

    fn apply_block(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let text = line.text;
        if let Some(caps) = block_header_re().captures(text) {
            let name = capture_str(&caps, 1);
            if self.open.as_ref().is_some_and(|b| b.city == name) {
                return Ok(true);
            }
            self.commit(state);
            state.city_entry(name);
            self.open = Some(OpenBlock {
                city: name.to_string(),
                data: CityTurnData::new(state.current_turn),
            });
            return Ok(true);
        }

        let Some(block) = self.open.as_mut() else {
            return Ok(false);
        };

        if let Some(caps) = value_change_re().captures(text) {
            let label = capture_str(&caps, 1);
            match lookup(VALUE_CHANGE_LABELS, label) {
                Some(set) => set(
                    &mut block.data,
                    capture_i32(&caps, 2, "city property value")?,
                    capture_i32(&caps, 3, "city property change")?,
                ),
                None => warn!(city = %block.city, label, "unknown city property"),
            }
            return Ok(true);
        }

        if let Some(caps) = property_re().captures(text) {
            let label = capture_str(&caps, 1);
            match lookup(PROPERTY_LABELS, label) {
                Some(set) => set(&mut block.data, capture_i32(&caps, 2, "city property")?),
                None if IGNORED_LABELS.contains(&label) => {}
                None => warn!(city = %block.city, label, "unknown city property"),
            }
            return Ok(true);
        }

        if line.is_blank() || text.contains("setTurnActive") {
            self.commit(state);
            return Ok(true);
        }
        Ok(false)
    }

    fn apply_production(&self, text: &str, state: &mut GameState) -> bool {
        let Some(caps) = production_re().captures(text) else {
            return false;
        };
        let product = capture_str(&caps, 2).trim().to_string();
        let turn = state.current_turn;
        trace!(city = capture_str(&caps, 1), product = %product, "production pushed");
        let city = state.city_entry(capture_str(&caps, 1).trim());
        city.produced.push(CityProduction {
            product_name: product.clone(),
            turn,
        });
        city.current_production = Some(product);
        true
    }

    fn apply_tender(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = tender_re().captures(text) else {
            return Ok(false);
        };
        let order = CityOrder {
            ai_type: capture_str(&caps, 4).to_string(),
            strength: capture_i32(&caps, 2, "tender strength")?,
            priority: capture_i32(&caps, 5, "tender priority")?,
            turn: state.current_turn,
            order_kind: OrderKind::parse(capture_str(&caps, 3)),
        };
        state
            .city_entry(capture_str(&caps, 1))
            .orders_to_central
            .push(order);
        Ok(true)
    }

    fn apply_defender(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = defender_re().captures(text) else {
            return Ok(false);
        };
        let order = CityOrder {
            ai_type: DEFENDER_AI_TYPE.to_string(),
            strength: capture_i32(&caps, 2, "defender strength")?,
            priority: capture_i32(&caps, 3, "defender priority")?,
            turn: state.current_turn,
            order_kind: OrderKind::Unit,
        };
        state
            .city_entry(capture_str(&caps, 1))
            .orders_to_central
            .push(order);
        Ok(true)
    }

    fn apply_workers(&self, text: &str, state: &mut GameState) -> Result<bool, ParseError> {
        let Some(caps) = workers_re().captures(text) else {
            return Ok(false);
        };
        let player_id = capture_i32(&caps, 1, "player id")?;
        let name = capture_str(&caps, 2);
        let city = state.city_entry(name);
        city.workers_have = capture_i32(&caps, 3, "workers have")?;
        city.workers_needed = capture_i32(&caps, 4, "workers needed")?;

        state.active_player_id = player_id;
        state.assign_city(name, player_id);
        Ok(true)
    }

    /// One produced record per completion message, whichever language it is in.
    fn apply_building_completed(&self, text: &str, state: &mut GameState) -> bool {
        let caps = built_plural_re()
            .captures(text)
            .or_else(|| built_singular_re().captures(text))
            .or_else(|| built_english_re().captures(text));
        let Some(caps) = caps else {
            return false;
        };
        let building = strip_markup(capture_str(&caps, 1)).trim().to_string();
        let city_name = strip_markup(capture_str(&caps, 2)).trim().to_string();
        let turn = state.current_turn;
        trace!(city = %city_name, building = %building, "building completed");
        state.city_entry(&city_name).produced.push(CityProduction {
            product_name: building,
            turn,
        });
        true
    }
}

impl Extractor for CityExtractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let text = line.text;
        let mut matched = self.apply_threat(text, state)?;
        matched |= self.apply_founding(text, state)?;
        matched |= self.apply_block(line, state)?;
        matched |= self.apply_production(text, state);
        matched |= self.apply_tender(text, state)?;
        matched |= self.apply_workers(text, state)?;
        matched |= self.apply_building_completed(text, state);
        matched |= self.apply_defender(text, state)?;
        Ok(matched)
    }

    fn finish(&mut self, state: &mut GameState) {
        self.commit(state);
    }
}
