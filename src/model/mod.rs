//! Aggregate game model built from the logs.
//!
//! Everything in here is plain data plus the merge rules that keep it
//! coherent. Extractors in [`crate::parser`] mutate a single [`GameState`]
//! line by line; exporters read the finished state.

mod city;
mod evaluation;
mod player;
mod state;
mod stats;
mod units;

pub use city::{City, CityOrder, CityProduction, CityTurnData, OrderKind};
pub use evaluation::{BestUnitRecord, PlayerUnitEvaluation, UnitEvaluationRecord, NO_CITY};
pub use player::{Player, PlayerKind, PlayerScore, FIRST_NPC_ID};
pub use state::{GameState, PlayerTurnTiming};
pub use stats::{PlayerStats, StatsMerge};
pub use units::{UnitCount, UnitInventory};
