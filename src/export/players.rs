use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::tables::write_csv;
use crate::model::{GameState, Player};

/// One row of `players_summary.csv`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct PlayerRow<'a> {
    id: i32,
    name: &'a str,
    is_human: bool,
    #[serde(rename = "Type")]
    kind: &'static str,
    score: i32,
    population: i32,
    cities: usize,
    met_players: usize,
    at_war_with: usize,
}

impl<'a> From<&'a Player> for PlayerRow<'a> {
    fn from(player: &'a Player) -> Self {
        Self {
            id: player.id,
            name: &player.name,
            is_human: player.is_human,
            kind: player.kind.as_str(),
            score: player.score_history.last().map_or(0, |s| s.total),
            population: player.latest_population().unwrap_or(0),
            cities: player.owned_city_names.len(),
            met_players: player.met_players.len(),
            at_war_with: player.at_war_with.len(),
        }
    }
}

/// Write one summary row per player, in id order.
pub fn write_players_csv(path: &Path, state: &GameState) -> Result<PathBuf> {
    write_csv(path, state.players.values().map(PlayerRow::from))
}
