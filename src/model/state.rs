//! The shared aggregate every extractor writes into.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::city::City;
use super::player::Player;

/// When one player's turn was active, in log seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTurnTiming {
    pub turn: i32,
    pub player_id: i32,
    pub begin: f64,
    pub end: Option<f64>,
    /// Set once a "turn ended" marker closed this entry.
    #[serde(skip)]
    pub ended_by_marker: bool,
}

impl PlayerTurnTiming {
    fn contains(&self, timestamp: f64) -> bool {
        match self.end {
            Some(end) => self.begin <= timestamp && timestamp <= end,
            None => false,
        }
    }
}

/// Aggregate model of one game, built in a single pass over the logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_turn: i32,
    /// -1 until the first turn activation.
    pub active_player_id: i32,
    pub active_player_name: String,
    pub players: BTreeMap<i32, Player>,
    pub cities: BTreeMap<String, City>,
    pub city_to_player: BTreeMap<String, i32>,
    pub turn_timings: Vec<PlayerTurnTiming>,
    pub last_timestamp: Option<f64>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_turn: 0,
            active_player_id: -1,
            active_player_name: String::new(),
            players: BTreeMap::new(),
            cities: BTreeMap::new(),
            city_to_player: BTreeMap::new(),
            turn_timings: Vec::new(),
            last_timestamp: None,
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a player, creating it with `name` on first mention.
    pub fn player_entry(&mut self, id: i32, name: &str) -> &mut Player {
        self.players
            .entry(id)
            .or_insert_with(|| Player::new(id, name))
    }

    /// Get a city, creating it on first mention.
    pub fn city_entry(&mut self, name: &str) -> &mut City {
        self.cities
            .entry(name.to_string())
            .or_insert_with(|| City::new(name))
    }

    /// The player whose turn is active, if it has been seen.
    pub fn active_player_mut(&mut self) -> Option<&mut Player> {
        if self.active_player_id < 0 {
            return None;
        }
        self.players.get_mut(&self.active_player_id)
    }

    /// Record that `player_id` owns `city`, updating both lookup directions.
    pub fn assign_city(&mut self, city: &str, player_id: i32) {
        self.city_to_player.insert(city.to_string(), player_id);
        if let Some(player) = self.players.get_mut(&player_id) {
            player.add_owned_city(city);
        }
    }

    /// Open or re-open the timing for `(turn, player_id)`.
    ///
    /// A repeated activation keeps the single entry and moves its begin.
    pub fn begin_turn_timing(&mut self, turn: i32, player_id: i32, timestamp: f64) {
        match self
            .turn_timings
            .iter_mut()
            .find(|t| t.turn == turn && t.player_id == player_id)
        {
            Some(timing) => timing.begin = timestamp,
            None => self.turn_timings.push(PlayerTurnTiming {
                turn,
                player_id,
                begin: timestamp,
                end: None,
                ended_by_marker: false,
            }),
        }
    }

    /// Close the player's most recent timing (highest turn).
    pub fn end_turn_timing(&mut self, player_id: i32, timestamp: f64) -> bool {
        let latest = self
            .turn_timings
            .iter_mut()
            .filter(|t| t.player_id == player_id)
            .max_by_key(|t| t.turn);
        match latest {
            Some(timing) => {
                timing.end = Some(timestamp);
                timing.ended_by_marker = true;
                true
            }
            None => false,
        }
    }

    /// Move the end of the newest timing forward, unless a marker closed it.
    pub fn advance_open_timing(&mut self, timestamp: f64) {
        if let Some(timing) = self.turn_timings.last_mut() {
            if !timing.ended_by_marker {
                timing.end = Some(timestamp);
            }
        }
    }

    /// Give every timing still missing an end the last timestamp of the log.
    pub fn close_open_timings(&mut self) {
        let Some(last) = self.last_timestamp else {
            return;
        };
        for timing in self.turn_timings.iter_mut().filter(|t| t.end.is_none()) {
            timing.end = Some(last);
        }
    }

    /// Find the turn a timestamp belongs to.
    ///
    /// Prefers a recorded interval containing the timestamp, then the timing
    /// with the greatest begin not after it, then the current turn.
    pub fn turn_for_timestamp(&self, timestamp: Option<f64>) -> i32 {
        let Some(ts) = timestamp else {
            return self.current_turn;
        };

        if let Some(timing) = self.turn_timings.iter().find(|t| t.contains(ts)) {
            return timing.turn;
        }

        self.turn_timings
            .iter()
            .filter(|t| t.begin <= ts)
            .fold(None::<&PlayerTurnTiming>, |best, t| match best {
                Some(b) if b.begin >= t.begin => Some(b),
                _ => Some(t),
            })
            .map(|t| t.turn)
            .unwrap_or(self.current_turn)
    }

    /// Highest turn seen plus one, the way the game counts turns played.
    pub fn turns_found(&self) -> i32 {
        self.current_turn + 1
    }
}
