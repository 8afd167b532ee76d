//! Per-turn unit inventories.

use tracing::{debug, trace};

use super::{capture_i32, capture_str, Extractor, LogLine};
use crate::error::ParseError;
use crate::model::{GameState, UnitInventory};

static_regex!(units_start_re, r"^\s*Units:");
static_regex!(unit_line_re, r"^\s*(.+?)\s+\((.+?)\):\s*(\d+)");

/// Collects `<type> (<AI type>): <count>` lines between `Units:` and the
/// player's "calculates upgrade" line.
#[derive(Debug, Default)]
pub struct UnitInventoryExtractor {
    open: Option<UnitInventory>,
}

impl UnitInventoryExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Extractor for UnitInventoryExtractor {
    fn apply(&mut self, line: &LogLine<'_>, state: &mut GameState) -> Result<bool, ParseError> {
        let text = line.text;
        if units_start_re().is_match(text) {
            debug!(
                player_id = state.active_player_id,
                turn = state.current_turn,
                "unit inventory opened"
            );
            self.open = Some(UnitInventory::new(state.active_player_id, state.current_turn));
            return Ok(true);
        }

        if text.contains("calculates upgrade") {
            let Some(inventory) = self.open.take() else {
                return Ok(false);
            };
            match state.players.get_mut(&inventory.player_id) {
                Some(player) => {
                    debug!(
                        player_id = inventory.player_id,
                        units = inventory.total_units(),
                        "unit inventory closed"
                    );
                    player.unit_inventories.push(inventory);
                }
                None => trace!(player_id = inventory.player_id, "inventory for unknown player dropped"),
            }
            return Ok(true);
        }

        let Some(inventory) = self.open.as_mut() else {
            return Ok(false);
        };
        if let Some(caps) = unit_line_re().captures(text) {
            let count = capture_i32(&caps, 3, "unit count")?;
            inventory.set_count(capture_str(&caps, 1), capture_str(&caps, 2), count);
            return Ok(true);
        }
        Ok(false)
    }
}
