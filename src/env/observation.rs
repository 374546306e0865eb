//! Agent-facing observations.

use serde::{Deserialize, Serialize};

use crate::core::Cell;
use crate::state::GameState;

/// What the acting player sees.
///
/// Board vectors are row-major, one entry per cell, 0 for an empty cell.
/// Hands are type ids padded with zeros to the hand capacity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub rows: usize,
    pub cols: usize,
    pub current_player: u8,
    pub action_points: u32,
    /// Total items in the opponent's hand.
    pub opponent_hand: usize,
    pub board_owner: Vec<u8>,
    pub board_health: Vec<u32>,
    pub unit_hand: Vec<u8>,
    pub spell_hand: Vec<u8>,
}

impl Observation {
    /// Snapshot `state` from the acting player's point of view.
    #[must_use]
    pub fn from_state(state: &GameState) -> Self {
        let grid = state.grid();
        let cells = grid.cell_count();
        let mut board_owner = vec![0; cells];
        let mut board_health = vec![0; cells];
        for unit in state.units() {
            if let Some(i) = grid.index_of(unit.cell) {
                board_owner[i] = unit.owner.id();
                board_health[i] = unit.health;
            }
        }

        let player = state.current_player();
        let hand = state.hand(player);
        let capacity = hand.capacity();
        let pad = |mut ids: Vec<u8>| {
            ids.resize(capacity.max(ids.len()), 0);
            ids
        };

        Self {
            rows: grid.rows() as usize,
            cols: grid.cols() as usize,
            current_player: player.id(),
            action_points: state.action_points(),
            opponent_hand: state.hand(player.opponent()).len(),
            board_owner,
            board_health,
            unit_hand: pad(hand.units().map(|k| k.type_id()).collect()),
            spell_hand: pad(hand.spells().map(|s| s.type_id()).collect()),
        }
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        let row = usize::try_from(cell.row).ok().filter(|r| *r < self.rows)?;
        let col = usize::try_from(cell.col).ok().filter(|c| *c < self.cols)?;
        Some(row * self.cols + col)
    }

    /// Owner id on a cell, 0 if empty or off the board.
    #[must_use]
    pub fn owner_at(&self, cell: Cell) -> u8 {
        self.index(cell).map_or(0, |i| self.board_owner[i])
    }

    /// Health on a cell, 0 if empty or off the board.
    #[must_use]
    pub fn health_at(&self, cell: Cell) -> u32 {
        self.index(cell).map_or(0, |i| self.board_health[i])
    }

    /// Length of `to_tensor()`.
    #[must_use]
    pub fn tensor_len(&self) -> usize {
        3 + self.board_owner.len() + self.board_health.len() + self.unit_hand.len() + self.spell_hand.len()
    }

    /// Flatten for a network input.
    ///
    /// Layout: current player, action points, opponent hand size, owners,
    /// healths, unit tokens, spell cards. Values are raw, not normalized.
    #[must_use]
    pub fn to_tensor(&self) -> Vec<f32> {
        let mut tensor = Vec::with_capacity(self.tensor_len());
        tensor.push(f32::from(self.current_player));
        tensor.push(self.action_points as f32);
        tensor.push(self.opponent_hand as f32);
        tensor.extend(self.board_owner.iter().map(|&o| f32::from(o)));
        tensor.extend(self.board_health.iter().map(|&h| h as f32));
        tensor.extend(self.unit_hand.iter().map(|&k| f32::from(k)));
        tensor.extend(self.spell_hand.iter().map(|&s| f32::from(s)));
        tensor
    }

    /// Encode for an out-of-process controller.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}
