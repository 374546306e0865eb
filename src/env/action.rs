//! Agent-facing actions.
//!
//! An agent speaks in `(kind, index, row, col)` tuples. `index` picks a unit
//! from the live unit list (Move, Attack), a unit token from the acting
//! player's hand (Deploy) or a spell card from it (PlayCard). `row`/`col` is
//! the target cell and is ignored by EndTurn and the draws.
//!
//! `ActionSpace` flattens the tuples into a single integer for policies with
//! a discrete output head:
//!
//! ```text
//! flat = ((kind * max_index + index) * rows + row) * cols + col
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::SpellKind;
use crate::core::{ActionError, Cell, Grid};
use crate::effects::Target;
use crate::state::{DeckKind, GameState};
use crate::units::{UnitId, UnitKind};

/// Action kinds with their wire ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum ActionKind {
    Move = 0,
    Deploy = 1,
    PlayCard = 2,
    EndTurn = 3,
    Attack = 4,
    DrawSpell = 5,
    DrawUnit = 6,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Move,
        ActionKind::Deploy,
        ActionKind::PlayCard,
        ActionKind::EndTurn,
        ActionKind::Attack,
        ActionKind::DrawSpell,
        ActionKind::DrawUnit,
    ];

    pub const COUNT: usize = Self::ALL.len();

    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Whether `index` and the target cell mean anything for this kind.
    #[must_use]
    pub const fn is_targeted(self) -> bool {
        !matches!(self, ActionKind::EndTurn | ActionKind::DrawSpell | ActionKind::DrawUnit)
    }
}

impl TryFrom<u8> for ActionKind {
    type Error = EnvError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        ActionKind::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(EnvError::UnknownActionKind(id))
    }
}

/// Adapter-level failures. Unlike `ActionError` these mean the agent sent
/// something that doesn't name an action at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum EnvError {
    #[error("unknown action kind {0}")]
    UnknownActionKind(u8),

    #[error("index {index} out of range for {kind:?}")]
    IndexOutOfRange { kind: ActionKind, index: usize },

    #[error("flat action {0} is outside the action space")]
    FlatIndexOutOfRange(usize),
}

/// One agent action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameAction {
    pub kind: ActionKind,
    pub index: usize,
    pub row: i32,
    pub col: i32,
}

impl GameAction {
    #[must_use]
    pub const fn new(kind: ActionKind, index: usize, row: i32, col: i32) -> Self {
        Self { kind, index, row, col }
    }

    const fn targeted(kind: ActionKind, index: usize, cell: Cell) -> Self {
        Self::new(kind, index, cell.row, cell.col)
    }

    /// Move unit `index` (live unit list) to `cell`.
    #[must_use]
    pub const fn move_unit(index: usize, cell: Cell) -> Self {
        Self::targeted(ActionKind::Move, index, cell)
    }

    /// Deploy unit token `index` onto `cell`.
    #[must_use]
    pub const fn deploy(index: usize, cell: Cell) -> Self {
        Self::targeted(ActionKind::Deploy, index, cell)
    }

    /// Play spell card `index` at `cell`.
    #[must_use]
    pub const fn play_card(index: usize, cell: Cell) -> Self {
        Self::targeted(ActionKind::PlayCard, index, cell)
    }

    /// Attack with unit `index` (live unit list) at the unit on `cell`.
    #[must_use]
    pub const fn attack(index: usize, cell: Cell) -> Self {
        Self::targeted(ActionKind::Attack, index, cell)
    }

    #[must_use]
    pub const fn end_turn() -> Self {
        Self::new(ActionKind::EndTurn, 0, 0, 0)
    }

    #[must_use]
    pub const fn draw_spell() -> Self {
        Self::new(ActionKind::DrawSpell, 0, 0, 0)
    }

    #[must_use]
    pub const fn draw_unit() -> Self {
        Self::new(ActionKind::DrawUnit, 0, 0, 0)
    }

    /// The target cell.
    #[must_use]
    pub const fn cell(&self) -> Cell {
        Cell::new(self.row, self.col)
    }

    /// Zero the fields this kind ignores, so equal actions compare equal.
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.kind.is_targeted() {
            self
        } else {
            Self::new(self.kind, 0, 0, 0)
        }
    }

    /// Bind the action to concrete units and hand items in `state`.
    ///
    /// Fails only when `index` doesn't name anything; whether the resulting
    /// command is legal is decided when it runs.
    pub fn resolve(&self, state: &GameState) -> Result<Command, EnvError> {
        let out_of_range = EnvError::IndexOutOfRange {
            kind: self.kind,
            index: self.index,
        };
        let cell = self.cell();
        let hand = state.hand(state.current_player());

        let command = match self.kind {
            ActionKind::Move => Command::Move {
                unit: state.unit_at_index(self.index).ok_or(out_of_range)?.id,
                goal: cell,
            },
            ActionKind::Attack => Command::Attack {
                attacker: state.unit_at_index(self.index).ok_or(out_of_range)?.id,
                target: cell,
            },
            ActionKind::Deploy => Command::Deploy {
                kind: hand.unit(self.index).ok_or(out_of_range)?,
                cell,
            },
            ActionKind::PlayCard => Command::PlayCard {
                spell: hand.spell(self.index).ok_or(out_of_range)?,
                target: Target::at(state, cell),
            },
            ActionKind::EndTurn => Command::EndTurn,
            ActionKind::DrawSpell => Command::Draw(DeckKind::Spell),
            ActionKind::DrawUnit => Command::Draw(DeckKind::Unit),
        };
        Ok(command)
    }
}

/// An action bound to a specific state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move { unit: UnitId, goal: Cell },
    Attack { attacker: UnitId, target: Cell },
    Deploy { kind: UnitKind, cell: Cell },
    PlayCard { spell: SpellKind, target: Target },
    Draw(DeckKind),
    EndTurn,
}

impl Command {
    /// Run the command. Teleport played through here uses the random
    /// friendly-unit fallback.
    pub fn execute(self, state: &mut GameState) -> Result<(), ActionError> {
        match self {
            Command::Move { unit, goal } => state.move_unit(unit, goal).map(drop),
            Command::Attack { attacker, target } => {
                let target = state.unit_at(target).ok_or(ActionError::InvalidTarget)?.id;
                state.attack_unit(attacker, target).map(drop)
            }
            Command::Deploy { kind, cell } => state.deploy_unit(kind, cell).map(drop),
            Command::PlayCard { spell, target } => state.play_card(spell, target, None),
            Command::Draw(deck) => state.draw_card(deck).map(drop),
            Command::EndTurn => state.end_turn(),
        }
    }
}

/// Flat integer encoding of `GameAction`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    rows: usize,
    cols: usize,
    max_index: usize,
}

impl ActionSpace {
    /// Largest `index` (exclusive) representable in the flat encoding.
    pub const DEFAULT_MAX_INDEX: usize = 20;

    #[must_use]
    pub fn new(grid: &Grid) -> Self {
        Self::with_max_index(grid, Self::DEFAULT_MAX_INDEX)
    }

    #[must_use]
    pub fn with_max_index(grid: &Grid, max_index: usize) -> Self {
        Self {
            rows: grid.rows() as usize,
            cols: grid.cols() as usize,
            max_index,
        }
    }

    #[must_use]
    pub fn max_index(&self) -> usize {
        self.max_index
    }

    /// Number of flat actions.
    #[must_use]
    pub fn size(&self) -> usize {
        ActionKind::COUNT * self.max_index * self.rows * self.cols
    }

    /// Flatten an action. `None` if any field is outside the space.
    #[must_use]
    pub fn encode(&self, action: &GameAction) -> Option<usize> {
        let action = action.normalized();
        let row = usize::try_from(action.row).ok().filter(|r| *r < self.rows)?;
        let col = usize::try_from(action.col).ok().filter(|c| *c < self.cols)?;
        if action.index >= self.max_index {
            return None;
        }
        let kind = usize::from(action.kind.id());
        Some(((kind * self.max_index + action.index) * self.rows + row) * self.cols + col)
    }

    /// Expand a flat index back into an action.
    pub fn decode(&self, flat: usize) -> Result<GameAction, EnvError> {
        if flat >= self.size() {
            return Err(EnvError::FlatIndexOutOfRange(flat));
        }
        let col = flat % self.cols;
        let rest = flat / self.cols;
        let row = rest % self.rows;
        let rest = rest / self.rows;
        let index = rest % self.max_index;
        let kind = rest / self.max_index;

        // kind < COUNT because flat < size.
        let kind = ActionKind::try_from(kind as u8)?;
        Ok(GameAction::new(kind, index, row as i32, col as i32))
    }
}
