//! Spell card effects.
//!
//! Playing a card is split in two phases:
//! - `plan`: validate the target against the current state and describe
//!   what will happen as a `Resolution`, without mutating anything
//! - `apply`: carry the resolution out
//!
//! `GameState::play_card` pays for the card between the two, so a refused
//! card never costs anything.
//!
//! ## Targets
//!
//! A card targets either a unit or a cell. Freeze, Strength Up and Action
//! Block need a unit and do nothing on a bare cell (the card is still
//! spent). Meteorite Strike hits a cell. Teleport needs an empty cell.

mod resolver;
mod target;

pub(crate) use resolver::{apply, plan, Resolution};
pub use target::Target;
