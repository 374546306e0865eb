//! Units: archetypes, base stats, and battlefield instances.
//!
//! - `UnitKind`: the archetype tag, with a static stat table
//! - `Unit`: a live unit with position, health, and status counters

pub mod archetype;
pub mod unit;

pub use archetype::{UnitKind, UnitStats};
pub use unit::{Unit, UnitId};
