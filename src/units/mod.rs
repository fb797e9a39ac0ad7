//! Creatures, stats, and the roster that owns them.

mod creature;
mod roster;

pub use creature::{Creature, CreatureTemplate, StatValue};
pub use roster::{Roster, SpawnError};
