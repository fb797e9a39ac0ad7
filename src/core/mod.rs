//! Core primitives: ids, directions, coordinates, sides, and RNG.

mod direction;
mod ids;
mod rng;

pub use direction::{BoardSide, Coord, Direction, Quadrant};
pub use ids::{FieldId, UnitId};
pub use rng::{GameRng, GameRngState};
