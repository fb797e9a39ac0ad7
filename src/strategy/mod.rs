//! Movement and attack resolution.

mod attack;
mod movement;
mod path;

pub use attack::AttackStrategy;
pub use movement::{EscapeCondition, MoveStrategy, StrategyContext};
pub use path::{AttackData, Path};
