//! Turn and round scheduling.

mod scheduler;

pub use scheduler::{TurnEvent, TurnScheduler, TurnSlot};
