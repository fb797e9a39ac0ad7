//! Typed synchronous publish/subscribe.
//!
//! Subscribers are plain closures invoked synchronously, in subscription
//! order, with no return value. The presentation layer hangs off these
//! buses; the core never waits on a subscriber.

mod bus;

pub use bus::EventBus;

use serde::{Deserialize, Serialize};

use crate::board::BoardDelta;
use crate::core::{FieldId, UnitId};

/// A change to a single field's occupancy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldEvent {
    /// A creature stepped onto a field.
    Occupied { field: FieldId, unit: UnitId },
    /// A creature left a field.
    Vacated { field: FieldId, unit: UnitId },
}

/// The buses handed to commands.
///
/// Board deltas fire once per successful board change, synchronously
/// within the command that caused them.
#[derive(Default)]
pub struct EventHub {
    pub board: EventBus<BoardDelta>,
    pub field: EventBus<FieldEvent>,
}

impl EventHub {
    /// Create a hub with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
