//! Reversible, step-driven units of board mutation.
//!
//! Mutation happens only inside commands; queries and strategy resolution
//! run freely between them. Execution is cooperative and single-threaded:
//! a command advances one atomic step per `advance` call and suspends in
//! between, which is where the presentation layer animates and where the
//! cancel token is honored. A test harness drives the same state machine
//! call-by-call with no real time involved.
//!
//! ## Phases
//!
//! ```text
//! NotStarted → Running/Suspended(step n) → Completed → Reverting(step n) → Reverted
//! ```
//!
//! `revert` is only legal once `advance` has fully completed, and the
//! manager only reverts commands in reverse execution order.

mod board_update;
mod composite;
mod manager;
mod movement;

pub use board_update::BoardUpdateCommand;
pub use composite::CompositeCommand;
pub use manager::CommandManager;
pub use movement::{Hop, MovementCommand, MovementUndo};

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{GridBoard, GridError};
use crate::core::UnitId;
use crate::events::EventHub;
use crate::units::Roster;

/// What a single `advance`/`revert` call produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    /// More steps remain; the caller may animate, check cancellation, and
    /// call again.
    Suspended,
    /// The command is fully executed (or fully reverted).
    Completed,
}

/// Where a command stands in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandPhase {
    NotStarted,
    Running { step: usize },
    Suspended { step: usize },
    Completed,
    Reverting { step: usize },
    Reverted,
}

/// Errors from command execution.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// A command referenced a creature the roster does not know.
    #[error("{0} is not in the roster")]
    UnknownUnit(UnitId),

    /// A movement command's creature has no field binding.
    #[error("{0} is not on the board")]
    UnitOffBoard(UnitId),

    /// Revert requested before execution completed.
    #[error("command has not completed execution")]
    NotCompleted,

    /// The cancel token was set at a suspension point.
    #[error("command execution cancelled")]
    Cancelled,
}

/// Cooperative cancellation flag, checked at suspension points.
///
/// Single-threaded by design; clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Create an unset token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

/// Everything a command may touch while executing.
///
/// The context is the single-writer gate: only the currently executing
/// command holds it.
pub struct CommandContext<'a> {
    pub board: &'a mut GridBoard,
    pub units: &'a mut Roster,
    pub events: &'a mut EventHub,
    pub cancel: &'a CancelToken,
}

/// A reversible unit of work.
///
/// One atomic step per `advance` call; `Suspended` means more steps
/// remain. `revert` undoes the command step by step in reverse, and is
/// only legal after `advance` returned `Completed`.
pub trait Command {
    /// Apply the next atomic step.
    fn advance(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError>;

    /// Undo the most recent remaining step.
    fn revert(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError>;

    /// Current lifecycle phase.
    fn phase(&self) -> CommandPhase;

    /// Priority consumed by turn-scheduler re-insertion, not by command
    /// ordering: the queue is strictly FIFO.
    fn priority(&self) -> i32 {
        0
    }
}
