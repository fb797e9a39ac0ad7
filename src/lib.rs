//! # lane-tactics
//!
//! Deterministic simulation core for a lane-based tactical card/creature
//! board game: a four-quadrant grid modelling two opposing boards, a
//! strategy-driven movement/attack resolver, a reversible command engine,
//! and a turn/round scheduler.
//!
//! ## Design Principles
//!
//! 1. **Single-writer mutation**: only the currently executing command
//!    mutates the board; queries and strategy resolution are pure reads.
//!
//! 2. **Everything undoes**: every mutating command records a first-class
//!    undo value during execution and can revert exactly, in reverse
//!    execution order.
//!
//! 3. **Cooperative stepping**: commands are explicit state machines that
//!    suspend between atomic steps, so the presentation layer can animate
//!    and a test harness can drive them with no real time involved.
//!
//! ## Architecture
//!
//! - One global coordinate space, computed once at build time; quadrant
//!   bookkeeping never leaks past the board builder.
//!
//! - Directions resolve in the frame of the field's owner; strategies are
//!   written as if always advancing North.
//!
//! - Persistent maps back the field index, making board snapshots O(1)
//!   clones.
//!
//! ## Modules
//!
//! - `core`: ids, directions, coordinates, sides, deterministic RNG
//! - `board`: validated configs, fields, the runtime grid
//! - `navigate`: query facade used by strategies
//! - `strategy`: movement/attack resolution into paths and attack data
//! - `units`: creatures, stats, the roster
//! - `command`: reversible FIFO command engine
//! - `turns`: turn/round scheduling
//! - `events`: typed synchronous publish/subscribe

pub mod board;
pub mod command;
pub mod core;
pub mod events;
pub mod navigate;
pub mod strategy;
pub mod turns;
pub mod units;

// Re-export commonly used types
pub use crate::core::{BoardSide, Coord, Direction, FieldId, GameRng, GameRngState, Quadrant, UnitId};

pub use crate::board::{
    BoardConfig, BoardDelta, CellSize, Field, FieldType, GridBoard, GridError, QuadrantGrid,
};

pub use crate::navigate::{NavigateError, Navigator};

pub use crate::strategy::{
    AttackData, AttackStrategy, EscapeCondition, MoveStrategy, Path, StrategyContext,
};

pub use crate::units::{Creature, CreatureTemplate, Roster, SpawnError, StatValue};

pub use crate::command::{
    BoardUpdateCommand, CancelToken, Command, CommandContext, CommandError, CommandManager,
    CommandPhase, CommandStatus, CompositeCommand, Hop, MovementCommand, MovementUndo,
};

pub use crate::turns::{TurnEvent, TurnScheduler, TurnSlot};

pub use crate::events::{EventBus, EventHub, FieldEvent};
