//! Step-by-step creature movement with a first-class undo record.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Command, CommandContext, CommandError, CommandPhase, CommandStatus};
use crate::core::{FieldId, UnitId};
use crate::events::FieldEvent;
use crate::strategy::Path;

/// One completed movement step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub from: FieldId,
    pub to: FieldId,
}

/// The undo record of a movement: every successfully vacated field, in
/// execution order. Inspectable for tests and tooling.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementUndo {
    pub hops: Vec<Hop>,
}

/// Walks a creature along a resolved path, one field per step.
///
/// A step whose target has become occupied or has vanished since
/// resolution ends traversal there; the partial move is kept and the
/// command completes normally. That is the expected interruption outcome,
/// not an error.
pub struct MovementCommand {
    unit: UnitId,
    path: Path,
    cursor: usize,
    completed_steps: usize,
    undo: MovementUndo,
    phase: CommandPhase,
    priority: i32,
}

impl MovementCommand {
    /// Create a movement along a resolved path.
    #[must_use]
    pub fn new(unit: UnitId, path: Path) -> Self {
        Self {
            unit,
            path,
            cursor: 1,
            completed_steps: 0,
            undo: MovementUndo::default(),
            phase: CommandPhase::NotStarted,
            priority: 0,
        }
    }

    /// Set the scheduler re-insertion priority (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The creature being moved.
    #[must_use]
    pub fn unit(&self) -> UnitId {
        self.unit
    }

    /// Steps completed so far.
    #[must_use]
    pub fn completed_steps(&self) -> usize {
        self.completed_steps
    }

    /// The undo record accumulated by execution.
    #[must_use]
    pub fn undo_record(&self) -> &MovementUndo {
        &self.undo
    }

    fn move_unit(
        ctx: &mut CommandContext<'_>,
        unit: UnitId,
        from: FieldId,
        to: FieldId,
    ) -> Result<(), CommandError> {
        ctx.board.field_mut(from)?.unassign_creature();
        ctx.events
            .field
            .publish(&FieldEvent::Vacated { field: from, unit });

        let assigned = ctx.board.field_mut(to)?.assign_creature(unit);
        debug_assert!(assigned, "target checked free before the hop");
        ctx.events
            .field
            .publish(&FieldEvent::Occupied { field: to, unit });

        let creature = ctx
            .units
            .get_mut(unit)
            .ok_or(CommandError::UnknownUnit(unit))?;
        creature.set_field(Some(to));
        Ok(())
    }
}

impl Command for MovementCommand {
    fn advance(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        if matches!(self.phase, CommandPhase::Completed) {
            return Ok(CommandStatus::Completed);
        }

        if self.cursor > self.path.step_count() {
            self.phase = CommandPhase::Completed;
            return Ok(CommandStatus::Completed);
        }
        self.phase = CommandPhase::Running {
            step: self.completed_steps,
        };

        let creature = ctx
            .units
            .get(self.unit)
            .ok_or(CommandError::UnknownUnit(self.unit))?;
        let from = creature.field().ok_or(CommandError::UnitOffBoard(self.unit))?;

        // The target may have changed since resolution; check, don't assume.
        let target = self.path.fields()[self.cursor];
        let blocked = match ctx.board.field(target) {
            Ok(field) => field.is_occupied(),
            Err(_) => true,
        };
        if blocked {
            self.phase = CommandPhase::Completed;
            return Ok(CommandStatus::Completed);
        }

        Self::move_unit(ctx, self.unit, from, target)?;
        self.undo.hops.push(Hop { from, to: target });
        self.completed_steps += 1;
        self.cursor += 1;

        if self.cursor > self.path.step_count() {
            self.phase = CommandPhase::Completed;
            Ok(CommandStatus::Completed)
        } else {
            self.phase = CommandPhase::Suspended {
                step: self.completed_steps,
            };
            Ok(CommandStatus::Suspended)
        }
    }

    fn revert(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        match self.phase {
            CommandPhase::Completed | CommandPhase::Reverting { .. } => {}
            CommandPhase::Reverted => return Ok(CommandStatus::Completed),
            _ => return Err(CommandError::NotCompleted),
        }

        let Some(hop) = self.undo.hops.pop() else {
            self.phase = CommandPhase::Reverted;
            return Ok(CommandStatus::Completed);
        };

        let creature = ctx
            .units
            .get(self.unit)
            .ok_or(CommandError::UnknownUnit(self.unit))?;
        let current = creature.field().ok_or(CommandError::UnitOffBoard(self.unit))?;

        // Best-effort compensation: a field someone else now holds, or one
        // that no longer exists, is skipped rather than fought over.
        let restorable = match ctx.board.field(hop.from) {
            Ok(field) => !field.is_occupied(),
            Err(_) => false,
        };
        if restorable {
            Self::move_unit(ctx, self.unit, current, hop.from)?;
        } else {
            warn!(unit = %self.unit, field = %hop.from, "undo target unavailable, step skipped");
        }

        if self.undo.hops.is_empty() {
            self.phase = CommandPhase::Reverted;
            Ok(CommandStatus::Completed)
        } else {
            self.phase = CommandPhase::Reverting {
                step: self.undo.hops.len(),
            };
            Ok(CommandStatus::Suspended)
        }
    }

    fn phase(&self) -> CommandPhase {
        self.phase
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
