//! Re-layout the board from a new config, reversibly.

use tracing::warn;

use super::{Command, CommandContext, CommandError, CommandPhase, CommandStatus};
use crate::board::BoardConfig;
use crate::core::{Coord, UnitId};
use crate::events::FieldEvent;

/// Rebuilds the board from a new config and publishes the delta.
///
/// Execution snapshots the previous config; `revert` re-applies it the
/// same way and best-effort re-places any creatures the shrink evicted.
/// An empty config is rejected outright, with nothing applied.
pub struct BoardUpdateCommand {
    new_config: BoardConfig,
    prev_config: Option<BoardConfig>,
    evicted: Vec<(UnitId, Coord)>,
    phase: CommandPhase,
    priority: i32,
}

impl BoardUpdateCommand {
    /// Create a board update toward the given config.
    #[must_use]
    pub fn new(new_config: BoardConfig) -> Self {
        Self {
            new_config,
            prev_config: None,
            evicted: Vec::new(),
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

    /// The creatures the update forced off the board, with where they stood.
    #[must_use]
    pub fn evicted(&self) -> &[(UnitId, Coord)] {
        &self.evicted
    }

    fn apply(
        ctx: &mut CommandContext<'_>,
        config: &BoardConfig,
    ) -> Result<Vec<(UnitId, Coord)>, CommandError> {
        let delta = ctx.board.rebuild(config)?;
        for &(unit, _) in &delta.evicted {
            if let Some(creature) = ctx.units.get_mut(unit) {
                creature.set_field(None);
            }
        }
        let evicted = delta.evicted.clone();
        ctx.events.board.publish(&delta);
        Ok(evicted)
    }
}

impl Command for BoardUpdateCommand {
    fn advance(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        if matches!(self.phase, CommandPhase::Completed) {
            return Ok(CommandStatus::Completed);
        }
        if self.new_config.is_empty() {
            warn!("board update rejected: config has no present cells");
            return Err(CommandError::Grid(crate::board::GridError::EmptyConfig));
        }

        let prev = ctx.board.config().clone();
        self.evicted = Self::apply(ctx, &self.new_config)?;
        self.prev_config = Some(prev);
        self.phase = CommandPhase::Completed;
        Ok(CommandStatus::Completed)
    }

    fn revert(&mut self, ctx: &mut CommandContext<'_>) -> Result<CommandStatus, CommandError> {
        match self.phase {
            CommandPhase::Completed => {}
            CommandPhase::Reverted => return Ok(CommandStatus::Completed),
            _ => return Err(CommandError::NotCompleted),
        }
        let prev = self.prev_config.clone().ok_or(CommandError::NotCompleted)?;

        Self::apply(ctx, &prev)?;

        // Put evicted creatures back where they stood, where possible.
        for (unit, coord) in self.evicted.drain(..) {
            let Some(field) = ctx.board.field_id_at(coord) else {
                warn!(unit = %unit, coord = %coord, "evicted creature's field not restored");
                continue;
            };
            if !ctx.board.field_mut(field)?.assign_creature(unit) {
                warn!(unit = %unit, coord = %coord, "evicted creature's field reoccupied");
                continue;
            }
            ctx.events.field.publish(&FieldEvent::Occupied { field, unit });
            if let Some(creature) = ctx.units.get_mut(unit) {
                creature.set_field(Some(field));
            }
        }

        self.phase = CommandPhase::Reverted;
        Ok(CommandStatus::Completed)
    }

    fn phase(&self) -> CommandPhase {
        self.phase
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardConfig, GridBoard};
    use crate::command::CancelToken;
    use crate::core::{BoardSide, Direction};
    use crate::events::EventHub;
    use crate::strategy::{AttackStrategy, MoveStrategy};
    use crate::units::{CreatureTemplate, Roster};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn template() -> CreatureTemplate {
        CreatureTemplate {
            health: 5,
            power: 1,
            support_move: MoveStrategy::None,
            attack_move: MoveStrategy::None,
            support_attack: AttackStrategy::None,
            attack_attack: AttackStrategy::None,
        }
    }

    #[test]
    fn test_update_publishes_delta_and_reverts() {
        let mut board = GridBoard::build(BoardConfig::filled(1, 2, 1, 1)).unwrap();
        let mut roster = Roster::new();
        let mut events = EventHub::new();
        let cancel = CancelToken::new();

        let deltas = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&deltas);
        events
            .board
            .subscribe(move |delta| sink.borrow_mut().push(delta.clone()));

        // A creature on the row the shrink will remove.
        let doomed_coord = Coord::new(1, 0);
        let doomed_field = board.field_id_at(doomed_coord).unwrap();
        let unit = roster
            .spawn(&mut board, BoardSide::Home, doomed_field, &template())
            .unwrap();

        let mut shrunk = board.config().clone();
        shrunk.remove_row(Direction::South);

        let mut cmd = BoardUpdateCommand::new(shrunk);
        {
            let mut ctx = CommandContext {
                board: &mut board,
                units: &mut roster,
                events: &mut events,
                cancel: &cancel,
            };
            assert_eq!(cmd.advance(&mut ctx).unwrap(), CommandStatus::Completed);
        }

        assert_eq!(deltas.borrow().len(), 1);
        assert_eq!(deltas.borrow()[0].removed.len(), 2);
        assert_eq!(cmd.evicted(), &[(unit, doomed_coord)]);
        assert_eq!(roster.get(unit).unwrap().field(), None);

        // Revert restores the fields and re-places the creature.
        {
            let mut ctx = CommandContext {
                board: &mut board,
                units: &mut roster,
                events: &mut events,
                cancel: &cancel,
            };
            assert_eq!(cmd.revert(&mut ctx).unwrap(), CommandStatus::Completed);
        }
        assert_eq!(deltas.borrow().len(), 2);
        let restored = board.field_id_at(doomed_coord).unwrap();
        assert_eq!(board.field(restored).unwrap().occupant(), Some(unit));
        assert_eq!(roster.get(unit).unwrap().field(), Some(restored));
    }

    #[test]
    fn test_empty_config_rejected_without_side_effects() {
        let mut board = GridBoard::build(BoardConfig::filled(1, 1, 1, 1)).unwrap();
        let before_len = board.len();
        let mut roster = Roster::new();
        let mut events = EventHub::new();
        let cancel = CancelToken::new();

        let mut cmd = BoardUpdateCommand::new(BoardConfig::new(1, 1, 1, 1));
        let mut ctx = CommandContext {
            board: &mut board,
            units: &mut roster,
            events: &mut events,
            cancel: &cancel,
        };
        assert!(cmd.advance(&mut ctx).is_err());
        assert_eq!(board.len(), before_len);
        assert_eq!(cmd.phase(), CommandPhase::NotStarted);
    }
}
