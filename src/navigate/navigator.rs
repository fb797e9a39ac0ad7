//! Stateless query facade over `GridBoard`.
//!
//! Strategies never touch the board directly; they ask the navigator, which
//! handles the one piece of spatial bookkeeping they should not have to:
//! resolving directions into the frame of the field's owner. Everything
//! here is a pure read; mutation belongs to commands.

use smallvec::SmallVec;
use thiserror::Error;

use crate::board::{GridBoard, GridError};
use crate::core::{Direction, FieldId, UnitId};
use crate::strategy::Path;

/// Errors from navigator queries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum NavigateError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Two fields with no row or column offset between them.
    #[error("no direction from {0} to {1}")]
    NoDirection(FieldId, FieldId),
}

/// Read-only board queries for strategy resolution.
#[derive(Clone, Copy)]
pub struct Navigator<'a> {
    board: &'a GridBoard,
}

impl<'a> Navigator<'a> {
    /// Wrap a board for querying.
    #[must_use]
    pub fn new(board: &'a GridBoard) -> Self {
        Self { board }
    }

    /// The underlying board.
    #[must_use]
    pub fn board(&self) -> &'a GridBoard {
        self.board
    }

    /// Walk up to `amount` steps and build a path.
    ///
    /// The direction is given in the caller's own forward frame; the walk
    /// flips it for fields owned by the mirrored side. The first occupied
    /// or missing field interrupts the path: it is not included, and its
    /// would-be index is recorded.
    pub fn generate_simple_path(
        &self,
        field: FieldId,
        amount: usize,
        direction: Direction,
    ) -> Result<Path, GridError> {
        let effective = self.board.effective_direction(field, direction)?;
        let mut coord = self.board.field(field)?.coord();

        let mut path = Path::new(field);
        for step in 1..=amount {
            coord = coord.step(effective);
            match self.board.field_at(coord) {
                Some(next) if !next.is_occupied() => path.push(next.id()),
                _ => {
                    path.mark_interrupted(step);
                    break;
                }
            }
        }
        Ok(path)
    }

    /// The creatures standing on fields up to `amount` steps away.
    ///
    /// Order follows the walk; unoccupied fields are skipped.
    pub fn creatures_in_direction(
        &self,
        field: FieldId,
        amount: usize,
        direction: Direction,
    ) -> Result<Vec<UnitId>, GridError> {
        let fields = self.board.fields_in_direction(field, amount, direction)?;
        let mut creatures = Vec::new();
        for id in fields {
            if let Some(unit) = self.board.field(id)?.occupant() {
                creatures.push(unit);
            }
        }
        Ok(creatures)
    }

    /// Infer the compass direction from one field to another.
    ///
    /// Decided by the dominant axis of the coordinate delta (ties go to the
    /// vertical axis), then expressed in the frame of the `from` field's
    /// owner so the result feeds straight back into a path walk.
    pub fn direction_to_field(
        &self,
        from: FieldId,
        to: FieldId,
    ) -> Result<Direction, NavigateError> {
        let from_field = self.board.field(from)?;
        let to_coord = self.board.field(to)?.coord();
        let from_coord = from_field.coord();

        let dr = to_coord.row - from_coord.row;
        let dc = to_coord.col - from_coord.col;
        if dr == 0 && dc == 0 {
            return Err(NavigateError::NoDirection(from, to));
        }

        let global = if dr.abs() >= dc.abs() {
            if dr < 0 {
                Direction::North
            } else {
                Direction::South
            }
        } else if dc < 0 {
            Direction::West
        } else {
            Direction::East
        };

        let mirrored = from_field.owner().is_some_and(|side| side.is_mirrored());
        Ok(if mirrored { global.opposite() } else { global })
    }

    /// Free adjacent fields sharing the given field's owner.
    ///
    /// The candidate set the Retreat strategy draws from when its primary
    /// escape path is blocked.
    pub fn free_allied_adjacent(
        &self,
        field: FieldId,
    ) -> Result<SmallVec<[FieldId; 4]>, GridError> {
        let owner = self.board.field(field)?.owner();
        let mut found = SmallVec::new();
        for id in self.board.adjacent_fields(field)? {
            let candidate = self.board.field(id)?;
            if !candidate.is_occupied() && candidate.owner() == owner {
                found.push(id);
            }
        }
        Ok(found)
    }
}
