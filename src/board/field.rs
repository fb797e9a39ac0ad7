//! The atomic board cell.

use serde::{Deserialize, Serialize};

use crate::core::{BoardSide, Coord, FieldId, UnitId};

/// What role a field plays for the creature standing on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Support,
    Attack,
}

/// A single cell of the board.
///
/// At most one creature occupies a field at a time, and occupancy changes
/// only through [`assign_creature`](Field::assign_creature) and
/// [`unassign_creature`](Field::unassign_creature). Owner and type are set
/// at creation from the field's quadrant and row, and may be reassigned
/// explicitly afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    id: FieldId,
    coord: Coord,
    field_type: FieldType,
    owner: Option<BoardSide>,
    occupant: Option<UnitId>,
}

impl Field {
    pub(crate) fn new(
        id: FieldId,
        coord: Coord,
        field_type: FieldType,
        owner: Option<BoardSide>,
    ) -> Self {
        Self {
            id,
            coord,
            field_type,
            owner,
            occupant: None,
        }
    }

    /// This field's id.
    #[must_use]
    pub fn id(&self) -> FieldId {
        self.id
    }

    /// Global board coordinate.
    #[must_use]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Support or Attack.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Reassign the field type.
    pub fn set_field_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
    }

    /// The side this field belongs to, if any.
    #[must_use]
    pub fn owner(&self) -> Option<BoardSide> {
        self.owner
    }

    /// Reassign the owning side.
    pub fn set_owner(&mut self, owner: Option<BoardSide>) {
        self.owner = owner;
    }

    /// The creature standing here, if any.
    #[must_use]
    pub fn occupant(&self) -> Option<UnitId> {
        self.occupant
    }

    /// Whether a creature stands here.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Place a creature on this field.
    ///
    /// Returns false if the field is already occupied; the occupant must be
    /// vacated explicitly first.
    pub fn assign_creature(&mut self, unit: UnitId) -> bool {
        if self.occupant.is_some() {
            return false;
        }
        self.occupant = Some(unit);
        true
    }

    /// Vacate this field, returning the creature that stood here.
    pub fn unassign_creature(&mut self) -> Option<UnitId> {
        self.occupant.take()
    }
}
