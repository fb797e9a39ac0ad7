//! The runtime field set built from a `BoardConfig`.
//!
//! `GridBoard` owns the authoritative `Field` instances, indexed both by id
//! and by global coordinate. The coordinate projection happens exactly once,
//! at build/rebuild time; every query afterwards works in the single global
//! space.
//!
//! Persistent maps make a full board snapshot an O(1) clone, which the
//! command engine leans on for round-trip testing.

use im::HashMap as ImHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::config::BoardConfig;
use super::field::{Field, FieldType};
use crate::core::{Coord, Direction, FieldId, Quadrant, UnitId};

/// Errors from board construction and queries.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// The config has no present cells; nothing to build.
    #[error("board config has no present cells")]
    EmptyConfig,

    /// A caller passed a field id that is not on the board.
    #[error("{0} is not on the board")]
    UnknownField(FieldId),
}

/// The outcome of a rebuild: which fields appeared, which vanished, and
/// which creatures were forced off the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardDelta {
    /// Ids of newly created fields.
    pub added: Vec<FieldId>,

    /// Removed fields, already vacated and out of the index.
    pub removed: Vec<Field>,

    /// Creatures vacated by a removal, with the coordinate they stood on.
    pub evicted: Vec<(UnitId, Coord)>,
}

impl BoardDelta {
    /// Whether the rebuild changed nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// The authoritative set of board fields.
#[derive(Clone, Debug)]
pub struct GridBoard {
    config: BoardConfig,
    fields: ImHashMap<FieldId, Field>,
    by_coord: ImHashMap<Coord, FieldId>,
    next_field_id: u32,
}

impl GridBoard {
    /// Build the field set from a config.
    ///
    /// Fields on the row nearest the meridian are created as `Attack`,
    /// the rest as `Support`; the quadrant's half determines the owner.
    pub fn build(config: BoardConfig) -> Result<Self, GridError> {
        if config.is_empty() {
            return Err(GridError::EmptyConfig);
        }

        let mut board = Self {
            config: config.clone(),
            fields: ImHashMap::new(),
            by_coord: ImHashMap::new(),
            next_field_id: 0,
        };
        for (quadrant, row, col) in config.present_cells() {
            board.create_field(quadrant, row, col);
        }
        Ok(board)
    }

    fn create_field(&mut self, quadrant: Quadrant, local_row: usize, local_col: usize) -> FieldId {
        let id = FieldId(self.next_field_id);
        self.next_field_id += 1;

        let coord = quadrant.to_global(local_row, local_col);
        let field_type = if local_row == 0 {
            FieldType::Attack
        } else {
            FieldType::Support
        };
        let field = Field::new(id, coord, field_type, Some(quadrant.side()));

        self.fields.insert(id, field);
        self.by_coord.insert(coord, id);
        id
    }

    /// Diff the realized field set against a new config.
    ///
    /// Fields whose cell vanished are vacated (their occupants collected in
    /// the delta) and dropped from the index; newly present cells become
    /// fresh fields. Fields that persist are not touched.
    pub fn rebuild(&mut self, new_config: &BoardConfig) -> Result<BoardDelta, GridError> {
        if new_config.is_empty() {
            return Err(GridError::EmptyConfig);
        }

        let mut desired: rustc_hash::FxHashMap<Coord, (Quadrant, usize, usize)> =
            rustc_hash::FxHashMap::default();
        for (quadrant, row, col) in new_config.present_cells() {
            desired.insert(quadrant.to_global(row, col), (quadrant, row, col));
        }

        let mut delta = BoardDelta::default();

        let existing: Vec<Coord> = self.by_coord.keys().copied().collect();
        for coord in existing {
            if !desired.contains_key(&coord) {
                let id = self.by_coord.remove(&coord).expect("indexed coord");
                let mut field = self.fields.remove(&id).expect("indexed field");
                if let Some(unit) = field.unassign_creature() {
                    delta.evicted.push((unit, coord));
                }
                delta.removed.push(field);
            }
        }

        for (coord, (quadrant, row, col)) in desired {
            if !self.by_coord.contains_key(&coord) {
                let id = self.create_field(quadrant, row, col);
                delta.added.push(id);
            }
        }

        self.config = new_config.clone();
        Ok(delta)
    }

    /// The config this board currently realizes.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Number of fields on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the board has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all fields, in no particular order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// Look up a field by id.
    pub fn field(&self, id: FieldId) -> Result<&Field, GridError> {
        self.fields.get(&id).ok_or(GridError::UnknownField(id))
    }

    /// Look up a field by id, mutably.
    pub fn field_mut(&mut self, id: FieldId) -> Result<&mut Field, GridError> {
        self.fields.get_mut(&id).ok_or(GridError::UnknownField(id))
    }

    /// The field at a global coordinate, if present.
    #[must_use]
    pub fn field_at(&self, coord: Coord) -> Option<&Field> {
        self.by_coord.get(&coord).and_then(|id| self.fields.get(id))
    }

    /// The field id at a global coordinate, if present.
    #[must_use]
    pub fn field_id_at(&self, coord: Coord) -> Option<FieldId> {
        self.by_coord.get(&coord).copied()
    }

    /// Resolve a direction into the frame of the field's owner.
    ///
    /// Directions flip 180° for fields owned by the mirrored side, so every
    /// caller can speak in its own forward frame.
    pub fn effective_direction(
        &self,
        field: FieldId,
        direction: Direction,
    ) -> Result<Direction, GridError> {
        let field = self.field(field)?;
        let mirrored = field.owner().is_some_and(|side| side.is_mirrored());
        Ok(if mirrored {
            direction.opposite()
        } else {
            direction
        })
    }

    /// Walk up to `amount` steps from a field and collect the fields found.
    ///
    /// The walk stops at the first missing coordinate (board edge or hole)
    /// and returns however many fields it reached. Occupied fields are
    /// included; occupancy is a path concern, not a board one.
    pub fn fields_in_direction(
        &self,
        field: FieldId,
        amount: usize,
        direction: Direction,
    ) -> Result<SmallVec<[FieldId; 8]>, GridError> {
        let effective = self.effective_direction(field, direction)?;
        let start = self.field(field)?.coord();

        let mut found = SmallVec::new();
        let mut coord = start;
        for _ in 0..amount {
            coord = coord.step(effective);
            match self.field_id_at(coord) {
                Some(id) => found.push(id),
                None => break,
            }
        }
        Ok(found)
    }

    /// The up-to-four fields directly adjacent to a field.
    pub fn adjacent_fields(&self, field: FieldId) -> Result<SmallVec<[FieldId; 4]>, GridError> {
        let coord = self.field(field)?.coord();
        let mut found = SmallVec::new();
        for direction in Direction::ALL {
            if let Some(id) = self.field_id_at(coord.step(direction)) {
                found.push(id);
            }
        }
        Ok(found)
    }

    /// Up to `size` fields immediately to each side along the East-West axis.
    ///
    /// Each side's walk stops early at a missing field.
    pub fn flank_fields(
        &self,
        field: FieldId,
        size: usize,
    ) -> Result<SmallVec<[FieldId; 4]>, GridError> {
        let coord = self.field(field)?.coord();
        let mut found = SmallVec::new();
        for direction in [Direction::East, Direction::West] {
            let mut cursor = coord;
            for _ in 0..size {
                cursor = cursor.step(direction);
                match self.field_id_at(cursor) {
                    Some(id) => found.push(id),
                    None => break,
                }
            }
        }
        Ok(found)
    }
}
