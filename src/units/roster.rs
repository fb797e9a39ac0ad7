//! The set of creatures in play.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::creature::{Creature, CreatureTemplate, StatValue};
use crate::board::{GridBoard, GridError};
use crate::core::{BoardSide, FieldId, UnitId};

/// Errors from placing creatures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The spawn field already holds a creature.
    #[error("{0} is already occupied")]
    FieldOccupied(FieldId),
}

/// Owns every creature in play, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    units: FxHashMap<UnitId, Creature>,
    next_id: u32,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a creature from a template onto a free field.
    ///
    /// The strategy pair is selected from the spawn field's type, once,
    /// for the creature's lifetime. Occupancy goes through the field's
    /// `assign_creature`, the only legal occupancy mutation.
    pub fn spawn(
        &mut self,
        board: &mut GridBoard,
        side: BoardSide,
        field: FieldId,
        template: &CreatureTemplate,
    ) -> Result<UnitId, SpawnError> {
        let target = board.field_mut(field)?;
        if target.is_occupied() {
            return Err(SpawnError::FieldOccupied(field));
        }

        let id = UnitId(self.next_id);
        self.next_id += 1;

        let (move_strategy, attack_strategy) = template.strategies_for(target.field_type());
        let assigned = target.assign_creature(id);
        debug_assert!(assigned);

        let creature = Creature::new(
            id,
            side,
            field,
            StatValue::new(template.health),
            StatValue::new(template.power),
            move_strategy,
            attack_strategy,
        );
        self.units.insert(id, creature);
        Ok(id)
    }

    /// Look up a creature.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Creature> {
        self.units.get(&id)
    }

    /// Look up a creature, mutably.
    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Creature> {
        self.units.get_mut(&id)
    }

    /// Remove a creature from the roster, returning it.
    ///
    /// The caller is responsible for vacating its field first.
    pub fn remove(&mut self, id: UnitId) -> Option<Creature> {
        self.units.remove(&id)
    }

    /// Iterate over all creatures, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        self.units.values()
    }

    /// Number of creatures in play.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no creatures are in play.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardConfig, FieldType};
    use crate::core::Coord;
    use crate::strategy::{AttackStrategy, MoveStrategy};

    fn template() -> CreatureTemplate {
        CreatureTemplate {
            health: 10,
            power: 3,
            support_move: MoveStrategy::None,
            attack_move: MoveStrategy::Simple {
                direction: crate::core::Direction::North,
                distance: 2,
            },
            support_attack: AttackStrategy::None,
            attack_attack: AttackStrategy::None,
        }
    }

    #[test]
    fn test_spawn_binds_field_and_strategies() {
        let mut board = GridBoard::build(BoardConfig::filled(1, 2, 1, 1)).unwrap();
        let mut roster = Roster::new();

        // (0, 0) is the meridian row: an Attack field.
        let front = board.field_id_at(Coord::new(0, 0)).unwrap();
        assert_eq!(board.field(front).unwrap().field_type(), FieldType::Attack);

        let id = roster
            .spawn(&mut board, BoardSide::Home, front, &template())
            .unwrap();

        assert_eq!(board.field(front).unwrap().occupant(), Some(id));
        let creature = roster.get(id).unwrap();
        assert_eq!(creature.field(), Some(front));
        assert_eq!(creature.health.current(), 10);
        assert_ne!(creature.move_strategy, MoveStrategy::None);
    }

    #[test]
    fn test_spawn_on_occupied_field_rejected() {
        let mut board = GridBoard::build(BoardConfig::filled(1, 1, 1, 1)).unwrap();
        let mut roster = Roster::new();
        let field = board.field_id_at(Coord::new(0, 0)).unwrap();

        roster
            .spawn(&mut board, BoardSide::Home, field, &template())
            .unwrap();
        let err = roster
            .spawn(&mut board, BoardSide::Away, field, &template())
            .unwrap_err();
        assert_eq!(err, SpawnError::FieldOccupied(field));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_spawn_on_unknown_field_rejected() {
        let mut board = GridBoard::build(BoardConfig::filled(1, 1, 1, 1)).unwrap();
        let mut roster = Roster::new();

        let err = roster
            .spawn(&mut board, BoardSide::Home, FieldId(99), &template())
            .unwrap_err();
        assert_eq!(err, SpawnError::Grid(GridError::UnknownField(FieldId(99))));
    }
}
