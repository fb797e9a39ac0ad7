//! Creatures and their stats.

use serde::{Deserialize, Serialize};

use crate::board::FieldType;
use crate::core::{BoardSide, FieldId, UnitId};
use crate::strategy::{AttackStrategy, MoveStrategy};

/// A clamped current/max stat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    current: i64,
    max: i64,
}

impl StatValue {
    /// Create a stat at its maximum.
    #[must_use]
    pub fn new(max: i64) -> Self {
        Self { current: max, max }
    }

    /// Current value.
    #[must_use]
    pub fn current(&self) -> i64 {
        self.current
    }

    /// Maximum value.
    #[must_use]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Apply a delta, clamped to `0..=max`.
    pub fn modify(&mut self, delta: i64) {
        self.current = (self.current + delta).clamp(0, self.max);
    }

    /// Set the current value, clamped to `0..=max`.
    pub fn set(&mut self, value: i64) {
        self.current = value.clamp(0, self.max);
    }

    /// Whether the stat has hit zero.
    #[must_use]
    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Blueprint for spawning a creature.
///
/// Carries one strategy pair per field type; the pair matching the spawn
/// field is selected once and held for the creature's lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureTemplate {
    pub health: i64,
    pub power: i64,
    pub support_move: MoveStrategy,
    pub attack_move: MoveStrategy,
    pub support_attack: AttackStrategy,
    pub attack_attack: AttackStrategy,
}

impl CreatureTemplate {
    /// The strategy pair for a given field type.
    #[must_use]
    pub fn strategies_for(&self, field_type: FieldType) -> (MoveStrategy, AttackStrategy) {
        match field_type {
            FieldType::Support => (self.support_move.clone(), self.support_attack.clone()),
            FieldType::Attack => (self.attack_move.clone(), self.attack_attack.clone()),
        }
    }
}

/// A unit on the board.
///
/// Bound to exactly one field; the binding is `None` only while the unit
/// stands evicted by a board shrink. Strategies are fixed at spawn time and
/// never re-selected, even when the unit later moves between field types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    id: UnitId,
    side: BoardSide,
    field: Option<FieldId>,
    pub health: StatValue,
    pub power: StatValue,
    pub move_strategy: MoveStrategy,
    pub attack_strategy: AttackStrategy,
}

impl Creature {
    pub(crate) fn new(
        id: UnitId,
        side: BoardSide,
        field: FieldId,
        health: StatValue,
        power: StatValue,
        move_strategy: MoveStrategy,
        attack_strategy: AttackStrategy,
    ) -> Self {
        Self {
            id,
            side,
            field: Some(field),
            health,
            power,
            move_strategy,
            attack_strategy,
        }
    }

    /// This creature's id.
    #[must_use]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// The side the creature fights for.
    #[must_use]
    pub fn side(&self) -> BoardSide {
        self.side
    }

    /// The field the creature stands on, if it is on the board.
    #[must_use]
    pub fn field(&self) -> Option<FieldId> {
        self.field
    }

    /// Rebind the creature to a field (or to none, when evicted).
    pub fn set_field(&mut self, field: Option<FieldId>) {
        self.field = field;
    }
}
