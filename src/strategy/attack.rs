//! Attack strategies: project damage onto fields.
//!
//! Attack resolution is purely functional with respect to the board; the
//! returned `AttackData` is a proposal for the combat step to apply.

use serde::{Deserialize, Serialize};

use super::path::AttackData;
use crate::board::GridError;
use crate::core::{Direction, FieldId};
use crate::navigate::Navigator;

/// How a creature projects damage, fixed at spawn time.
///
/// Directions are given in the unit's own forward frame; the board flips
/// them for the mirrored side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttackStrategy {
    /// No attack at all.
    None,

    /// Damage every field up to `range` steps in a fixed direction.
    Simple {
        direction: Direction,
        range: usize,
        damage: i64,
    },

    /// Damage the fields immediately to each side along the East-West axis.
    Flank { size: usize, damage: i64 },
}

impl AttackStrategy {
    /// Project this strategy's damage from the given field.
    pub fn calculate_attack_data(
        &self,
        nav: &Navigator<'_>,
        current: FieldId,
    ) -> Result<AttackData, GridError> {
        let mut data = AttackData::new();
        match self {
            AttackStrategy::None => {}
            AttackStrategy::Simple {
                direction,
                range,
                damage,
            } => {
                for field in nav.board().fields_in_direction(current, *range, *direction)? {
                    data.add(field, *damage);
                }
            }
            AttackStrategy::Flank { size, damage } => {
                for field in nav.board().flank_fields(current, *size)? {
                    data.add(field, *damage);
                }
            }
        }
        Ok(data)
    }
}
