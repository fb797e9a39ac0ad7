//! Movement strategies.
//!
//! A creature's movement strategy is selected once at spawn and resolves
//! against the current board whenever the creature is allowed to act.
//! Resolution never mutates fields; the only strategy-local state is the
//! Bouncing reversal latch.
//!
//! All directions are given in the unit's own forward frame (North =
//! toward the enemy); the board flips them for the mirrored side.

use serde::{Deserialize, Serialize};

use super::path::Path;
use crate::core::{Direction, FieldId, GameRng};
use crate::navigate::{NavigateError, Navigator};
use crate::units::Roster;

/// Everything a strategy resolution may read, plus the RNG it may draw from.
pub struct StrategyContext<'a> {
    pub nav: Navigator<'a>,
    pub units: &'a Roster,
    pub rng: &'a mut GameRng,
}

/// When the Retreat family decides it is time to run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EscapeCondition {
    /// An enemy strictly stronger than this unit stands within `range`
    /// fields ahead.
    StrongerEnemyAhead { range: usize },

    /// Every adjacent field holds an ally and an enemy stands within
    /// `range` fields ahead.
    SurroundedWithEnemyAhead { range: usize },

    /// The damage every enemy's attack strategy currently projects onto
    /// this unit's field sums to at least `threshold`.
    FutureDamageThreat { threshold: i64 },
}

impl EscapeCondition {
    /// Evaluate the condition for the creature standing on `current`.
    ///
    /// An unoccupied field never escapes; resolution then falls back to
    /// the simple behavior.
    pub fn is_met(
        &self,
        ctx: &StrategyContext<'_>,
        current: FieldId,
    ) -> Result<bool, NavigateError> {
        let board = ctx.nav.board();
        let Some(me) = board.field(current)?.occupant().and_then(|id| ctx.units.get(id)) else {
            return Ok(false);
        };

        match self {
            EscapeCondition::StrongerEnemyAhead { range } => {
                for unit in ctx.nav.creatures_in_direction(current, *range, Direction::North)? {
                    if let Some(other) = ctx.units.get(unit) {
                        if other.side() != me.side()
                            && other.power.current() > me.power.current()
                        {
                            return Ok(true);
                        }
                    }
                }
                Ok(false)
            }

            EscapeCondition::SurroundedWithEnemyAhead { range } => {
                let adjacent = board.adjacent_fields(current)?;
                if adjacent.is_empty() {
                    return Ok(false);
                }
                let surrounded = adjacent.iter().all(|&id| {
                    board
                        .field(id)
                        .ok()
                        .and_then(|f| f.occupant())
                        .and_then(|u| ctx.units.get(u))
                        .is_some_and(|c| c.side() == me.side())
                });
                if !surrounded {
                    return Ok(false);
                }
                let enemy_ahead = ctx
                    .nav
                    .creatures_in_direction(current, *range, Direction::North)?
                    .iter()
                    .any(|&u| ctx.units.get(u).is_some_and(|c| c.side() != me.side()));
                Ok(enemy_ahead)
            }

            EscapeCondition::FutureDamageThreat { threshold } => {
                let mut incoming = 0;
                for enemy in ctx.units.iter().filter(|c| c.side() != me.side()) {
                    let Some(enemy_field) = enemy.field() else {
                        continue;
                    };
                    let projected = enemy
                        .attack_strategy
                        .calculate_attack_data(&ctx.nav, enemy_field)?;
                    incoming += projected.amount(current);
                }
                Ok(incoming >= *threshold)
            }
        }
    }
}

/// How a creature moves, fixed at spawn time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveStrategy {
    /// Never moves.
    None,

    /// One fixed-length path in a configured direction.
    Simple {
        direction: Direction,
        distance: usize,
    },

    /// Run away when the escape condition holds, otherwise behave like
    /// `Simple` with the configured direction.
    Retreat {
        escape: EscapeCondition,
        direction: Direction,
        distance: usize,
    },

    /// Walk a fixed direction until interrupted once, then walk the
    /// opposite direction forever. The latch never resets.
    Bouncing {
        direction: Direction,
        distance: usize,
        reversed: bool,
    },
}

impl MoveStrategy {
    /// Resolve this strategy from the creature's current field.
    ///
    /// Pure with respect to the board; only the Bouncing latch may change.
    pub fn calculate_path(
        &mut self,
        ctx: &mut StrategyContext<'_>,
        current: FieldId,
    ) -> Result<Vec<Path>, NavigateError> {
        match self {
            MoveStrategy::None => Ok(Vec::new()),

            MoveStrategy::Simple {
                direction,
                distance,
            } => {
                let path = ctx.nav.generate_simple_path(current, *distance, *direction)?;
                Ok(vec![path])
            }

            MoveStrategy::Retreat {
                escape,
                direction,
                distance,
            } => {
                if !escape.is_met(ctx, current)? {
                    let path = ctx.nav.generate_simple_path(current, *distance, *direction)?;
                    return Ok(vec![path]);
                }

                // Primary escape: straight away from the threat.
                let primary =
                    ctx.nav
                        .generate_simple_path(current, *distance, Direction::South)?;
                if !primary.is_interrupted() {
                    return Ok(vec![primary]);
                }

                // Blocked: sidestep to a random free allied neighbor.
                let candidates = ctx.nav.free_allied_adjacent(current)?;
                if let Some(&target) = ctx.rng.choose(&candidates) {
                    let toward = ctx.nav.direction_to_field(current, target)?;
                    let path = ctx.nav.generate_simple_path(current, 1, toward)?;
                    return Ok(vec![path]);
                }
                Ok(vec![primary])
            }

            MoveStrategy::Bouncing {
                direction,
                distance,
                reversed,
            } => {
                let effective = if *reversed {
                    direction.opposite()
                } else {
                    *direction
                };
                let path = ctx.nav.generate_simple_path(current, *distance, effective)?;
                if path.is_interrupted() && !*reversed {
                    *reversed = true;
                }
                Ok(vec![path])
            }
        }
    }
}
