//! Strategy resolution integration tests.
//!
//! Drives spawn-time strategy selection and movement/attack resolution
//! against a real board with creatures on both sides.

use lane_tactics::core::{BoardSide, Coord, Direction, FieldId, GameRng};
use lane_tactics::{
    AttackStrategy, BoardConfig, EscapeCondition, FieldType, GridBoard, MoveStrategy, Navigator,
    Roster, SpawnError, StrategyContext,
};

fn template(power: i64) -> lane_tactics::CreatureTemplate {
    lane_tactics::CreatureTemplate {
        health: 10,
        power,
        support_move: MoveStrategy::Simple {
            direction: Direction::North,
            distance: 2,
        },
        attack_move: MoveStrategy::None,
        support_attack: AttackStrategy::None,
        attack_attack: AttackStrategy::Simple {
            direction: Direction::North,
            range: 2,
            damage: power,
        },
    }
}

fn id_at(board: &GridBoard, row: i16, col: i16) -> FieldId {
    board.field_id_at(Coord::new(row, col)).unwrap()
}

// =============================================================================
// Spawning
// =============================================================================

/// The spawn field's type picks which template strategies the creature
/// carries for the rest of its life.
#[test]
fn test_spawn_selects_strategies_by_field_type() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 1, 1)).unwrap();
    let mut roster = Roster::new();

    let support_field = id_at(&board, 1, 0);
    assert_eq!(
        board.field(support_field).unwrap().field_type(),
        FieldType::Support
    );
    let unit = roster
        .spawn(&mut board, BoardSide::Home, support_field, &template(4))
        .unwrap();

    let creature = roster.get(unit).unwrap();
    assert!(matches!(creature.move_strategy, MoveStrategy::Simple { .. }));
    assert_eq!(creature.attack_strategy, AttackStrategy::None);

    let attack_field = id_at(&board, 0, 0);
    let unit = roster
        .spawn(&mut board, BoardSide::Home, attack_field, &template(4))
        .unwrap();
    let creature = roster.get(unit).unwrap();
    assert!(matches!(creature.move_strategy, MoveStrategy::None));
    assert!(matches!(
        creature.attack_strategy,
        AttackStrategy::Simple { .. }
    ));
}

/// Spawning onto an occupied field is rejected and leaves the board
/// untouched.
#[test]
fn test_spawn_rejects_occupied_field() {
    let mut board = GridBoard::build(BoardConfig::filled(1, 1, 1, 1)).unwrap();
    let mut roster = Roster::new();
    let field = id_at(&board, 0, 0);

    let first = roster
        .spawn(&mut board, BoardSide::Home, field, &template(1))
        .unwrap();
    let err = roster
        .spawn(&mut board, BoardSide::Away, field, &template(1))
        .unwrap_err();

    assert_eq!(err, SpawnError::FieldOccupied(field));
    assert_eq!(board.field(field).unwrap().occupant(), Some(first));
    assert_eq!(roster.len(), 1);
}

// =============================================================================
// Movement Resolution
// =============================================================================

/// An unobstructed simple path walks its full distance.
#[test]
fn test_simple_path_full_distance() {
    let mut board = GridBoard::build(BoardConfig::filled(3, 3, 1, 1)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let start = id_at(&board, 2, 0);
    roster
        .spawn(&mut board, BoardSide::Home, start, &template(2))
        .unwrap();

    let mut strategy = MoveStrategy::Simple {
        direction: Direction::North,
        distance: 3,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let paths = strategy.calculate_path(&mut ctx, start).unwrap();
    assert_eq!(paths.len(), 1);

    let path = &paths[0];
    assert!(!path.is_interrupted());
    assert_eq!(path.step_count(), 3);
    assert_eq!(path.start(), start);
    assert_eq!(
        board.field(path.destination()).unwrap().coord(),
        Coord::new(-1, 0)
    );
}

/// A creature in the lane cuts the path short; the blocked field is not
/// part of the walkable fields but its index is reported.
#[test]
fn test_simple_path_cut_by_occupant() {
    let mut board = GridBoard::build(BoardConfig::filled(3, 3, 1, 1)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let start = id_at(&board, 2, 0);
    roster
        .spawn(&mut board, BoardSide::Home, start, &template(2))
        .unwrap();
    let blocker = id_at(&board, 0, 0);
    roster
        .spawn(&mut board, BoardSide::Away, blocker, &template(2))
        .unwrap();

    let mut strategy = MoveStrategy::Simple {
        direction: Direction::North,
        distance: 3,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let path = strategy.calculate_path(&mut ctx, start).unwrap().remove(0);

    assert!(path.is_interrupted());
    assert_eq!(path.fields().len(), 2);
    assert_eq!(path.interrupted_at(), Some(2));
    assert_eq!(
        board.field(path.destination()).unwrap().coord(),
        Coord::new(1, 0)
    );
}

/// Resolving the same simple strategy twice against an unchanged board
/// yields the same path.
#[test]
fn test_simple_resolution_is_idempotent() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 2, 2)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let start = id_at(&board, 1, -1);
    roster
        .spawn(&mut board, BoardSide::Home, start, &template(2))
        .unwrap();

    let mut strategy = MoveStrategy::Simple {
        direction: Direction::North,
        distance: 2,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let first = strategy.calculate_path(&mut ctx, start).unwrap();
    let second = strategy.calculate_path(&mut ctx, start).unwrap();
    assert_eq!(first[0].fields(), second[0].fields());
    assert_eq!(first[0].interrupted_at(), second[0].interrupted_at());
}

/// Both sides resolve "North" toward each other: the mirrored side's
/// forward frame flips at the board level, not in the strategy.
#[test]
fn test_mirrored_sides_advance_toward_each_other() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 1, 1)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let home_start = id_at(&board, 1, 0);
    let away_start = id_at(&board, -2, 0);
    roster
        .spawn(&mut board, BoardSide::Home, home_start, &template(2))
        .unwrap();
    roster
        .spawn(&mut board, BoardSide::Away, away_start, &template(2))
        .unwrap();

    let mut strategy = MoveStrategy::Simple {
        direction: Direction::North,
        distance: 1,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let home_path = strategy.calculate_path(&mut ctx, home_start).unwrap().remove(0);
    let away_path = strategy.calculate_path(&mut ctx, away_start).unwrap().remove(0);

    assert_eq!(
        board.field(home_path.destination()).unwrap().coord(),
        Coord::new(0, 0)
    );
    assert_eq!(
        board.field(away_path.destination()).unwrap().coord(),
        Coord::new(-1, 0)
    );
}

/// The bouncing latch survives across resolutions and across obstacle
/// removal; once reversed, always reversed.
#[test]
fn test_bouncing_reversal_is_permanent() {
    let mut board = GridBoard::build(BoardConfig::filled(1, 1, 3, 3)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let start = id_at(&board, 0, 2);
    roster
        .spawn(&mut board, BoardSide::Home, start, &template(2))
        .unwrap();

    // Starts against the east edge: the first resolution interrupts.
    let mut strategy = MoveStrategy::Bouncing {
        direction: Direction::East,
        distance: 2,
        reversed: false,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let path = strategy.calculate_path(&mut ctx, start).unwrap().remove(0);
    assert!(path.is_interrupted());

    // Every later resolution walks west.
    for _ in 0..3 {
        let mut ctx = StrategyContext {
            nav: Navigator::new(&board),
            units: &roster,
            rng: &mut rng,
        };
        let path = strategy.calculate_path(&mut ctx, start).unwrap().remove(0);
        assert_eq!(
            board.field(path.destination()).unwrap().coord(),
            Coord::new(0, 0)
        );
    }
}

/// Retreat escapes backward when a stronger enemy closes in, and the
/// escape path points away from the enemy for the mirrored side too.
#[test]
fn test_retreat_mirrored_side_runs_backward() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 1, 1)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let current = id_at(&board, -1, 0);
    roster
        .spawn(&mut board, BoardSide::Away, current, &template(1))
        .unwrap();
    // A stronger Home creature directly across the meridian.
    let threat = id_at(&board, 0, 0);
    roster
        .spawn(&mut board, BoardSide::Home, threat, &template(9))
        .unwrap();

    let mut strategy = MoveStrategy::Retreat {
        escape: EscapeCondition::StrongerEnemyAhead { range: 1 },
        direction: Direction::North,
        distance: 1,
    };
    let mut ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    let path = strategy.calculate_path(&mut ctx, current).unwrap().remove(0);

    // "South" for the away side is global north: deeper into its half.
    assert_eq!(
        board.field(path.destination()).unwrap().coord(),
        Coord::new(-2, 0)
    );
}

/// The surrounded condition needs every neighbor allied and an enemy in
/// range ahead; both parts are required.
#[test]
fn test_surrounded_condition_requires_both_parts() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 2, 2)).unwrap();
    let mut roster = Roster::new();
    let mut rng = GameRng::new(1);

    let current = id_at(&board, 1, 0);
    roster
        .spawn(&mut board, BoardSide::Home, current, &template(2))
        .unwrap();
    for (row, col) in [(0, 0), (1, 1), (1, -1)] {
        let id = id_at(&board, row, col);
        roster
            .spawn(&mut board, BoardSide::Home, id, &template(1))
            .unwrap();
    }

    let condition = EscapeCondition::SurroundedWithEnemyAhead { range: 3 };
    {
        let ctx = StrategyContext {
            nav: Navigator::new(&board),
            units: &roster,
            rng: &mut rng,
        };
        // Surrounded, but no enemy ahead.
        assert!(!condition.is_met(&ctx, current).unwrap());
    }

    // An enemy appears straight ahead, within range.
    let enemy = id_at(&board, -2, 0);
    roster
        .spawn(&mut board, BoardSide::Away, enemy, &template(1))
        .unwrap();
    let ctx = StrategyContext {
        nav: Navigator::new(&board),
        units: &roster,
        rng: &mut rng,
    };
    assert!(condition.is_met(&ctx, current).unwrap());
}

// =============================================================================
// Attack Resolution
// =============================================================================

/// Overlapping projections onto the same field add up.
#[test]
fn test_attack_data_overlap_is_additive() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 1, 1)).unwrap();
    let mut roster = Roster::new();

    // Two attackers whose lanes both cover the meridian field.
    let near = id_at(&board, 0, 0);
    let far = id_at(&board, 1, 0);
    roster
        .spawn(&mut board, BoardSide::Home, near, &template(3))
        .unwrap();
    roster
        .spawn(&mut board, BoardSide::Home, far, &template(5))
        .unwrap();

    let nav = Navigator::new(&board);
    let near_attack = AttackStrategy::Simple {
        direction: Direction::North,
        range: 1,
        damage: 3,
    };
    let far_attack = AttackStrategy::Simple {
        direction: Direction::North,
        range: 2,
        damage: 5,
    };

    let mut total = near_attack.calculate_attack_data(&nav, near).unwrap();
    total.merge(&far_attack.calculate_attack_data(&nav, far).unwrap());

    let target = id_at(&board, -1, 0);
    assert_eq!(total.amount(target), 8);
    // The far attacker also covers the near attacker's own field.
    assert_eq!(total.amount(near), 5);
}

/// Flank projection hits both sides and respects the board edge.
#[test]
fn test_flank_attack_at_edge() {
    let board = GridBoard::build(BoardConfig::filled(1, 1, 2, 2)).unwrap();
    let nav = Navigator::new(&board);

    let edge = id_at(&board, 0, 1);
    let strategy = AttackStrategy::Flank { size: 2, damage: 4 };
    let data = strategy.calculate_attack_data(&nav, edge).unwrap();

    // Nothing further east; two fields west.
    assert_eq!(data.len(), 2);
    assert_eq!(data.amount(id_at(&board, 0, 0)), 4);
    assert_eq!(data.amount(id_at(&board, 0, -1)), 4);
}

/// Attack projection occupies no fields and moves no creatures.
#[test]
fn test_attack_resolution_is_pure() {
    let mut board = GridBoard::build(BoardConfig::filled(2, 2, 1, 1)).unwrap();
    let mut roster = Roster::new();

    let attacker = id_at(&board, 0, 0);
    let unit = roster
        .spawn(&mut board, BoardSide::Home, attacker, &template(6))
        .unwrap();
    let victim_field = id_at(&board, -1, 0);
    let victim = roster
        .spawn(&mut board, BoardSide::Away, victim_field, &template(1))
        .unwrap();

    let nav = Navigator::new(&board);
    let strategy = AttackStrategy::Simple {
        direction: Direction::North,
        range: 2,
        damage: 6,
    };
    let data = strategy.calculate_attack_data(&nav, attacker).unwrap();
    assert_eq!(data.amount(victim_field), 6);

    assert_eq!(board.field(attacker).unwrap().occupant(), Some(unit));
    assert_eq!(board.field(victim_field).unwrap().occupant(), Some(victim));
    assert_eq!(roster.get(victim).unwrap().health.current(), 10);
}
