//! Benchmarks for board construction, rebuild diffing, and path walks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lane_tactics::core::{Coord, Direction, GameRng};
use lane_tactics::{BoardConfig, GridBoard, Navigator};

fn build_benchmark(c: &mut Criterion) {
    let config = BoardConfig::filled(8, 8, 8, 8);
    c.bench_function("grid_build_16x16", |b| {
        b.iter(|| GridBoard::build(black_box(config.clone())).unwrap());
    });
}

fn rebuild_benchmark(c: &mut Criterion) {
    let base = BoardConfig::filled(8, 8, 8, 8);
    let mut grown = base.clone();
    grown.add_row(Direction::North);
    grown.add_column(Direction::East);

    c.bench_function("grid_rebuild_noop", |b| {
        let mut board = GridBoard::build(base.clone()).unwrap();
        b.iter(|| board.rebuild(black_box(&base)).unwrap());
    });

    c.bench_function("grid_rebuild_grow_shrink", |b| {
        let mut board = GridBoard::build(base.clone()).unwrap();
        b.iter(|| {
            board.rebuild(black_box(&grown)).unwrap();
            board.rebuild(black_box(&base)).unwrap();
        });
    });
}

fn randomized_rebuild_benchmark(c: &mut Criterion) {
    let mut rng = GameRng::new(42);
    let base = BoardConfig::filled(8, 8, 8, 8);
    let mut randomized = base.clone();
    randomized.randomize(&mut rng);

    c.bench_function("grid_rebuild_randomized", |b| {
        let mut board = GridBoard::build(base.clone()).unwrap();
        b.iter(|| {
            board.rebuild(black_box(&randomized)).unwrap();
            board.rebuild(black_box(&base)).unwrap();
        });
    });
}

fn path_benchmark(c: &mut Criterion) {
    let board = GridBoard::build(BoardConfig::filled(8, 8, 8, 8)).unwrap();
    let start = board.field_id_at(Coord::new(7, 0)).unwrap();

    c.bench_function("simple_path_full_lane", |b| {
        let nav = Navigator::new(&board);
        b.iter(|| {
            nav.generate_simple_path(black_box(start), 15, Direction::North)
                .unwrap()
        });
    });
}

criterion_group!(
    benches,
    build_benchmark,
    rebuild_benchmark,
    randomized_rebuild_benchmark,
    path_benchmark
);
criterion_main!(benches);
