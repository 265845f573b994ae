//! Benchmarks for fill planning.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use via_stitch::board::Board;
use via_stitch::stitch::{Pattern, PlacementRequest, Planner};

const MM: f64 = 1_000_000.0;

fn request(pattern: Pattern) -> PlacementRequest {
    PlacementRequest {
        via_size: 0.3 * MM,
        drill_size: 0.15 * MM,
        spacing_x: 0.4 * MM,
        spacing_y: 0.4 * MM,
        offset_x: 0.2 * MM,
        offset_y: 0.2 * MM,
        edge_clearance: 0.3 * MM,
        track_clearance: 0.2 * MM,
        net: None,
        layers: None,
        pattern,
    }
}

fn fill_benchmark(c: &mut Criterion) {
    let board = match Board::load("tests/data/stitch_board.json") {
        Ok(board) => board,
        Err(e) => panic!("Failed to load bench board: {:#}", e),
    };
    let Ok(region) = board.stitch_region(None) else {
        panic!("Bench board has no stitchable zone");
    };
    let planner = Planner::new(&board, &board);

    c.bench_function("fill_grid_dense", |b| {
        b.iter(|| black_box(planner.fill(&region, &request(Pattern::Grid))))
    });

    c.bench_function("fill_star_dense", |b| {
        b.iter(|| black_box(planner.fill(&region, &request(Pattern::Star))))
    });
}

criterion_group!(benches, fill_benchmark);
criterion_main!(benches);
