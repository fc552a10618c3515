use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tempotris_engine::{Board, BoardConfig, Cell, PieceKind};
use tempotris_pilot::Autopilot;

fn bench_decide(c: &mut Criterion) {
    let autopilot = Autopilot::new();

    let empty = Board::with_seed(BoardConfig::default(), 1);
    c.bench_function("decide_empty_board", |b| {
        b.iter(|| autopilot.decide(black_box(&empty)));
    });

    let mut rough = Board::with_seed(BoardConfig::default(), 1);
    for col in 0..rough.grid().cols() {
        let depth = 14 + (col * 3) % 5;
        for row in depth..rough.grid().rows() {
            if (row + col) % 3 != 0 {
                rough.fill_cell(row, col, Cell::Piece(PieceKind::J));
            }
        }
    }
    c.bench_function("decide_rough_stack", |b| {
        b.iter(|| autopilot.decide(black_box(&rough)));
    });
}

criterion_group!(benches, bench_decide);
criterion_main!(benches);
