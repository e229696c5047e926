use criterion::{black_box, criterion_group, criterion_main, Criterion};
use arcade_tetris::core::{get_shape, Board, EngineConfig, GameState};
use arcade_tetris::types::{CellKind, PieceKind, FRAME_MS};

fn new_game() -> GameState {
    GameState::new(EngineConfig::new().with_seed(12345)).unwrap()
}

fn bench_tick(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state.reset();
            }
            state.tick(black_box(FRAME_MS));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..12 {
                    board.set(x, y, CellKind::I);
                }
            }
            black_box(board.sweep())
        })
    });
}

fn bench_collides(c: &mut Criterion) {
    let mut board = Board::default();
    for x in 0..11 {
        board.set(x, 19, CellKind::T);
    }
    let shape = get_shape(PieceKind::T);

    c.bench_function("collides", |b| {
        b.iter(|| board.collides(black_box(&shape), black_box(4), black_box(17)))
    });
}

fn bench_soft_drop(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("soft_drop", |b| {
        b.iter(|| {
            if state.is_game_over() {
                state.reset();
            }
            state.soft_drop();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = new_game();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !state.move_left() {
                while state.move_right() {}
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let mut state = new_game();
    for _ in 0..4 {
        state.soft_drop();
    }

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            state.rotate();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_collides,
    bench_soft_drop,
    bench_try_move,
    bench_try_rotate
);
criterion_main!(benches);
