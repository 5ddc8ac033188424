//! Benchmarks for whole games and the per-apply checkpoint.
//!
//! Every `apply` clones the board before dispatch, so clone cost is on the
//! hot path of any driver.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use fluxx_engine::{Board, GameConfig, RulesEngine};

/// Play the first accepted selection until someone wins or `steps` run out.
fn run_game(players: usize, seed: u64, steps: usize) -> Board {
    let mut board = match Board::with_config(GameConfig::new(players).with_seed(seed)) {
        Ok(board) => board,
        Err(err) => panic!("bad config: {}", err),
    };
    for _ in 0..steps {
        if board.is_terminal() {
            break;
        }
        let moved = board
            .legal_selections()
            .into_iter()
            .any(|selection| board.apply(selection).is_ok());
        if !moved {
            break;
        }
    }
    board
}

fn bench_new_game(c: &mut Criterion) {
    c.bench_function("new_game_4p", |b| {
        b.iter(|| black_box(Board::new_game(black_box(4))))
    });
}

fn bench_clone(c: &mut Criterion) {
    let board = run_game(4, 42, 40);
    c.bench_function("board_clone", |b| b.iter(|| black_box(board.clone())));
}

fn bench_playout(c: &mut Criterion) {
    c.bench_function("playout_2p_200", |b| {
        b.iter(|| black_box(run_game(2, black_box(7), 200)))
    });
    c.bench_function("playout_5p_200", |b| {
        b.iter(|| black_box(run_game(5, black_box(7), 200)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let board = run_game(3, 11, 60);
    c.bench_function("snapshot", |b| b.iter(|| black_box(board.snapshot())));
}

criterion_group!(benches, bench_new_game, bench_clone, bench_playout, bench_snapshot);
criterion_main!(benches);
