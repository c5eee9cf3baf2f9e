use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use minesweeper_core::*;

fn generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        group.bench_function(difficulty.name(), |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(Board::with_seed(config, seed).unwrap())
            })
        });
    }
    group.finish();
}

fn flood_fill(c: &mut Criterion) {
    let empty = Board::from_layout(MineLayout::from_mine_coords((30, 16), &[]).unwrap());
    let max = Board::from_layout(MineLayout::from_mine_coords((255, 255), &[]).unwrap());

    let mut group = c.benchmark_group("flood_fill");
    group.bench_function("expert_empty", |b| {
        b.iter(|| {
            let mut board = empty.clone();
            black_box(board.reveal(black_box((15, 8))).unwrap())
        })
    });
    group.bench_function("max_empty", |b| {
        b.iter(|| {
            let mut board = max.clone();
            black_box(board.reveal(black_box((0, 0))).unwrap())
        })
    });
    group.finish();
}

fn play_out(c: &mut Criterion) {
    let board = Board::with_seed(Difficulty::Expert.config(), 7).unwrap();
    let coords: Vec<_> = board.iter_coords().collect();

    c.bench_function("open_all_safe_expert", |b| {
        b.iter(|| {
            let mut board = board.clone();
            for &pos in &coords {
                if board.is_over() {
                    break;
                }
                if !board[pos].mined {
                    board.reveal(pos).unwrap();
                }
            }
            black_box(board.has_won())
        })
    });
}

criterion_group!(benches, generate, flood_fill, play_out);
criterion_main!(benches);
