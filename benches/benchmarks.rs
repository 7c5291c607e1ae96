use chess_core::bitboard::AttackTables;
use chess_core::board::BoardState;
use chess_core::codec::{decode, encode};
use chess_core::fen::parse_placement;
use chess_core::movegen::generate_all_moves;
use chess_core::perft::{parallel_perft, run_perft_test};
use chess_core::types::Color;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SEB_PLACEMENT: &str = "r3k2r/p1ppqpb1/Bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPB1PPP/R3K2R";

pub fn bench_attack_tables(c: &mut Criterion) {
    c.bench_function("build attack tables", |b| b.iter(AttackTables::new));
}

pub fn bench_moves_from_start(c: &mut Criterion) {
    let bo = BoardState::new();
    c.bench_function("generate moves from start", |b| {
        b.iter(|| generate_all_moves(black_box(&bo), black_box(Color::White)))
    });
}

pub fn bench_moves_from_seb(c: &mut Criterion) {
    let bo = parse_placement(SEB_PLACEMENT).unwrap();
    c.bench_function("generate moves from seb", |b| {
        b.iter(|| generate_all_moves(black_box(&bo), black_box(Color::White)))
    });
}

pub fn bench_codec(c: &mut Criterion) {
    let bo = parse_placement(SEB_PLACEMENT).unwrap();
    let snapshot = encode(&bo);
    c.bench_function("encode snapshot", |b| b.iter(|| encode(black_box(&bo))));
    c.bench_function("decode snapshot", |b| b.iter(|| decode(black_box(&snapshot))));
}

pub fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");
    group.sample_size(10);

    let bo = BoardState::new();
    group.bench_function("perft 3 from start", |b| {
        b.iter(|| run_perft_test(black_box(&bo), Color::White, black_box(3)))
    });
    group.bench_function("parallel perft 4 from start", |b| {
        b.iter(|| parallel_perft(black_box(&bo), Color::White, black_box(4)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_attack_tables,
    bench_moves_from_start,
    bench_moves_from_seb,
    bench_codec,
    bench_perft,
);
criterion_main!(benches);
