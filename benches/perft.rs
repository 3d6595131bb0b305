use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use bishop_board::board::movegen::init_line_tables;
use bishop_board::board::{KIWIPETE_FEN, NullCaching, START_FEN};
use bishop_board::utils::perft;
use bishop_board::{LegalMoveGenerator, MoveList, Position};

struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const CASES: &[BenchCase] = &[
    BenchCase {
        name: "startpos",
        fen: START_FEN,
        expected_nodes: &[20, 400, 8_902],
    },
    BenchCase {
        name: "kiwipete",
        fen: KIWIPETE_FEN,
        expected_nodes: &[48, 2_039],
    },
    BenchCase {
        name: "endgame",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2_812],
    },
];

fn bench_perft(c: &mut Criterion) {
    init_line_tables();

    let mut group = c.benchmark_group("perft");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark fen should parse");

        for (depth_idx, &expected) in case.expected_nodes.iter().enumerate() {
            let depth = depth_idx as u32 + 1;

            let mut warmup = position.clone();
            assert_eq!(perft(&mut warmup, depth), expected, "node mismatch for {} depth {depth}", case.name);

            group.throughput(Throughput::Elements(expected));
            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}_d{depth}", case.name)),
                &depth,
                |b, &depth| {
                    let mut position = position.clone();
                    b.iter(|| black_box(perft(&mut position, black_box(depth))));
                },
            );
        }
    }

    group.finish();
}

/// Hash maintenance cost: the same tree with and without incremental keys
fn bench_caching(c: &mut Criterion) {
    let mut group = c.benchmark_group("caching");

    let mut zobrist = Position::from_fen(KIWIPETE_FEN).expect("benchmark fen should parse");
    group.bench_function("zobrist_d2", |b| b.iter(|| black_box(perft(&mut zobrist, 2))));

    let mut null: Position<NullCaching> = KIWIPETE_FEN.parse().expect("benchmark fen should parse");
    group.bench_function("null_d2", |b| b.iter(|| black_box(perft(&mut null, 2))));

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let generator = LegalMoveGenerator::new();
    let mut position = Position::from_fen(KIWIPETE_FEN).expect("benchmark fen should parse");

    c.bench_function("legal_moves_kiwipete", |b| {
        b.iter(|| {
            let mut list = MoveList::new();
            generator.generate_moves(&mut position, &mut list);
            black_box(list.len())
        })
    });
}

criterion_group!(perft_benches, bench_perft, bench_caching, bench_generation);
criterion_main!(perft_benches);
