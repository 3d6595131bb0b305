use std::time::Instant;

use crate::board::movegen::LegalMoveGenerator;
use crate::board::{MoveList, Position, PositionCaching};
use crate::core::Move;

/// Number of leaf nodes of the legal move tree of `depth` plies
pub fn perft<C: PositionCaching>(position: &mut Position<C>, depth: u32) -> u64 {
    let generator = LegalMoveGenerator::new();
    count_nodes(&generator, position, depth)
}

fn count_nodes<C: PositionCaching>(
    generator: &LegalMoveGenerator,
    position: &mut Position<C>,
    depth: u32,
) -> u64 {
    if depth == 0 {
        return 1;
    }

    if depth == 1 {
        let mut nodes = 0;
        generator.generate_moves(position, &mut |_: &Move| {
            nodes += 1;
            true
        });
        return nodes;
    }

    let mut move_list = MoveList::new();
    generator.generate_moves(position, &mut move_list);

    let mut nodes = 0;

    for mv in &move_list {
        position.make_move(mv);
        nodes += count_nodes(generator, position, depth - 1);
        position.undo_move(mv);
    }

    nodes
}

/// Node counts below every legal move of the position
pub fn perft_divide<C: PositionCaching>(position: &mut Position<C>, depth: u32) -> Vec<(Move, u64)> {
    assert!(depth > 0, "divide needs at least one ply");

    let generator = LegalMoveGenerator::new();
    let mut move_list = MoveList::new();
    generator.generate_moves(position, &mut move_list);

    move_list
        .iter()
        .map(|mv| {
            position.make_move(mv);
            let nodes = count_nodes(&generator, position, depth - 1);
            position.undo_move(mv);

            log::debug!("{mv}: {nodes}");
            (*mv, nodes)
        })
        .collect()
}

/// Reference positions with a depth and the expected node count
#[rustfmt::skip]
pub const BENCH_LIST: &[(&str, u32, u64)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 4, 197_281),
    ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 3, 97_862),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 5, 674_624),
    ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 4, 422_333),
    ("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8", 3, 62_379),
    ("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10", 3, 89_890),
    ("1k6/1b6/8/8/7R/8/8/4K2R b K - 0 1", 5, 1_063_513),
    ("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6, 1_134_888),
    ("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6, 1_440_467),
    ("2K2r2/4P3/8/8/8/8/8/3k4 w - - 0 1", 6, 3_821_001),
    ("K1k5/8/P7/8/8/8/8/8 w - - 0 1", 6, 2_217),
];

/// Runs [`BENCH_LIST`]; true when every count matches
pub fn perft_bench() -> bool {
    let mut passed = true;

    for &(fen, depth, expected_nodes) in BENCH_LIST {
        let mut position = match Position::from_fen(fen) {
            Ok(position) => position,
            Err(err) => {
                log::error!("bench position {fen} rejected: {err}");
                passed = false;
                continue;
            }
        };

        let start = Instant::now();
        let nodes = perft(&mut position, depth);
        let time = start.elapsed().as_millis().max(1);

        if nodes == expected_nodes {
            log::info!(
                "PASSED depth {depth} nodes {nodes} time {time}ms ({:.1} Mnps) {fen}",
                nodes as f64 / time as f64 / 1000.0
            );
        } else {
            log::error!("FAILED depth {depth} nodes {nodes} expected {expected_nodes} {fen}");
            passed = false;
        }
    }

    passed
}
