use bishop_board::board::{KIWIPETE_FEN, NullCaching, START_FEN};
use bishop_board::utils::{perft, perft_bench, perft_divide};
use bishop_board::{Colour, Position};

fn count(fen: &str, depth: u32) -> u64 {
    let mut position = Position::from_fen(fen).unwrap();
    let before = position.clone();

    let nodes = perft(&mut position, depth);
    assert_eq!(position, before, "tree walk left {fen} changed");

    nodes
}

#[test]
fn test_initial_position() {
    assert_eq!(count(START_FEN, 1), 20);
    assert_eq!(count(START_FEN, 2), 400);
    assert_eq!(count(START_FEN, 3), 8_902);
}

#[test]
fn test_kiwipete() {
    assert_eq!(count(KIWIPETE_FEN, 1), 48);
    assert_eq!(count(KIWIPETE_FEN, 2), 2_039);
    assert_eq!(count(KIWIPETE_FEN, 3), 97_862);
}

#[test]
fn test_rook_endgame() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    assert_eq!(count(fen, 1), 14);
    assert_eq!(count(fen, 2), 191);
    assert_eq!(count(fen, 3), 2_812);
    assert_eq!(count(fen, 4), 43_238);
}

#[test]
fn test_promotions_and_castling() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
    assert_eq!(count(fen, 1), 6);
    assert_eq!(count(fen, 2), 264);
    assert_eq!(count(fen, 3), 9_467);

    let fen = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";
    assert_eq!(count(fen, 1), 44);
    assert_eq!(count(fen, 2), 1_486);
    assert_eq!(count(fen, 3), 62_379);
}

#[test]
fn test_middlegame() {
    let fen = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";
    assert_eq!(count(fen, 1), 46);
    assert_eq!(count(fen, 2), 2_079);
}

#[test]
#[ignore = "deep reference counts, run with --ignored in release builds"]
fn test_bench_list() {
    assert!(perft_bench());
}

#[test]
fn test_divide_matches_total() {
    let mut position = Position::from_fen(KIWIPETE_FEN).unwrap();
    let divide = perft_divide(&mut position, 3);

    assert_eq!(divide.len(), 48);
    assert_eq!(divide.iter().map(|(_, nodes)| *nodes).sum::<u64>(), 97_862);
    assert_eq!(position.on_turn(), Colour::White);
}

#[test]
fn test_null_caching_agrees() {
    let mut position: Position<NullCaching> = START_FEN.parse().unwrap();
    assert_eq!(perft(&mut position, 3), 8_902);
}
