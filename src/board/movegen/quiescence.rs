use std::ops::ControlFlow;

use super::MoveWalker;
use super::emitter::{MoveEmitter, finished};
use super::lookup::{
    attacks, bishop_attacks, figure_attacks, pawn_attacks, pawn_moves, pawns_attacked_squares,
    rook_attacks,
};
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Pseudo-legal captures and promotions, optionally joined by the quiet
/// moves that give a direct check.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuiescenceMoveGenerator {
    generate_checks: bool,
}

/// Quiet targets giving check, per piece family
struct CheckTargets {
    knight: Bitboard,
    orthogonal: Bitboard,
    diagonal: Bitboard,
}

impl QuiescenceMoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_checks(&self) -> bool {
        self.generate_checks
    }

    pub fn set_generate_checks(&mut self, generate_checks: bool) {
        self.generate_checks = generate_checks;
    }

    pub fn generate_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &Position<C>,
        walker: &mut W,
    ) -> bool {
        let mut emitter = MoveEmitter::new(position, walker);
        let checks = self.check_targets(&emitter);

        finished(walk(&mut emitter, &checks))
    }

    fn check_targets<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &MoveEmitter<'_, C, W>,
    ) -> CheckTargets {
        if !self.generate_checks {
            return CheckTargets {
                knight: Bitboard::EMPTY,
                orthogonal: Bitboard::EMPTY,
                diagonal: Bitboard::EMPTY,
            };
        }

        let opp_king = emitter.position.king_square(emitter.them);
        let occupancy = emitter.position.occupancy();
        let not_own = !emitter.own;

        CheckTargets {
            knight: figure_attacks(PieceType::Knight, opp_king) & not_own,
            orthogonal: rook_attacks(opp_king, occupancy) & not_own,
            diagonal: bishop_attacks(opp_king, occupancy) & not_own,
        }
    }
}

fn walk<C: PositionCaching, W: MoveWalker + ?Sized>(
    emitter: &mut MoveEmitter<'_, C, W>,
    checks: &CheckTargets,
) -> ControlFlow<()> {
    let king = emitter.position.king_square(emitter.us);
    emitter.normal_moves(PieceType::King, king, figure_attacks(PieceType::King, king) & emitter.opp)?;

    let figures = [
        (PieceType::Knight, checks.knight),
        (PieceType::Queen, checks.orthogonal | checks.diagonal),
        (PieceType::Rook, checks.orthogonal),
        (PieceType::Bishop, checks.diagonal),
    ];

    let occupancy = emitter.position.occupancy();

    for (pt, additional) in figures {
        let allowed = emitter.opp | additional;

        for begin in emitter.position.pieces_mask(emitter.us, pt) {
            let targets = attacks(emitter.us, pt, begin, occupancy) & allowed;
            emitter.normal_moves(pt, begin, targets)?;
        }
    }

    pawn_moves_of(emitter)?;
    emitter.en_passant_moves()
}

fn pawn_moves_of<C: PositionCaching, W: MoveWalker + ?Sized>(
    emitter: &mut MoveEmitter<'_, C, W>,
) -> ControlFlow<()> {
    let us = emitter.us;
    let occupancy = emitter.position.occupancy();
    let pawns = emitter.position.pieces_mask(us, PieceType::Pawn);

    for begin in pawns & Rank::Rank7.relative(us).bb() {
        let promotions = pawn_moves(us, begin) & !occupancy & Bitboard::RANK_18;
        emitter.pawn_moves(begin, promotions)?;
    }

    for begin in pawns & pawns_attacked_squares(emitter.them, emitter.opp) {
        let captures = pawn_attacks(us, begin) & emitter.opp;
        emitter.pawn_moves(begin, captures)?;
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveList;

    fn generate(generator: &QuiescenceMoveGenerator, fen: &str) -> Vec<String> {
        let position = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        generator.generate_moves(&position, &mut list);

        let mut names: Vec<String> = list.iter().map(|mv| mv.to_string()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_initial_position_is_quiet() {
        assert!(generate(&QuiescenceMoveGenerator::new(), crate::board::START_FEN).is_empty());
    }

    #[test]
    fn test_captures_and_promotions() {
        let fen = "1n2k3/P7/8/3p4/4P3/8/8/4K3 w - - 0 1";
        let names = generate(&QuiescenceMoveGenerator::new(), fen);

        let expected = [
            "a7a8b", "a7a8n", "a7a8q", "a7a8r", "a7b8b", "a7b8n", "a7b8q", "a7b8r", "e4d5",
        ];
        assert_eq!(names, expected);
    }

    #[test]
    fn test_checks() {
        let fen = "4k3/8/8/8/8/8/8/R3K1N1 w - - 0 1";
        assert!(generate(&QuiescenceMoveGenerator::new(), fen).is_empty());

        let mut generator = QuiescenceMoveGenerator::new();
        generator.set_generate_checks(true);
        assert!(generator.generate_checks());

        // Ra8+ only, no knight square reaches e8 in one move from g1
        assert_eq!(generate(&generator, fen), vec!["a1a8"]);
    }
}
