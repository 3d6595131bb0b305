use std::ops::ControlFlow;

use super::MoveWalker;
use super::emitter::{MoveEmitter, finished};
use super::lookup::{
    attacks, between, bishop_attacks, figure_attacks, line_pins, pawn_attacks, pawn_moves,
    pawns_attacked_squares, rook_attacks,
};
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Generates moves that obey the movement rules without testing the safety
/// of the own king.
///
/// Two switches narrow the output:
/// - `reduce_moves_in_check` drops moves of other pieces than the king that
///   can not resolve a check.
/// - `generate_only_checks` keeps the moves that may give check. Pieces
///   standing between the opponent king and an own slider keep all their
///   moves, so the output is a superset of the checking moves.
#[derive(Debug, Clone, Copy)]
pub struct PseudoLegalMoveGenerator {
    reduce_moves_in_check: bool,
    generate_only_checks: bool,
    pieces_to_generate: [bool; PieceType::NUM],
}

impl Default for PseudoLegalMoveGenerator {
    fn default() -> Self {
        PseudoLegalMoveGenerator {
            reduce_moves_in_check: false,
            generate_only_checks: false,
            pieces_to_generate: [true; PieceType::NUM],
        }
    }
}

/// Target and begin filters derived from the position
struct Restrictions {
    /// Allowed targets of every piece except the king
    reduction: Bitboard,
    orthogonal_checks: Bitboard,
    diagonal_checks: Bitboard,
    knight_checks: Bitboard,
    pawn_checks: Bitboard,
    /// Own pieces whose departure uncovers an own slider
    indirect_blockers: Bitboard,
}

impl PseudoLegalMoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reduce_moves_in_check(&self) -> bool {
        self.reduce_moves_in_check
    }

    pub fn set_reduce_moves_in_check(&mut self, reduce: bool) {
        self.reduce_moves_in_check = reduce;
    }

    pub fn generate_only_checks(&self) -> bool {
        self.generate_only_checks
    }

    pub fn set_generate_only_checks(&mut self, only_checks: bool) {
        self.generate_only_checks = only_checks;
    }

    pub fn generates_moves_of_piece(&self, pt: PieceType) -> bool {
        self.pieces_to_generate[pt.index()]
    }

    /// Enables or disables the moves of one piece type; castling follows the
    /// king and en passant the pawn
    pub fn set_generate_moves_of_piece(&mut self, pt: PieceType, generate: bool) {
        self.pieces_to_generate[pt.index()] = generate;
    }

    /// Reports the moves to `walker`; `false` when the walker stopped early
    pub fn generate_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &Position<C>,
        walker: &mut W,
    ) -> bool {
        let mut emitter = MoveEmitter::new(position, walker);
        let restrictions = self.restrictions(&emitter);

        finished(self.walk(&mut emitter, &restrictions))
    }

    fn restrictions<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &MoveEmitter<'_, C, W>,
    ) -> Restrictions {
        let position = emitter.position;
        let not_own = !emitter.own;

        let reduction = if self.reduce_moves_in_check {
            let king = position.king_square(emitter.us);
            let checkers = position.attacking_pieces(emitter.them, king);

            match checkers.count_bits() {
                0 => not_own,
                1 => checkers | between(king, checkers.lsb_unchecked()),
                _ => Bitboard::EMPTY,
            }
        } else {
            not_own
        };

        if !self.generate_only_checks {
            return Restrictions {
                reduction,
                orthogonal_checks: Bitboard::FULL,
                diagonal_checks: Bitboard::FULL,
                knight_checks: Bitboard::FULL,
                pawn_checks: Bitboard::FULL,
                indirect_blockers: Bitboard::EMPTY,
            };
        }

        let opp_king = position.king_square(emitter.them);
        let occupancy = position.occupancy();

        let mut indirect_blockers = Bitboard::EMPTY;

        for (cross, sliders) in [
            (CrossDirection::Orthogonal, position.rook_queen_mask(emitter.us)),
            (CrossDirection::Diagonal, position.bishop_queen_mask(emitter.us)),
        ] {
            for slider in line_pins(cross, opp_king, occupancy) & sliders {
                indirect_blockers |= between(opp_king, slider) & emitter.own;
            }
        }

        Restrictions {
            reduction,
            orthogonal_checks: rook_attacks(opp_king, occupancy),
            diagonal_checks: bishop_attacks(opp_king, occupancy),
            knight_checks: figure_attacks(PieceType::Knight, opp_king),
            pawn_checks: pawn_attacks(emitter.them, opp_king) | emitter.us.promotion_rank().bb(),
            indirect_blockers,
        }
    }

    fn walk<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &mut MoveEmitter<'_, C, W>,
        restrictions: &Restrictions,
    ) -> ControlFlow<()> {
        if self.generates_moves_of_piece(PieceType::King) {
            self.king_moves(emitter, restrictions)?;
        }

        let figures = [
            (PieceType::Knight, restrictions.knight_checks),
            (
                PieceType::Queen,
                restrictions.orthogonal_checks | restrictions.diagonal_checks,
            ),
            (PieceType::Rook, restrictions.orthogonal_checks),
            (PieceType::Bishop, restrictions.diagonal_checks),
        ];

        for (pt, checks) in figures {
            if self.generates_moves_of_piece(pt) {
                self.figure_moves(emitter, restrictions, pt, checks)?;
            }
        }

        if self.generates_moves_of_piece(PieceType::Pawn) {
            self.pawn_moves(emitter, restrictions)?;
        }

        if self.generates_moves_of_piece(PieceType::King) {
            emitter.castling_moves()?;
        }

        if self.generates_moves_of_piece(PieceType::Pawn) {
            emitter.en_passant_moves()?;
        }

        ControlFlow::Continue(())
    }

    /// King steps are never reduced, the king may always run away
    fn king_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &mut MoveEmitter<'_, C, W>,
        restrictions: &Restrictions,
    ) -> ControlFlow<()> {
        let begin = emitter.position.king_square(emitter.us);
        let mut targets = figure_attacks(PieceType::King, begin) & !emitter.own;

        if self.generate_only_checks && !restrictions.indirect_blockers.contains(begin) {
            targets &= figure_attacks(PieceType::King, emitter.position.king_square(emitter.them));
        }

        emitter.normal_moves(PieceType::King, begin, targets)
    }

    fn figure_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &mut MoveEmitter<'_, C, W>,
        restrictions: &Restrictions,
        pt: PieceType,
        checks: Bitboard,
    ) -> ControlFlow<()> {
        let occupancy = emitter.position.occupancy();

        for begin in emitter.position.pieces_mask(emitter.us, pt) {
            let mut targets = attacks(emitter.us, pt, begin, occupancy) & restrictions.reduction;

            if self.generate_only_checks && !restrictions.indirect_blockers.contains(begin) {
                targets &= checks;
            }

            emitter.normal_moves(pt, begin, targets)?;
        }

        ControlFlow::Continue(())
    }

    fn pawn_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        emitter: &mut MoveEmitter<'_, C, W>,
        restrictions: &Restrictions,
    ) -> ControlFlow<()> {
        let us = emitter.us;
        let occupancy = emitter.position.occupancy();
        let mut begins = emitter.position.pieces_mask(us, PieceType::Pawn);

        if self.generate_only_checks || self.reduce_moves_in_check {
            let mut allowed = restrictions.reduction;

            if self.generate_only_checks {
                allowed &= restrictions.pawn_checks;
            }

            let advance_sources = match us {
                Colour::White => Bitboard((allowed.0 >> 8) | ((allowed & Bitboard::RANK_4).0 >> 16)),
                Colour::Black => Bitboard((allowed.0 << 8) | ((allowed & Bitboard::RANK_5).0 << 16)),
            };
            let capture_sources = pawns_attacked_squares(emitter.them, allowed);

            begins &= advance_sources | capture_sources | restrictions.indirect_blockers;
        }

        for begin in begins {
            let advances = pawn_moves(us, begin) & !occupancy;
            let captures = pawn_attacks(us, begin) & emitter.opp;
            let mut targets = (advances | captures) & restrictions.reduction;

            if self.generate_only_checks && !restrictions.indirect_blockers.contains(begin) {
                targets &= restrictions.pawn_checks;
            }

            let targets: Bitboard = targets
                .filter(|&target| !between(begin, target).intersects(occupancy))
                .collect();

            emitter.pawn_moves(begin, targets)?;
        }

        ControlFlow::Continue(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveList;

    fn generate(generator: &PseudoLegalMoveGenerator, fen: &str) -> MoveList {
        let position = Position::from_fen(fen).unwrap();
        let mut list = MoveList::new();
        assert!(generator.generate_moves(&position, &mut list));
        list
    }

    fn names(list: &MoveList) -> Vec<String> {
        list.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn test_initial_position() {
        let list = generate(&PseudoLegalMoveGenerator::new(), crate::board::START_FEN);
        assert_eq!(list.len(), 20);

        let names = names(&list);
        assert!(names.contains(&"e2e4".to_string()));
        assert!(names.contains(&"g1f3".to_string()));
    }

    #[test]
    fn test_blocked_double_step() {
        let list = generate(&PseudoLegalMoveGenerator::new(), "4k3/8/8/8/8/4n3/4P3/K7 w - - 0 1");
        let pawn_moves: Vec<_> = list
            .iter()
            .filter(|mv| mv.moving_piece_type() == Some(PieceType::Pawn))
            .collect();

        assert!(pawn_moves.is_empty());
    }

    #[test]
    fn test_castling_and_promotions() {
        let list = generate(&PseudoLegalMoveGenerator::new(), "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let castlings: Vec<_> = list.iter().filter(|mv| mv.move_type() == MoveType::Castling).collect();

        assert_eq!(castlings.len(), 2);
        assert!(names(&list).contains(&"e1g1".to_string()));
        assert!(names(&list).contains(&"e1c1".to_string()));

        let list = generate(&PseudoLegalMoveGenerator::new(), "1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let promotions: Vec<_> = list.iter().filter(|mv| mv.is_promotion()).collect();

        // Four promotions on a8 and four capturing on b8
        assert_eq!(promotions.len(), 8);
        assert_eq!(promotions.iter().filter(|mv| mv.is_capture()).count(), 4);
    }

    #[test]
    fn test_en_passant_from_both_sides() {
        let list = generate(&PseudoLegalMoveGenerator::new(), "k7/8/8/3PpP2/8/8/8/K7 w - e6 0 1");
        let ep: Vec<_> = list.iter().filter(|mv| mv.move_type() == MoveType::EnPassant).collect();

        assert_eq!(ep.len(), 2);
        assert!(names(&list).contains(&"d5e6".to_string()));
        assert!(names(&list).contains(&"f5e6".to_string()));
    }

    #[test]
    fn test_reduction_in_single_check() {
        let fen = "4k3/8/8/8/8/2r5/8/2K1B3 w - - 0 1";

        let list = generate(&PseudoLegalMoveGenerator::new(), fen);
        assert_eq!(list.len(), 10);

        let mut generator = PseudoLegalMoveGenerator::new();
        generator.set_reduce_moves_in_check(true);
        let list = generate(&generator, fen);

        // Five king steps and the capture of the checking rook
        assert_eq!(list.len(), 6);
        assert!(names(&list).contains(&"e1c3".to_string()));
    }

    #[test]
    fn test_reduction_in_double_check() {
        let mut generator = PseudoLegalMoveGenerator::new();
        generator.set_reduce_moves_in_check(true);

        let list = generate(&generator, "4r1k1/8/8/8/8/3n3R/8/4K3 w - - 0 1");

        assert_eq!(list.len(), 5);
        assert!(list.iter().all(|mv| mv.moving_piece_type() == Some(PieceType::King)));
    }

    #[test]
    fn test_only_checks() {
        let mut generator = PseudoLegalMoveGenerator::new();
        generator.set_generate_only_checks(true);

        let list = generate(&generator, "4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(names(&list), vec!["a1a8".to_string()]);

        // Every knight move uncovers the rook on e1
        let list = generate(&generator, "4k3/8/8/8/4N3/8/8/4R1K1 w - - 0 1");
        assert_eq!(list.len(), 8);
        assert!(list.iter().all(|mv| mv.moving_piece_type() == Some(PieceType::Knight)));
    }

    #[test]
    fn test_only_checks_contains_every_check() {
        let fen = crate::board::KIWIPETE_FEN;
        let mut position = Position::from_fen(fen).unwrap();

        let mut all = MoveList::new();
        PseudoLegalMoveGenerator::new().generate_moves(&position, &mut all);

        let mut generator = PseudoLegalMoveGenerator::new();
        generator.set_generate_only_checks(true);
        let mut checks = MoveList::new();
        generator.generate_moves(&position, &mut checks);

        for mv in &all {
            position.make_move(mv);
            let gives_check = position.is_check();
            position.undo_move(mv);

            if gives_check {
                assert!(checks.contains(mv), "missing check {mv}");
            }
        }

        assert!(checks.len() < all.len());
    }

    #[test]
    fn test_piece_selection() {
        let mut generator = PseudoLegalMoveGenerator::new();
        generator.set_generate_moves_of_piece(PieceType::Pawn, false);
        assert!(!generator.generates_moves_of_piece(PieceType::Pawn));

        let list = generate(&generator, crate::board::START_FEN);
        assert_eq!(list.len(), 4);
    }
}
