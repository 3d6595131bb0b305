use super::LegalMoveGenerator;
use super::lookup::figure_attacks;
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Detects mate and stalemate of the side to move.
///
/// King escapes are tested directly against the attacked squares; the other
/// pieces go through a legal generator that skips moves unable to answer the
/// check and stops at the first move found.
#[derive(Debug, Clone, Copy)]
pub struct MateChecker {
    answers: LegalMoveGenerator,
    any_move: LegalMoveGenerator,
}

impl Default for MateChecker {
    fn default() -> Self {
        let mut answers = LegalMoveGenerator::new();
        answers.set_reduce_moves_in_check(true);
        answers.set_generate_moves_of_piece(PieceType::King, false);

        MateChecker {
            answers,
            any_move: LegalMoveGenerator::new(),
        }
    }
}

impl MateChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mate<C: PositionCaching>(&self, position: &mut Position<C>) -> bool {
        position.is_check() && self.is_mate_in_check(position)
    }

    /// Mate test of a position already known to be in check
    pub fn is_mate_in_check<C: PositionCaching>(&self, position: &mut Position<C>) -> bool {
        !has_king_escape(position) && !self.answers.has_legal_move(position)
    }

    pub fn is_stalemate<C: PositionCaching>(&self, position: &mut Position<C>) -> bool {
        !position.is_check() && !self.any_move.has_legal_move(position)
    }
}

/// A king step to a square that stays unattacked once the king has left its
/// square, which lets sliders see through it
fn has_king_escape<C: PositionCaching>(position: &Position<C>) -> bool {
    let us = position.on_turn();
    let king = position.king_square(us);

    let attacked = position.attacked_squares_with(!us, position.occupancy() & !king.bb());
    let escapes = figure_attacks(PieceType::King, king) & !attacked & !position.colour_occupancy(us);

    escapes.is_occupied()
}
