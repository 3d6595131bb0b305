use super::{MoveList, MoveWalker, PseudoLegalMoveGenerator};
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Pseudo-legal moves filtered by playing each one and testing the own king
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator {
    pseudo: PseudoLegalMoveGenerator,
}

impl LegalMoveGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skipping moves that can not resolve a check changes no result, only
    /// the work spent
    pub fn set_reduce_moves_in_check(&mut self, reduce: bool) {
        self.pseudo.set_reduce_moves_in_check(reduce);
    }

    pub fn set_generate_only_checks(&mut self, only_checks: bool) {
        self.pseudo.set_generate_only_checks(only_checks);
    }

    pub fn set_generate_moves_of_piece(&mut self, pt: PieceType, generate: bool) {
        self.pseudo.set_generate_moves_of_piece(pt, generate);
    }

    /// Reports the legal moves to `walker`; `false` when the walker stopped
    /// early. The position is restored before returning.
    pub fn generate_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool {
        let mut candidates = MoveList::new();
        self.pseudo.generate_moves(position, &mut candidates);

        for mv in &candidates {
            if position.is_legal_move(mv) && !walker.process_move(mv) {
                return false;
            }
        }

        true
    }

    /// True when the side to move has at least one move of the enabled pieces
    pub fn has_legal_move<C: PositionCaching>(&self, position: &mut Position<C>) -> bool {
        !self.generate_moves(position, &mut |_: &Move| false)
    }
}
