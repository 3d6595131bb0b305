use std::ops::ControlFlow;

use super::MoveWalker;
use crate::board::mask::{castling_geometry, connected_pawn_squares, ep_square, ep_target_square};
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Shared move construction of the forward generators.
///
/// Every move starts from a template carrying the undo state of the
/// position; a `Break` from any method means the walker asked to stop.
pub(super) struct MoveEmitter<'a, C: PositionCaching, W: MoveWalker + ?Sized> {
    pub position: &'a Position<C>,
    walker: &'a mut W,
    base: Move,
    pub us: Colour,
    pub them: Colour,
    pub own: Bitboard,
    pub opp: Bitboard,
}

impl<'a, C: PositionCaching, W: MoveWalker + ?Sized> MoveEmitter<'a, C, W> {
    pub fn new(position: &'a Position<C>, walker: &'a mut W) -> Self {
        let us = position.on_turn();

        MoveEmitter {
            position,
            walker,
            base: Move::initialize(position.castling_rights(), position.ep_file()),
            us,
            them: !us,
            own: position.colour_occupancy(us),
            opp: position.colour_occupancy(!us),
        }
    }

    #[inline]
    pub fn emit(&mut self, mv: Move) -> ControlFlow<()> {
        if self.walker.process_move(&mv) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }

    #[inline]
    fn start(&self, pt: PieceType, begin: Square) -> Move {
        let mut mv = self.base;
        mv.set_moving_piece_type(pt);
        mv.set_begin(begin);
        mv
    }

    /// Non-pawn moves of the piece on `begin`
    pub fn normal_moves(&mut self, pt: PieceType, begin: Square, targets: Bitboard) -> ControlFlow<()> {
        let base = self.start(pt, begin);

        for target in targets {
            let mut mv = base;
            mv.finish_normal(target, self.position.piece_type_on(target));
            self.emit(mv)?;
        }

        ControlFlow::Continue(())
    }

    /// Pawn advances and captures; a target on the last rank yields one move
    /// per promotion figure
    pub fn pawn_moves(&mut self, begin: Square, targets: Bitboard) -> ControlFlow<()> {
        let base = self.start(PieceType::Pawn, begin);

        for target in targets {
            let captured = self.position.piece_type_on(target);

            if Bitboard::RANK_18.contains(target) {
                for promotion in PieceType::PROMOTION_FIGURES {
                    let mut mv = base;
                    mv.finish_promotion(target, captured, promotion);
                    self.emit(mv)?;
                }
            } else {
                let mut mv = base;
                mv.finish_normal(target, captured);
                self.emit(mv)?;
            }
        }

        ControlFlow::Continue(())
    }

    pub fn en_passant_moves(&mut self) -> ControlFlow<()> {
        let Some(file) = self.position.ep_file() else {
            return ControlFlow::Continue(());
        };

        let target = ep_target_square(self.them, file);
        let capturers = connected_pawn_squares(ep_square(self.them, file))
            & self.position.pieces_mask(self.us, PieceType::Pawn);

        for begin in capturers {
            let mut mv = self.start(PieceType::Pawn, begin);
            mv.finish_en_passant(target);
            self.emit(mv)?;
        }

        ControlFlow::Continue(())
    }

    /// Castlings that pass every test except the safety of the king target
    pub fn castling_moves(&mut self) -> ControlFlow<()> {
        if !self.position.castling_rights().is_right_for_colour(self.us) || self.position.is_check() {
            return ControlFlow::Continue(());
        }

        for castling_type in [CastlingType::Short, CastlingType::Long] {
            if self.position.is_castling_possible(castling_type) {
                let geometry = castling_geometry(self.us, castling_type);

                let mut mv = self.start(PieceType::King, geometry.king_begin);
                mv.finish_castling(geometry.king_target);
                self.emit(mv)?;
            }
        }

        ControlFlow::Continue(())
    }
}

/// Converts the internal flow into the walker protocol result
#[inline]
pub(super) fn finished(flow: ControlFlow<()>) -> bool {
    flow.is_continue()
}
