use std::ops::ControlFlow;

use super::MoveWalker;
use super::emitter::finished;
use super::lookup::{between, figure_attacks, reverse_pawn_moves};
use crate::board::mask::{
    connected_pawn_squares, empty_ep_squares, ep_rank_mask, ep_square, pawn_initial_square,
};
use crate::board::{Position, PositionCaching};
use crate::core::*;

/// Generates the moves the side not on turn may have played to reach the
/// position.
///
/// Undoing a generated move with [`Position::undo_move`] yields the
/// predecessor. Captures, promotions and castlings are not reversed, and the
/// predecessors are not tested for legality. Castling rights are carried over
/// unchanged; en passant files of the predecessor are enumerated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseMoveGenerator;

impl ReverseMoveGenerator {
    pub fn new() -> Self {
        ReverseMoveGenerator
    }

    pub fn generate_moves<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &Position<C>,
        walker: &mut W,
    ) -> bool {
        let mut walk = ReverseWalk {
            position,
            walker,
            moved: !position.on_turn(),
        };

        finished(walk.run())
    }
}

struct ReverseWalk<'a, C: PositionCaching, W: MoveWalker + ?Sized> {
    position: &'a Position<C>,
    walker: &'a mut W,
    /// Side that played the reversed move
    moved: Colour,
}

impl<C: PositionCaching, W: MoveWalker + ?Sized> ReverseWalk<'_, C, W> {
    fn run(&mut self) -> ControlFlow<()> {
        let occupancy = self.position.occupancy();

        // A set en passant file pins down the last move
        if let Some(file) = self.position.ep_file() {
            return self.expand(
                PieceType::Pawn,
                pawn_initial_square(self.moved, file),
                ep_square(self.moved, file),
            );
        }

        for pt in PieceType::FIGURES {
            for target in self.position.pieces_mask(self.moved, pt) {
                for begin in figure_attacks(pt, target) & !occupancy {
                    if !pt.is_short_moving_figure() && between(begin, target).intersects(occupancy) {
                        continue;
                    }

                    self.expand(pt, begin, target)?;
                }
            }
        }

        for target in self.position.pieces_mask(self.moved, PieceType::Pawn) {
            for begin in reverse_pawn_moves(self.moved, target) & !occupancy {
                if !between(begin, target).intersects(occupancy) {
                    self.expand(PieceType::Pawn, begin, target)?;
                }
            }
        }

        ControlFlow::Continue(())
    }

    /// Emits the move without an en passant file in the predecessor, then
    /// once per file on which the side on turn may have just advanced by two
    fn expand(&mut self, pt: PieceType, begin: Square, target: Square) -> ControlFlow<()> {
        let rights = self.position.castling_rights();
        self.emit(Move::initialize(rights, None), pt, begin, target)?;

        let on_turn = !self.moved;
        let mut capturers = self.position.pieces_mask(self.moved, PieceType::Pawn) & !target.bb();
        if pt == PieceType::Pawn {
            capturers |= begin.bb();
        }

        let previous_occupancy = (self.position.occupancy() & !target.bb()) | begin.bb();
        let advanced = self.position.pieces_mask(on_turn, PieceType::Pawn) & ep_rank_mask(on_turn);

        for pawn in advanced {
            let file = pawn.file();

            if connected_pawn_squares(ep_square(on_turn, file)).intersects(capturers)
                && !previous_occupancy.intersects(empty_ep_squares(on_turn, file))
            {
                self.emit(Move::initialize(rights, Some(file)), pt, begin, target)?;
            }
        }

        ControlFlow::Continue(())
    }

    #[inline]
    fn emit(&mut self, mut mv: Move, pt: PieceType, begin: Square, target: Square) -> ControlFlow<()> {
        mv.set_moving_piece_type(pt);
        mv.set_begin(begin);
        mv.finish_normal(target, None);

        if self.walker.process_move(&mv) {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::MoveList;

    fn reverse_moves(position: &Position) -> MoveList {
        let mut list = MoveList::new();
        assert!(ReverseMoveGenerator::new().generate_moves(position, &mut list));
        list
    }

    #[test]
    fn test_figure_moves() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b - - 0 1").unwrap();
        let list = reverse_moves(&position);

        // Five king origins, nine rook origins; a1..d1 lie behind the king
        assert_eq!(list.len(), 14);
        assert!(list.iter().all(|mv| mv.prev_ep_file().is_none() && !mv.is_capture()));
        assert!(list.iter().all(|mv| mv.begin() != Square::A1));
    }

    #[test]
    fn test_en_passant_position_has_one_predecessor() {
        let mut position = Position::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
        assert_eq!(position.ep_file(), Some(File::FileE));

        let list = reverse_moves(&position);
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].to_string(), "e2e4");

        position.undo_move(&list[0]);
        assert_eq!(position, Position::from_fen("4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1").unwrap());
    }

    #[test]
    fn test_predecessor_with_en_passant_file() {
        let fen = "4k3/8/4P3/3p4/8/8/8/4K3 b - - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let list = reverse_moves(&position);

        assert_eq!(list.len(), 7);

        let with_ep: Vec<Move> = list.iter().copied().filter(|mv| mv.prev_ep_file().is_some()).collect();
        assert_eq!(with_ep.len(), 1);

        let mv = with_ep[0];
        assert_eq!(mv.to_string(), "e5e6");
        assert_eq!(mv.prev_ep_file(), Some(File::FileD));

        position.undo_move(&mv);
        let predecessor = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        assert_eq!(position, predecessor);
        assert_eq!(position.hash(), predecessor.hash());

        position.make_move(&mv);
        assert_eq!(position, Position::from_fen(fen).unwrap());
    }

    #[test]
    fn test_walker_stop() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R b - - 0 1").unwrap();
        let mut count = 0;

        let finished = ReverseMoveGenerator::new().generate_moves(&position, &mut |_: &Move| {
            count += 1;
            false
        });

        assert!(!finished);
        assert_eq!(count, 1);
    }
}
