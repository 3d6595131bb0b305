//! # Module: `movegen`
//!
//! Attack tables and the move generators built on them.
//!
//! ## Tables
//!
//! - **`init`**: const construction of the leaper, pawn, between and
//!   super-attack tables.
//! - **`line`**: perfect-hash indexers for sliding attacks and the lazily
//!   built line attack and pin tables.
//! - **`lookup`**: the query functions every other module goes through.
//!
//! ## Generators
//!
//! Every generator reports its moves to a [`MoveWalker`]. A walker returning
//! `false` stops the generation, and the generator then returns `false` as
//! well, so "is there any move" questions end at the first move found.
//!
//! - [`PseudoLegalMoveGenerator`]: moves that obey piece movement, optionally
//!   reduced when in check or restricted to checking moves.
//! - [`LegalMoveGenerator`]: pseudo-legal moves that keep the own king safe.
//! - [`QuiescenceMoveGenerator`]: captures, promotions and optionally checks.
//! - [`ReverseMoveGenerator`]: moves the side not on turn could have played
//!   to reach the position.
//! - [`MateChecker`]: mate and stalemate detection.

mod emitter;
mod init;
mod legal;
mod line;
mod lookup;
mod mate;
mod move_list;
mod pseudo_legal;
mod quiescence;
mod reverse;

pub use legal::LegalMoveGenerator;
pub use line::{LINE_TABLE_SIZE, LineIndexer, init_line_tables};
pub use lookup::{
    attacks, between, bishop_attacks, figure_attacks, line_attacks, line_pins, pawn_attacks,
    pawn_moves, pawns_attacked_squares, queen_attacks, reverse_pawn_moves, rook_attacks,
    super_attacks,
};
pub use mate::MateChecker;
pub use move_list::MoveList;
pub use pseudo_legal::PseudoLegalMoveGenerator;
pub use quiescence::QuiescenceMoveGenerator;
pub use reverse::ReverseMoveGenerator;

use super::{Position, PositionCaching};
use crate::core::Move;

/******************************************\
|==========================================|
|               Move Walker                |
|==========================================|
\******************************************/

/// Receiver of generated moves.
///
/// Returning `false` from [`process_move`](MoveWalker::process_move) aborts
/// the generation.
pub trait MoveWalker {
    fn process_move(&mut self, mv: &Move) -> bool;
}

impl<F: FnMut(&Move) -> bool> MoveWalker for F {
    #[inline]
    fn process_move(&mut self, mv: &Move) -> bool {
        self(mv)
    }
}

/******************************************\
|==========================================|
|              Move Generator              |
|==========================================|
\******************************************/

/// Common interface of the generators.
///
/// The position is borrowed mutably because legality testing plays the
/// candidate moves; it is unchanged when the call returns. The return value
/// is `false` when the walker stopped the generation.
pub trait MoveGenerator {
    fn generate<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool;
}

impl MoveGenerator for PseudoLegalMoveGenerator {
    #[inline]
    fn generate<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool {
        self.generate_moves(position, walker)
    }
}

impl MoveGenerator for LegalMoveGenerator {
    #[inline]
    fn generate<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool {
        self.generate_moves(position, walker)
    }
}

impl MoveGenerator for QuiescenceMoveGenerator {
    #[inline]
    fn generate<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool {
        self.generate_moves(position, walker)
    }
}

impl MoveGenerator for ReverseMoveGenerator {
    #[inline]
    fn generate<C: PositionCaching, W: MoveWalker + ?Sized>(
        &self,
        position: &mut Position<C>,
        walker: &mut W,
    ) -> bool {
        self.generate_moves(position, walker)
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

    fn collect<G: MoveGenerator>(generator: &G, position: &mut Position) -> MoveList {
        let mut list = MoveList::new();
        generator.generate(position, &mut list);
        list
    }

    #[test]
    fn test_closure_walker_stops_generation() {
        let mut position = Position::initial();
        let mut seen = 0;

        let finished = LegalMoveGenerator::new().generate(&mut position, &mut |_: &Move| {
            seen += 1;
            seen < 5
        });

        assert!(!finished);
        assert_eq!(seen, 5);
    }

    #[test]
    fn test_generators_through_trait() {
        let mut position = Position::from_fen(crate::board::KIWIPETE_FEN).unwrap();

        let pseudo = collect(&PseudoLegalMoveGenerator::new(), &mut position);
        let legal = collect(&LegalMoveGenerator::new(), &mut position);
        let quiescence = collect(&QuiescenceMoveGenerator::new(), &mut position);

        assert_eq!(legal.len(), 48);
        assert!(pseudo.len() >= legal.len());
        assert!(legal.iter().all(|mv| pseudo.contains(mv)));
        assert!(quiescence.iter().all(|mv| mv.is_capture() || mv.is_promotion()));
        assert_eq!(position, Position::from_fen(crate::board::KIWIPETE_FEN).unwrap());
    }
}
