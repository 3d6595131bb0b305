//! # Bishop Board
//!
//! Bitboard position model and move generation core: reversible packed moves,
//! perfect-hash sliding attacks and incrementally maintained hashes.
pub mod board;
pub mod core;
pub mod utils;

pub use board::movegen::{
    LegalMoveGenerator, MateChecker, MoveGenerator, MoveList, MoveWalker, PseudoLegalMoveGenerator,
    QuiescenceMoveGenerator, ReverseMoveGenerator,
};
pub use board::{NullCaching, Position, PositionCaching, PositionValidator, ZobristCaching};
pub use core::*;
