//! Error types of the board layer.
//!
//! Parse errors of the small value types live next to the types themselves;
//! this module holds the errors of whole-position operations.

use thiserror::Error;

use super::{Colour, ParseCastlingError, ParsePieceError, ParseSquareError, Square};

/******************************************\
|==========================================|
|             Fen Parse Errors             |
|==========================================|
\******************************************/

/// Failure of [`Position::from_fen`](crate::board::Position::from_fen).
///
/// Only the first four fields are interpreted; move counters may be missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN string must have 4 to 6 fields, found {0}")]
    InvalidNumberOfFields(usize),

    #[error("Invalid piece placement: {0}")]
    InvalidPiece(#[from] ParsePieceError),

    #[error("Invalid rank format in piece placement: {0}")]
    InvalidRankFormat(String),

    #[error("Invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),

    #[error("Invalid castling rights: {0}")]
    InvalidCastling(#[from] ParseCastlingError),

    #[error("Invalid en passant square: {0}")]
    InvalidEnPassantSquare(#[from] ParseSquareError),

    #[error("En passant square {0} is not on the third or sixth rank of the side that just moved")]
    WrongEnPassantRank(Square),
}

/******************************************\
|==========================================|
|             Integrity Errors             |
|==========================================|
\******************************************/

/// Broken invariant reported by
/// [`Position::check_integrity`](crate::board::Position::check_integrity).
/// Any of these means a bug in the board code itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("Square {0} is occupied by more than one piece type")]
    PieceTypeOverlap(Square),

    #[error("Colour occupancies overlap on {0}")]
    ColourOverlap(Square),

    #[error("Colour occupancy of {0:?} does not match the piece masks")]
    ColourOccupancy(Colour),

    #[error("Piece lookup on {0} disagrees with the piece masks")]
    PieceLookup(Square),

    #[error("Cached occupancy does not match the colour occupancies")]
    Occupancy,

    #[error("Incremental hash {cached:#018x} differs from recomputed {calculated:#018x}")]
    Hash { cached: u64, calculated: u64 },

    #[error("Incremental material hash {cached:#018x} differs from recomputed {calculated:#018x}")]
    MaterialHash { cached: u64, calculated: u64 },

    #[error("En passant file is set but the capture is not possible")]
    EnPassant,
}

/******************************************\
|==========================================|
|            Validation Errors             |
|==========================================|
\******************************************/

/// Reason why a position could not arise in a legal game, reported by
/// [`PositionValidator`](crate::board::PositionValidator).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{colour:?} has {count} kings, expected exactly one")]
    KingCount { colour: Colour, count: u32 },

    #[error("The side not on turn is in check")]
    NotOnTurnCheck,

    #[error("Castling rights require king and rook on their initial squares")]
    CastlingRights,

    #[error("Pawns stand on the first or last rank")]
    PawnsOnBackRank,

    #[error("En passant file does not match the position")]
    WrongEpFile,
}
