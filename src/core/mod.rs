// Core module exports

// Value type submodules
pub mod bitboard;
pub mod castling;
pub mod errors;
pub mod material;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

mod macros;

// Re-export common types for easier access
pub use bitboard::{Bitboard, Subsets};
pub use castling::{CastlingRights, ParseCastlingError};
pub use errors::{FenError, IntegrityError, ValidationError};
pub use material::{MaterialHash, ParseMaterialError};
pub use moves::{Move, MoveType};
pub use piece::{ParsePieceError, Piece, PieceType};
pub use square::{File, ParseFileError, ParseRankError, ParseSquareError, Rank, Square};
pub use types::{CastlingType, Colour, CrossDirection, Direction, SquareAddError, castling_index};
