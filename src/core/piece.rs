use thiserror::Error;

use crate::core::Colour;

/******************************************\
|==========================================|
|                Piece Type                |
|==========================================|
\******************************************/

/// # Piece Type representation
///
/// - Ordered king first so that figures (`King..=Knight`) and promotion
///   figures (`Queen..=Knight`) are contiguous ranges.
/// - The packed move stores a missing piece type as [`PieceType::NONE_CODE`].

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PieceType {
    King, Queen, Rook, Bishop, Knight, Pawn,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;

    /// Encoding of "no piece" inside packed data
    pub const NONE_CODE: u8 = 6;

    /// Pieces a pawn may promote to, in generation order
    pub const PROMOTION_FIGURES: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    /// Piece types whose count is tracked by the material hash
    pub const VARIABLE: [PieceType; 5] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
        PieceType::Pawn,
    ];

    /// Piece types that are not pawns
    pub const FIGURES: [PieceType; 5] = [
        PieceType::King,
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];
}

crate::impl_from_to_primitive!(PieceType);
crate::impl_enum_iter!(PieceType);

impl PieceType {
    /// Every piece except the pawn
    #[inline]
    pub const fn is_figure(&self) -> bool {
        !matches!(self, PieceType::Pawn)
    }

    /// Queen, rook, bishop or knight
    #[inline]
    pub const fn is_promotion_figure(&self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }

    /// Every piece except the king
    #[inline]
    pub const fn is_variable(&self) -> bool {
        !matches!(self, PieceType::King)
    }

    /// King and knight move one step, their attack set does not depend on occupancy
    #[inline]
    pub const fn is_short_moving_figure(&self) -> bool {
        matches!(self, PieceType::King | PieceType::Knight)
    }

    /// Encodes an optional piece type into its 3-bit packed form
    #[inline]
    pub const fn encode(piece_type: Option<PieceType>) -> u8 {
        match piece_type {
            Some(pt) => pt as u8,
            None => PieceType::NONE_CODE,
        }
    }

    /// Decodes a 3-bit packed piece type
    #[inline]
    pub const fn decode(code: u8) -> Option<PieceType> {
        PieceType::try_from_index(code as usize)
    }
}

/******************************************\
|==========================================|
|                  Piece                   |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - `colour | piece_type << 1`

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhiteKing, BlackKing, WhiteQueen, BlackQueen, WhiteRook, BlackRook,
    WhiteBishop, BlackBishop, WhiteKnight, BlackKnight, WhitePawn, BlackPawn,
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;
}

crate::impl_from_to_primitive!(Piece);
crate::impl_enum_iter!(Piece);

impl Piece {
    /// Piece type of the piece
    #[inline]
    pub const fn pt(self) -> PieceType {
        unsafe { PieceType::from_unchecked(self as u8 >> 1) }
    }

    /// Colour of the piece
    #[inline]
    pub const fn colour(self) -> Colour {
        unsafe { Colour::from_unchecked(self as u8 & 1) }
    }

    /// Combines a colour and a piece type
    #[inline]
    pub const fn from_parts(colour: Colour, piece_type: PieceType) -> Self {
        unsafe { Piece::from_unchecked(colour as u8 | (piece_type as u8) << 1) }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

/// Character of each piece, indexed by `Piece as u8`
const PIECE_STR: &[u8; Piece::NUM] = b"KkQqRrBbNnPp";

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_STR[self.index()] as char)
    }
}

impl std::fmt::Display for PieceType {
    /// Lower-case letter of the piece type (as in `e7e8q`)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_STR[self.index() << 1 | 1] as char)
    }
}

/******************************************\
|==========================================|
|                Parse Piece               |
|==========================================|
\******************************************/

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        PIECE_STR
            .iter()
            .position(|&p| p as char == c)
            .map(|index| unsafe { Piece::from_unchecked(index as u8) })
            .ok_or(ParsePieceError::InvalidChar(c))
    }
}

impl TryFrom<char> for PieceType {
    type Error = ParsePieceError;

    /// Accepts either case
    fn try_from(c: char) -> Result<Self, Self::Error> {
        Piece::try_from(c).map(|piece| piece.pt())
    }
}

impl std::str::FromStr for Piece {
    type Err = ParsePieceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Piece::try_from(c),
            _ => Err(ParsePieceError::InvalidLength(s.len())),
        }
    }
}

/******************************************\
|==========================================|
|            Piece Parse Error             |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Piece string has length {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid piece character '{0}', expected one of KQRBNPkqrbnp")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
