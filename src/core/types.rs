use super::{File, Rank, Square};
use thiserror::Error;

/******************************************\
|==========================================|
|                 Colours                  |
|==========================================|
\******************************************/

/// # Colour Representation
///
/// Side of a piece or the side to move.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(Colour);
crate::impl_enum_iter!(Colour);

impl Colour {
    /// Single step of a pawn of this colour
    pub const fn forward(&self) -> Direction {
        match self {
            Colour::White => Direction::N,
            Colour::Black => Direction::S,
        }
    }

    /// Rank the pawns of this colour promote on
    pub const fn promotion_rank(&self) -> Rank {
        match self {
            Colour::White => Rank::Rank8,
            Colour::Black => Rank::Rank1,
        }
    }

    /// Rank the pawns of this colour start on
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            Colour::White => Rank::Rank2,
            Colour::Black => Rank::Rank7,
        }
    }
}

impl std::ops::Not for Colour {
    type Output = Self;

    /// Returns the opposite colour
    #[inline]
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::White => write!(f, "w"),
            Colour::Black => write!(f, "b"),
        }
    }
}

/******************************************\
|==========================================|
|                 Direction                |
|==========================================|
\******************************************/

/// # Direction Representation
///
/// Square index deltas of single king steps and the pawn double step.

#[rustfmt::skip]
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    N = 8, S = -8, W = -1, E = 1,
    NE = 9, NW = 7, SE = -7, SW = -9,
    NN = 16, SS = -16,
}

crate::impl_from_to_primitive!(Direction, i8);

impl Direction {
    /// File and rank deltas of the direction
    pub const fn offsets(&self) -> (i8, i8) {
        match self {
            Direction::N => (0, 1),
            Direction::S => (0, -1),
            Direction::W => (-1, 0),
            Direction::E => (1, 0),
            Direction::NE => (1, 1),
            Direction::NW => (-1, 1),
            Direction::SE => (1, -1),
            Direction::SW => (-1, -1),
            Direction::NN => (0, 2),
            Direction::SS => (0, -2),
        }
    }
}

impl std::ops::Neg for Direction {
    type Output = Self;

    /// Opposite direction (N => S, etc...)
    fn neg(self) -> Self::Output {
        Self::from_unchecked(-(self as i8))
    }
}

impl Square {
    /// Steps from the square in `dir`, failing when the step leaves the board
    #[inline]
    pub const fn add(self, dir: Direction) -> Result<Self, SquareAddError> {
        let (df, dr) = dir.offsets();
        Square::from_offset(self, df, dr)
    }

    /// Applies a raw file/rank delta, failing when the result is off the board
    #[inline]
    pub const fn from_offset(self, file_delta: i8, rank_delta: i8) -> Result<Self, SquareAddError> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;

        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return Err(SquareAddError::OutOfBounds);
        }

        Ok(unsafe { Square::from_unchecked((rank * 8 + file) as u8) })
    }
}

/******************************************\
|==========================================|
|              Cross Direction             |
|==========================================|
\******************************************/

/// The two families of sliding rays. Rooks use `Orthogonal`, bishops use
/// `Diagonal`, queens use both.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossDirection {
    Orthogonal,
    Diagonal,
}

impl CrossDirection {
    /// Number of elements in the CrossDirection enum
    pub const NUM: usize = 2;

    /// File/rank steps of the four rays of the family
    pub const fn ray_offsets(&self) -> [(i8, i8); 4] {
        match self {
            CrossDirection::Orthogonal => [(1, 0), (-1, 0), (0, 1), (0, -1)],
            CrossDirection::Diagonal => [(1, 1), (-1, -1), (1, -1), (-1, 1)],
        }
    }
}

crate::impl_from_to_primitive!(CrossDirection);
crate::impl_enum_iter!(CrossDirection);

/******************************************\
|==========================================|
|              Castling Type               |
|==========================================|
\******************************************/

/// King side (`Short`, O-O) or queen side (`Long`, O-O-O) castling.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingType {
    Short,
    Long,
}

impl CastlingType {
    /// Number of elements in the CastlingType enum
    pub const NUM: usize = 2;
}

crate::impl_from_to_primitive!(CastlingType);
crate::impl_enum_iter!(CastlingType);

/// Index of a (colour, castling type) pair in the per-castling tables
#[inline]
pub const fn castling_index(colour: Colour, castling_type: CastlingType) -> usize {
    ((colour as usize) << 1) + castling_type as usize
}

impl File {
    /// Returns `Some(file)` for 0..8 and `None` otherwise
    #[inline]
    pub const fn from_nibble(value: u32) -> Option<File> {
        File::try_from_index(value as usize)
    }
}

/******************************************\
|==========================================|
|             Square Add Errors            |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareAddError {
    #[error("Square step leaves the board")]
    OutOfBounds,
}
