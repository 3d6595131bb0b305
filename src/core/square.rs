use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|                 Squares                  |
|==========================================|
\******************************************/

/// # Square representation
///
/// - Index `rank * 8 + file`, so `file = sq & 7` and `rank = sq >> 3`

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Number of elements in the Square enum
    pub const NUM: usize = 64;
}

crate::impl_from_to_primitive!(Square);
crate::impl_enum_iter!(Square);

/******************************************\
|==========================================|
|                  Ranks                   |
|==========================================|
\******************************************/

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

impl Rank {
    /// Number of elements in the Rank enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(Rank);
crate::impl_enum_iter!(Rank);

/******************************************\
|==========================================|
|                  Files                   |
|==========================================|
\******************************************/

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

impl File {
    /// Number of elements in the File enum
    pub const NUM: usize = 8;
}

crate::impl_from_to_primitive!(File);
crate::impl_enum_iter!(File);

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl Square {
    /// Rank of the square
    #[inline]
    pub const fn rank(&self) -> Rank {
        unsafe { Rank::from_unchecked((*self as u8) >> 3) }
    }

    /// File of the square
    #[inline]
    pub const fn file(&self) -> File {
        unsafe { File::from_unchecked((*self as u8) & 0b111) }
    }

    /// Mirrors the square over the horizontal axis (a1 <=> a8)
    #[inline]
    pub const fn flip_rank(&self) -> Self {
        unsafe { Self::from_unchecked((*self as u8) ^ Square::A8 as u8) }
    }

    /// The square as seen from `col`'s side of the board
    ///
    /// ```
    /// use bishop_board::core::{Square, Colour};
    ///
    /// assert_eq!(Square::E2.relative(Colour::Black), Square::E7);
    /// ```
    #[inline]
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip_rank(),
        }
    }

    /// Combines a file and a rank
    #[inline]
    pub const fn from_parts(file: File, rank: Rank) -> Self {
        unsafe { Self::from_unchecked(((rank as u8) << 3) + (file as u8)) }
    }

    /// King (Chebyshev) distance between two squares
    #[inline]
    pub const fn distance(sq1: Square, sq2: Square) -> u8 {
        let file_dist = (sq1.file() as u8).abs_diff(sq2.file() as u8);
        let rank_dist = (sq1.rank() as u8).abs_diff(sq2.rank() as u8);

        if file_dist > rank_dist { file_dist } else { rank_dist }
    }
}

impl Rank {
    /// Mirrors the rank (Rank1 <=> Rank8)
    #[inline]
    pub const fn flip(&self) -> Self {
        unsafe { Self::from_unchecked(7 - (*self as u8)) }
    }

    /// The rank as seen from `col`'s side of the board
    #[inline]
    pub const fn relative(&self, col: Colour) -> Self {
        match col {
            Colour::White => *self,
            Colour::Black => self.flip(),
        }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'a' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", (b'1' + (*self as u8)) as char)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/******************************************\
|==========================================|
|              Parsing Strings             |
|==========================================|
\******************************************/

impl std::str::FromStr for File {
    type Err = ParseFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_char), None) = (chars.next(), chars.next()) else {
            return Err(ParseFileError::InvalidLength(s.len()));
        };

        match file_char {
            'a'..='h' => Ok(unsafe { File::from_unchecked(file_char as u8 - b'a') }),
            _ => Err(ParseFileError::InvalidChar(file_char)),
        }
    }
}

impl std::str::FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(rank_char), None) = (chars.next(), chars.next()) else {
            return Err(ParseRankError::InvalidLength(s.len()));
        };

        match rank_char {
            '1'..='8' => Ok(unsafe { Rank::from_unchecked(rank_char as u8 - b'1') }),
            _ => Err(ParseRankError::InvalidChar(rank_char)),
        }
    }
}

impl std::str::FromStr for Square {
    type Err = ParseSquareError;

    /// Parses coordinate form such as `e4`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(ParseSquareError::InvalidLength(s.len()));
        };

        let file = match file_char {
            'a'..='h' => unsafe { File::from_unchecked(file_char as u8 - b'a') },
            _ => return Err(ParseSquareError::InvalidFileChar(file_char)),
        };
        let rank = match rank_char {
            '1'..='8' => unsafe { Rank::from_unchecked(rank_char as u8 - b'1') },
            _ => return Err(ParseSquareError::InvalidRankChar(rank_char)),
        };

        Ok(Square::from_parts(file, rank))
    }
}

/******************************************\
|==========================================|
|            Square Parse Errors           |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFileError {
    #[error("File string has length {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid file character '{0}', expected 'a'-'h'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseRankError {
    #[error("Rank string has length {0}, expected 1")]
    InvalidLength(usize),
    #[error("Invalid rank character '{0}', expected '1'-'8'")]
    InvalidChar(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseSquareError {
    #[error("Square string has length {0}, expected 2")]
    InvalidLength(usize),
    #[error("Invalid file character '{0}', expected 'a'-'h'")]
    InvalidFileChar(char),
    #[error("Invalid rank character '{0}', expected '1'-'8'")]
    InvalidRankChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_and_rank() {
        assert_eq!(Square::C6.file(), File::FileC);
        assert_eq!(Square::C6.rank(), Rank::Rank6);
        assert_eq!(Square::H8 as u8 & 7, File::FileH as u8);
        assert_eq!(Square::H8 as u8 >> 3, Rank::Rank8 as u8);
    }

    #[test]
    fn test_square_conversions() {
        for file in File::iter() {
            for rank in Rank::iter() {
                let square = Square::from_parts(file, rank);
                assert_eq!(square.file(), file);
                assert_eq!(square.rank(), rank);
            }
        }
    }

    #[test]
    fn test_relative() {
        assert_eq!(Square::A1.flip_rank(), Square::A8);
        assert_eq!(Square::D7.relative(Colour::Black), Square::D2);
        assert_eq!(Rank::Rank2.relative(Colour::Black), Rank::Rank7);
    }

    #[test]
    fn test_distance() {
        assert_eq!(Square::distance(Square::A1, Square::H8), 7);
        assert_eq!(Square::distance(Square::E4, Square::F6), 2);
        assert_eq!(Square::distance(Square::C3, Square::C3), 0);
    }

    #[test]
    fn test_square_display_and_parse() {
        for sq in Square::iter() {
            assert_eq!(sq.to_string().parse::<Square>(), Ok(sq));
        }
        assert_eq!(Square::E4.to_string(), "e4");
    }

    #[test]
    fn test_square_from_str_invalid() {
        assert_eq!("e".parse::<Square>(), Err(ParseSquareError::InvalidLength(1)));
        assert_eq!("e4g".parse::<Square>(), Err(ParseSquareError::InvalidLength(3)));
        assert_eq!("z4".parse::<Square>(), Err(ParseSquareError::InvalidFileChar('z')));
        assert_eq!("A1".parse::<Square>(), Err(ParseSquareError::InvalidFileChar('A')));
        assert_eq!("a9".parse::<Square>(), Err(ParseSquareError::InvalidRankChar('9')));
        assert_eq!("x".parse::<File>(), Err(ParseFileError::InvalidChar('x')));
        assert_eq!("0".parse::<Rank>(), Err(ParseRankError::InvalidChar('0')));
    }
}
