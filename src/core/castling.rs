use thiserror::Error;

use super::{Bitboard, CastlingType, Colour, Square, castling_index};

/******************************************\
|==========================================|
|             Castling Rights              |
|==========================================|
\******************************************/

/// # Castling rights of both sides
///
/// - One bit per right: `1 << (2 * colour + castling_type)`, so
///   white short = 1, white long = 2, black short = 4, black long = 8.
/// - The raw value (0..16) doubles as an index into per-rights tables.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights(u8);

crate::impl_bit_ops!(CastlingRights);

impl CastlingRights {
    /// Number of distinct rights values
    pub const NUM: usize = 16;

    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WK: CastlingRights = CastlingRights(1);
    pub const WQ: CastlingRights = CastlingRights(2);
    pub const BK: CastlingRights = CastlingRights(4);
    pub const BQ: CastlingRights = CastlingRights(8);
    pub const FULL: CastlingRights = CastlingRights(0x0F);

    /// Squares whose content change can revoke a right (a1, e1, h1, a8, e8, h8)
    pub const AFFECTED_SQUARES: Bitboard = Self::init_affected_squares();

    /// Rights preserved when the content of a square changes
    const SQUARE_RIGHT_MASK: [u8; Square::NUM] = Self::init_square_right_mask();
}

/******************************************\
|==========================================|
|              Initialisation              |
|==========================================|
\******************************************/

impl CastlingRights {
    const fn init_square_right_mask() -> [u8; Square::NUM] {
        let mut table = [Self::FULL.0; Square::NUM];

        table[Square::E1 as usize] &= !(Self::WK.0 | Self::WQ.0);
        table[Square::H1 as usize] &= !Self::WK.0;
        table[Square::A1 as usize] &= !Self::WQ.0;

        table[Square::E8 as usize] &= !(Self::BK.0 | Self::BQ.0);
        table[Square::H8 as usize] &= !Self::BK.0;
        table[Square::A8 as usize] &= !Self::BQ.0;

        table
    }

    const fn init_affected_squares() -> Bitboard {
        let table = Self::init_square_right_mask();
        let mut mask = 0u64;

        let mut sq = 0;
        while sq < Square::NUM {
            if table[sq] != Self::FULL.0 {
                mask |= 1u64 << sq;
            }
            sq += 1;
        }

        Bitboard(mask)
    }

    #[inline]
    const fn mask_of_right(colour: Colour, castling_type: CastlingType) -> u8 {
        1 << castling_index(colour, castling_type)
    }

    #[inline]
    const fn mask_of_colour(colour: Colour) -> u8 {
        Self::mask_of_right(colour, CastlingType::Short) | Self::mask_of_right(colour, CastlingType::Long)
    }
}

/******************************************\
|==========================================|
|              Implementation              |
|==========================================|
\******************************************/

impl CastlingRights {
    /// Builds rights from a table index, `None` when out of range
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::NUM {
            Some(CastlingRights(index as u8))
        } else {
            None
        }
    }

    /// Raw value, usable as a table index
    #[inline]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_right(&self, colour: Colour, castling_type: CastlingType) -> bool {
        self.0 & Self::mask_of_right(colour, castling_type) != 0
    }

    /// True when `colour` keeps at least one right
    #[inline]
    pub const fn is_right_for_colour(&self, colour: Colour) -> bool {
        self.0 & Self::mask_of_colour(colour) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn set_full(&mut self) {
        self.0 = Self::FULL.0;
    }

    #[inline]
    pub const fn clear(&mut self) {
        self.0 = 0;
    }

    #[inline]
    pub const fn set_right(&mut self, colour: Colour, castling_type: CastlingType, is_right: bool) {
        let mask = Self::mask_of_right(colour, castling_type);

        if is_right {
            self.0 |= mask;
        } else {
            self.0 &= !mask;
        }
    }

    /// Drops the rights revoked by a content change of `square`
    #[inline]
    pub const fn update_after_square_change(&mut self, square: Square) {
        self.0 &= Self::SQUARE_RIGHT_MASK[square as usize];
    }

    #[inline]
    pub const fn drop_rights_for_colour(&mut self, colour: Colour) {
        self.0 &= !Self::mask_of_colour(colour);
    }

    /// Rights with white and black swapped
    #[inline]
    pub const fn mirror(&self) -> Self {
        let white = self.0 & Self::mask_of_colour(Colour::White);
        let black = self.0 & Self::mask_of_colour(Colour::Black);

        CastlingRights((white << 2) | (black >> 2))
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

const RIGHT_CHARS: [(CastlingRights, char); 4] = [
    (CastlingRights::WK, 'K'),
    (CastlingRights::WQ, 'Q'),
    (CastlingRights::BK, 'k'),
    (CastlingRights::BQ, 'q'),
];

impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }

        for (right, c) in RIGHT_CHARS {
            if self.0 & right.0 != 0 {
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for CastlingRights {
    type Err = ParseCastlingError;

    /// Parses `KQkq`-style rights, `-` for none
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(CastlingRights::NONE);
        }

        if s.is_empty() {
            return Err(ParseCastlingError::Empty);
        }

        s.chars().try_fold(CastlingRights::NONE, |rights, c| {
            let (right, _) = RIGHT_CHARS
                .iter()
                .find(|(_, rc)| *rc == c)
                .ok_or(ParseCastlingError::InvalidChar(c))?;

            Ok(CastlingRights(rights.0 | right.0))
        })
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCastlingError {
    #[error("Castling rights string is empty")]
    Empty,
    #[error("Invalid castling character '{0}', expected one of KQkq or '-'")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
