use std::fmt;

use super::{Direction, File, Rank, Square};

/******************************************\
|==========================================|
|                 Bitboard                 |
|==========================================|
\******************************************/

/// Set of squares packed into a `u64`, bit `n` standing for `Square` `n`
/// (A1 is the least significant bit, H8 the most significant).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bitboard(pub u64);

crate::impl_bit_ops!(Bitboard);
crate::impl_bit_shift_ops!(Bitboard);

/******************************************\
|==========================================|
|           Bitboard Constants             |
|==========================================|
\******************************************/

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(!0);

    pub const RANK_1: Bitboard = Bitboard(0x0000_0000_0000_00ff);
    pub const RANK_2: Bitboard = Bitboard(0x0000_0000_0000_ff00);
    pub const RANK_4: Bitboard = Bitboard(0x0000_0000_ff00_0000);
    pub const RANK_5: Bitboard = Bitboard(0x0000_00ff_0000_0000);
    pub const RANK_7: Bitboard = Bitboard(0x00ff_0000_0000_0000);
    pub const RANK_8: Bitboard = Bitboard(0xff00_0000_0000_0000);

    /// First and last rank, where pawns can never stand
    pub const RANK_18: Bitboard = Bitboard(Self::RANK_1.0 | Self::RANK_8.0);

    pub const FILE_A: Bitboard = Bitboard(0x0101_0101_0101_0101);
    pub const FILE_H: Bitboard = Bitboard(0x8080_8080_8080_8080);

    /// Squares of the outer ring of the board
    pub const EDGES: Bitboard = Bitboard(Self::RANK_18.0 | Self::FILE_A.0 | Self::FILE_H.0);
}

/******************************************\
|==========================================|
|                Conversions               |
|==========================================|
\******************************************/

impl Square {
    /// Singleton set of the square
    #[inline]
    pub const fn bb(&self) -> Bitboard {
        Bitboard(1u64 << *self as u8)
    }
}

impl Rank {
    /// All squares on the rank
    #[inline]
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::RANK_1.0 << (8 * *self as u8))
    }
}

impl File {
    /// All squares on the file
    #[inline]
    pub const fn bb(&self) -> Bitboard {
        Bitboard(Bitboard::FILE_A.0 << *self as u8)
    }
}

impl<const N: usize> From<[Square; N]> for Bitboard {
    fn from(squares: [Square; N]) -> Bitboard {
        squares.into_iter().fold(Bitboard::EMPTY, |bb, sq| bb | sq.bb())
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::EMPTY, |bb, sq| bb | sq.bb())
    }
}

/******************************************\
|==========================================|
|         Bitboard Implementation          |
|==========================================|
\******************************************/

impl Bitboard {
    /// Lowest square of the set, `None` when empty
    #[inline]
    pub const fn lsb(&self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => Some(unsafe { Square::from_unchecked(bits.trailing_zeros() as u8) }),
        }
    }

    /// Highest square of the set, `None` when empty
    #[inline]
    pub const fn msb(&self) -> Option<Square> {
        match self.0 {
            0 => None,
            bits => Some(unsafe { Square::from_unchecked(63 - bits.leading_zeros() as u8) }),
        }
    }

    /// Lowest square of a set known to be non-empty
    #[inline]
    pub const fn lsb_unchecked(&self) -> Square {
        debug_assert!(self.0 != 0, "Bitboard is empty");
        unsafe { Square::from_unchecked(self.0.trailing_zeros() as u8) }
    }

    /// Removes and returns the lowest square
    #[inline]
    pub const fn pop_lsb(&mut self) -> Option<Square> {
        match self.0 {
            0 => None,
            _ => {
                let square = self.lsb_unchecked();
                self.0 &= self.0 - 1;
                Some(square)
            }
        }
    }

    #[inline]
    pub const fn count_bits(&self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_occupied(&self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & (1u64 << square as u8) != 0
    }

    /// True when the two sets share at least one square
    #[inline]
    pub const fn intersects(&self, other: Bitboard) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn set(&mut self, square: Square) {
        self.0 |= 1u64 << square as u8;
    }

    #[inline]
    pub const fn clear(&mut self, square: Square) {
        self.0 &= !(1u64 << square as u8);
    }

    #[inline]
    pub const fn toggle(&mut self, square: Square) {
        self.0 ^= 1u64 << square as u8;
    }

    /// Calls `f` for every square of the set, lowest first
    #[inline]
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(Square),
    {
        let mut bb = *self;
        while let Some(sq) = bb.pop_lsb() {
            f(sq);
        }
    }

    #[inline]
    pub const fn more_than_one(&self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline]
    pub const fn is_singleton(&self) -> bool {
        self.0 != 0 && !self.more_than_one()
    }

    /// Moves every square one step in `dir`, dropping squares that fall off the board
    #[inline]
    pub const fn shift(&self, dir: Direction) -> Bitboard {
        let bits = self.0 & Self::avoid_wrap(dir).0;
        let shift = dir as i8;

        if shift >= 0 {
            Bitboard(bits << shift as u32)
        } else {
            Bitboard(bits >> (-shift) as u32)
        }
    }

    /// Squares allowed to take a step in `dir` without wrapping around the board
    const fn avoid_wrap(dir: Direction) -> Bitboard {
        use Direction::*;
        let blocked = match dir {
            N => Self::RANK_8.0,
            S => Self::RANK_1.0,
            E => Self::FILE_H.0,
            W => Self::FILE_A.0,
            NE => Self::RANK_8.0 | Self::FILE_H.0,
            NW => Self::RANK_8.0 | Self::FILE_A.0,
            SE => Self::RANK_1.0 | Self::FILE_H.0,
            SW => Self::RANK_1.0 | Self::FILE_A.0,
            NN => Self::RANK_7.0 | Self::RANK_8.0,
            SS => Self::RANK_1.0 | Self::RANK_2.0,
        };
        Bitboard(!blocked)
    }

    /// Iterates over every subset of the set (including the empty set and the
    /// set itself) using the Carry-Rippler trick.
    #[inline]
    pub const fn subsets(&self) -> Subsets {
        Subsets {
            mask: self.0,
            next: 0,
            done: false,
        }
    }
}

/******************************************\
|==========================================|
|                Iterators                 |
|==========================================|
\******************************************/

impl Iterator for Bitboard {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        self.pop_lsb()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.count_bits() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for Bitboard {}

/// Subset enumerator returned by [`Bitboard::subsets`]
pub struct Subsets {
    mask: u64,
    next: u64,
    done: bool,
}

impl Iterator for Subsets {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        if self.done {
            return None;
        }

        let current = self.next;
        self.next = self.next.wrapping_sub(self.mask) & self.mask;
        self.done = self.next == 0;

        Some(Bitboard(current))
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl fmt::Display for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SEPARATOR: &str = "     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{SEPARATOR}")?;

        for rank in Rank::iter().rev() {
            write!(f, " {rank}   |")?;

            for file in File::iter() {
                let cell = if self.contains(Square::from_parts(file, rank)) { " X " } else { "   " };
                write!(f, "{cell}|")?;
            }

            writeln!(f)?;
            writeln!(f, "{SEPARATOR}")?;
        }

        writeln!(f, "       a   b   c   d   e   f   g   h")?;
        write!(f, "Bitboard: {:#018x}", self.0)
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

    #[test]
    fn test_lsb_msb() {
        let bb = Square::C2.bb() | Square::F7.bb();
        assert_eq!(bb.lsb(), Some(Square::C2));
        assert_eq!(bb.msb(), Some(Square::F7));
        assert_eq!(Bitboard::EMPTY.lsb(), None);
        assert_eq!(Bitboard::EMPTY.msb(), None);
    }

    #[test]
    fn test_pop_lsb_and_iter() {
        let mut bb = Square::E4.bb() | Square::A1.bb();
        assert_eq!(bb.pop_lsb(), Some(Square::A1));
        assert_eq!(bb.pop_lsb(), Some(Square::E4));
        assert_eq!(bb.pop_lsb(), None);

        let squares: Vec<Square> = Bitboard::from([Square::H8, Square::B1, Square::D4]).collect();
        assert_eq!(squares, vec![Square::B1, Square::D4, Square::H8]);
    }

    #[test]
    fn test_set_clear_toggle() {
        let mut bb = Bitboard::EMPTY;
        bb.set(Square::E4);
        assert!(bb.contains(Square::E4));
        bb.clear(Square::E4);
        assert!(bb.is_empty());
        bb.toggle(Square::D5);
        assert!(bb.is_singleton());
        bb.toggle(Square::D6);
        assert!(bb.more_than_one());
        assert_eq!(bb.count_bits(), 2);
    }

    #[test]
    fn test_masks() {
        assert_eq!(Rank::Rank4.bb(), Bitboard::RANK_4);
        assert_eq!(File::FileH.bb(), Bitboard::FILE_H);
        assert_eq!(Bitboard::EDGES.count_bits(), 28);
        assert_eq!(Bitboard::FULL.count_bits(), 64);
    }

    #[test]
    fn test_shift() {
        let bb = Square::E5.bb();
        assert_eq!(bb.shift(Direction::N), Square::E6.bb());
        assert_eq!(bb.shift(Direction::SW), Square::D4.bb());
        assert_eq!(bb.shift(Direction::SS), Square::E3.bb());
        assert_eq!(Square::H5.bb().shift(Direction::E), Bitboard::EMPTY);
        assert_eq!(Square::A5.bb().shift(Direction::NW), Bitboard::EMPTY);
        assert_eq!(Square::E7.bb().shift(Direction::NN), Bitboard::EMPTY);
        assert_eq!((Square::H1.bb() | Square::A1.bb()).shift(Direction::E), Square::B1.bb());
    }

    #[test]
    fn test_subsets() {
        let mask = Bitboard::from([Square::B2, Square::C3, Square::G7]);
        let subsets: Vec<Bitboard> = mask.subsets().collect();

        assert_eq!(subsets.len(), 8);
        assert_eq!(subsets[0], Bitboard::EMPTY);
        assert!(subsets.contains(&mask));
        assert!(subsets.iter().all(|s| (*s & !mask).is_empty()));

        for (i, a) in subsets.iter().enumerate() {
            for b in subsets.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }

        assert_eq!(Bitboard::EMPTY.subsets().count(), 1);
    }
}
