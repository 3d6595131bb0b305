use std::cmp::Ordering;

use thiserror::Error;

use super::{Colour, PieceType};

/******************************************\
|==========================================|
|              Material Hash               |
|==========================================|
\******************************************/

/// # Material signature of a position
///
/// - 6 bits per (colour, non-king piece type) count, laid out as
///   `000T pppp ppPP PPPP nnnn nnNN NNNN bbbb bbBB BBBB rrrr rrRR RRRR qqqq qqQQ QQQQ`
///   (upper case white, lower case black, `T` the side to move).
/// - Kings are implicit, one per side.

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialHash(pub u64);

const BITS_PER_ITEM: u32 = 6;
const ITEM_MASK: u64 = (1 << BITS_PER_ITEM) - 1;
const ON_TURN_OFFSET: u32 = BITS_PER_ITEM * (Colour::NUM * PieceType::VARIABLE.len()) as u32;
const ON_TURN_MASK: u64 = 1 << ON_TURN_OFFSET;

const COLOUR_MASKS: [u64; Colour::NUM] = [
    pieces_mask(Colour::White, &PieceType::VARIABLE),
    pieces_mask(Colour::Black, &PieceType::VARIABLE),
];

const QUEEN_ROOK_OR_PAWN_MASKS: [u64; Colour::NUM] = [
    pieces_mask(Colour::White, &[PieceType::Queen, PieceType::Rook, PieceType::Pawn]),
    pieces_mask(Colour::Black, &[PieceType::Queen, PieceType::Rook, PieceType::Pawn]),
];

#[inline]
const fn offset(colour: Colour, piece_type: PieceType) -> u32 {
    debug_assert!(piece_type.is_variable(), "king count is not stored");
    ((piece_type as u32 - 1) * Colour::NUM as u32 + colour as u32) * BITS_PER_ITEM
}

const fn pieces_mask(colour: Colour, piece_types: &[PieceType]) -> u64 {
    let mut mask = 0;
    let mut i = 0;
    while i < piece_types.len() {
        mask |= ITEM_MASK << offset(colour, piece_types[i]);
        i += 1;
    }
    mask
}

impl MaterialHash {
    /// Two lone kings, white to move
    pub const ALONE_KINGS: MaterialHash = MaterialHash(0);

    #[inline]
    pub const fn piece_count(&self, colour: Colour, piece_type: PieceType) -> u32 {
        match piece_type {
            PieceType::King => 1,
            _ => ((self.0 >> offset(colour, piece_type)) & ITEM_MASK) as u32,
        }
    }

    #[inline]
    pub const fn set_piece_count(&mut self, colour: Colour, piece_type: PieceType, count: u32) {
        let shift = offset(colour, piece_type);
        self.0 = (self.0 & !(ITEM_MASK << shift)) | ((count as u64 & ITEM_MASK) << shift);
    }

    #[inline]
    pub const fn add_piece(&mut self, colour: Colour, piece_type: PieceType) {
        self.0 += 1 << offset(colour, piece_type);
    }

    #[inline]
    pub const fn remove_piece(&mut self, colour: Colour, piece_type: PieceType) {
        self.0 -= 1 << offset(colour, piece_type);
    }

    #[inline]
    pub const fn on_turn(&self) -> Colour {
        unsafe { Colour::from_unchecked((self.0 >> ON_TURN_OFFSET) as u8 & 1) }
    }

    #[inline]
    pub const fn set_on_turn(&mut self, colour: Colour) {
        self.0 = (self.0 & !ON_TURN_MASK) | ((colour as u64) << ON_TURN_OFFSET);
    }

    #[inline]
    pub const fn swap_on_turn(&mut self) {
        self.0 ^= ON_TURN_MASK;
    }

    /// Hash of the colour-mirrored material: counts swapped, other side to move
    #[inline]
    pub const fn opposite(&self) -> MaterialHash {
        let white = self.0 & COLOUR_MASKS[Colour::White as usize];
        let black = self.0 & COLOUR_MASKS[Colour::Black as usize];
        let on_turn = self.0 & ON_TURN_MASK;

        MaterialHash((white << BITS_PER_ITEM) | (black >> BITS_PER_ITEM) | (on_turn ^ ON_TURN_MASK))
    }

    /// True when the first differing non-king count (queens first, white
    /// before black) is larger in `self`
    pub fn is_greater(&self, other: &MaterialHash) -> bool {
        for colour in Colour::iter() {
            for pt in PieceType::VARIABLE {
                match self.piece_count(colour, pt).cmp(&other.piece_count(colour, pt)) {
                    Ordering::Greater => return true,
                    Ordering::Less => return false,
                    Ordering::Equal => {}
                }
            }
        }
        false
    }

    /// True when both sides have equal counts of every piece type except `except`
    pub fn is_balanced_except_for(&self, except: PieceType) -> bool {
        PieceType::VARIABLE.into_iter().filter(|&pt| pt != except).all(|pt| {
            self.piece_count(Colour::White, pt) == self.piece_count(Colour::Black, pt)
        })
    }

    /// Removes the pieces both sides have in common, leaving only the imbalance
    pub fn reduce_to_difference(&mut self) {
        for pt in PieceType::VARIABLE {
            let white = self.piece_count(Colour::White, pt);
            let black = self.piece_count(Colour::Black, pt);
            let common = white.min(black);

            self.set_piece_count(Colour::White, pt, white - common);
            self.set_piece_count(Colour::Black, pt, black - common);
        }
    }

    /// Number of pieces of `colour`, king included
    pub fn total_piece_count(&self, colour: Colour) -> u32 {
        PieceType::iter().map(|pt| self.piece_count(colour, pt)).sum()
    }

    #[inline]
    pub const fn is_alone_king(&self, colour: Colour) -> bool {
        self.0 & COLOUR_MASKS[colour as usize] == 0
    }

    #[inline]
    pub const fn has_queen_rook_or_pawn(&self) -> bool {
        self.0 & (QUEEN_ROOK_OR_PAWN_MASKS[0] | QUEEN_ROOK_OR_PAWN_MASKS[1]) != 0
    }

    #[inline]
    pub const fn has_queen_rook_or_pawn_on_side(&self, colour: Colour) -> bool {
        self.0 & QUEEN_ROOK_OR_PAWN_MASKS[colour as usize] != 0
    }

    /// Pieces of both sides, e.g. `KQ-KP`
    pub fn material_string(&self) -> String {
        let side = |colour| {
            PieceType::iter()
                .flat_map(|pt| {
                    let c = PIECE_CHARS[pt.index()];
                    std::iter::repeat_n(c, self.piece_count(colour, pt) as usize)
                })
                .collect::<String>()
        };

        format!("{}-{}", side(Colour::White), side(Colour::Black))
    }
}

const PIECE_CHARS: [char; PieceType::NUM] = ['K', 'Q', 'R', 'B', 'N', 'P'];

/******************************************\
|==========================================|
|                Ordering                  |
|==========================================|
\******************************************/

impl Ord for MaterialHash {
    /// Compares counts piece type by piece type (white first), then the side to move
    fn cmp(&self, other: &Self) -> Ordering {
        Colour::iter()
            .flat_map(|colour| PieceType::VARIABLE.into_iter().map(move |pt| (colour, pt)))
            .map(|(colour, pt)| self.piece_count(colour, pt).cmp(&other.piece_count(colour, pt)))
            .find(|ord| ord.is_ne())
            .unwrap_or_else(|| self.on_turn().cmp(&other.on_turn()))
    }
}

impl PartialOrd for MaterialHash {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/******************************************\
|==========================================|
|            Display and Parse             |
|==========================================|
\******************************************/

impl std::fmt::Display for MaterialHash {
    /// `KQ-K-w`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.material_string(), self.on_turn())
    }
}

impl std::str::FromStr for MaterialHash {
    type Err = ParseMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let (Some(white), Some(black), Some(turn), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseMaterialError::InvalidFormat(s.to_string()));
        };

        let mut hash = MaterialHash::ALONE_KINGS;

        for (colour, pieces) in [(Colour::White, white), (Colour::Black, black)] {
            let mut kings = 0;

            for c in pieces.chars() {
                let pt = PIECE_CHARS
                    .iter()
                    .position(|&pc| pc == c)
                    .and_then(PieceType::try_from_index)
                    .ok_or(ParseMaterialError::InvalidChar(c))?;

                match pt {
                    PieceType::King => kings += 1,
                    _ => {
                        if hash.piece_count(colour, pt) as u64 == ITEM_MASK {
                            return Err(ParseMaterialError::TooManyPieces(c));
                        }
                        hash.add_piece(colour, pt)
                    }
                }
            }

            if kings != 1 {
                return Err(ParseMaterialError::KingCount(colour));
            }
        }

        let on_turn = match turn {
            "w" => Colour::White,
            "b" => Colour::Black,
            _ => return Err(ParseMaterialError::InvalidSideToMove(turn.to_string())),
        };
        hash.set_on_turn(on_turn);

        Ok(hash)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseMaterialError {
    #[error("Material string '{0}' must have the form <white>-<black>-<side>")]
    InvalidFormat(String),
    #[error("Invalid material character '{0}', expected one of KQRBNP")]
    InvalidChar(char),
    #[error("Count of '{0}' does not fit the material hash")]
    TooManyPieces(char),
    #[error("Side {0:?} must have exactly one king")]
    KingCount(Colour),
    #[error("Invalid side to move '{0}', expected 'w' or 'b'")]
    InvalidSideToMove(String),
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
    fn test_layout() {
        let mut hash = MaterialHash::ALONE_KINGS;
        hash.add_piece(Colour::White, PieceType::Queen);
        assert_eq!(hash.0, 1);

        let mut hash = MaterialHash::ALONE_KINGS;
        hash.add_piece(Colour::Black, PieceType::Pawn);
        assert_eq!(hash.0, 1 << 54);

        let mut hash = MaterialHash::ALONE_KINGS;
        hash.add_piece(Colour::White, PieceType::Rook);
        hash.set_on_turn(Colour::Black);
        assert_eq!(hash.0, (1 << 12) | (1 << 60));
    }

    #[test]
    fn test_counts() {
        let mut hash = MaterialHash::ALONE_KINGS;
        for _ in 0..8 {
            hash.add_piece(Colour::Black, PieceType::Pawn);
        }
        hash.remove_piece(Colour::Black, PieceType::Pawn);

        assert_eq!(hash.piece_count(Colour::Black, PieceType::Pawn), 7);
        assert_eq!(hash.piece_count(Colour::White, PieceType::Pawn), 0);
        assert_eq!(hash.piece_count(Colour::White, PieceType::King), 1);
        assert_eq!(hash.total_piece_count(Colour::Black), 8);

        hash.set_piece_count(Colour::White, PieceType::Knight, 2);
        assert_eq!(hash.piece_count(Colour::White, PieceType::Knight), 2);
        assert_eq!(hash.piece_count(Colour::Black, PieceType::Pawn), 7);
    }

    #[test]
    fn test_opposite() {
        let hash: MaterialHash = "KQRP-KN-w".parse().unwrap();
        let opposite = hash.opposite();

        assert_eq!(opposite.to_string(), "KN-KQRP-b");
        assert_eq!(opposite.opposite(), hash);
    }

    #[test]
    fn test_side_queries() {
        let hash: MaterialHash = "KBN-K-b".parse().unwrap();
        assert!(hash.is_alone_king(Colour::Black));
        assert!(!hash.is_alone_king(Colour::White));
        assert!(!hash.has_queen_rook_or_pawn());

        let hash: MaterialHash = "K-KP-w".parse().unwrap();
        assert!(hash.has_queen_rook_or_pawn());
        assert!(hash.has_queen_rook_or_pawn_on_side(Colour::Black));
        assert!(!hash.has_queen_rook_or_pawn_on_side(Colour::White));
    }

    #[test]
    fn test_balance_and_difference() {
        let mut hash: MaterialHash = "KRRPP-KRPPP-w".parse().unwrap();
        assert!(!hash.is_balanced_except_for(PieceType::Rook));
        assert!(!hash.is_balanced_except_for(PieceType::Pawn));

        hash.reduce_to_difference();
        assert_eq!(hash.material_string(), "KR-KP");

        let hash: MaterialHash = "KQP-KQ-w".parse().unwrap();
        assert!(hash.is_balanced_except_for(PieceType::Pawn));
    }

    #[test]
    fn test_ordering() {
        let a: MaterialHash = "KQ-K-w".parse().unwrap();
        let b: MaterialHash = "KR-K-w".parse().unwrap();
        let c: MaterialHash = "KQ-K-b".parse().unwrap();

        assert!(a > b);
        assert!(a.is_greater(&b));
        assert!(!b.is_greater(&a));
        assert!(a < c);
        assert!(!a.is_greater(&c));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("KQ-K".parse::<MaterialHash>(), Err(ParseMaterialError::InvalidFormat(_))));
        assert_eq!("KX-K-w".parse::<MaterialHash>(), Err(ParseMaterialError::InvalidChar('X')));
        assert_eq!("Q-K-w".parse::<MaterialHash>(), Err(ParseMaterialError::KingCount(Colour::White)));
        assert!(matches!("K-K-x".parse::<MaterialHash>(), Err(ParseMaterialError::InvalidSideToMove(_))));
    }
}
