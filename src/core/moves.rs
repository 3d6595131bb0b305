use std::cmp::Ordering;

use crate::core::*;

/******************************************\
|==========================================|
|                Move Type                 |
|==========================================|
\******************************************/

/// Kind of a move. `Invalid` is the kind of an empty, never finished move.

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Invalid, Normal, Promotion, Castling, EnPassant, Null,
}

impl MoveType {
    /// Number of elements in the MoveType enum
    pub const NUM: usize = 6;
}

crate::impl_from_to_primitive!(MoveType);

/******************************************\
|==========================================|
|                   Move                   |
|==========================================|
\******************************************/

/// # Packed reversible move
///
/// | bits   | content                                  |
/// |--------|------------------------------------------|
/// | 0..6   | begin square                             |
/// | 6..12  | target square                            |
/// | 12..15 | promotion piece type (6 = none)          |
/// | 15..18 | moving piece type                        |
/// | 18..21 | captured piece type (6 = none)           |
/// | 21..24 | move type                                |
/// | 24..28 | castling rights before the move          |
/// | 28..32 | en passant file before the move (15 = none) |
///
/// A move is built in two phases: [`Move::initialize`] records the undo
/// state, then exactly one of the `finish_*` methods completes it. The low
/// 15 bits form the compressed move used by hash tables.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    const BEGIN_SHIFT: u32 = 0;
    const TARGET_SHIFT: u32 = 6;
    const PROMOTION_SHIFT: u32 = 12;
    const MOVING_SHIFT: u32 = 15;
    const CAPTURED_SHIFT: u32 = 18;
    const MOVE_TYPE_SHIFT: u32 = 21;
    const CASTLING_SHIFT: u32 = 24;
    const EP_FILE_SHIFT: u32 = 28;

    const BEGIN_MASK: u32 = 0x0000_003F;
    const TARGET_MASK: u32 = 0x0000_0FC0;
    const PROMOTION_MASK: u32 = 0x0000_7000;
    const MOVING_MASK: u32 = 0x0003_8000;
    const CAPTURED_MASK: u32 = 0x001C_0000;
    const MOVE_TYPE_MASK: u32 = 0x00E0_0000;
    const CASTLING_MASK: u32 = 0x0F00_0000;
    const EP_FILE_MASK: u32 = 0xF000_0000;

    const FINISH_MASK: u32 =
        Self::TARGET_MASK | Self::PROMOTION_MASK | Self::CAPTURED_MASK | Self::MOVE_TYPE_MASK;

    /// Bits kept by [`Move::compressed`]
    pub const COMPRESSED_MASK: u32 = Self::BEGIN_MASK | Self::TARGET_MASK | Self::PROMOTION_MASK;

    /// Number of distinct compressed values
    pub const COMPRESSED_NUM: usize = Self::COMPRESSED_MASK as usize + 1;

    /// Encoding of "no en passant file"
    pub const NO_EP_FILE: u32 = 15;

    /// Empty move of type [`MoveType::Invalid`]
    pub const EMPTY: Move = Move(0);
}

/******************************************\
|==========================================|
|              Construction                |
|==========================================|
\******************************************/

impl Move {
    /// Starts a move by recording the state the move destroys
    #[inline]
    pub const fn initialize(prev_castling: CastlingRights, prev_ep_file: Option<File>) -> Self {
        let ep = match prev_ep_file {
            Some(file) => file as u32,
            None => Self::NO_EP_FILE,
        };

        Move(((prev_castling.index() as u32) << Self::CASTLING_SHIFT) | (ep << Self::EP_FILE_SHIFT))
    }

    #[inline]
    pub const fn set_moving_piece_type(&mut self, piece_type: PieceType) {
        self.0 = (self.0 & !Self::MOVING_MASK) | ((piece_type as u32) << Self::MOVING_SHIFT);
    }

    #[inline]
    pub const fn set_begin(&mut self, begin: Square) {
        self.0 = (self.0 & !Self::BEGIN_MASK) | ((begin as u32) << Self::BEGIN_SHIFT);
    }

    #[inline]
    const fn finish_data(
        &mut self,
        move_type: MoveType,
        target: Square,
        captured: Option<PieceType>,
        promotion: Option<PieceType>,
    ) {
        self.0 = (self.0 & !Self::FINISH_MASK)
            | ((move_type as u32) << Self::MOVE_TYPE_SHIFT)
            | ((target as u32) << Self::TARGET_SHIFT)
            | ((PieceType::encode(captured) as u32) << Self::CAPTURED_SHIFT)
            | ((PieceType::encode(promotion) as u32) << Self::PROMOTION_SHIFT);
    }

    #[inline]
    pub const fn finish_normal(&mut self, target: Square, captured: Option<PieceType>) {
        self.finish_data(MoveType::Normal, target, captured, None);
    }

    #[inline]
    pub const fn finish_promotion(
        &mut self,
        target: Square,
        captured: Option<PieceType>,
        promotion: PieceType,
    ) {
        debug_assert!(promotion.is_promotion_figure());
        self.finish_data(MoveType::Promotion, target, captured, Some(promotion));
    }

    /// `target` is the target square of the king
    #[inline]
    pub const fn finish_castling(&mut self, target: Square) {
        self.finish_data(MoveType::Castling, target, None, None);
    }

    #[inline]
    pub const fn finish_en_passant(&mut self, target: Square) {
        self.finish_data(MoveType::EnPassant, target, Some(PieceType::Pawn), None);
    }

    /// Pass move: only the side to move changes
    #[inline]
    pub const fn create_null(prev_castling: CastlingRights, prev_ep_file: Option<File>) -> Self {
        let mut mv = Self::initialize(prev_castling, prev_ep_file);
        mv.0 |= (PieceType::NONE_CODE as u32) << Self::MOVING_SHIFT;
        mv.finish_data(MoveType::Null, Square::A1, None, None);
        mv
    }
}

/******************************************\
|==========================================|
|                Accessors                 |
|==========================================|
\******************************************/

impl Move {
    #[inline]
    pub const fn move_type(&self) -> MoveType {
        unsafe { MoveType::from_unchecked(((self.0 & Self::MOVE_TYPE_MASK) >> Self::MOVE_TYPE_SHIFT) as u8) }
    }

    #[inline]
    pub const fn begin(&self) -> Square {
        unsafe { Square::from_unchecked(((self.0 & Self::BEGIN_MASK) >> Self::BEGIN_SHIFT) as u8) }
    }

    #[inline]
    pub const fn target(&self) -> Square {
        unsafe { Square::from_unchecked(((self.0 & Self::TARGET_MASK) >> Self::TARGET_SHIFT) as u8) }
    }

    /// `None` for the null move
    #[inline]
    pub const fn moving_piece_type(&self) -> Option<PieceType> {
        PieceType::decode(((self.0 & Self::MOVING_MASK) >> Self::MOVING_SHIFT) as u8)
    }

    #[inline]
    pub const fn captured_piece_type(&self) -> Option<PieceType> {
        PieceType::decode(((self.0 & Self::CAPTURED_MASK) >> Self::CAPTURED_SHIFT) as u8)
    }

    #[inline]
    pub const fn promotion_piece_type(&self) -> Option<PieceType> {
        PieceType::decode(((self.0 & Self::PROMOTION_MASK) >> Self::PROMOTION_SHIFT) as u8)
    }

    #[inline]
    pub const fn prev_castling_rights(&self) -> CastlingRights {
        match CastlingRights::from_index(((self.0 & Self::CASTLING_MASK) >> Self::CASTLING_SHIFT) as usize) {
            Some(rights) => rights,
            None => CastlingRights::NONE,
        }
    }

    #[inline]
    pub const fn prev_ep_file(&self) -> Option<File> {
        File::from_nibble((self.0 & Self::EP_FILE_MASK) >> Self::EP_FILE_SHIFT)
    }

    /// Begin, target and promotion piece type (low 15 bits)
    #[inline]
    pub const fn compressed(&self) -> u32 {
        self.0 & Self::COMPRESSED_MASK
    }

    /// Splits compressed bits into begin, target and promotion piece type code
    #[inline]
    pub const fn split_compressed(compressed: u32) -> (Square, Square, u8) {
        let begin = unsafe { Square::from_unchecked(((compressed & Self::BEGIN_MASK) >> Self::BEGIN_SHIFT) as u8) };
        let target = unsafe { Square::from_unchecked(((compressed & Self::TARGET_MASK) >> Self::TARGET_SHIFT) as u8) };
        let promotion = ((compressed & Self::PROMOTION_MASK) >> Self::PROMOTION_SHIFT) as u8;

        (begin, target, promotion)
    }

    /// Whole packed word
    #[inline]
    pub const fn data(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self.move_type(), MoveType::Null)
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured_piece_type().is_some()
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        matches!(self.move_type(), MoveType::Promotion)
    }

    /// Normal, non-pawn, non-capturing moves
    #[inline]
    pub const fn is_reversible(&self) -> bool {
        matches!(self.move_type(), MoveType::Normal)
            && !matches!(self.moving_piece_type(), Some(PieceType::Pawn))
            && self.captured_piece_type().is_none()
    }

    /// True when a pawn moving to `target` must promote
    #[inline]
    pub const fn is_promotion_square(moving: PieceType, target: Square) -> bool {
        matches!(moving, PieceType::Pawn) && Bitboard::RANK_18.contains(target)
    }

    /// Orders by begin square, target square and promotion piece type
    pub fn cmp_coordinates(&self, other: &Move) -> Ordering {
        self.begin()
            .cmp(&other.begin())
            .then(self.target().cmp(&other.target()))
            .then(PieceType::encode(self.promotion_piece_type()).cmp(&PieceType::encode(other.promotion_piece_type())))
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Move {
    /// Coordinate notation: `e2e4`, `e7e8q`, `0000` for the null move
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.move_type() {
            MoveType::Invalid => write!(f, "invalid"),
            MoveType::Null => write!(f, "0000"),
            _ => {
                write!(f, "{}{}", self.begin(), self.target())?;
                match self.promotion_piece_type() {
                    Some(pt) => write!(f, "{pt}"),
                    None => Ok(()),
                }
            }
        }
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
    fn test_normal_move_fields() {
        let mut mv = Move::initialize(CastlingRights::FULL, Some(File::FileD));
        mv.set_moving_piece_type(PieceType::Knight);
        mv.set_begin(Square::G1);
        mv.finish_normal(Square::F3, None);

        assert_eq!(mv.move_type(), MoveType::Normal);
        assert_eq!(mv.begin(), Square::G1);
        assert_eq!(mv.target(), Square::F3);
        assert_eq!(mv.moving_piece_type(), Some(PieceType::Knight));
        assert_eq!(mv.captured_piece_type(), None);
        assert_eq!(mv.promotion_piece_type(), None);
        assert_eq!(mv.prev_castling_rights(), CastlingRights::FULL);
        assert_eq!(mv.prev_ep_file(), Some(File::FileD));
        assert!(mv.is_reversible());
        assert_eq!(mv.to_string(), "g1f3");
    }

    #[test]
    fn test_bit_layout() {
        let mut mv = Move::initialize(CastlingRights::NONE, None);
        mv.set_moving_piece_type(PieceType::Pawn);
        mv.set_begin(Square::B7);
        mv.finish_promotion(Square::A8, Some(PieceType::Rook), PieceType::Queen);

        let expected = (Square::B7 as u32)
            | (Square::A8 as u32) << 6
            | (PieceType::Queen as u32) << 12
            | (PieceType::Pawn as u32) << 15
            | (PieceType::Rook as u32) << 18
            | (MoveType::Promotion as u32) << 21
            | 15 << 28;

        assert_eq!(mv.data(), expected);
        assert_eq!(mv.compressed(), expected & 0x7FFF);
        assert_eq!(mv.to_string(), "b7a8q");
        assert!(!mv.is_reversible());
    }

    #[test]
    fn test_refinish_keeps_initial_state() {
        let mut mv = Move::initialize(CastlingRights::WK, None);
        mv.set_moving_piece_type(PieceType::Rook);
        mv.set_begin(Square::H1);

        mv.finish_normal(Square::H5, Some(PieceType::Pawn));
        mv.finish_normal(Square::H2, None);

        assert_eq!(mv.target(), Square::H2);
        assert_eq!(mv.captured_piece_type(), None);
        assert_eq!(mv.begin(), Square::H1);
        assert_eq!(mv.prev_castling_rights(), CastlingRights::WK);
    }

    #[test]
    fn test_reversible_moves() {
        let quiet = |pt: PieceType, begin: Square, target: Square, captured: Option<PieceType>| {
            let mut mv = Move::initialize(CastlingRights::NONE, None);
            mv.set_moving_piece_type(pt);
            mv.set_begin(begin);
            mv.finish_normal(target, captured);
            mv
        };

        assert!(quiet(PieceType::Rook, Square::A1, Square::A5, None).is_reversible());
        assert!(quiet(PieceType::King, Square::E1, Square::E2, None).is_reversible());
        assert!(!quiet(PieceType::Pawn, Square::E2, Square::E4, None).is_reversible());
        assert!(!quiet(PieceType::Rook, Square::A1, Square::A5, Some(PieceType::Knight)).is_reversible());

        let mut castling = Move::initialize(CastlingRights::FULL, None);
        castling.set_moving_piece_type(PieceType::King);
        castling.set_begin(Square::E1);
        castling.finish_castling(Square::G1);
        assert!(!castling.is_reversible());

        assert!(!Move::create_null(CastlingRights::NONE, None).is_reversible());
    }

    #[test]
    fn test_special_moves() {
        let mut castling = Move::initialize(CastlingRights::FULL, None);
        castling.set_moving_piece_type(PieceType::King);
        castling.set_begin(Square::E1);
        castling.finish_castling(Square::G1);
        assert_eq!(castling.move_type(), MoveType::Castling);
        assert_eq!(castling.to_string(), "e1g1");

        let mut ep = Move::initialize(CastlingRights::NONE, Some(File::FileE));
        ep.set_moving_piece_type(PieceType::Pawn);
        ep.set_begin(Square::D5);
        ep.finish_en_passant(Square::E6);
        assert_eq!(ep.captured_piece_type(), Some(PieceType::Pawn));
        assert!(ep.is_capture());

        let null = Move::create_null(CastlingRights::BQ, Some(File::FileA));
        assert!(null.is_null());
        assert_eq!(null.moving_piece_type(), None);
        assert_eq!(null.prev_ep_file(), Some(File::FileA));
        assert_eq!(null.to_string(), "0000");

        assert_eq!(Move::EMPTY.move_type(), MoveType::Invalid);
        assert_eq!(Move::default(), Move::EMPTY);
    }

    #[test]
    fn test_split_compressed() {
        let mut mv = Move::initialize(CastlingRights::FULL, None);
        mv.set_moving_piece_type(PieceType::Pawn);
        mv.set_begin(Square::E7);
        mv.finish_promotion(Square::E8, None, PieceType::Knight);

        let (begin, target, promotion) = Move::split_compressed(mv.compressed());
        assert_eq!(begin, Square::E7);
        assert_eq!(target, Square::E8);
        assert_eq!(PieceType::decode(promotion), Some(PieceType::Knight));
    }

    #[test]
    fn test_cmp_coordinates() {
        let mut a = Move::initialize(CastlingRights::NONE, None);
        a.set_moving_piece_type(PieceType::Queen);
        a.set_begin(Square::D1);
        a.finish_normal(Square::D4, None);

        let mut b = a;
        b.finish_normal(Square::H5, None);

        assert_eq!(a.cmp_coordinates(&b), Ordering::Less);
        assert_eq!(b.cmp_coordinates(&a), Ordering::Greater);
        assert_eq!(a.cmp_coordinates(&a), Ordering::Equal);
    }
}
