use crate::core::*;

/******************************************\
|==========================================|
|            Castling Geometry             |
|==========================================|
\******************************************/

/// Squares touched by one castling, indexed by [`castling_index`]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_begin: Square,
    pub king_target: Square,
    /// Square the king passes; the rook lands here
    pub king_middle: Square,
    pub rook_begin: Square,
    /// Squares that must be empty
    pub middle_squares: Bitboard,
}

impl CastlingGeometry {
    /// King squares toggled by the castling
    #[inline]
    pub const fn king_changes(&self) -> Bitboard {
        Bitboard(self.king_begin.bb().0 | self.king_target.bb().0)
    }

    /// Rook squares toggled by the castling
    #[inline]
    pub const fn rook_changes(&self) -> Bitboard {
        Bitboard(self.rook_begin.bb().0 | self.king_middle.bb().0)
    }

    #[inline]
    pub const fn rook_target(&self) -> Square {
        self.king_middle
    }
}

const CASTLING_GEOMETRY: [CastlingGeometry; 4] = [
    CastlingGeometry {
        king_begin: Square::E1,
        king_target: Square::G1,
        king_middle: Square::F1,
        rook_begin: Square::H1,
        middle_squares: Bitboard(Square::F1.bb().0 | Square::G1.bb().0),
    },
    CastlingGeometry {
        king_begin: Square::E1,
        king_target: Square::C1,
        king_middle: Square::D1,
        rook_begin: Square::A1,
        middle_squares: Bitboard(Square::B1.bb().0 | Square::C1.bb().0 | Square::D1.bb().0),
    },
    CastlingGeometry {
        king_begin: Square::E8,
        king_target: Square::G8,
        king_middle: Square::F8,
        rook_begin: Square::H8,
        middle_squares: Bitboard(Square::F8.bb().0 | Square::G8.bb().0),
    },
    CastlingGeometry {
        king_begin: Square::E8,
        king_target: Square::C8,
        king_middle: Square::D8,
        rook_begin: Square::A8,
        middle_squares: Bitboard(Square::B8.bb().0 | Square::C8.bb().0 | Square::D8.bb().0),
    },
];

#[inline]
pub const fn castling_geometry(colour: Colour, castling_type: CastlingType) -> CastlingGeometry {
    CASTLING_GEOMETRY[castling_index(colour, castling_type)]
}

/// Initial square of the king of `colour`
#[inline]
pub const fn king_initial_square(colour: Colour) -> Square {
    match colour {
        Colour::White => Square::E1,
        Colour::Black => Square::E8,
    }
}

/// Castling performed by a king move from `begin` to `target`
#[inline]
pub const fn castling_type_of(begin: Square, target: Square) -> CastlingType {
    if (begin as u8) > (target as u8) {
        CastlingType::Long
    } else {
        CastlingType::Short
    }
}

/******************************************\
|==========================================|
|           En Passant Squares             |
|==========================================|
\******************************************/

/// Rank of a pawn of `colour` that just advanced by two squares
#[inline]
pub const fn ep_rank(colour: Colour) -> Rank {
    match colour {
        Colour::White => Rank::Rank4,
        Colour::Black => Rank::Rank5,
    }
}

#[inline]
pub const fn ep_rank_mask(colour: Colour) -> Bitboard {
    ep_rank(colour).bb()
}

/// Square of the pawn of `colour` that just advanced on `file`
#[inline]
pub const fn ep_square(colour: Colour, file: File) -> Square {
    Square::from_parts(file, ep_rank(colour))
}

/// Square the pawn of `colour` skipped, where the capturing pawn lands
#[inline]
pub const fn ep_target_square(colour: Colour, file: File) -> Square {
    Square::from_parts(file, Rank::Rank3.relative(colour))
}

#[inline]
pub const fn pawn_initial_square(colour: Colour, file: File) -> Square {
    Square::from_parts(file, colour.pawn_rank())
}

/// Squares a two-square advance of `colour` on `file` passed through, both
/// must be empty afterwards
#[inline]
pub const fn empty_ep_squares(colour: Colour, file: File) -> Bitboard {
    Bitboard(ep_target_square(colour, file).bb().0 | pawn_initial_square(colour, file).bb().0)
}

/// Left and right neighbours of a square on its rank
#[inline]
pub const fn connected_pawn_squares(sq: Square) -> Bitboard {
    let bb = sq.bb().0;
    Bitboard(((bb & !Bitboard::FILE_H.0) << 1) | ((bb & !Bitboard::FILE_A.0) >> 1))
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
