//! # Module: `lookup`
//!
//! Read-only attack tables and the accessors used by the position and the
//! move generators.
//!
//! - Short-range and empty-board tables are `const` arrays built in `init`.
//! - Occupancy-dependent sliding attacks go through the perfect-hash
//!   [`LineIndexer`](super::line::LineIndexer) into the lazily built line
//!   tables.

use super::init::*;
use super::line::{LINE_INDEXERS, LINE_TABLES};
use crate::core::*;

/******************************************\
|==========================================|
|              Type Definitions            |
|==========================================|
\******************************************/

/// Attack table for a single piece type indexed by square
pub(super) type AttackTable = [Bitboard; Square::NUM];
/// Table mapping square pairs to bitboards
pub(super) type SquarePairTable = [[Bitboard; Square::NUM]; Square::NUM];

/******************************************\
|==========================================|
|              Attack Tables               |
|==========================================|
\******************************************/

/// Empty-board attacks of the figures, indexed by `[PieceType][Square]`
const FIGURE_ATTACKS: [AttackTable; PieceType::FIGURES.len()] = init_figure_attacks();

/// Pawn captures, indexed by `[Colour][Square]`
const PAWN_ATTACKS: [AttackTable; Colour::NUM] = init_pawn_attacks();

/// Pawn advances, indexed by `[Colour][Square]`
const PAWN_MOVES: [AttackTable; Colour::NUM] = init_pawn_moves();

/// Origins of pawn advances, indexed by `[Colour][Square]`
const REVERSE_PAWN_MOVES: [AttackTable; Colour::NUM] = init_reverse_pawn_moves();

/// Exclusive squares between two aligned squares
static BETWEEN: SquarePairTable = init_between_table();

const SUPER_ATTACKS: AttackTable = init_super_attacks();

/******************************************\
|==========================================|
|               Get Attacks                |
|==========================================|
\******************************************/

/// Empty-board attacks of a figure (every piece type except the pawn)
#[inline]
pub fn figure_attacks(pt: PieceType, sq: Square) -> Bitboard {
    debug_assert!(pt.is_figure(), "pawns have no figure table");
    FIGURE_ATTACKS[pt.index()][sq.index()]
}

#[inline]
pub fn pawn_attacks(colour: Colour, sq: Square) -> Bitboard {
    PAWN_ATTACKS[colour.index()][sq.index()]
}

/// Single and double pawn advances, ignoring occupancy
#[inline]
pub fn pawn_moves(colour: Colour, sq: Square) -> Bitboard {
    PAWN_MOVES[colour.index()][sq.index()]
}

/// Squares a pawn of `colour` now on `sq` may have advanced from
#[inline]
pub fn reverse_pawn_moves(colour: Colour, sq: Square) -> Bitboard {
    REVERSE_PAWN_MOVES[colour.index()][sq.index()]
}

#[inline]
pub fn between(from: Square, to: Square) -> Bitboard {
    BETWEEN[from.index()][to.index()]
}

/// Every square a piece of any type could attack `sq` from
#[inline]
pub fn super_attacks(sq: Square) -> Bitboard {
    SUPER_ATTACKS[sq.index()]
}

/// Squares attacked along `cross` from `sq` with the given occupancy
#[inline]
pub fn line_attacks(cross: CrossDirection, sq: Square, occupancy: Bitboard) -> Bitboard {
    let index = LINE_INDEXERS[cross.index()][sq.index()].index(occupancy);
    LINE_TABLES.attacks[index]
}

/// Squares along `cross` from `sq` that have exactly one occupied square
/// in between
#[inline]
pub fn line_pins(cross: CrossDirection, sq: Square, occupancy: Bitboard) -> Bitboard {
    let index = LINE_INDEXERS[cross.index()][sq.index()].index(occupancy);
    LINE_TABLES.pins[index]
}

#[inline]
pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    line_attacks(CrossDirection::Orthogonal, sq, occupancy)
}

#[inline]
pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    line_attacks(CrossDirection::Diagonal, sq, occupancy)
}

#[inline]
pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    rook_attacks(sq, occupancy) | bishop_attacks(sq, occupancy)
}

/// Gets the attack `Bitboard` of a piece standing on `sq`
#[inline]
pub fn attacks(colour: Colour, pt: PieceType, sq: Square, occupancy: Bitboard) -> Bitboard {
    match pt {
        PieceType::Pawn => pawn_attacks(colour, sq),
        PieceType::Knight | PieceType::King => figure_attacks(pt, sq),
        PieceType::Bishop => bishop_attacks(sq, occupancy),
        PieceType::Rook => rook_attacks(sq, occupancy),
        PieceType::Queen => queen_attacks(sq, occupancy),
    }
}

/// Union of the squares attacked by a set of pawns of `colour`
#[inline]
pub const fn pawns_attacked_squares(colour: Colour, pawns: Bitboard) -> Bitboard {
    match colour {
        Colour::White => Bitboard(
            ((pawns.0 & !Bitboard::FILE_H.0) << 9) | ((pawns.0 & !Bitboard::FILE_A.0) << 7),
        ),
        Colour::Black => Bitboard(
            ((pawns.0 & !Bitboard::FILE_H.0) >> 7) | ((pawns.0 & !Bitboard::FILE_A.0) >> 9),
        ),
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
