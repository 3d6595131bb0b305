//! # Module: `init`
//!
//! Compile-time builders of the small lookup tables: short-range figure
//! attacks, empty-board slider rays, pawn advances and captures, squares
//! between two squares and the relevant-occupancy masks of the line indexer.
//!
//! Everything here is a `const fn` evaluated once by the compiler; the tables
//! themselves live in `lookup`.
use super::lookup::{AttackTable, SquarePairTable};
use crate::core::*;

/// File/rank steps of the knight
pub(super) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// File/rank steps of the king
pub(super) const KING_OFFSETS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/******************************************\
|==========================================|
|             Ray Walking                  |
|==========================================|
\******************************************/

/// Walks the four rays of `cross` from `sq` and collects every square that has
/// exactly `blockers` occupied squares between itself and `sq`.
///
/// With `blockers == 0` this is the ordinary sliding attack set; with
/// `blockers == 1` it is the set of squares seen through one piece.
pub(super) const fn ray_squares(
    cross: CrossDirection,
    sq: Square,
    occupancy: Bitboard,
    blockers: u32,
) -> Bitboard {
    let offsets = cross.ray_offsets();
    let mut result = 0u64;

    let mut i = 0;
    while i < offsets.len() {
        let (df, dr) = offsets[i];
        let mut count = 0;
        let mut current = sq;

        while let Ok(next) = current.from_offset(df, dr) {
            if count == blockers {
                result |= 1u64 << next as u8;
            }

            if occupancy.contains(next) {
                count += 1;

                if count > blockers {
                    break;
                }
            }

            current = next;
        }

        i += 1;
    }

    Bitboard(result)
}

/// Squares of the rays of `cross` whose next step still stays on the board.
///
/// A piece on the last square of a ray can never block anything behind it, so
/// only these squares influence the attack set.
pub(super) const fn relevant_line_mask(cross: CrossDirection, sq: Square) -> Bitboard {
    let offsets = cross.ray_offsets();
    let mut result = 0u64;

    let mut i = 0;
    while i < offsets.len() {
        let (df, dr) = offsets[i];
        let mut current = sq;

        while let Ok(next) = current.from_offset(df, dr) {
            if next.from_offset(df, dr).is_err() {
                break;
            }

            result |= 1u64 << next as u8;
            current = next;
        }

        i += 1;
    }

    Bitboard(result)
}

/******************************************\
|==========================================|
|             Figure Tables                |
|==========================================|
\******************************************/

/// Attack table of a piece jumping by fixed file/rank offsets
pub(super) const fn init_leaper_attacks(offsets: &[(i8, i8)]) -> AttackTable {
    let mut table = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq = unsafe { Square::from_unchecked(i as u8) };

        let mut j = 0;
        while j < offsets.len() {
            if let Ok(target) = sq.from_offset(offsets[j].0, offsets[j].1) {
                table[i].set(target);
            }
            j += 1;
        }

        i += 1;
    }

    table
}

/// Empty-board attack table of a slider moving along `cross`
pub(super) const fn init_slider_attacks(cross: CrossDirection) -> AttackTable {
    let mut table = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let sq = unsafe { Square::from_unchecked(i as u8) };
        table[i] = ray_squares(cross, sq, Bitboard::EMPTY, 0);
        i += 1;
    }

    table
}

/// Empty-board attacks of every figure, indexed by `PieceType` (king..knight)
pub(super) const fn init_figure_attacks() -> [AttackTable; PieceType::FIGURES.len()] {
    let rook = init_slider_attacks(CrossDirection::Orthogonal);
    let bishop = init_slider_attacks(CrossDirection::Diagonal);

    let mut queen = [Bitboard::EMPTY; Square::NUM];
    let mut i = 0;
    while i < Square::NUM {
        queen[i] = Bitboard(rook[i].0 | bishop[i].0);
        i += 1;
    }

    [
        init_leaper_attacks(&KING_OFFSETS),
        queen,
        rook,
        bishop,
        init_leaper_attacks(&KNIGHT_OFFSETS),
    ]
}

/// Squares from which any piece could possibly reach a square: queen lines
/// plus knight jumps. Pawn and king attacks are subsets of the queen lines.
pub(super) const fn init_super_attacks() -> AttackTable {
    let figures = init_figure_attacks();
    let mut table = [Bitboard::EMPTY; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        table[i] = Bitboard(
            figures[PieceType::Queen as usize][i].0 | figures[PieceType::Knight as usize][i].0,
        );
        i += 1;
    }

    table
}

/******************************************\
|==========================================|
|              Pawn Tables                 |
|==========================================|
\******************************************/

/// Squares attacked by a pawn. Pawns never stand on their promotion rank, so
/// those entries stay empty.
pub(super) const fn init_pawn_attacks() -> [AttackTable; Colour::NUM] {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Colour::NUM];

    let mut c = 0;
    while c < Colour::NUM {
        let colour = unsafe { Colour::from_unchecked(c as u8) };
        let (_, dr) = colour.forward().offsets();

        let mut i = 0;
        while i < Square::NUM {
            let sq = unsafe { Square::from_unchecked(i as u8) };

            if sq.rank() as u8 != colour.promotion_rank() as u8 {
                if let Ok(target) = sq.from_offset(-1, dr) {
                    table[c][i].set(target);
                }
                if let Ok(target) = sq.from_offset(1, dr) {
                    table[c][i].set(target);
                }
            }

            i += 1;
        }

        c += 1;
    }

    table
}

/// Non-capturing pawn advances from ranks 2..7: the single step plus the
/// double step from the initial rank.
pub(super) const fn init_pawn_moves() -> [AttackTable; Colour::NUM] {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Colour::NUM];

    let mut c = 0;
    while c < Colour::NUM {
        let colour = unsafe { Colour::from_unchecked(c as u8) };
        let (_, dr) = colour.forward().offsets();

        let mut i = 0;
        while i < Square::NUM {
            let sq = unsafe { Square::from_unchecked(i as u8) };
            let rank = sq.rank() as u8;

            if rank != Rank::Rank1 as u8 && rank != Rank::Rank8 as u8 {
                if let Ok(target) = sq.from_offset(0, dr) {
                    table[c][i].set(target);
                }

                if rank == colour.pawn_rank() as u8 {
                    if let Ok(target) = sq.from_offset(0, 2 * dr) {
                        table[c][i].set(target);
                    }
                }
            }

            i += 1;
        }

        c += 1;
    }

    table
}

/// Inverse of the pawn advance table: the squares a pawn standing on the
/// indexed square could have advanced from.
pub(super) const fn init_reverse_pawn_moves() -> [AttackTable; Colour::NUM] {
    let forward = init_pawn_moves();
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Colour::NUM];

    let mut c = 0;
    while c < Colour::NUM {
        let mut begin = 0;
        while begin < Square::NUM {
            let mut targets = forward[c][begin];

            while let Some(target) = targets.pop_lsb() {
                table[c][target as usize].0 |= 1u64 << begin;
            }

            begin += 1;
        }

        c += 1;
    }

    table
}

/******************************************\
|==========================================|
|             Between Table                |
|==========================================|
\******************************************/

/// Squares strictly between two squares on a common queen line, empty when
/// the squares are not aligned or adjacent.
pub(super) const fn init_between_table() -> SquarePairTable {
    let mut table = [[Bitboard::EMPTY; Square::NUM]; Square::NUM];

    let mut i = 0;
    while i < Square::NUM {
        let from = unsafe { Square::from_unchecked(i as u8) };

        let mut k = 0;
        while k < CrossDirection::NUM {
            let cross = unsafe { CrossDirection::from_unchecked(k as u8) };
            let offsets = cross.ray_offsets();

            let mut r = 0;
            while r < offsets.len() {
                let (df, dr) = offsets[r];
                let mut passed = 0u64;
                let mut current = from;

                while let Ok(next) = current.from_offset(df, dr) {
                    table[i][next as usize] = Bitboard(passed);
                    passed |= 1u64 << next as u8;
                    current = next;
                }

                r += 1;
            }

            k += 1;
        }

        i += 1;
    }

    table
}
