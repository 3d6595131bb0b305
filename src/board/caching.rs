//! Incremental caches kept in step with the board by make/undo.
//!
//! The position reports every semantic change (a piece moved, appeared or
//! vanished, the side to move changed, en passant or castling rights changed)
//! to its caching strategy. [`ZobristCaching`] folds those events into a hash
//! and a material signature; [`NullCaching`] ignores them, and the position
//! then recomputes both on demand.

use super::zobrist::{castling_key, ep_key, on_turn_swap_key, piece_key};
use crate::core::*;

/// Strategy receiving the change events of a position.
///
/// Chosen statically through the type parameter of
/// [`Position`](super::Position), so the disabled strategy compiles to
/// nothing on the make/undo path.
pub trait PositionCaching: Clone + Default + std::fmt::Debug {
    /// True when [`hash`](Self::hash) and [`material_hash`](Self::material_hash)
    /// hold live values
    const INCREMENTAL: bool;

    fn move_piece(&mut self, colour: Colour, pt: PieceType, begin: Square, target: Square);

    fn add_piece(&mut self, colour: Colour, pt: PieceType, sq: Square);

    fn remove_piece(&mut self, colour: Colour, pt: PieceType, sq: Square);

    fn swap_on_turn(&mut self);

    fn change_ep_file(&mut self, from: Option<File>, to: Option<File>);

    fn change_castling_rights(&mut self, from: CastlingRights, to: CastlingRights);

    /// Overwrites the cache with freshly computed values
    fn refresh(&mut self, hash: u64, material: MaterialHash);

    /// Cached hash, `None` when the strategy does not track it
    fn hash(&self) -> Option<u64>;

    /// Cached material signature, `None` when the strategy does not track it
    fn material_hash(&self) -> Option<MaterialHash>;
}

/******************************************\
|==========================================|
|             Zobrist Caching              |
|==========================================|
\******************************************/

/// Incrementally updated Zobrist hash and material signature
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZobristCaching {
    hash: u64,
    material: MaterialHash,
}

impl PositionCaching for ZobristCaching {
    const INCREMENTAL: bool = true;

    #[inline]
    fn move_piece(&mut self, colour: Colour, pt: PieceType, begin: Square, target: Square) {
        self.hash ^= piece_key(colour, pt, begin) ^ piece_key(colour, pt, target);
    }

    #[inline]
    fn add_piece(&mut self, colour: Colour, pt: PieceType, sq: Square) {
        self.hash ^= piece_key(colour, pt, sq);

        if pt.is_variable() {
            self.material.add_piece(colour, pt);
        }
    }

    #[inline]
    fn remove_piece(&mut self, colour: Colour, pt: PieceType, sq: Square) {
        self.hash ^= piece_key(colour, pt, sq);

        if pt.is_variable() {
            self.material.remove_piece(colour, pt);
        }
    }

    #[inline]
    fn swap_on_turn(&mut self) {
        self.hash ^= on_turn_swap_key();
        self.material.swap_on_turn();
    }

    #[inline]
    fn change_ep_file(&mut self, from: Option<File>, to: Option<File>) {
        if from != to {
            self.hash ^= ep_key(from) ^ ep_key(to);
        }
    }

    #[inline]
    fn change_castling_rights(&mut self, from: CastlingRights, to: CastlingRights) {
        if from != to {
            self.hash ^= castling_key(from) ^ castling_key(to);
        }
    }

    #[inline]
    fn refresh(&mut self, hash: u64, material: MaterialHash) {
        self.hash = hash;
        self.material = material;
    }

    #[inline]
    fn hash(&self) -> Option<u64> {
        Some(self.hash)
    }

    #[inline]
    fn material_hash(&self) -> Option<MaterialHash> {
        Some(self.material)
    }
}

/******************************************\
|==========================================|
|               Null Caching               |
|==========================================|
\******************************************/

/// Caching that tracks nothing
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NullCaching;

impl PositionCaching for NullCaching {
    const INCREMENTAL: bool = false;

    #[inline]
    fn move_piece(&mut self, _: Colour, _: PieceType, _: Square, _: Square) {}

    #[inline]
    fn add_piece(&mut self, _: Colour, _: PieceType, _: Square) {}

    #[inline]
    fn remove_piece(&mut self, _: Colour, _: PieceType, _: Square) {}

    #[inline]
    fn swap_on_turn(&mut self) {}

    #[inline]
    fn change_ep_file(&mut self, _: Option<File>, _: Option<File>) {}

    #[inline]
    fn change_castling_rights(&mut self, _: CastlingRights, _: CastlingRights) {}

    #[inline]
    fn refresh(&mut self, _: u64, _: MaterialHash) {}

    #[inline]
    fn hash(&self) -> Option<u64> {
        None
    }

    #[inline]
    fn material_hash(&self) -> Option<MaterialHash> {
        None
    }
}
