use super::{Position, PositionCaching};
use crate::core::*;
use crate::utils::PRNG;

/******************************************\
|==========================================|
|              Key Definition              |
|==========================================|
\******************************************/

/// Type alias for a Zobrist key
pub type Key = u64;

/******************************************\
|==========================================|
|              Zobrist Table               |
|==========================================|
\******************************************/

/// Random keys of every hashed position feature.
#[derive(Debug)]
pub struct ZobristTable {
    /// Keys for each piece on each square: `pieces[piece_index][square_index]`.
    pub pieces: [[Key; Square::NUM]; Piece::NUM],
    /// XORed in when black is on turn.
    pub black_on_turn: Key,
    /// One key per castling rights index, including the empty rights.
    pub castling: [Key; CastlingRights::NUM],
    /// One key per en passant file; no key when en passant is not possible.
    pub enpassant: [Key; File::NUM],
}

/// Keys generated at compile time from a fixed seed, so hashes are stable
/// across runs and builds.
pub const ZOBRIST: ZobristTable = init_zobrist_table();

/******************************************\
|==========================================|
|              Initialisation              |
|==========================================|
\******************************************/

const fn init_zobrist_table() -> ZobristTable {
    let mut rng = PRNG::new(0xB15B0B5EED5A17ED);

    let mut pieces = [[0; Square::NUM]; Piece::NUM];
    let mut castling = [0; CastlingRights::NUM];
    let mut enpassant = [0; File::NUM];

    let mut i = 0;
    while i < Piece::NUM {
        let mut j = 0;
        while j < Square::NUM {
            pieces[i][j] = rng.random_u64();
            j += 1;
        }
        i += 1;
    }

    let black_on_turn = rng.random_u64();

    i = 0;
    while i < CastlingRights::NUM {
        castling[i] = rng.random_u64();
        i += 1;
    }

    i = 0;
    while i < File::NUM {
        enpassant[i] = rng.random_u64();
        i += 1;
    }

    ZobristTable {
        pieces,
        black_on_turn,
        castling,
        enpassant,
    }
}

/******************************************\
|==========================================|
|              Access Functions            |
|==========================================|
\******************************************/

#[inline]
pub fn piece_key(colour: Colour, pt: PieceType, sq: Square) -> Key {
    ZOBRIST.pieces[Piece::from_parts(colour, pt).index()][sq.index()]
}

/// Key of the side to move, zero for white
#[inline]
pub fn on_turn_key(colour: Colour) -> Key {
    match colour {
        Colour::White => 0,
        Colour::Black => ZOBRIST.black_on_turn,
    }
}

/// Difference between the white and black on-turn keys
#[inline]
pub fn on_turn_swap_key() -> Key {
    ZOBRIST.black_on_turn
}

#[inline]
pub fn castling_key(rights: CastlingRights) -> Key {
    ZOBRIST.castling[rights.index()]
}

/// Key of an en passant file, zero for `None`
#[inline]
pub fn ep_key(file: Option<File>) -> Key {
    match file {
        Some(file) => ZOBRIST.enpassant[file.index()],
        None => 0,
    }
}

/******************************************\
|==========================================|
|          Position Implementation         |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Hash recomputed from scratch
    pub fn calculate_hash(&self) -> Key {
        let mut key = 0;

        for colour in Colour::iter() {
            for pt in PieceType::iter() {
                self.pieces_mask(colour, pt)
                    .for_each(|sq| key ^= piece_key(colour, pt, sq));
            }
        }

        key ^= on_turn_key(self.on_turn());
        key ^= ep_key(self.ep_file());
        key ^= castling_key(self.castling_rights());

        key
    }

    /// Material signature recomputed from scratch
    pub fn calculate_material_hash(&self) -> MaterialHash {
        let mut material = MaterialHash::ALONE_KINGS;

        for colour in Colour::iter() {
            for pt in PieceType::VARIABLE {
                material.set_piece_count(colour, pt, self.pieces_mask(colour, pt).count_bits());
            }
        }

        material.set_on_turn(self.on_turn());
        material
    }
}

impl MaterialHash {
    /// Material signature of a position
    #[inline]
    pub fn from_position<C: PositionCaching>(position: &Position<C>) -> MaterialHash {
        position.material_hash()
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
    use crate::board::NullCaching;

    #[test]
    fn zobrist_table_init() {
        assert_ne!(piece_key(Colour::White, PieceType::Pawn, Square::E4), 0);
        assert_ne!(piece_key(Colour::Black, PieceType::King, Square::G8), 0);
        assert_ne!(on_turn_swap_key(), 0);
        assert_eq!(on_turn_key(Colour::White), 0);
        assert_eq!(ep_key(None), 0);
        assert_ne!(ep_key(Some(File::FileD)), 0);

        assert_ne!(
            piece_key(Colour::White, PieceType::Pawn, Square::E4),
            piece_key(Colour::White, PieceType::Pawn, Square::E5)
        );
        assert_ne!(
            piece_key(Colour::White, PieceType::Pawn, Square::E4),
            piece_key(Colour::Black, PieceType::Pawn, Square::E4)
        );
        assert_ne!(castling_key(CastlingRights::WK), castling_key(CastlingRights::WQ));
        assert_ne!(castling_key(CastlingRights::FULL), castling_key(CastlingRights::NONE));
        assert_ne!(ep_key(Some(File::FileA)), ep_key(Some(File::FileH)));
    }

    #[test]
    fn test_keys_are_distinct() {
        let mut keys = Vec::new();
        for row in ZOBRIST.pieces.iter() {
            keys.extend_from_slice(row);
        }
        keys.extend_from_slice(&ZOBRIST.castling);
        keys.extend_from_slice(&ZOBRIST.enpassant);
        keys.push(ZOBRIST.black_on_turn);

        let count = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), count);
    }

    #[test]
    fn test_hash_depends_on_side_to_move() {
        let mut position = Position::<NullCaching>::default();
        position.set_initial_position();
        let white = position.hash();

        position.set_on_turn(Colour::Black);
        position.refresh_cached_data();
        assert_eq!(position.hash(), white ^ on_turn_swap_key());
    }

    #[test]
    fn test_calculate_material_hash() {
        let mut position = Position::<NullCaching>::default();
        position.set_initial_position();
        let material = position.calculate_material_hash();

        assert_eq!(material.piece_count(Colour::White, PieceType::Pawn), 8);
        assert_eq!(material.piece_count(Colour::Black, PieceType::Knight), 2);
        assert_eq!(material.piece_count(Colour::Black, PieceType::King), 1);
        assert_eq!(material.to_string(), "KQRRBBNNPPPPPPPP-KQRRBBNNPPPPPPPP-w");
        assert_eq!(MaterialHash::from_position(&position), material);
    }
}
