pub mod attacks;
pub mod caching;
pub mod fen;
pub mod integrity;
pub mod mask;
pub mod movegen;
pub mod movement;
pub mod validator;
pub mod zobrist;

pub use caching::{NullCaching, PositionCaching, ZobristCaching};
pub use fen::{KIWIPETE_FEN, START_FEN};
pub use movegen::{
    MoveList, attacks, between, bishop_attacks, figure_attacks, line_attacks, line_pins,
    pawn_attacks, pawn_moves, pawns_attacked_squares, queen_attacks, rook_attacks,
};
pub use validator::PositionValidator;
pub use zobrist::Key;

use crate::core::*;

/******************************************\
|==========================================|
|                 Position                 |
|==========================================|
\******************************************/

/// # Chess position
///
/// - Piece type masks merge both colours; `pieces_mask(colour, pt)` is the
///   intersection with the colour occupancy.
/// - `piece_types` mirrors the masks square by square for O(1) lookup.
/// - The caching strategy `C` receives every change made by make/undo.
///
/// A position is mutated by [`make_move`](Position::make_move) and
/// [`undo_move`](Position::undo_move) in LIFO order. The setup methods
/// (`set_square_content` and friends) must be followed by
/// [`refresh_cached_data`](Position::refresh_cached_data).
#[derive(Debug, Clone)]
pub struct Position<C: PositionCaching = ZobristCaching> {
    piece_types: [Option<PieceType>; Square::NUM],

    pieces: [Bitboard; PieceType::NUM],

    colour_occupancy: [Bitboard; Colour::NUM],

    occupancy: Bitboard,

    on_turn: Colour,

    castling_rights: CastlingRights,

    ep_file: Option<File>,

    caching: C,
}

/******************************************\
|==========================================|
|               Construction               |
|==========================================|
\******************************************/

impl<C: PositionCaching> Default for Position<C> {
    /// Empty board, white to move, no rights
    fn default() -> Self {
        Position {
            piece_types: [None; Square::NUM],
            pieces: [Bitboard::EMPTY; PieceType::NUM],
            colour_occupancy: [Bitboard::EMPTY; Colour::NUM],
            occupancy: Bitboard::EMPTY,
            on_turn: Colour::White,
            castling_rights: CastlingRights::NONE,
            ep_file: None,
            caching: C::default(),
        }
    }
}

impl Position {
    /// Empty board with the default caching
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard initial position with the default caching
    pub fn initial() -> Self {
        let mut position = Self::default();
        position.set_initial_position();
        position
    }
}

/// Order of the figures on the first rank
const BACK_RANK: [PieceType; File::NUM] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/******************************************\
|==========================================|
|                 Queries                  |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    #[inline]
    pub fn on_turn(&self) -> Colour {
        self.on_turn
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// File of the pawn that just advanced by two squares, set only when the
    /// en passant capture is really possible
    #[inline]
    pub fn ep_file(&self) -> Option<File> {
        self.ep_file
    }

    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.occupancy
    }

    #[inline]
    pub fn colour_occupancy(&self, colour: Colour) -> Bitboard {
        self.colour_occupancy[colour.index()]
    }

    /// Squares of a piece type, both colours
    #[inline]
    pub fn piece_type_mask(&self, pt: PieceType) -> Bitboard {
        self.pieces[pt.index()]
    }

    #[inline]
    pub fn pieces_mask(&self, colour: Colour, pt: PieceType) -> Bitboard {
        self.pieces[pt.index()] & self.colour_occupancy[colour.index()]
    }

    #[inline]
    pub fn piece_type_on(&self, sq: Square) -> Option<PieceType> {
        self.piece_types[sq.index()]
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        let pt = self.piece_types[sq.index()]?;
        let colour = if self.colour_occupancy[Colour::White.index()].contains(sq) {
            Colour::White
        } else {
            Colour::Black
        };

        Some(Piece::from_parts(colour, pt))
    }

    #[inline]
    pub fn piece_count(&self, colour: Colour, pt: PieceType) -> u32 {
        self.pieces_mask(colour, pt).count_bits()
    }

    /// Square of the king of `colour`.
    ///
    /// Every position handed to the generators must have one king per side;
    /// a missing king is a setup bug and aborts.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Square {
        match self.pieces_mask(colour, PieceType::King).lsb() {
            Some(sq) => sq,
            None => panic!("no {colour:?} king on the board"),
        }
    }

    /// True when the side to move is in check
    #[inline]
    pub fn is_check(&self) -> bool {
        self.is_square_attacked(!self.on_turn, self.king_square(self.on_turn))
    }

    /// Zobrist hash, incremental or recomputed depending on the caching
    #[inline]
    pub fn hash(&self) -> zobrist::Key {
        match self.caching.hash() {
            Some(hash) => hash,
            None => self.calculate_hash(),
        }
    }

    #[inline]
    pub fn material_hash(&self) -> MaterialHash {
        match self.caching.material_hash() {
            Some(material) => material,
            None => self.calculate_material_hash(),
        }
    }

    /// Colour with at least as many pieces as the other (white on ties)
    pub fn side_with_more_pieces(&self) -> Colour {
        let white = self.colour_occupancy(Colour::White).count_bits();
        let black = self.colour_occupancy(Colour::Black).count_bits();

        if white >= black { Colour::White } else { Colour::Black }
    }

    /// Sliders of `colour` moving orthogonally
    #[inline]
    pub(crate) fn rook_queen_mask(&self, colour: Colour) -> Bitboard {
        (self.pieces[PieceType::Rook.index()] | self.pieces[PieceType::Queen.index()])
            & self.colour_occupancy[colour.index()]
    }

    /// Sliders of `colour` moving diagonally
    #[inline]
    pub(crate) fn bishop_queen_mask(&self, colour: Colour) -> Bitboard {
        (self.pieces[PieceType::Bishop.index()] | self.pieces[PieceType::Queen.index()])
            & self.colour_occupancy[colour.index()]
    }
}

/******************************************\
|==========================================|
|                  Setup                   |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Empties the board and resets the state
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Puts `piece` on `sq` (or empties it). Call
    /// [`refresh_cached_data`](Self::refresh_cached_data) after the setup.
    pub fn set_square_content(&mut self, sq: Square, piece: Option<Piece>) {
        let bb = sq.bb();

        if let Some(old) = self.piece_types[sq.index()] {
            self.pieces[old.index()] &= !bb;
        }
        for occupancy in self.colour_occupancy.iter_mut() {
            *occupancy &= !bb;
        }

        match piece {
            Some(piece) => {
                self.piece_types[sq.index()] = Some(piece.pt());
                self.pieces[piece.pt().index()] |= bb;
                self.colour_occupancy[piece.colour().index()] |= bb;
            }
            None => self.piece_types[sq.index()] = None,
        }
    }

    #[inline]
    pub fn set_on_turn(&mut self, colour: Colour) {
        self.on_turn = colour;
    }

    #[inline]
    pub fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    /// Stores the file as given; the caller makes sure the en passant capture
    /// is actually possible, see [`Position::is_en_passant_possible`]
    #[inline]
    pub fn set_ep_file(&mut self, file: Option<File>) {
        self.ep_file = file;
    }

    /// Recomputes the occupancy and the caches after setup
    pub fn refresh_cached_data(&mut self) {
        self.occupancy = self.colour_occupancy[Colour::White.index()]
            | self.colour_occupancy[Colour::Black.index()];

        if C::INCREMENTAL {
            let hash = self.calculate_hash();
            let material = self.calculate_material_hash();
            self.caching.refresh(hash, material);
        }
    }

    pub fn set_initial_position(&mut self) {
        self.clear();

        for colour in Colour::iter() {
            for (file, pt) in File::iter().zip(BACK_RANK) {
                let back = Square::from_parts(file, Rank::Rank1.relative(colour));
                let front = Square::from_parts(file, colour.pawn_rank());

                self.set_square_content(back, Some(Piece::from_parts(colour, pt)));
                self.set_square_content(front, Some(Piece::from_parts(colour, PieceType::Pawn)));
            }
        }

        self.castling_rights = CastlingRights::FULL;
        self.refresh_cached_data();
    }

    /// Copies the board of a position with any caching flavour
    pub fn assign<D: PositionCaching>(&mut self, other: &Position<D>) {
        self.piece_types = other.piece_types;
        self.pieces = other.pieces;
        self.colour_occupancy = other.colour_occupancy;
        self.occupancy = other.occupancy;
        self.on_turn = other.on_turn;
        self.castling_rights = other.castling_rights;
        self.ep_file = other.ep_file;
        self.refresh_cached_data();
    }
}

/******************************************\
|==========================================|
|                 Equality                 |
|==========================================|
\******************************************/

impl<C: PositionCaching, D: PositionCaching> PartialEq<Position<D>> for Position<C> {
    /// Same side to move, rights, en passant file and placement
    fn eq(&self, other: &Position<D>) -> bool {
        self.on_turn == other.on_turn
            && self.ep_file == other.ep_file
            && self.castling_rights == other.castling_rights
            && self.pieces == other.pieces
            && self.colour_occupancy == other.colour_occupancy
    }
}

impl<C: PositionCaching> Eq for Position<C> {}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl<C: PositionCaching> std::fmt::Display for Position<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{SEPARATOR}")?;

        for rank in Rank::iter().rev() {
            write!(f, " {rank}   |")?;

            for file in File::iter() {
                match self.piece_on(Square::from_parts(file, rank)) {
                    Some(piece) => write!(f, " {piece} |")?,
                    None => write!(f, "   |")?,
                }
            }

            writeln!(f, "{SEPARATOR}")?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Fen: {}", self.fen())?;
        writeln!(f, "Key: {:#018X}", self.hash())?;

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
