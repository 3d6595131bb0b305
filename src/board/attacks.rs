use super::mask::castling_geometry;
use super::movegen::{
    bishop_attacks, figure_attacks, pawn_attacks, pawns_attacked_squares, queen_attacks,
    rook_attacks, super_attacks,
};
use super::{Position, PositionCaching};
use crate::core::*;

/// Attacker order of [`Position::cheapest_attacker`]
const ATTACKER_ORDER: [PieceType; PieceType::NUM] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
    PieceType::King,
];

/******************************************\
|==========================================|
|              Square Attacks              |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// True when a piece of `colour` attacks `sq`.
    ///
    /// Rejects early through the super-attack mask, then tests the short
    /// movers before the sliders.
    #[inline]
    pub fn is_square_attacked(&self, colour: Colour, sq: Square) -> bool {
        self.is_square_attacked_with(colour, sq, self.occupancy, self.colour_occupancy(colour))
    }

    /// Attack test against an arbitrary occupancy, counting only the pieces
    /// of `colour` inside `attackers`
    pub(crate) fn is_square_attacked_with(
        &self,
        colour: Colour,
        sq: Square,
        occupancy: Bitboard,
        attackers: Bitboard,
    ) -> bool {
        if (super_attacks(sq) & attackers).is_empty() {
            return false;
        }

        let of_type = |pt: PieceType| self.pieces[pt.index()] & attackers;

        if figure_attacks(PieceType::King, sq).intersects(of_type(PieceType::King)) {
            return true;
        }

        if figure_attacks(PieceType::Knight, sq).intersects(of_type(PieceType::Knight)) {
            return true;
        }

        if pawn_attacks(!colour, sq).intersects(of_type(PieceType::Pawn)) {
            return true;
        }

        let queens = of_type(PieceType::Queen);
        let rooks = of_type(PieceType::Rook) | queens;

        if rooks.is_occupied() && rook_attacks(sq, occupancy).intersects(rooks) {
            return true;
        }

        let bishops = of_type(PieceType::Bishop) | queens;

        bishops.is_occupied() && bishop_attacks(sq, occupancy).intersects(bishops)
    }

    /// Squares of the pieces of `colour` attacking `sq`
    pub fn attacking_pieces(&self, colour: Colour, sq: Square) -> Bitboard {
        let attackers = self.colour_occupancy(colour);

        if (super_attacks(sq) & attackers).is_empty() {
            return Bitboard::EMPTY;
        }

        let occupancy = self.occupancy;

        (figure_attacks(PieceType::King, sq) & self.pieces_mask(colour, PieceType::King))
            | (figure_attacks(PieceType::Knight, sq) & self.pieces_mask(colour, PieceType::Knight))
            | (pawn_attacks(!colour, sq) & self.pieces_mask(colour, PieceType::Pawn))
            | (rook_attacks(sq, occupancy) & self.rook_queen_mask(colour))
            | (bishop_attacks(sq, occupancy) & self.bishop_queen_mask(colour))
    }

    #[inline]
    pub fn count_of_attacks(&self, colour: Colour, sq: Square) -> u32 {
        self.attacking_pieces(colour, sq).count_bits()
    }

    /// Square of the least valuable piece of `colour` attacking `sq`
    pub fn cheapest_attacker(&self, colour: Colour, sq: Square) -> Option<Square> {
        let attackers = self.attacking_pieces(colour, sq);

        ATTACKER_ORDER
            .iter()
            .find_map(|&pt| (attackers & self.piece_type_mask(pt)).lsb())
    }

    /// Every square attacked by `colour`
    pub fn attacked_squares(&self, colour: Colour) -> Bitboard {
        self.attacked_squares_with(colour, self.occupancy)
    }

    /// Attacked squares with sliders looking through `occupancy`
    pub(crate) fn attacked_squares_with(&self, colour: Colour, occupancy: Bitboard) -> Bitboard {
        let mut attacked = pawns_attacked_squares(colour, self.pieces_mask(colour, PieceType::Pawn));

        for pt in [PieceType::King, PieceType::Knight] {
            self.pieces_mask(colour, pt)
                .for_each(|sq| attacked |= figure_attacks(pt, sq));
        }

        self.pieces_mask(colour, PieceType::Queen)
            .for_each(|sq| attacked |= queen_attacks(sq, occupancy));
        self.pieces_mask(colour, PieceType::Rook)
            .for_each(|sq| attacked |= rook_attacks(sq, occupancy));
        self.pieces_mask(colour, PieceType::Bishop)
            .for_each(|sq| attacked |= bishop_attacks(sq, occupancy));

        attacked
    }
}

/******************************************\
|==========================================|
|                 Legality                 |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// True when the king of the side that just moved stands attacked
    #[inline]
    pub fn is_king_not_on_turn_attacked(&self) -> bool {
        let not_on_turn = !self.on_turn;
        self.is_square_attacked(self.on_turn, self.king_square(not_on_turn))
    }

    /// Plays a pseudo-legal move and tells whether it leaves the own king safe.
    /// The position is unchanged on return.
    pub fn is_legal_move(&mut self, mv: &Move) -> bool {
        self.make_move(mv);
        let legal = !self.is_king_not_on_turn_attacked();
        self.undo_move(mv);

        legal
    }

    /// Castling of the side to move is allowed by the rights, the squares
    /// between king and rook are empty and the king does not cross an
    /// attacked square.
    ///
    /// Check on the begin square and attack on the target square are left to
    /// the caller and the legality test.
    pub fn is_castling_possible(&self, castling_type: CastlingType) -> bool {
        let us = self.on_turn;

        if !self.castling_rights.is_right(us, castling_type) {
            return false;
        }

        let geometry = castling_geometry(us, castling_type);

        !geometry.middle_squares.intersects(self.occupancy)
            && !self.is_square_attacked(!us, geometry.king_middle)
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
    fn test_is_square_attacked() {
        let position = Position::initial();

        assert!(position.is_square_attacked(Colour::White, Square::F3));
        assert!(position.is_square_attacked(Colour::White, Square::D2));
        assert!(!position.is_square_attacked(Colour::White, Square::E4));
        assert!(position.is_square_attacked(Colour::Black, Square::A6));
        assert!(!position.is_square_attacked(Colour::Black, Square::A1));
    }

    #[test]
    fn test_attacking_pieces() {
        let position = Position::from_fen("4k3/8/8/3n4/8/2P1R3/8/1B2K3 w - - 0 1").unwrap();

        assert_eq!(position.attacking_pieces(Colour::White, Square::D4), Square::C3.bb());
        assert_eq!(position.cheapest_attacker(Colour::White, Square::D4), Some(Square::C3));

        // Bishop on b1 and rook on e3 both reach e4
        let attackers = position.attacking_pieces(Colour::White, Square::E4);
        assert_eq!(attackers, Bitboard::from([Square::B1, Square::E3]));
        assert_eq!(position.count_of_attacks(Colour::White, Square::E4), 2);
        assert_eq!(position.cheapest_attacker(Colour::White, Square::E4), Some(Square::B1));
        assert_eq!(position.cheapest_attacker(Colour::White, Square::H8), None);
        assert_eq!(position.cheapest_attacker(Colour::Black, Square::E3), Some(Square::D5));
    }

    #[test]
    fn test_attacked_squares() {
        let position = Position::initial();
        let attacked = position.attacked_squares(Colour::White);

        assert_eq!(attacked & Bitboard::from([Square::E4, Square::D5]), Bitboard::EMPTY);
        assert!(attacked.contains(Square::A3));
        assert!(attacked.contains(Square::H3));
        assert_eq!(attacked.count_bits(), 22);
    }

    #[test]
    fn test_castling_possible() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert!(position.is_castling_possible(CastlingType::Short));
        assert!(position.is_castling_possible(CastlingType::Long));

        // Rook on f8 covers f1, the knight on b1 blocks the long castling
        let position = Position::from_fen("r3kr2/8/8/8/8/8/8/RN2K2R w KQq - 0 1").unwrap();
        assert!(!position.is_castling_possible(CastlingType::Short));
        assert!(!position.is_castling_possible(CastlingType::Long));
    }
}
