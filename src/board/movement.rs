use super::mask::*;
use super::movegen::{between, figure_attacks, pawn_attacks, pawn_moves};
use super::{Position, PositionCaching};
use crate::core::*;

/******************************************\
|==========================================|
|              Piece Placement             |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Puts a piece on an empty square and reports it to the caching
    #[inline]
    fn add_piece(&mut self, colour: Colour, pt: PieceType, sq: Square) {
        debug_assert!(!self.occupancy.contains(sq), "add_piece: {sq} is occupied");
        let bb = sq.bb();

        self.piece_types[sq.index()] = Some(pt);
        self.pieces[pt.index()] |= bb;
        self.colour_occupancy[colour.index()] |= bb;
        self.occupancy |= bb;

        self.caching.add_piece(colour, pt, sq);
    }

    /// Takes a piece off its square and reports it to the caching
    #[inline]
    fn remove_piece(&mut self, colour: Colour, pt: PieceType, sq: Square) {
        debug_assert_eq!(self.piece_types[sq.index()], Some(pt), "remove_piece: {sq}");
        let bb = !sq.bb();

        self.piece_types[sq.index()] = None;
        self.pieces[pt.index()] &= bb;
        self.colour_occupancy[colour.index()] &= bb;
        self.occupancy &= bb;

        self.caching.remove_piece(colour, pt, sq);
    }

    /// Moves a piece to an empty square and reports it to the caching
    #[inline]
    fn move_piece(&mut self, colour: Colour, pt: PieceType, begin: Square, target: Square) {
        self.toggle_piece(colour, pt, begin.bb() | target.bb());

        self.piece_types[begin.index()] = None;
        self.piece_types[target.index()] = Some(pt);

        self.caching.move_piece(colour, pt, begin, target);
    }

    #[inline]
    fn toggle_piece(&mut self, colour: Colour, pt: PieceType, changes: Bitboard) {
        self.pieces[pt.index()] ^= changes;
        self.colour_occupancy[colour.index()] ^= changes;
        self.occupancy ^= changes;
    }

    /// Toggles king and rook of a castling; its own inverse
    fn toggle_castling(&mut self, colour: Colour, castling_type: CastlingType) {
        let geometry = castling_geometry(colour, castling_type);

        self.toggle_piece(colour, PieceType::King, geometry.king_changes());
        self.toggle_piece(colour, PieceType::Rook, geometry.rook_changes());

        for (pt, begin, target) in [
            (PieceType::King, geometry.king_begin, geometry.king_target),
            (PieceType::Rook, geometry.rook_begin, geometry.rook_target()),
        ] {
            let (from, to) = if self.piece_types[begin.index()] == Some(pt) {
                (begin, target)
            } else {
                (target, begin)
            };

            self.piece_types[from.index()] = None;
            self.piece_types[to.index()] = Some(pt);
            self.caching.move_piece(colour, pt, from, to);
        }
    }

    #[inline]
    fn swap_on_turn(&mut self) {
        self.on_turn = !self.on_turn;
        self.caching.swap_on_turn();
    }

    #[inline]
    fn change_ep_file(&mut self, file: Option<File>) {
        self.caching.change_ep_file(self.ep_file, file);
        self.ep_file = file;
    }

    #[inline]
    fn change_castling_rights(&mut self, rights: CastlingRights) {
        self.caching.change_castling_rights(self.castling_rights, rights);
        self.castling_rights = rights;
    }
}

/******************************************\
|==========================================|
|                Make Move                 |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Applies a finished move produced for this exact position.
    ///
    /// Moves must be undone in LIFO order with [`undo_move`](Self::undo_move).
    pub fn make_move(&mut self, mv: &Move) {
        match mv.move_type() {
            MoveType::Normal => self.make_normal_move(mv),
            MoveType::Promotion => self.make_promotion_move(mv),
            MoveType::Castling => self.make_castling_move(mv),
            MoveType::EnPassant => self.make_en_passant_move(mv),
            MoveType::Null => self.make_null_move(),
            MoveType::Invalid => invalid_move(mv),
        }

        #[cfg(debug_assertions)]
        self.debug_check_integrity("make_move", mv);
    }

    fn make_normal_move(&mut self, mv: &Move) {
        let us = self.on_turn;
        let begin = mv.begin();
        let target = mv.target();
        let moving = moving_piece_type(mv);

        if let Some(captured) = mv.captured_piece_type() {
            self.remove_piece(!us, captured, target);
        }
        self.move_piece(us, moving, begin, target);

        let changes = begin.bb() | target.bb();
        if changes.intersects(CastlingRights::AFFECTED_SQUARES) {
            let mut rights = self.castling_rights;
            rights.update_after_square_change(begin);
            rights.update_after_square_change(target);
            self.change_castling_rights(rights);
        }

        self.swap_on_turn();

        let double_step = moving == PieceType::Pawn
            && begin.rank() == us.pawn_rank()
            && target.rank() == ep_rank(us);

        let ep_file = match double_step {
            true => Some(target.file()).filter(|&file| self.is_en_passant_possible_on(file)),
            false => None,
        };
        self.change_ep_file(ep_file);
    }

    fn make_promotion_move(&mut self, mv: &Move) {
        let us = self.on_turn;
        let begin = mv.begin();
        let target = mv.target();
        let promotion = promotion_piece_type(mv);

        if let Some(captured) = mv.captured_piece_type() {
            self.remove_piece(!us, captured, target);
        }
        self.remove_piece(us, PieceType::Pawn, begin);
        self.add_piece(us, promotion, target);

        let mut rights = self.castling_rights;
        rights.update_after_square_change(target);
        self.change_castling_rights(rights);

        self.change_ep_file(None);
        self.swap_on_turn();
    }

    fn make_castling_move(&mut self, mv: &Move) {
        let us = self.on_turn;

        self.toggle_castling(us, castling_type_of(mv.begin(), mv.target()));

        let mut rights = self.castling_rights;
        rights.drop_rights_for_colour(us);
        self.change_castling_rights(rights);

        self.change_ep_file(None);
        self.swap_on_turn();
    }

    fn make_en_passant_move(&mut self, mv: &Move) {
        let us = self.on_turn;
        let begin = mv.begin();
        let target = mv.target();

        self.remove_piece(!us, PieceType::Pawn, Square::from_parts(target.file(), begin.rank()));
        self.move_piece(us, PieceType::Pawn, begin, target);

        self.change_ep_file(None);
        self.swap_on_turn();
    }

    fn make_null_move(&mut self) {
        self.change_ep_file(None);
        self.swap_on_turn();
    }
}

/******************************************\
|==========================================|
|                Undo Move                 |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Reverts the move most recently made on this position
    pub fn undo_move(&mut self, mv: &Move) {
        self.swap_on_turn();
        self.change_ep_file(mv.prev_ep_file());
        self.change_castling_rights(mv.prev_castling_rights());

        let us = self.on_turn;
        let begin = mv.begin();
        let target = mv.target();

        match mv.move_type() {
            MoveType::Normal => {
                self.move_piece(us, moving_piece_type(mv), target, begin);

                if let Some(captured) = mv.captured_piece_type() {
                    self.add_piece(!us, captured, target);
                }
            }
            MoveType::Promotion => {
                self.remove_piece(us, promotion_piece_type(mv), target);

                if let Some(captured) = mv.captured_piece_type() {
                    self.add_piece(!us, captured, target);
                }
                self.add_piece(us, PieceType::Pawn, begin);
            }
            MoveType::Castling => self.toggle_castling(us, castling_type_of(begin, target)),
            MoveType::EnPassant => {
                self.move_piece(us, PieceType::Pawn, target, begin);
                self.add_piece(!us, PieceType::Pawn, Square::from_parts(target.file(), begin.rank()));
            }
            MoveType::Null => {}
            MoveType::Invalid => invalid_move(mv),
        }

        #[cfg(debug_assertions)]
        self.debug_check_integrity("undo_move", mv);
    }

    #[cfg(debug_assertions)]
    fn debug_check_integrity(&self, operation: &str, mv: &Move) {
        if let Err(err) = self.check_integrity() {
            log::error!("{operation} {mv} broke the position: {err}");
            panic!("{operation} {mv} broke the position: {err}");
        }
    }
}

#[cold]
fn invalid_move(mv: &Move) -> ! {
    panic!("move {mv:?} was never finished")
}

#[inline]
fn moving_piece_type(mv: &Move) -> PieceType {
    match mv.moving_piece_type() {
        Some(pt) => pt,
        None => invalid_move(mv),
    }
}

#[inline]
fn promotion_piece_type(mv: &Move) -> PieceType {
    match mv.promotion_piece_type() {
        Some(pt) => pt,
        None => invalid_move(mv),
    }
}

/******************************************\
|==========================================|
|                En Passant                |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// True when the side to move can capture en passant on the current
    /// en passant file without leaving its king attacked
    #[inline]
    pub fn is_en_passant_possible(&self) -> bool {
        self.ep_file.is_some_and(|file| self.is_en_passant_possible_on(file))
    }

    /// Plays every en passant capture on `file` on a scratch occupancy and
    /// looks for one that keeps the own king safe
    pub(crate) fn is_en_passant_possible_on(&self, file: File) -> bool {
        let us = self.on_turn;
        let them = !us;

        let ep_sq = ep_square(them, file);
        let target = ep_target_square(them, file);

        if !self.pieces_mask(them, PieceType::Pawn).contains(ep_sq) {
            return false;
        }

        let capturers = connected_pawn_squares(ep_sq) & self.pieces_mask(us, PieceType::Pawn);
        let king_sq = self.king_square(us);
        let their_pieces = self.colour_occupancy(them) & !ep_sq.bb();

        capturers.into_iter().any(|begin| {
            let occupancy = (self.occupancy ^ begin.bb() ^ ep_sq.bb()) | target.bb();
            !self.is_square_attacked_with(them, king_sq, occupancy, their_pieces)
        })
    }
}

/******************************************\
|==========================================|
|             Move Uncompress              |
|==========================================|
\******************************************/

impl Move {
    /// Rebuilds a full move from its compressed bits.
    ///
    /// Returns `None` when the bits do not describe a pseudo-legal move shape
    /// in `position`: foreign or missing moving piece, own piece on the target,
    /// blocked path, or a promotion piece type on the wrong rank.
    pub fn uncompress<C: PositionCaching>(compressed: u32, position: &Position<C>) -> Option<Move> {
        let (begin, target, promotion_code) = Move::split_compressed(compressed);
        let us = position.on_turn();
        let own = position.colour_occupancy(us);

        if !own.contains(begin) || own.contains(target) {
            return None;
        }

        let moving = position.piece_type_on(begin)?;
        let captured = position.piece_type_on(target);

        let promotion = match Move::is_promotion_square(moving, target) {
            true => match PieceType::decode(promotion_code) {
                Some(pt) if pt.is_promotion_figure() => Some(pt),
                _ => return None,
            },
            false if promotion_code == PieceType::NONE_CODE => None,
            false => return None,
        };

        let mut mv = Move::initialize(position.castling_rights(), position.ep_file());
        mv.set_moving_piece_type(moving);
        mv.set_begin(begin);

        if moving == PieceType::King && begin == king_initial_square(us) {
            for castling_type in [CastlingType::Short, CastlingType::Long] {
                let geometry = castling_geometry(us, castling_type);

                if target == geometry.king_target
                    && position.castling_rights().is_right(us, castling_type)
                    && !position.is_check()
                    && position.is_castling_possible(castling_type)
                {
                    mv.finish_castling(target);
                    return Some(mv);
                }
            }
        }

        if let Some(file) = position.ep_file() {
            if moving == PieceType::Pawn
                && target == ep_target_square(!us, file)
                && begin.rank() == ep_rank(!us)
                && pawn_attacks(us, begin).contains(target)
            {
                mv.finish_en_passant(target);
                return Some(mv);
            }
        }

        let allowed = match (moving, captured) {
            (PieceType::Pawn, Some(_)) => pawn_attacks(us, begin),
            (PieceType::Pawn, None) => pawn_moves(us, begin),
            _ => figure_attacks(moving, begin),
        };

        if !allowed.contains(target) {
            return None;
        }

        if !moving.is_short_moving_figure() && between(begin, target).intersects(position.occupancy()) {
            return None;
        }

        match promotion {
            Some(pt) => mv.finish_promotion(target, captured, pt),
            None => mv.finish_normal(target, captured),
        }

        Some(mv)
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

    fn normal(position: &Position, begin: Square, target: Square) -> Move {
        let mut mv = Move::initialize(position.castling_rights(), position.ep_file());
        mv.set_moving_piece_type(position.piece_type_on(begin).unwrap());
        mv.set_begin(begin);
        mv.finish_normal(target, position.piece_type_on(target));
        mv
    }

    fn assert_round_trip(fen: &str, mv: &Move) {
        let mut position = Position::from_fen(fen).unwrap();
        let before = position.clone();

        position.make_move(mv);
        assert!(position.check_integrity().is_ok());
        assert_ne!(position, before);

        position.undo_move(mv);
        assert_eq!(position, before);
        assert_eq!(position.hash(), before.hash());
        assert_eq!(position.material_hash(), before.material_hash());
    }

    #[test]
    fn test_double_step_sets_ep_only_when_capturable() {
        let mut position = Position::initial();
        let e2e4 = normal(&position, Square::E2, Square::E4);
        position.make_move(&e2e4);
        assert_eq!(position.ep_file(), None);
        assert_eq!(position.on_turn(), Colour::Black);

        let position_fen = "4k3/8/8/8/3p4/8/4P3/4K3 w - - 0 1";
        let mut position = Position::from_fen(position_fen).unwrap();
        let e2e4 = normal(&position, Square::E2, Square::E4);
        position.make_move(&e2e4);
        assert_eq!(position.ep_file(), Some(File::FileE));
        assert_eq!(position.hash(), position.calculate_hash());
    }

    #[test]
    fn test_ep_refused_when_capture_exposes_king() {
        // Capturing would open the fourth rank between the rook and the king
        let mut position = Position::from_fen("8/8/8/8/k2p3R/8/4P3/4K3 w - - 0 1").unwrap();
        let e2e4 = normal(&position, Square::E2, Square::E4);
        position.make_move(&e2e4);
        assert_eq!(position.ep_file(), None);
    }

    #[test]
    fn test_normal_move_drops_castling_rights() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let a1a8 = normal(&position, Square::A1, Square::A8);

        position.make_move(&a1a8);
        assert_eq!(position.castling_rights(), CastlingRights::WK | CastlingRights::BK);
        assert_eq!(position.material_hash().piece_count(Colour::Black, PieceType::Rook), 1);

        position.undo_move(&a1a8);
        assert_eq!(position.castling_rights(), CastlingRights::FULL);
        assert_round_trip(fen, &a1a8);
    }

    #[test]
    fn test_castling_round_trip() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1";
        let mut position = Position::from_fen(fen).unwrap();

        let mut mv = Move::initialize(position.castling_rights(), None);
        mv.set_moving_piece_type(PieceType::King);
        mv.set_begin(Square::E8);
        mv.finish_castling(Square::C8);

        position.make_move(&mv);
        assert_eq!(position.piece_on(Square::C8), Some(Piece::BlackKing));
        assert_eq!(position.piece_on(Square::D8), Some(Piece::BlackRook));
        assert_eq!(position.piece_on(Square::A8), None);
        assert_eq!(position.castling_rights(), CastlingRights::WK | CastlingRights::WQ);

        assert_round_trip(fen, &mv);
    }

    #[test]
    fn test_promotion_and_en_passant_round_trip() {
        let fen = "1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1";
        let position = Position::from_fen(fen).unwrap();
        let mut mv = Move::initialize(position.castling_rights(), None);
        mv.set_moving_piece_type(PieceType::Pawn);
        mv.set_begin(Square::A7);
        mv.finish_promotion(Square::B8, Some(PieceType::Rook), PieceType::Queen);
        assert_round_trip(fen, &mv);

        let fen = "k7/8/8/3PpP2/8/8/8/K7 w - e6 0 1";
        let position = Position::from_fen(fen).unwrap();
        let mut mv = Move::initialize(position.castling_rights(), position.ep_file());
        mv.set_moving_piece_type(PieceType::Pawn);
        mv.set_begin(Square::D5);
        mv.finish_en_passant(Square::E6);
        assert_round_trip(fen, &mv);

        let mut position = position;
        position.make_move(&mv);
        assert_eq!(position.piece_on(Square::E5), None);
        assert_eq!(position.piece_on(Square::E6), Some(Piece::WhitePawn));
    }

    #[test]
    fn test_null_move_clears_ep() {
        let fen = "k7/8/8/3PpP2/8/8/8/K7 w - e6 0 1";
        let mut position = Position::from_fen(fen).unwrap();
        let null = Move::create_null(position.castling_rights(), position.ep_file());

        position.make_move(&null);
        assert_eq!(position.ep_file(), None);
        assert_eq!(position.on_turn(), Colour::Black);

        position.undo_move(&null);
        assert_eq!(position.ep_file(), Some(File::FileE));
    }

    #[test]
    fn test_null_caching_make_undo() {
        let mut position: Position<NullCaching> =
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
        let before = position.clone();

        let mut mv = Move::initialize(position.castling_rights(), None);
        mv.set_moving_piece_type(PieceType::Rook);
        mv.set_begin(Square::H1);
        mv.finish_normal(Square::H8, Some(PieceType::Rook));

        position.make_move(&mv);
        assert_eq!(position.castling_rights(), CastlingRights::WQ | CastlingRights::BQ);
        position.undo_move(&mv);
        assert_eq!(position, before);
    }

    #[test]
    fn test_uncompress() {
        let position = Position::initial();
        let e2e4 = normal(&position, Square::E2, Square::E4);
        assert_eq!(Move::uncompress(e2e4.compressed(), &position), Some(e2e4));

        let g1f3 = normal(&position, Square::G1, Square::F3);
        assert_eq!(Move::uncompress(g1f3.compressed(), &position), Some(g1f3));

        // Blocked bishop, foreign piece, knight onto own pawn
        let blocked = Square::F1 as u32 | (Square::C4 as u32) << 6 | 6 << 12;
        assert_eq!(Move::uncompress(blocked, &position), None);
        let foreign = Square::E7 as u32 | (Square::E5 as u32) << 6 | 6 << 12;
        assert_eq!(Move::uncompress(foreign, &position), None);
        let own_target = Square::B1 as u32 | (Square::D2 as u32) << 6 | 6 << 12;
        assert_eq!(Move::uncompress(own_target, &position), None);

        // Promotion code on a quiet move
        let bad_promotion = Square::E2 as u32 | (Square::E4 as u32) << 6 | (PieceType::Queen as u32) << 12;
        assert_eq!(Move::uncompress(bad_promotion, &position), None);
    }

    #[test]
    fn test_uncompress_special_moves() {
        let position = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castling = Move::uncompress(Square::E1 as u32 | (Square::G1 as u32) << 6 | 6 << 12, &position).unwrap();
        assert_eq!(castling.move_type(), MoveType::Castling);

        let position = Position::from_fen("k7/8/8/3PpP2/8/8/8/K7 w - e6 0 1").unwrap();
        let ep = Move::uncompress(Square::F5 as u32 | (Square::E6 as u32) << 6 | 6 << 12, &position).unwrap();
        assert_eq!(ep.move_type(), MoveType::EnPassant);
        assert_eq!(ep.captured_piece_type(), Some(PieceType::Pawn));

        let position = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let missing = Square::A7 as u32 | (Square::A8 as u32) << 6 | 6 << 12;
        assert_eq!(Move::uncompress(missing, &position), None);
        let knight = Square::A7 as u32 | (Square::A8 as u32) << 6 | (PieceType::Knight as u32) << 12;
        let promotion = Move::uncompress(knight, &position).unwrap();
        assert_eq!(promotion.promotion_piece_type(), Some(PieceType::Knight));
    }
}
