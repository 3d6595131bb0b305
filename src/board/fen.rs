use super::mask::ep_target_square;
use super::{Position, PositionCaching};
use crate::core::*;

/******************************************\
|==========================================|
|            Useful fen strings            |
|==========================================|
\******************************************/

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/******************************************\
|==========================================|
|               Parse Fen                  |
|==========================================|
\******************************************/

/// Placement, side to move, castling and en passant are required; the move
/// counters are accepted and ignored.
const MIN_FIELDS: usize = 4;
const MAX_FIELDS: usize = 6;

impl Position {
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        fen.parse()
    }
}

impl<C: PositionCaching> std::str::FromStr for Position<C> {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<Self, Self::Err> {
        let mut position = Self::default();
        position.set_fen(fen)?;
        Ok(position)
    }
}

impl<C: PositionCaching> Position<C> {
    /// Replaces the position by the one described by `fen`.
    ///
    /// An en passant square whose capture is impossible is dropped, so the
    /// en passant file stays meaningful for hashing.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.clear();

        let fields: Vec<&str> = fen.split_whitespace().collect();

        if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
            return Err(FenError::InvalidNumberOfFields(fields.len()));
        }

        self.parse_piece_placement(fields[0])?;

        self.on_turn = match fields[1] {
            "w" => Colour::White,
            "b" => Colour::Black,
            side => return Err(FenError::InvalidSideToMove(side.to_string())),
        };

        self.castling_rights = fields[2].parse()?;

        self.refresh_cached_data();
        self.ep_file = self.parse_en_passant(fields[3])?;
        self.refresh_cached_data();

        Ok(())
    }

    fn parse_piece_placement(&mut self, placement: &str) -> Result<(), FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();

        if ranks.len() != Rank::NUM {
            return Err(FenError::InvalidRankFormat(format!(
                "expected {} ranks, found {}",
                Rank::NUM,
                ranks.len()
            )));
        }

        for (rank, row) in Rank::iter().rev().zip(ranks) {
            let mut file = 0usize;

            for c in row.chars() {
                match c {
                    '1'..='8' => file += c as usize - '0' as usize,
                    _ => {
                        let piece = Piece::try_from(c)?;
                        let Some(file_enum) = File::try_from_index(file) else {
                            return Err(FenError::InvalidRankFormat(format!(
                                "rank {rank} has more than 8 squares"
                            )));
                        };

                        self.set_square_content(Square::from_parts(file_enum, rank), Some(piece));
                        file += 1;
                    }
                }

                if file > File::NUM {
                    return Err(FenError::InvalidRankFormat(format!(
                        "rank {rank} has more than 8 squares"
                    )));
                }
            }

            if file != File::NUM {
                return Err(FenError::InvalidRankFormat(format!(
                    "rank {rank} has {file} squares, expected 8"
                )));
            }
        }

        Ok(())
    }

    fn parse_en_passant(&self, field: &str) -> Result<Option<File>, FenError> {
        if field == "-" {
            return Ok(None);
        }

        let sq: Square = field.parse()?;
        let file = sq.file();

        if sq != ep_target_square(!self.on_turn, file) {
            return Err(FenError::WrongEnPassantRank(sq));
        }

        let has_king = self.pieces_mask(self.on_turn, PieceType::King).is_occupied();

        if has_king && self.is_en_passant_possible_on(file) {
            Ok(Some(file))
        } else {
            log::debug!("dropping en passant square {sq}, no capture is possible");
            Ok(None)
        }
    }
}

/******************************************\
|==========================================|
|               Write Fen                  |
|==========================================|
\******************************************/

impl<C: PositionCaching> Position<C> {
    /// Setup string of the position with zeroed move counters
    pub fn fen(&self) -> String {
        let mut fen = String::new();

        for rank in Rank::iter().rev() {
            let mut empty = 0;

            for file in File::iter() {
                match self.piece_on(Square::from_parts(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push_str(&piece.to_string());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank != Rank::Rank1 {
                fen.push('/');
            }
        }

        let ep = match self.ep_file {
            Some(file) => ep_target_square(!self.on_turn, file).to_string(),
            None => "-".to_string(),
        };

        format!("{fen} {} {} {ep} 0 1", self.on_turn, self.castling_rights)
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
