use super::{Position, PositionCaching};
use crate::core::*;

impl<C: PositionCaching> Position<C> {
    /// Recomputes everything the position caches and compares it with the
    /// stored state.
    ///
    /// Debug builds run this after every make and undo; an error always means
    /// a bug in the board code.
    pub fn check_integrity(&self) -> Result<(), IntegrityError> {
        let mut all_pieces = Bitboard::EMPTY;

        for pt in PieceType::iter() {
            let mask = self.pieces[pt.index()];

            if let Some(sq) = (all_pieces & mask).lsb() {
                return Err(IntegrityError::PieceTypeOverlap(sq));
            }
            all_pieces |= mask;
        }

        let white = self.colour_occupancy[Colour::White.index()];
        let black = self.colour_occupancy[Colour::Black.index()];

        if let Some(sq) = (white & black).lsb() {
            return Err(IntegrityError::ColourOverlap(sq));
        }

        for colour in Colour::iter() {
            if (self.colour_occupancy[colour.index()] & !all_pieces).is_occupied() {
                return Err(IntegrityError::ColourOccupancy(colour));
            }
        }

        if self.occupancy != (white | black) || all_pieces != self.occupancy {
            return Err(IntegrityError::Occupancy);
        }

        for sq in Square::iter() {
            let expected = PieceType::iter().find(|pt| self.pieces[pt.index()].contains(sq));

            if self.piece_types[sq.index()] != expected {
                return Err(IntegrityError::PieceLookup(sq));
            }
        }

        if let Some(cached) = self.caching.hash() {
            let calculated = self.calculate_hash();

            if cached != calculated {
                return Err(IntegrityError::Hash { cached, calculated });
            }
        }

        if let Some(cached) = self.caching.material_hash() {
            let calculated = self.calculate_material_hash();

            if cached != calculated {
                return Err(IntegrityError::MaterialHash {
                    cached: cached.0,
                    calculated: calculated.0,
                });
            }
        }

        if self.ep_file.is_some() && !self.is_en_passant_possible() {
            return Err(IntegrityError::EnPassant);
        }

        Ok(())
    }
}
