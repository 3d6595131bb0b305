//! Plausibility checks of a position set up by hand.
//!
//! The checks only look at the board itself; they do not try to prove that
//! the position is reachable from the initial one.

use super::mask::{castling_geometry, empty_ep_squares, ep_square};
use super::{Position, PositionCaching};
use crate::core::*;

/// Checks that a position could arise in a legal game.
///
/// Without exactly one king per side the king-dependent checks (check of the
/// side not on turn, castling rights, en passant capture) are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionValidator;

impl PositionValidator {
    /// First error found, in the order of [`errors`](Self::errors)
    pub fn validate<C: PositionCaching>(position: &Position<C>) -> Result<(), ValidationError> {
        match Self::errors(position).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every error of the position
    pub fn errors<C: PositionCaching>(position: &Position<C>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        let kings_ok = match Self::check_king_count(position) {
            Ok(()) => true,
            Err(err) => {
                errors.push(err);
                false
            }
        };

        if kings_ok {
            if position.is_king_not_on_turn_attacked() {
                errors.push(ValidationError::NotOnTurnCheck);
            }

            if !Self::castling_rights_match(position) {
                errors.push(ValidationError::CastlingRights);
            }
        }

        let pawns = position.piece_type_mask(PieceType::Pawn);
        if pawns.intersects(Bitboard::RANK_18) {
            errors.push(ValidationError::PawnsOnBackRank);
        }

        if !Self::ep_file_matches(position, kings_ok) {
            errors.push(ValidationError::WrongEpFile);
        }

        errors
    }

    fn check_king_count<C: PositionCaching>(position: &Position<C>) -> Result<(), ValidationError> {
        for colour in Colour::iter() {
            let count = position.piece_count(colour, PieceType::King);

            if count != 1 {
                return Err(ValidationError::KingCount { colour, count });
            }
        }

        Ok(())
    }

    /// Every right needs its king and rook on their initial squares
    fn castling_rights_match<C: PositionCaching>(position: &Position<C>) -> bool {
        let rights = position.castling_rights();

        Colour::iter().all(|colour| {
            [CastlingType::Short, CastlingType::Long].into_iter().all(|castling_type| {
                if !rights.is_right(colour, castling_type) {
                    return true;
                }

                let geometry = castling_geometry(colour, castling_type);

                position.pieces_mask(colour, PieceType::King).contains(geometry.king_begin)
                    && position.pieces_mask(colour, PieceType::Rook).contains(geometry.rook_begin)
            })
        })
    }

    fn ep_file_matches<C: PositionCaching>(position: &Position<C>, kings_ok: bool) -> bool {
        let Some(file) = position.ep_file() else {
            return true;
        };

        let colour = !position.on_turn();

        if !position.pieces_mask(colour, PieceType::Pawn).contains(ep_square(colour, file)) {
            return false;
        }

        if position.occupancy().intersects(empty_ep_squares(colour, file)) {
            return false;
        }

        kings_ok && position.is_en_passant_possible()
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
    use crate::board::KIWIPETE_FEN;

    fn errors(fen: &str) -> Vec<ValidationError> {
        PositionValidator::errors(&Position::from_fen(fen).unwrap())
    }

    #[test]
    fn test_valid_positions() {
        assert_eq!(PositionValidator::validate(&Position::initial()), Ok(()));
        assert!(errors(KIWIPETE_FEN).is_empty());
        assert!(errors("k7/8/8/3PpP2/8/8/8/K7 w - e6 0 1").is_empty());
    }

    #[test]
    fn test_king_count() {
        assert_eq!(
            errors("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            vec![ValidationError::KingCount { colour: Colour::Black, count: 0 }]
        );
        assert_eq!(
            errors("k7/8/8/8/8/8/8/KK6 w - - 0 1"),
            vec![ValidationError::KingCount { colour: Colour::White, count: 2 }]
        );
    }

    #[test]
    fn test_not_on_turn_check() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 0 1";
        assert!(errors(fen).is_empty());

        let fen = "4k3/8/8/8/8/8/8/R3K3 w - - 0 1";
        assert!(errors(fen).is_empty());

        assert_eq!(errors("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1"), vec![ValidationError::NotOnTurnCheck]);
    }

    #[test]
    fn test_castling_rights_and_pawns() {
        assert_eq!(errors("4k3/8/8/8/8/8/8/4K3 w K - 0 1"), vec![ValidationError::CastlingRights]);
        assert_eq!(errors("r3k3/8/8/8/8/8/8/4K3 w q - 0 1"), Vec::new());

        assert_eq!(
            errors("4k3/8/8/8/8/8/8/P3K3 w - - 0 1"),
            vec![ValidationError::PawnsOnBackRank]
        );
    }

    #[test]
    fn test_wrong_ep_file() {
        let mut position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        position.set_ep_file(Some(File::FileD));
        position.refresh_cached_data();

        assert_eq!(PositionValidator::validate(&position), Err(ValidationError::WrongEpFile));
    }
}
