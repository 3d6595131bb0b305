use std::mem::MaybeUninit;
use std::slice;

use super::MoveWalker;
use crate::core::Move;

/// Upper bound of the pseudo-legal moves of any position, with headroom
const MAX_MOVES: usize = 321;

/// Fixed capacity move buffer filled by the generators
pub struct MoveList {
    moves: [MaybeUninit<Move>; MAX_MOVES],
    num_moves: usize,
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl std::ops::IndexMut<usize> for MoveList {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub const CAPACITY: usize = MAX_MOVES;

    #[inline]
    pub fn new() -> MoveList {
        MoveList {
            moves: [MaybeUninit::uninit(); MAX_MOVES],
            num_moves: 0,
        }
    }

    /// Appends a move; panics when the list is full
    #[inline]
    pub fn push(&mut self, mv: Move) {
        assert!(self.num_moves < MAX_MOVES, "move list overflow");

        self.moves[self.num_moves].write(mv);
        self.num_moves += 1;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.num_moves = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.num_moves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_moves == 0
    }

    #[inline]
    pub fn swap(&mut self, index1: usize, index2: usize) {
        self.as_mut_slice().swap(index1, index2);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        // The first `num_moves` entries are initialised by `push`
        unsafe { slice::from_raw_parts(self.moves.as_ptr() as *const Move, self.num_moves) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        unsafe { slice::from_raw_parts_mut(self.moves.as_mut_ptr() as *mut Move, self.num_moves) }
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    #[inline]
    pub fn contains(&self, mv: &Move) -> bool {
        self.as_slice().contains(mv)
    }

    /// Sorts by begin square, target square and promotion piece
    pub fn sort_by_coordinates(&mut self) {
        self.as_mut_slice().sort_by(|a, b| a.cmp_coordinates(b));
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl MoveWalker for MoveList {
    #[inline]
    fn process_move(&mut self, mv: &Move) -> bool {
        self.push(*mv);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::*;

    fn quiet(begin: Square, target: Square) -> Move {
        let mut mv = Move::initialize(CastlingRights::NONE, None);
        mv.set_moving_piece_type(PieceType::Knight);
        mv.set_begin(begin);
        mv.finish_normal(target, None);
        mv
    }

    #[test]
    fn test_push_and_index() {
        let mut list = MoveList::new();
        assert!(list.is_empty());

        list.push(quiet(Square::G1, Square::F3));
        list.push(quiet(Square::B1, Square::C3));

        assert_eq!(list.len(), 2);
        assert_eq!(list[1].begin(), Square::B1);

        list.sort_by_coordinates();
        assert_eq!(list[0].begin(), Square::B1);
        assert!(list.contains(&quiet(Square::G1, Square::F3)));

        list.clear();
        assert_eq!(list.iter().count(), 0);
    }

    #[test]
    #[should_panic(expected = "move list overflow")]
    fn test_overflow_panics() {
        let mut list = MoveList::new();

        for _ in 0..=MoveList::CAPACITY {
            list.push(Move::EMPTY);
        }
    }

    #[test]
    #[should_panic]
    fn test_index_past_len_panics() {
        let list = MoveList::new();
        let _ = list[0];
    }
}
