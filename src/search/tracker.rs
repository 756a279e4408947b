//! Piece-location mirror of the board, carried by value through the search.
//!
//! The list is what the move generator iterates instead of scanning all 64
//! squares, and it holds the king/rook "has moved" flags that decide castling
//! eligibility. Every branch works on its own copy: the parent clones, applies
//! the move to the clone and hands it down, so siblings never observe each
//! other's updates.

use arrayvec::ArrayVec;
use log::debug;

use crate::board::cozy::{castle_rook_shift, Position};
use crate::board::{Coord, Move, Piece, PieceKind, Side};

pub const MAX_PIECES: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PieceLocation {
    pub kind: PieceKind,
    pub side: Side,
    pub at: Coord,
    pub king_has_moved: bool,
    pub rook_has_moved: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceTracker {
    pieces: ArrayVec<PieceLocation, MAX_PIECES>,
}

impl PieceTracker {
    /// Scan `board` once. Kings and rooks that the board's castling rights
    /// already rule out start flagged as moved.
    pub fn from_position(board: &Position) -> Self {
        let mut pieces = ArrayVec::new();
        for at in Coord::all() {
            let Some(p) = board.piece_at(at) else { continue };
            let (short, long) = board.castling_rights(p.side);
            let home = at.y == p.side.home_rank();
            let king_has_moved = p.kind == PieceKind::King && !(home && at.x == 4 && (short || long));
            let rook_has_moved = p.kind == PieceKind::Rook
                && !(home && ((at.x == 7 && short) || (at.x == 0 && long)));
            pieces.push(PieceLocation { kind: p.kind, side: p.side, at, king_has_moved, rook_has_moved });
        }
        Self { pieces }
    }

    pub fn len(&self) -> usize { self.pieces.len() }

    pub fn is_empty(&self) -> bool { self.pieces.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &PieceLocation> { self.pieces.iter() }

    pub fn at(&self, at: Coord) -> Option<&PieceLocation> { self.pieces.iter().find(|pl| pl.at == at) }

    pub fn at_mut(&mut self, at: Coord) -> Option<&mut PieceLocation> { self.pieces.iter_mut().find(|pl| pl.at == at) }

    /// Every board piece is tracked on its square with its kind and side, and nothing else is.
    pub fn matches(&self, board: &Position) -> bool {
        let occupied = Coord::all().filter(|&c| !board.is_empty(c)).count();
        occupied == self.len() && self.iter().all(|pl| board.piece_at(pl.at) == Some(Piece::new(pl.kind, pl.side)))
    }

    fn index_of(&self, at: Coord) -> Option<usize> { self.pieces.iter().position(|pl| pl.at == at) }

    /// Update for `mv`, read against `board` *before* the move is played.
    /// Moves from an untracked or empty square leave the list untouched.
    pub fn apply_move(&mut self, board: &Position, mv: Move) {
        let Some(mut idx) = self.index_of(mv.from) else {
            debug!("tracker: no piece tracked on {}, ignoring {}", mv.from, mv);
            return;
        };
        let Some(on_board) = board.piece_at(mv.from) else {
            debug!("tracker: board empty on {}, ignoring {}", mv.from, mv);
            return;
        };

        if let Some((_, cap_at)) = board.capture_of(mv) {
            if let Some(ci) = self.index_of(cap_at) {
                self.pieces.remove(ci);
                if ci < idx { idx -= 1; }
            }
        }

        let mut moving = self.pieces.remove(idx);
        moving.at = mv.to;
        match on_board.kind {
            PieceKind::King => moving.king_has_moved = true,
            PieceKind::Rook => moving.rook_has_moved = true,
            _ => {}
        }
        if let Some(kind) = mv.promotion {
            moving.kind = kind;
            moving.rook_has_moved = true;
        }

        if let Some((rook_from, rook_to)) = castle_rook_shift(mv, on_board) {
            if let Some(rook) = self.at_mut(rook_from) {
                rook.at = rook_to;
                rook.rook_has_moved = true;
            }
        }

        self.pieces.push(moving);
    }

    /// Copy of `self` with `mv` applied.
    pub fn after(&self, board: &Position, mv: Move) -> Self {
        let mut next = self.clone();
        next.apply_move(board, mv);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_mirrors(tracker: &PieceTracker, board: &Position) {
        let mut on_board = 0;
        for at in Coord::all() {
            if let Some(p) = board.piece_at(at) {
                on_board += 1;
                let pl = tracker.at(at).unwrap_or_else(|| panic!("{at} not tracked"));
                assert_eq!(Piece::new(pl.kind, pl.side), p, "kind mismatch on {at}");
            }
        }
        assert_eq!(tracker.len(), on_board);
    }

    #[test]
    fn startpos_has_thirty_two_unmoved_pieces() {
        let pos = Position::startpos();
        let t = PieceTracker::from_position(&pos);
        assert_eq!(t.len(), 32);
        assert!(t.iter().all(|pl| !pl.king_has_moved && !pl.rook_has_moved));
        assert_mirrors(&t, &pos);
    }

    #[test]
    fn missing_rights_mark_pieces_moved() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").unwrap();
        let t = PieceTracker::from_position(&pos);
        assert!(!t.at(Coord::new(7, 0)).unwrap().rook_has_moved);
        assert!(t.at(Coord::new(0, 0)).unwrap().rook_has_moved);
        assert!(!t.at(Coord::new(0, 7)).unwrap().rook_has_moved);
        assert!(t.at(Coord::new(7, 7)).unwrap().rook_has_moved);
        assert!(!t.at(Coord::new(4, 0)).unwrap().king_has_moved);
    }

    #[test]
    fn castle_moves_rook_and_sets_flags() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1").unwrap();
        let mut t = PieceTracker::from_position(&pos);
        let mv = Move::new(Coord::new(4, 7), Coord::new(2, 7));
        t.apply_move(&pos, mv);
        pos.apply(mv).unwrap();
        let king = t.at(Coord::new(2, 7)).unwrap();
        assert!(king.king_has_moved);
        let rook = t.at(Coord::new(3, 7)).unwrap();
        assert!(rook.rook_has_moved);
        assert!(t.at(Coord::new(0, 7)).is_none());
        assert_mirrors(&t, &pos);
    }

    #[test]
    fn matches_only_its_own_board() {
        let start = Position::startpos();
        let t = PieceTracker::from_position(&start);
        assert!(t.matches(&start));
        let mut moved = start.clone();
        moved.apply(Move::parse("e2e4").unwrap()).unwrap();
        assert!(!t.matches(&moved));
        assert!(t.after(&start, Move::parse("e2e4").unwrap()).matches(&moved));
    }

    #[test]
    fn untracked_origin_is_a_no_op() {
        let pos = Position::startpos();
        let t = PieceTracker::from_position(&pos);
        let mut u = t.clone();
        u.apply_move(&pos, Move::parse("e4e5").unwrap());
        assert_eq!(t, u);
    }

    #[test]
    fn parent_copy_is_unaffected() {
        let pos = Position::startpos();
        let parent = PieceTracker::from_position(&pos);
        let child = parent.after(&pos, Move::parse("g1f3").unwrap());
        assert!(parent.at(Coord::new(6, 0)).is_some());
        assert!(child.at(Coord::new(6, 0)).is_none());
        assert!(child.at(Coord::new(5, 2)).is_some());
    }
}
