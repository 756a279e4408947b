use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::sync::OnceLock;

use crate::board::cozy::Position;
use crate::board::{Coord, MoveRecord, Piece, PieceKind, Side};

const SEED: u64 = 0;

/// 2 x 6 x 64 piece-square keys plus the side-to-move key.
pub struct ZobristKeys {
    pieces: [[[u64; 64]; 6]; 2],
    side: u64,
}

impl ZobristKeys {
    fn generate(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in pieces.iter_mut() {
            for kind in color.iter_mut() {
                for key in kind.iter_mut() {
                    *key = rng.gen();
                }
            }
        }
        let side = rng.gen();
        Self { pieces, side }
    }

    pub fn piece(&self, piece: Piece, at: Coord) -> u64 {
        self.pieces[piece.side.index()][piece.kind.index()][at.index()]
    }

    pub fn side(&self) -> u64 { self.side }
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

pub fn keys() -> &'static ZobristKeys { KEYS.get_or_init(|| ZobristKeys::generate(SEED)) }

/// Full hash of the placement and side to move. Castling rights and
/// en-passant availability are not part of it.
pub fn compute(board: &Position) -> u64 {
    let keys = keys();
    let mut key = 0u64;
    for at in Coord::all() {
        if let Some(p) = board.piece_at(at) {
            key ^= keys.piece(p, at);
        }
    }
    if board.side_to_move() == Side::White { key ^= keys.side(); }
    key
}

pub fn toggle_piece(hash: u64, piece: Piece, at: Coord) -> u64 { hash ^ keys().piece(piece, at) }

pub fn toggle_side(hash: u64) -> u64 { hash ^ keys().side() }

/// Hash after `rec` was played on a position hashing to `hash`.
pub fn update_for_move(hash: u64, rec: &MoveRecord) -> u64 {
    let mut h = toggle_side(hash);
    let mover = rec.piece;
    h = toggle_piece(h, mover, rec.mv.from);
    h = toggle_piece(h, Piece::new(rec.landed_kind(), mover.side), rec.mv.to);
    if let Some((captured, at)) = rec.captured {
        h = toggle_piece(h, captured, at);
    }
    if let Some((rook_from, rook_to)) = rec.rook_shift {
        let rook = Piece::new(PieceKind::Rook, mover.side);
        h = toggle_piece(h, rook, rook_from);
        h = toggle_piece(h, rook, rook_to);
    }
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;
    use std::collections::HashSet;

    #[test]
    fn keys_are_distinct() {
        let k = keys();
        let mut seen = HashSet::new();
        for side in [Side::White, Side::Black] {
            for kind in PieceKind::ALL {
                for at in Coord::all() {
                    assert!(seen.insert(k.piece(Piece::new(kind, side), at)), "duplicate zobrist key");
                }
            }
        }
        assert!(seen.insert(k.side()), "side key collides with a piece key");
    }

    #[test]
    fn keys_are_reproducible() {
        let again = ZobristKeys::generate(SEED);
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        assert_eq!(again.piece(pawn, Coord::new(4, 1)), keys().piece(pawn, Coord::new(4, 1)));
        assert_eq!(again.side(), keys().side());
    }

    #[test]
    fn side_key_separates_colors_to_move() {
        let w = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(compute(&w), toggle_side(compute(&b)));
    }

    #[test]
    fn en_passant_update_clears_captured_square() {
        let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let h = compute(&pos);
        let rec = pos.apply(Move::parse("e5d6").unwrap()).unwrap();
        assert_eq!(rec.captured.map(|(_, at)| at), Some(Coord::new(3, 4)));
        assert_eq!(update_for_move(h, &rec), compute(&pos));
    }
}
