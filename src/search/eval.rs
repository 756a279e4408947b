use crate::board::cozy::Position;
use crate::board::{Coord, Piece, PieceKind, Side};

const OPEN_SPACE_VAL: i32 = 2;
const CHECK_VAL: i32 = 30;

/// Mate score before the ply adjustment; beyond any reachable material sum.
pub const MATE_SCORE: i32 = 1_000_000;

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 10_000,
    }
}

/// Change to the captured-material tally when `piece` is taken:
/// positive for a black piece, negative for a white one.
pub fn captured_value(piece: Piece) -> i32 {
    let base = match piece.kind {
        PieceKind::King => 100_000,
        kind => piece_value(kind),
    };
    match piece.side {
        Side::White => -base,
        Side::Black => base,
    }
}

fn centrality(at: Coord) -> i32 {
    let dx = at.x.min(7 - at.x) as i32;
    let dy = at.y.min(7 - at.y) as i32;
    dx + dy
}

/// Placement bonus of `piece` on `at`, from the owner's point of view.
pub fn placement_bonus(board: &Position, piece: Piece, at: Coord) -> i32 {
    match piece.kind {
        PieceKind::Knight | PieceKind::Bishop => centrality(at) * 4,
        PieceKind::Pawn => {
            let advance = match piece.side {
                Side::White => at.y as i32,
                Side::Black => 7 - at.y as i32,
            };
            let x = at.x as i32;
            let from_center_file = (x - 3).abs().min((x - 4).abs());
            advance * 2 + (3 - from_center_file) * 2
        }
        PieceKind::Rook => (0..8u8).filter(|&y| y != at.y && board.is_empty(Coord::new(at.x, y))).count() as i32,
        PieceKind::Queen => centrality(at) * 2,
        PieceKind::King => 0,
    }
}

/// Material plus placement, white-positive.
pub fn material_and_placement(board: &Position) -> (i32, i32) {
    let mut material = 0;
    let mut psq = 0;
    for at in Coord::all() {
        let Some(p) = board.piece_at(at) else { continue };
        let sign = p.side.sign();
        material += sign * piece_value(p.kind);
        psq += sign * placement_bonus(board, p, at);
    }
    (material, psq)
}

/// Static score of a leaf, positive favouring white.
///
/// `move_count` is the number of moves available to the side to move; the
/// mobility term favours `maximizing` when it is the one to move and counts
/// against it otherwise. `captured_tally` is accepted for parity with the
/// cache key and does not contribute.
pub fn evaluate(board: &Position, _captured_tally: i32, move_count: usize, maximizing: Side) -> i32 {
    let (material, psq) = material_and_placement(board);
    let mut score = material + psq;

    if board.king_in_check(Side::Black) { score += CHECK_VAL; }
    if board.king_in_check(Side::White) { score -= CHECK_VAL; }

    let mobility = move_count as i32 * OPEN_SPACE_VAL;
    let for_maximizer = if board.side_to_move() == maximizing { mobility } else { -mobility };
    score + maximizing.sign() * for_maximizer
}
