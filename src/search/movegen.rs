//! Pseudo-legal move generation driven by the piece tracker.
//!
//! Moves are produced per tracked piece of the side to move. Whether a move
//! leaves the mover's own king in check is not examined here; the board
//! rejects those when the search tries to play them.

use crate::board::cozy::Position;
use crate::board::{Coord, Move, PieceKind, Side};
use crate::search::tracker::{PieceLocation, PieceTracker};

const ROOK_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const QUEEN_DIRS: [(i8, i8); 8] = [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)];
const KNIGHT_OFFSETS: [(i8, i8); 8] = [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRS;

pub fn generate(board: &Position, tracker: &PieceTracker) -> Vec<Move> {
    let stm = board.side_to_move();
    let mut moves = Vec::with_capacity(64);
    for pl in tracker.iter() {
        if pl.side != stm { continue; }
        match board.piece_at(pl.at) {
            Some(p) if p.side == stm => {
                match p.kind {
                    PieceKind::Pawn => pawn_moves(board, &mut moves, pl.at, stm),
                    PieceKind::Knight => step_moves(board, &mut moves, pl.at, stm, &KNIGHT_OFFSETS),
                    PieceKind::Bishop => sliding_moves(board, &mut moves, pl.at, stm, &BISHOP_DIRS),
                    PieceKind::Rook => sliding_moves(board, &mut moves, pl.at, stm, &ROOK_DIRS),
                    PieceKind::Queen => sliding_moves(board, &mut moves, pl.at, stm, &QUEEN_DIRS),
                    PieceKind::King => {
                        step_moves(board, &mut moves, pl.at, stm, &KING_OFFSETS);
                        castling_moves(board, &mut moves, tracker, pl);
                    }
                }
            }
            _ => {}
        }
    }
    moves
}

fn push_pawn_move(moves: &mut Vec<Move>, from: Coord, to: Coord, side: Side) {
    if to.y == side.opponent().home_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

fn pawn_moves(board: &Position, moves: &mut Vec<Move>, from: Coord, side: Side) {
    let dir = side.forward();
    let start_rank = match side {
        Side::White => 1,
        Side::Black => 6,
    };

    if let Some(one) = from.offset(0, dir) {
        if board.is_empty(one) {
            push_pawn_move(moves, from, one, side);
            if from.y == start_rank {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.is_empty(two) { moves.push(Move::new(from, two)); }
                }
            }
        }
    }

    for dx in [-1i8, 1] {
        let Some(to) = from.offset(dx, dir) else { continue };
        if let Some(dest) = board.piece_at(to) {
            if dest.side != side { push_pawn_move(moves, from, to, side); }
        }
    }

    if let Some(to) = en_passant_square(board, from, side) {
        moves.push(Move::new(from, to));
    }
}

/// Landing square of an en-passant capture by the pawn on `from`, taken from
/// the last executed move, or from the imported position when there is no history.
fn en_passant_square(board: &Position, from: Coord, side: Side) -> Option<Coord> {
    let dir = side.forward();
    let target = match board.last_move() {
        Some(last) => {
            if !last.is_double_pawn_push() { return None; }
            let landed = last.mv.to;
            if landed.y != from.y || (landed.x as i8 - from.x as i8).abs() != 1 { return None; }
            Coord::new(landed.x, (from.y as i8 + dir) as u8)
        }
        None => {
            let t = board.en_passant_target()?;
            if t.y as i8 != from.y as i8 + dir || (t.x as i8 - from.x as i8).abs() != 1 { return None; }
            t
        }
    };
    if board.is_empty(target) { Some(target) } else { None }
}

fn sliding_moves(board: &Position, moves: &mut Vec<Move>, from: Coord, side: Side, dirs: &[(i8, i8)]) {
    for &(dx, dy) in dirs {
        let mut cur = from;
        while let Some(to) = cur.offset(dx, dy) {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(dest) => {
                    if dest.side != side { moves.push(Move::new(from, to)); }
                    break;
                }
            }
            cur = to;
        }
    }
}

fn step_moves(board: &Position, moves: &mut Vec<Move>, from: Coord, side: Side, offsets: &[(i8, i8)]) {
    for &(dx, dy) in offsets {
        let Some(to) = from.offset(dx, dy) else { continue };
        match board.piece_at(to) {
            Some(dest) if dest.side == side => {}
            _ => moves.push(Move::new(from, to)),
        }
    }
}

fn unmoved_rook(board: &Position, tracker: &PieceTracker, at: Coord, side: Side) -> bool {
    let tracked = tracker.at(at).map_or(false, |pl| pl.side == side && pl.kind == PieceKind::Rook && !pl.rook_has_moved);
    tracked && board.piece_at(at).map_or(false, |p| p.side == side && p.kind == PieceKind::Rook)
}

fn castling_moves(board: &Position, moves: &mut Vec<Move>, tracker: &PieceTracker, king: &PieceLocation) {
    let from = king.at;
    if from.x != 4 || from.y != king.side.home_rank() || king.king_has_moved { return; }
    let y = from.y;
    let enemy = king.side.opponent();
    let safe = |xs: &[u8]| xs.iter().all(|&x| !is_square_attacked(board, Coord::new(x, y), enemy));
    let empty = |xs: &[u8]| xs.iter().all(|&x| board.is_empty(Coord::new(x, y)));

    if unmoved_rook(board, tracker, Coord::new(7, y), king.side) && empty(&[5, 6]) && safe(&[4, 5, 6]) {
        moves.push(Move::new(from, Coord::new(6, y)));
    }
    if unmoved_rook(board, tracker, Coord::new(0, y), king.side) && empty(&[1, 2, 3]) && safe(&[4, 3, 2]) {
        moves.push(Move::new(from, Coord::new(2, y)));
    }
}

fn ray_hits(board: &Position, from: Coord, target: Coord, dirs: &[(i8, i8)]) -> bool {
    for &(dx, dy) in dirs {
        let mut cur = from;
        while let Some(next) = cur.offset(dx, dy) {
            if next == target { return true; }
            if !board.is_empty(next) { break; }
            cur = next;
        }
    }
    false
}

/// Whether any piece of `by` attacks `target`, testing each piece's pattern.
pub fn is_square_attacked(board: &Position, target: Coord, by: Side) -> bool {
    for at in Coord::all() {
        let Some(p) = board.piece_at(at) else { continue };
        if p.side != by { continue; }
        let dx = target.x as i8 - at.x as i8;
        let dy = target.y as i8 - at.y as i8;
        let hit = match p.kind {
            PieceKind::Pawn => dy == by.forward() && dx.abs() == 1,
            PieceKind::Knight => KNIGHT_OFFSETS.contains(&(dx, dy)),
            PieceKind::King => dx.abs() <= 1 && dy.abs() <= 1 && (dx, dy) != (0, 0),
            PieceKind::Bishop => ray_hits(board, at, target, &BISHOP_DIRS),
            PieceKind::Rook => ray_hits(board, at, target, &ROOK_DIRS),
            PieceKind::Queen => ray_hits(board, at, target, &QUEEN_DIRS),
        };
        if hit { return true; }
    }
    false
}
