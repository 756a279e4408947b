// Perft over the tracker-driven generator, with the board filtering out moves
// that leave the mover in check. Agreement with `cozy_perft` validates the generator.
use crate::board::cozy::Position;
use crate::board::Move;
use crate::search::movegen;
use crate::search::tracker::PieceTracker;

pub fn perft(board: &mut Position, tracker: &PieceTracker, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    for mv in movegen::generate(board, tracker) {
        let child = tracker.after(board, mv);
        if board.apply(mv).is_err() { continue; }
        nodes += perft(board, &child, depth - 1);
        board.undo();
    }
    nodes
}

/// Per-root-move node counts.
pub fn perft_divide(board: &mut Position, tracker: &PieceTracker, depth: u32) -> Vec<(Move, u64)> {
    let mut out = Vec::new();
    if depth == 0 { return out; }
    for mv in movegen::generate(board, tracker) {
        let child = tracker.after(board, mv);
        if board.apply(mv).is_err() { continue; }
        out.push((mv, perft(board, &child, depth - 1)));
        board.undo();
    }
    out
}

/// Reference count from cozy-chess' own legal move generator.
pub fn cozy_perft(board: &cozy_chess::Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    board.generate_moves(|moves| {
        for m in moves {
            let mut child = board.clone();
            child.play(m);
            nodes += cozy_perft(&child, depth - 1);
        }
        false
    });
    nodes
}
