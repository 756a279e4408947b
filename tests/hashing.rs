use plysearch::search::tracker::PieceTracker;
use plysearch::search::{movegen, zobrist};
use plysearch::{Move, Position};

fn play(moves: &[&str]) -> Position {
    let mut pos = Position::startpos();
    for m in moves {
        pos.apply(Move::parse(m).expect("coordinate move")).expect("legal move");
    }
    pos
}

#[test]
fn transposed_move_orders_hash_equal() {
    let a = play(&["g1f3", "g8f6", "b1c3", "b8c6"]);
    let b = play(&["b1c3", "b8c6", "g1f3", "g8f6"]);
    assert_eq!(a.to_fen().split(' ').next(), b.to_fen().split(' ').next());
    assert_eq!(zobrist::compute(&a), zobrist::compute(&b));
}

#[test]
fn returning_knights_restore_the_start_hash() {
    let a = play(&["g1f3", "g8f6", "f3g1", "f6g8"]);
    let start = Position::startpos();
    // same placement and side to move as the start
    assert_eq!(zobrist::compute(&a), zobrist::compute(&start));
    let b = play(&["g1f3", "g8f6", "f3g1"]);
    assert_ne!(zobrist::compute(&b), zobrist::compute(&start));
}

fn walk(board: &mut Position, tracker: &PieceTracker, hash: u64, depth: u32) {
    if depth == 0 { return; }
    for mv in movegen::generate(board, tracker) {
        let child = tracker.after(board, mv);
        let Ok(rec) = board.apply(mv) else { continue };
        let inc = zobrist::update_for_move(hash, &rec);
        assert_eq!(inc, zobrist::compute(board), "incremental hash drifted after {mv} ({:?})", rec);
        walk(board, &child, inc, depth - 1);
        board.undo();
    }
}

#[test]
fn incremental_update_matches_full_hash() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
    ] {
        let mut b = Position::from_fen(fen).unwrap();
        let t = PieceTracker::from_position(&b);
        let h = zobrist::compute(&b);
        walk(&mut b, &t, h, 2);
    }
}
