use plysearch::search::movegen;
use plysearch::search::tracker::PieceTracker;
use plysearch::{Coord, Move, Piece, Position};
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashSet;

fn assert_mirrors(tracker: &PieceTracker, board: &Position) {
    let mut squares = HashSet::new();
    for pl in tracker.iter() {
        assert!(squares.insert(pl.at), "two tracked pieces share {}", pl.at);
        assert_eq!(board.piece_at(pl.at), Some(Piece::new(pl.kind, pl.side)), "tracker disagrees on {}", pl.at);
    }
    let occupied = Coord::all().filter(|&c| board.piece_at(c).is_some()).count();
    assert_eq!(tracker.len(), occupied);
}

#[test]
fn apply_then_undo_restores_board_and_tracker() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let root = PieceTracker::from_position(&pos);
    let fen = pos.to_fen();
    for mv in movegen::generate(&pos, &root) {
        let child = root.after(&pos, mv);
        if pos.apply(mv).is_err() { continue; }
        assert_mirrors(&child, &pos);
        pos.undo();
        assert_eq!(pos.to_fen(), fen, "undo after {mv} did not restore the board");
        assert_mirrors(&root, &pos);
    }
}

#[test]
fn en_passant_capture_removes_the_passed_pawn() {
    let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
    let mut t = PieceTracker::from_position(&pos);
    let push = Move::parse("d7d5").unwrap();
    t.apply_move(&pos, push);
    pos.apply(push).unwrap();
    let before = t.len();
    let ep = Move::parse("e5d6").unwrap();
    t.apply_move(&pos, ep);
    pos.apply(ep).unwrap();
    assert_eq!(t.len(), before - 1);
    assert!(t.at(Coord::new(3, 4)).is_none(), "captured pawn still tracked on d5");
    assert_mirrors(&t, &pos);
}

#[test]
fn random_games_keep_tracker_in_sync() {
    let mut rng = SmallRng::seed_from_u64(7);
    for _ in 0..12 {
        let mut pos = Position::startpos();
        let mut t = PieceTracker::from_position(&pos);
        for _ in 0..80 {
            let mut moves = movegen::generate(&pos, &t);
            moves.shuffle(&mut rng);
            let before = t.len();
            let mut played = false;
            for mv in moves {
                let captures = pos.capture_of(mv).is_some();
                let next = t.after(&pos, mv);
                if pos.apply(mv).is_err() { continue; }
                let expected = if captures { before - 1 } else { before };
                assert_eq!(next.len(), expected, "size changed wrongly on {mv}");
                t = next;
                played = true;
                break;
            }
            if !played { break; }
            assert_mirrors(&t, &pos);
        }
    }
}
