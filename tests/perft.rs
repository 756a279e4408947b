use plysearch::perft::{cozy_perft, perft, perft_divide};
use plysearch::search::tracker::PieceTracker;
use plysearch::Position;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

fn count(fen: &str, depth: u32) -> u64 {
    let mut b = Position::from_fen(fen).expect("valid fen");
    let t = PieceTracker::from_position(&b);
    perft(&mut b, &t, depth)
}

#[test]
fn perft_startpos_small_depths() {
    let mut b = Position::startpos();
    let t = PieceTracker::from_position(&b);
    assert_eq!(perft(&mut b, &t, 1), 20);
    assert_eq!(perft(&mut b, &t, 2), 400);
    assert_eq!(perft(&mut b, &t, 3), 8902);
    assert_eq!(b.history_len(), 0, "perft left moves on the board");
}

#[test]
fn perft_kiwipete_castles_and_en_passant() {
    assert_eq!(count(KIWIPETE, 1), 48);
    assert_eq!(count(KIWIPETE, 2), 2039);
    assert_eq!(count(KIWIPETE, 3), 97862);
}

#[test]
fn perft_endgame_pins_and_en_passant() {
    assert_eq!(count(ENDGAME, 1), 14);
    assert_eq!(count(ENDGAME, 2), 191);
    assert_eq!(count(ENDGAME, 3), 2812);
}

#[test]
fn perft_promotions() {
    assert_eq!(count(PROMOTIONS, 1), 6);
    assert_eq!(count(PROMOTIONS, 2), 264);
    assert_eq!(count(PROMOTIONS, 3), 9467);
}

#[test]
fn generator_agrees_with_cozy_reference() {
    for fen in [KIWIPETE, ENDGAME, PROMOTIONS] {
        let b = Position::from_fen(fen).unwrap();
        assert_eq!(count(fen, 2), cozy_perft(b.inner(), 2), "mismatch on {fen}");
    }
}

#[test]
fn divide_sums_to_total() {
    let mut b = Position::from_fen(KIWIPETE).unwrap();
    let t = PieceTracker::from_position(&b);
    let parts = perft_divide(&mut b, &t, 2);
    assert_eq!(parts.len(), 48);
    assert_eq!(parts.iter().map(|(_, n)| n).sum::<u64>(), 2039);
}
