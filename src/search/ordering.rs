use crate::board::cozy::Position;
use crate::board::{Move, PieceKind};
use crate::search::eval::piece_value;

const CAPTURE_BASE: i32 = 10_000;
const PROMOTION_BONUS: i32 = 5_000;
const CHECK_BONUS: i32 = 3_000;
const QUIET_BASE: i32 = 1_000;

/// Ordering score of `mv`: MVV-LVA for captures, flat bonuses for promotions
/// and checks, cheap pieces first among quiet moves.
pub fn score_move(board: &Position, mv: Move) -> i32 {
    let Some(attacker) = board.piece_at(mv.from) else { return i32::MIN + 1 };
    let attacker_val = piece_value(attacker.kind);
    let victim = board.capture_of(mv).map(|(p, _)| p);
    let gives_check = board.gives_check(mv);

    let mut score = 0;
    if let Some(v) = victim {
        score += CAPTURE_BASE + piece_value(v.kind) * 10 - attacker_val;
    }
    if attacker.kind == PieceKind::Pawn && (mv.to.y == 0 || mv.to.y == 7) {
        score += PROMOTION_BONUS;
    }
    if gives_check {
        score += CHECK_BONUS;
    }
    if victim.is_none() && !gives_check {
        score += QUIET_BASE - attacker_val;
    }
    score
}

/// Moves sorted by descending score; equal scores keep generation order.
pub fn order(board: &Position, moves: Vec<Move>) -> Vec<Move> {
    let mut scored: Vec<(Move, i32)> = moves.into_iter().map(|m| (m, score_move(board, m))).collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.into_iter().map(|(m, _)| m).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    #[test]
    fn mvv_lva_prefers_cheap_attacker_on_big_victim() {
        // Pawn b4 and queen d1 can both take the rook on c5/d5 respectively
        let pos = Position::from_fen("4k3/8/8/2rr4/1P6/8/8/3QK3 w - - 0 1").unwrap();
        let pxr = Move::parse("b4c5").unwrap();
        let qxr = Move::parse("d1d5").unwrap();
        assert_eq!(score_move(&pos, pxr), 10_000 + 5_000 - 100);
        assert_eq!(score_move(&pos, qxr), 10_000 + 5_000 - 900);
        let ordered = order(&pos, vec![qxr, Move::parse("e1f1").unwrap(), pxr]);
        assert_eq!(ordered[0], pxr);
        assert_eq!(ordered[1], qxr);
    }

    #[test]
    fn quiet_moves_favour_cheap_pieces_and_keep_ties() {
        let pos = Position::startpos();
        let a3 = Move::parse("a2a3").unwrap();
        let h3 = Move::parse("h2h3").unwrap();
        let nf3 = Move::parse("g1f3").unwrap();
        assert_eq!(score_move(&pos, a3), 900);
        assert_eq!(score_move(&pos, nf3), 700);
        assert_eq!(order(&pos, vec![nf3, h3, a3]), vec![h3, a3, nf3]);
    }

    #[test]
    fn empty_origin_sorts_last() {
        let pos = Position::startpos();
        let ghost = Move::new(Coord::new(4, 3), Coord::new(4, 4));
        assert_eq!(score_move(&pos, ghost), i32::MIN + 1);
        let ordered = order(&pos, vec![ghost, Move::parse("e2e4").unwrap()]);
        assert_eq!(ordered[1], ghost);
    }

    #[test]
    fn checks_get_bonus() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let check = Move::parse("a1a8").unwrap();
        assert_eq!(score_move(&pos, check), 3_000);
    }
}
