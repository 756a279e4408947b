//! Standard algebraic notation for legal moves, and matching of typed input
//! against the legal move list.

use crate::board::cozy::Position;
use crate::board::{Move, PieceKind};

/// SAN for `mv` in `pos`, or `None` when the move is not legal there.
pub fn san(pos: &Position, mv: Move) -> Option<String> {
    let legal = pos.legal_moves();
    if !legal.contains(&mv) { return None; }
    let piece = pos.piece_at(mv.from)?;
    let mut out = String::with_capacity(8);

    if piece.kind == PieceKind::King && (mv.to.x as i8 - mv.from.x as i8).abs() == 2 {
        out.push_str(if mv.to.x > mv.from.x { "O-O" } else { "O-O-O" });
    } else {
        let capture = pos.capture_of(mv).is_some();
        match piece.kind.letter() {
            None => {
                if capture { out.push(mv.from.file_char()); }
            }
            Some(letter) => {
                out.push(letter);
                let rivals: Vec<Move> = legal
                    .iter()
                    .copied()
                    .filter(|m| m.to == mv.to && m.from != mv.from)
                    .filter(|m| pos.piece_at(m.from).map(|p| p.kind) == Some(piece.kind))
                    .collect();
                if !rivals.is_empty() {
                    if rivals.iter().all(|m| m.from.x != mv.from.x) {
                        out.push(mv.from.file_char());
                    } else if rivals.iter().all(|m| m.from.y != mv.from.y) {
                        out.push(mv.from.rank_char());
                    } else {
                        out.push(mv.from.file_char());
                        out.push(mv.from.rank_char());
                    }
                }
            }
        }
        if capture { out.push('x'); }
        out.push_str(&mv.to.to_string());
        if let Some(letter) = mv.promotion.and_then(PieceKind::letter) {
            out.push('=');
            out.push(letter);
        }
    }

    let mut child = pos.clone();
    let rec = child.apply(mv).ok()?;
    if rec.is_mate {
        out.push('#');
    } else if rec.is_check {
        out.push('+');
    }
    Some(out)
}

fn normalize(text: &str) -> String {
    text.trim()
        .trim_start_matches('{')
        .trim_end_matches('}')
        .trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .replace('0', "O")
}

/// Find the legal move matching free text in SAN (`Nf3`, `exd5`, `O-O`, `e8=Q+`)
/// or coordinate form (`g1f3`, `e7e8q`).
pub fn parse_input(pos: &Position, text: &str) -> Option<Move> {
    let wanted = normalize(text);
    if wanted.is_empty() { return None; }
    let lower = text.trim().to_ascii_lowercase();
    pos.legal_moves().into_iter().find(|&mv| {
        if mv.to_string() == lower { return true; }
        san(pos, mv).map(|s| normalize(&s) == wanted).unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    #[test]
    fn pawn_and_piece_moves_from_start() {
        let pos = Position::startpos();
        assert_eq!(san(&pos, Move::parse("e2e4").unwrap()).as_deref(), Some("e4"));
        assert_eq!(san(&pos, Move::parse("g1f3").unwrap()).as_deref(), Some("Nf3"));
        assert_eq!(san(&pos, Move::parse("e2e5").unwrap()), None);
    }

    #[test]
    fn knights_are_disambiguated_by_file() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1").unwrap();
        let mv = Move::new(Coord::new(1, 0), Coord::new(3, 1));
        assert_eq!(san(&pos, mv).as_deref(), Some("Nbd2"));
    }

    #[test]
    fn mate_suffix_and_input_matching() {
        let pos = Position::from_fen("k7/8/1K6/8/8/8/8/6Q1 w - - 0 1").unwrap();
        let mv = Move::parse("g1g8").unwrap();
        assert_eq!(san(&pos, mv).as_deref(), Some("Qg8#"));
        assert_eq!(parse_input(&pos, "Qg8"), Some(mv));
        assert_eq!(parse_input(&pos, "{Qg8#}"), Some(mv));
        assert_eq!(parse_input(&pos, "g1g8"), Some(mv));
        assert_eq!(parse_input(&pos, "Qg9"), None);
    }

    #[test]
    fn castles_accept_zero_spelling() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let short = Move::new(Coord::new(4, 0), Coord::new(6, 0));
        assert_eq!(san(&pos, short).as_deref(), Some("O-O"));
        assert_eq!(parse_input(&pos, "0-0"), Some(short));
    }
}
