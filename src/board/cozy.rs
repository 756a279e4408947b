use cozy_chess::{Board as CozyBoard, Color, GameStatus as CozyStatus, Move as CozyMove, Piece as CozyPiece, Square};

use crate::board::{Coord, Move, MoveRecord, Piece, PieceKind, Side};
use crate::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Drawn,
}

/// Authoritative board with push/undo history.
///
/// Moves go through `apply`, which validates them against the full rules and
/// pushes the previous state; `undo` pops it back. The history is also where
/// the move generator finds the last executed move for en passant.
#[derive(Clone, Debug)]
pub struct Position {
    board: CozyBoard,
    stack: Vec<(CozyBoard, MoveRecord)>,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

fn to_square(at: Coord) -> Square { Square::index(at.index()) }

fn from_square(sq: Square) -> Coord { Coord::from_index(sq as usize) }

fn to_color(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

fn from_color(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn to_piece(kind: PieceKind) -> CozyPiece {
    match kind {
        PieceKind::Pawn => CozyPiece::Pawn,
        PieceKind::Knight => CozyPiece::Knight,
        PieceKind::Bishop => CozyPiece::Bishop,
        PieceKind::Rook => CozyPiece::Rook,
        PieceKind::Queen => CozyPiece::Queen,
        PieceKind::King => CozyPiece::King,
    }
}

fn from_piece(piece: CozyPiece) -> PieceKind {
    match piece {
        CozyPiece::Pawn => PieceKind::Pawn,
        CozyPiece::Knight => PieceKind::Knight,
        CozyPiece::Bishop => PieceKind::Bishop,
        CozyPiece::Rook => PieceKind::Rook,
        CozyPiece::Queen => PieceKind::Queen,
        CozyPiece::King => PieceKind::King,
    }
}

/// Rook origin/destination when `mv` is a castle by `piece`.
pub fn castle_rook_shift(mv: Move, piece: Piece) -> Option<(Coord, Coord)> {
    if piece.kind != PieceKind::King || mv.from.x != 4 || mv.from.y != mv.to.y { return None; }
    let y = mv.from.y;
    match mv.to.x {
        6 => Some((Coord::new(7, y), Coord::new(5, y))),
        2 => Some((Coord::new(0, y), Coord::new(3, y))),
        _ => None,
    }
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default(), stack: Vec::with_capacity(128) }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b, stack: Vec::with_capacity(128) })
            .map_err(|e| BoardError::InvalidFen(format!("{e:?}")))
    }

    pub fn to_fen(&self) -> String { format!("{}", self.board) }

    pub fn inner(&self) -> &CozyBoard { &self.board }

    pub fn piece_at(&self, at: Coord) -> Option<Piece> {
        let sq = to_square(at);
        let kind = self.board.piece_on(sq)?;
        let color = self.board.color_on(sq)?;
        Some(Piece::new(from_piece(kind), from_color(color)))
    }

    pub fn is_empty(&self, at: Coord) -> bool { self.board.piece_on(to_square(at)).is_none() }

    pub fn side_to_move(&self) -> Side { from_color(self.board.side_to_move()) }

    /// (kingside, queenside) castling rights as recorded by the board.
    pub fn castling_rights(&self, side: Side) -> (bool, bool) {
        let rights = self.board.castle_rights(to_color(side));
        (rights.short.is_some(), rights.long.is_some())
    }

    /// Square a pawn would land on capturing en passant, as recorded in the board state.
    pub fn en_passant_target(&self) -> Option<Coord> {
        let file = self.board.en_passant()?;
        let y = match self.side_to_move() {
            Side::White => 5,
            Side::Black => 2,
        };
        Some(Coord::new(file as u8, y))
    }

    pub fn last_move(&self) -> Option<&MoveRecord> { self.stack.last().map(|(_, rec)| rec) }

    pub fn history_len(&self) -> usize { self.stack.len() }

    /// Only the side to move can be in check in a reachable position.
    pub fn king_in_check(&self, side: Side) -> bool {
        side == self.side_to_move() && !self.board.checkers().is_empty()
    }

    /// Piece removed by `mv` and where it stood, including en passant.
    pub fn capture_of(&self, mv: Move) -> Option<(Piece, Coord)> {
        let mover = self.piece_at(mv.from)?;
        if let Some(dest) = self.piece_at(mv.to) {
            return if dest.side != mover.side { Some((dest, mv.to)) } else { None };
        }
        if mover.kind == PieceKind::Pawn && mv.from.x != mv.to.x {
            let at = Coord::new(mv.to.x, mv.from.y);
            if let Some(p) = self.piece_at(at) {
                if p.kind == PieceKind::Pawn && p.side != mover.side { return Some((p, at)); }
            }
        }
        None
    }

    // cozy-chess encodes castling as the king capturing its own rook
    fn to_cozy_move(&self, mv: Move, piece: Piece) -> CozyMove {
        let to = match castle_rook_shift(mv, piece) {
            Some((rook_from, _)) => rook_from,
            None => mv.to,
        };
        CozyMove { from: to_square(mv.from), to: to_square(to), promotion: mv.promotion.map(to_piece) }
    }

    fn from_cozy_move(&self, m: CozyMove) -> Move {
        let from = from_square(m.from);
        let mut to = from_square(m.to);
        let own = self.board.colors(self.board.side_to_move());
        if self.board.piece_on(m.from) == Some(CozyPiece::King) && own.has(m.to) {
            to = Coord::new(if to.x > from.x { 6 } else { 2 }, from.y);
        }
        Move { from, to, promotion: m.promotion.map(from_piece) }
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        match self.piece_at(mv.from) {
            Some(piece) => self.board.is_legal(self.to_cozy_move(mv, piece)),
            None => false,
        }
    }

    /// Play `mv`, pushing the previous state. Rejects moves that break the rules,
    /// including those leaving the mover's king in check.
    pub fn apply(&mut self, mv: Move) -> Result<MoveRecord, BoardError> {
        let piece = self.piece_at(mv.from).ok_or(BoardError::EmptySquare(mv.from))?;
        let cm = self.to_cozy_move(mv, piece);
        if !self.board.is_legal(cm) { return Err(BoardError::IllegalMove(mv.to_string())); }
        let captured = self.capture_of(mv);
        let rook_shift = castle_rook_shift(mv, piece);
        let prev = self.board.clone();
        self.board.play_unchecked(cm);
        let is_check = !self.board.checkers().is_empty();
        let is_mate = is_check && !self.has_legal_moves();
        let rec = MoveRecord { mv, piece, captured, rook_shift, is_check, is_mate };
        self.stack.push((prev, rec));
        Ok(rec)
    }

    /// Restore the state before the last `apply`.
    pub fn undo(&mut self) -> Option<MoveRecord> {
        let (prev, rec) = self.stack.pop()?;
        self.board = prev;
        Some(rec)
    }

    pub fn gives_check(&self, mv: Move) -> bool {
        let Some(piece) = self.piece_at(mv.from) else { return false };
        let cm = self.to_cozy_move(mv, piece);
        if !self.board.is_legal(cm) { return false; }
        let mut child = self.board.clone();
        child.play_unchecked(cm);
        !child.checkers().is_empty()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        self.board.generate_moves(|moves| {
            for m in moves { out.push(self.from_cozy_move(m)); }
            false
        });
        out
    }

    pub fn has_legal_moves(&self) -> bool { self.board.generate_moves(|moves| moves.len() > 0) }

    pub fn status(&self) -> GameStatus {
        match self.board.status() {
            CozyStatus::Won => GameStatus::Checkmate,
            CozyStatus::Drawn => GameStatus::Drawn,
            CozyStatus::Ongoing => GameStatus::Ongoing,
        }
    }

    /// Text diagram, rank 8 at the top, white pieces upper case.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(200);
        for y in (0..8u8).rev() {
            out.push((b'1' + y) as char);
            out.push(' ');
            for x in 0..8u8 {
                let c = self.piece_at(Coord::new(x, y)).map_or('.', Piece::to_char);
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out.push_str("   a b c d e f g h\n");
        out
    }
}
