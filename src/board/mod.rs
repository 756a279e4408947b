//! Board-facing value types shared by the search components.
//!
//! Squares are addressed as `(x, y)` with `x` the file (0 = a) and `y` the
//! rank (0 = first rank), matching the layout the move generator and the
//! evaluator iterate over.

use std::fmt;

pub mod cozy;
pub mod notation;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self { Self { x, y } }

    /// Square index `y * 8 + x`.
    pub fn index(self) -> usize { self.y as usize * 8 + self.x as usize }

    pub fn from_index(idx: usize) -> Self { Self::new((idx % 8) as u8, (idx / 8) as u8) }

    /// Shifted square, or `None` when it leaves the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Coord> {
        let x = self.x as i8 + dx;
        let y = self.y as i8 + dy;
        if (0..8).contains(&x) && (0..8).contains(&y) { Some(Coord::new(x as u8, y as u8)) } else { None }
    }

    pub fn all() -> impl Iterator<Item = Coord> { (0..64).map(Coord::from_index) }

    pub fn parse(s: &str) -> Option<Coord> {
        let b = s.as_bytes();
        if b.len() != 2 { return None; }
        let (f, r) = (b[0], b[1]);
        if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return None; }
        Some(Coord::new(f - b'a', r - b'1'))
    }

    pub fn file_char(self) -> char { (b'a' + self.x) as char }
    pub fn rank_char(self) -> char { (b'1' + self.y) as char }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn index(self) -> usize {
        match self {
            Side::White => 0,
            Side::Black => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// +1 for white, -1 for black: converts a white-positive score into this side's frame.
    pub fn sign(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Direction pawns of this side advance along `y`.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn home_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion targets, most valuable first.
    pub const PROMOTIONS: [PieceKind; 4] = [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    pub fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Upper-case SAN letter; pawns have none.
    pub fn letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self { Self { kind, side } }

    /// FEN-style character: upper case for white.
    pub fn to_char(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        if self.side == Side::White { c.to_ascii_uppercase() } else { c }
    }
}

/// A generated move. Castling is the king moving two files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self { Self { from, to, promotion: None } }

    pub const fn promoting(from: Coord, to: Coord, kind: PieceKind) -> Self { Self { from, to, promotion: Some(kind) } }

    /// Parse coordinate notation such as `e2e4` or `e7e8q`.
    pub fn parse(s: &str) -> Option<Move> {
        if !s.is_ascii() || (s.len() != 4 && s.len() != 5) { return None; }
        let from = Coord::parse(&s[0..2])?;
        let to = Coord::parse(&s[2..4])?;
        let promotion = match s.as_bytes().get(4) {
            None => None,
            Some(b'q') => Some(PieceKind::Queen),
            Some(b'r') => Some(PieceKind::Rook),
            Some(b'b') => Some(PieceKind::Bishop),
            Some(b'n') => Some(PieceKind::Knight),
            Some(_) => return None,
        };
        Some(Move { from, to, promotion })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", Piece::new(kind, Side::Black).to_char())?;
        }
        Ok(())
    }
}

/// A move as executed by the board, with everything needed to update derived state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    /// Captured piece and the square it stood on (differs from `mv.to` for en passant).
    pub captured: Option<(Piece, Coord)>,
    /// Rook origin and destination for a castle.
    pub rook_shift: Option<(Coord, Coord)>,
    pub is_check: bool,
    pub is_mate: bool,
}

impl MoveRecord {
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && (self.mv.from.y as i8 - self.mv.to.y as i8).abs() == 2
    }

    /// Kind standing on the destination after the move.
    pub fn landed_kind(&self) -> PieceKind { self.mv.promotion.unwrap_or(self.piece.kind) }
}
