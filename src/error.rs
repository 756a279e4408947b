use thiserror::Error;

use crate::board::Coord;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("FEN error: {0}")]
    InvalidFen(String),
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("No piece on {0}")]
    EmptySquare(Coord),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("search depth {depth} outside 1..={max}")]
    DepthOutOfRange { depth: u32, max: u32 },
}
