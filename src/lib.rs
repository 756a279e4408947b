// Fixed-depth alpha-beta move search over a cozy-chess backed board
pub mod board;
pub mod config;
pub mod error;
pub mod perft;
pub mod search;

pub use board::cozy::Position;
pub use board::{Coord, Move, Piece, PieceKind, Side};
pub use config::{Difficulty, SearchConfig};
pub use search::alphabeta::{Searcher, SearchResult};
