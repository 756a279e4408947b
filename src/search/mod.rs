pub mod alphabeta;
pub mod eval;
pub mod movegen;
pub mod ordering;
pub mod tracker;
pub mod tt;
pub mod zobrist;
