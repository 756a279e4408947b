use std::collections::HashMap;

use crate::board::Move;

const GOLDEN: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Plies remaining below the node when it was stored.
    pub depth: u32,
    pub score: i32,
    pub best: Option<Move>,
}

/// Cache key of a node: the position hash with the captured-material tally
/// folded in.
pub fn tt_key(hash: u64, captured_tally: i32) -> u64 {
    let cp = captured_tally as u32 as u64;
    hash ^ cp.wrapping_add(GOLDEN).wrapping_add(hash.rotate_left(6)).wrapping_add(hash >> 2)
}

/// Per-search transposition table. Stores always overwrite.
#[derive(Default, Debug)]
pub struct Tt {
    entries: HashMap<u64, Entry>,
}

impl Tt {
    pub fn new() -> Self { Self { entries: HashMap::with_capacity(1 << 12) } }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn get(&self, key: u64) -> Option<Entry> { self.entries.get(&key).copied() }

    pub fn put(&mut self, key: u64, e: Entry) { self.entries.insert(key, e); }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}
