use log::{debug, info, trace, warn};

use crate::board::cozy::Position;
use crate::board::{Move, MoveRecord, Side};
use crate::config::{SearchConfig, MAX_DEPTH};
use crate::search::eval::{self, MATE_SCORE};
use crate::search::tracker::PieceTracker;
use crate::search::tt::{tt_key, Entry, Tt};
use crate::search::{movegen, ordering, zobrist};

/// Window bound; negation stays in range.
pub const INF: i32 = i32::MAX;

/// Score of a node, from the point of view of the side the root search plays for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
}

/// Fixed-depth alpha-beta searcher.
///
/// Owns the root piece tracker and the captured-material tally for the game
/// it plays, plus a transposition table that lives for one root search.
pub struct Searcher {
    config: SearchConfig,
    tt: Tt,
    tracker: PieceTracker,
    captured_tally: i32,
    root_side: Side,
    nodes: u64,
    last: Option<SearchResult>,
}

impl Default for Searcher {
    fn default() -> Self { Self::new(SearchConfig::default()) }
}

impl Searcher {
    /// Searcher for a game starting from the standard position. Games from any
    /// other position need `from_position` (or `reset`), since the root tracker
    /// has to mirror the boards later passed to `comp_move`.
    pub fn new(config: SearchConfig) -> Self { Self::from_position(config, &Position::startpos()) }

    /// Depths outside `1..=MAX_DEPTH` are clamped into range.
    pub fn from_position(config: SearchConfig, board: &Position) -> Self {
        Self {
            config: clamped(config),
            tt: Tt::new(),
            tracker: PieceTracker::from_position(board),
            captured_tally: 0,
            root_side: board.side_to_move(),
            nodes: 0,
            last: None,
        }
    }

    pub fn config(&self) -> &SearchConfig { &self.config }
    pub fn tracker(&self) -> &PieceTracker { &self.tracker }
    pub fn captured_tally(&self) -> i32 { self.captured_tally }
    pub fn nodes(&self) -> u64 { self.nodes }
    pub fn tt_len(&self) -> usize { self.tt.len() }
    pub fn last_result(&self) -> Option<SearchResult> { self.last }

    /// Start tracking a new game from `board`.
    pub fn reset(&mut self, board: &Position) {
        self.tracker = PieceTracker::from_position(board);
        self.captured_tally = 0;
        self.tt.clear();
        self.last = None;
    }

    /// Record a move about to be played on `board` (not yet applied) in the
    /// root tracker and tally.
    pub fn observe_move(&mut self, board: &Position, mv: Move) {
        if let Some((piece, _)) = board.capture_of(mv) {
            self.captured_tally += eval::captured_value(piece);
        }
        self.tracker.apply_move(board, mv);
    }

    /// Pick a move for the side to move on `board` and commit it to the root
    /// state. Playing it on `board` is left to the caller.
    pub fn comp_move(&mut self, board: &Position) -> Option<Move> {
        let res = self.search(board);
        if let Some(mv) = res.best_move {
            self.observe_move(board, mv);
        }
        info!(
            "searched {} nodes at depth {}: move {} score {}",
            self.nodes,
            self.config.depth,
            res.best_move.map_or_else(|| "none".to_string(), |m| m.to_string()),
            res.score
        );
        res.best_move
    }

    /// Root search without committing anything.
    pub fn search(&mut self, board: &Position) -> SearchResult {
        self.tt.clear();
        self.nodes = 0;
        self.root_side = board.side_to_move();
        let mut scratch = board.clone();
        let root_pieces = self.root_tracker(board);
        let hash = zobrist::compute(&scratch);
        let res = self.alphabeta(&mut scratch, &root_pieces, 0, -INF, INF, self.captured_tally, hash);
        debug!("table holds {} entries after search", self.tt.len());
        self.last = Some(res);
        res
    }

    /// Unpruned, uncached minimax with the same leaf scoring as `search`.
    pub fn minimax(&mut self, board: &Position) -> SearchResult {
        self.nodes = 0;
        self.root_side = board.side_to_move();
        let mut scratch = board.clone();
        let root_pieces = self.root_tracker(board);
        self.minimax_node(&mut scratch, &root_pieces, 0, self.captured_tally)
    }

    /// Full-window score of every playable root move, each searched on a fresh table.
    pub fn root_move_scores(&mut self, board: &Position) -> Vec<(Move, i32)> {
        self.nodes = 0;
        self.root_side = board.side_to_move();
        let mut scratch = board.clone();
        let root_pieces = self.root_tracker(board);
        let hash = zobrist::compute(&scratch);
        let mut out = Vec::new();
        for mv in self.candidates(&scratch, &root_pieces) {
            let child_pieces = root_pieces.after(&scratch, mv);
            let Ok(rec) = scratch.apply(mv) else { continue };
            self.tt.clear();
            let (tally, child_hash) = child_keys(self.captured_tally, hash, &rec);
            let res = self.alphabeta(&mut scratch, &child_pieces, 1, -INF, INF, tally, child_hash);
            scratch.undo();
            out.push((mv, res.score));
        }
        out
    }

    fn root_tracker(&self, board: &Position) -> PieceTracker {
        debug_assert!(self.tracker.matches(board), "root tracker does not mirror the board:\n{}", board.to_ascii());
        self.tracker.clone()
    }

    fn candidates(&self, board: &Position, tracker: &PieceTracker) -> Vec<Move> {
        let moves = movegen::generate(board, tracker);
        if self.config.order_moves { ordering::order(board, moves) } else { moves }
    }

    fn root_frame(&self, white_score: i32) -> i32 { self.root_side.sign() * white_score }

    fn leaf_score(&self, board: &Position, tally: i32, move_count: usize) -> i32 {
        self.root_frame(eval::evaluate(board, tally, move_count, self.root_side))
    }

    // No move could be played: mate if in check, otherwise a zero-mobility evaluation.
    fn terminal_score(&self, board: &Position, tally: i32, ply: u32) -> i32 {
        let stm = board.side_to_move();
        if board.king_in_check(stm) {
            let mate = MATE_SCORE - ply as i32;
            if stm == self.root_side { -mate } else { mate }
        } else {
            self.leaf_score(board, tally, 0)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn alphabeta(
        &mut self,
        board: &mut Position,
        tracker: &PieceTracker,
        ply: u32,
        mut alpha: i32,
        mut beta: i32,
        tally: i32,
        hash: u64,
    ) -> SearchResult {
        self.nodes += 1;
        let remaining = self.config.depth.saturating_sub(ply);
        let key = tt_key(hash, tally);

        if self.config.use_tt {
            if let Some(e) = self.tt.get(key) {
                if e.depth >= remaining {
                    return SearchResult { score: e.score, best_move: e.best };
                }
            }
        }

        let moves = movegen::generate(board, tracker);
        if moves.is_empty() || ply >= self.config.depth {
            let score = if moves.is_empty() { self.terminal_score(board, tally, ply) } else { self.leaf_score(board, tally, moves.len()) };
            self.store(key, remaining, score, None);
            return SearchResult { score, best_move: None };
        }

        let moves = if self.config.order_moves { ordering::order(board, moves) } else { moves };
        let maximizing = board.side_to_move() == self.root_side;
        let mut best_score = if maximizing { -INF } else { INF };
        let mut best_move = None;
        let mut played = false;

        for mv in moves {
            let child_pieces = tracker.after(board, mv);
            let rec = match board.apply(mv) {
                Ok(rec) => rec,
                Err(e) => {
                    trace!("skipping {}: {}", mv, e);
                    continue;
                }
            };
            played = true;
            let (child_tally, child_hash) = child_keys(tally, hash, &rec);
            let child = self.alphabeta(board, &child_pieces, ply + 1, alpha, beta, child_tally, child_hash);
            board.undo();

            if maximizing {
                if child.score > best_score {
                    best_score = child.score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if child.score < best_score {
                    best_score = child.score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }
            if alpha >= beta { break; }
        }

        if !played {
            best_score = self.terminal_score(board, tally, ply);
        }
        self.store(key, remaining, best_score, best_move);
        SearchResult { score: best_score, best_move }
    }

    fn minimax_node(&mut self, board: &mut Position, tracker: &PieceTracker, ply: u32, tally: i32) -> SearchResult {
        self.nodes += 1;
        let moves = movegen::generate(board, tracker);
        if moves.is_empty() {
            return SearchResult { score: self.terminal_score(board, tally, ply), best_move: None };
        }
        if ply >= self.config.depth {
            return SearchResult { score: self.leaf_score(board, tally, moves.len()), best_move: None };
        }

        let maximizing = board.side_to_move() == self.root_side;
        let mut best: Option<SearchResult> = None;
        for mv in moves {
            let child_pieces = tracker.after(board, mv);
            let Ok(rec) = board.apply(mv) else { continue };
            let child_tally = tally + rec.captured.map_or(0, |(p, _)| eval::captured_value(p));
            let child = self.minimax_node(board, &child_pieces, ply + 1, child_tally);
            board.undo();
            let better = match best {
                None => true,
                Some(b) if maximizing => child.score > b.score,
                Some(b) => child.score < b.score,
            };
            if better {
                best = Some(SearchResult { score: child.score, best_move: Some(mv) });
            }
        }
        best.unwrap_or_else(|| SearchResult { score: self.terminal_score(board, tally, ply), best_move: None })
    }

    fn store(&mut self, key: u64, depth: u32, score: i32, best: Option<Move>) {
        if self.config.use_tt {
            self.tt.put(key, Entry { depth, score, best });
        }
    }
}

fn clamped(mut config: SearchConfig) -> SearchConfig {
    if let Err(e) = config.validate() {
        warn!("{e}, clamping");
        config.depth = config.depth.clamp(1, MAX_DEPTH);
    }
    config
}

fn child_keys(tally: i32, hash: u64, rec: &MoveRecord) -> (i32, u64) {
    let tally = tally + rec.captured.map_or(0, |(p, _)| eval::captured_value(p));
    (tally, zobrist::update_for_move(hash, rec))
}
