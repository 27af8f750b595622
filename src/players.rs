//! The automated player strategies
//!
//! Each strategy owns its diagnostics recorder and, where it needs one,
//! its own random generator seeded from entropy at construction, so no
//! state is shared between policies.

use rand::{rngs::StdRng, Rng, SeedableRng};

use std::time::Instant;

use crate::game::Game;
use crate::search::{self, SearchStats, DEFAULT_DEPTH};
use crate::stats::{MoveStats, StatsRecorder};

/// A policy that picks a column for the current player of a game
///
/// `choose_move` never mutates the real game; search-based strategies
/// explore on a clone. `None` means no legal move exists, which the
/// driver handles as a finished game, and still records a zero-cost
/// diagnostic entry.
pub trait AiPlayer {
    fn name(&self) -> &str;

    fn choose_move(&mut self, game: &dyn Game) -> Option<usize>;

    fn stats(&self) -> &StatsRecorder;
    fn stats_mut(&mut self) -> &mut StatsRecorder;
}

// every strategy records a zero-cost entry when it has no move to make
fn record_no_move(recorder: &mut StatsRecorder, start: Instant) {
    recorder.record(MoveStats {
        time_taken: start.elapsed(),
        ..MoveStats::default()
    });
}

/// Picks uniformly among all legal moves
pub struct RandomPlayer {
    rng: StdRng,
    recorder: StatsRecorder,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            recorder: StatsRecorder::default(),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for RandomPlayer {
    fn name(&self) -> &str {
        "Random_AI"
    }

    fn choose_move(&mut self, game: &dyn Game) -> Option<usize> {
        let start = Instant::now();

        let moves = game.valid_moves();
        if moves.is_empty() {
            record_no_move(&mut self.recorder, start);
            return None;
        }

        let chosen = moves[self.rng.gen_range(0..moves.len())];

        self.recorder.record(MoveStats {
            nodes_visited: 0,
            pruned_branches: 0,
            time_taken: start.elapsed(),
            chosen_move: Some(chosen),
        });
        Some(chosen)
    }

    fn stats(&self) -> &StatsRecorder {
        &self.recorder
    }
    fn stats_mut(&mut self) -> &mut StatsRecorder {
        &mut self.recorder
    }
}

/// One-ply lookahead over the evaluation difference
///
/// Unlike the search players this keeps the whole set of moves tied for
/// the maximum and picks uniformly among them, instead of settling on
/// the first one seen.
pub struct GreedyPlayer {
    rng: StdRng,
    recorder: StatsRecorder,
}

impl GreedyPlayer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            recorder: StatsRecorder::default(),
        }
    }
}

impl Default for GreedyPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AiPlayer for GreedyPlayer {
    fn name(&self) -> &str {
        "Greedy_AI"
    }

    fn choose_move(&mut self, game: &dyn Game) -> Option<usize> {
        let start = Instant::now();

        let moves = game.valid_moves();
        if moves.is_empty() {
            record_no_move(&mut self.recorder, start);
            return None;
        }

        let mut scratch = game.boxed_clone();
        let me = scratch.current_player();

        let mut best_diff = i32::MIN;
        let mut candidates = Vec::new();
        let mut nodes_visited = 0;

        for &column in &moves {
            if !scratch.make_move(column) {
                continue;
            }
            let diff = scratch.cached_eval(me) - scratch.cached_eval(me.opponent());
            if diff > best_diff {
                best_diff = diff;
                candidates.clear();
                candidates.push(column);
            } else if diff == best_diff {
                candidates.push(column);
            }
            nodes_visited += 1;
            scratch.undo_move();
        }

        let chosen = candidates[self.rng.gen_range(0..candidates.len())];

        self.recorder.record(MoveStats {
            nodes_visited,
            pruned_branches: 0,
            time_taken: start.elapsed(),
            chosen_move: Some(chosen),
        });
        Some(chosen)
    }

    fn stats(&self) -> &StatsRecorder {
        &self.recorder
    }
    fn stats_mut(&mut self) -> &mut StatsRecorder {
        &mut self.recorder
    }
}

/// Fixed-depth exhaustive minimax search
pub struct MinimaxPlayer {
    depth: u32,
    recorder: StatsRecorder,
}

impl MinimaxPlayer {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            recorder: StatsRecorder::default(),
        }
    }
}

impl Default for MinimaxPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl AiPlayer for MinimaxPlayer {
    fn name(&self) -> &str {
        "Minimax_AI"
    }

    fn choose_move(&mut self, game: &dyn Game) -> Option<usize> {
        let start = Instant::now();

        if game.valid_moves().is_empty() {
            record_no_move(&mut self.recorder, start);
            return None;
        }

        let mut scratch = game.boxed_clone();
        let mut search_stats = SearchStats::default();
        let (chosen, _score) = search::minimax_root(scratch.as_mut(), self.depth, &mut search_stats);

        self.recorder.record(MoveStats {
            nodes_visited: search_stats.nodes_visited,
            pruned_branches: 0,
            time_taken: start.elapsed(),
            chosen_move: chosen,
        });
        chosen
    }

    fn stats(&self) -> &StatsRecorder {
        &self.recorder
    }
    fn stats_mut(&mut self) -> &mut StatsRecorder {
        &mut self.recorder
    }
}

/// Fixed-depth alpha-beta pruned search
pub struct AlphaBetaPlayer {
    depth: u32,
    recorder: StatsRecorder,
}

impl AlphaBetaPlayer {
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            recorder: StatsRecorder::default(),
        }
    }
}

impl Default for AlphaBetaPlayer {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl AiPlayer for AlphaBetaPlayer {
    fn name(&self) -> &str {
        "AlphaBeta_AI"
    }

    fn choose_move(&mut self, game: &dyn Game) -> Option<usize> {
        let start = Instant::now();

        if game.valid_moves().is_empty() {
            record_no_move(&mut self.recorder, start);
            return None;
        }

        let mut scratch = game.boxed_clone();
        let mut search_stats = SearchStats::default();
        let (chosen, _score) =
            search::alphabeta_root(scratch.as_mut(), self.depth, &mut search_stats);

        self.recorder.record(MoveStats {
            nodes_visited: search_stats.nodes_visited,
            pruned_branches: search_stats.pruned_branches,
            time_taken: start.elapsed(),
            chosen_move: chosen,
        });
        chosen
    }

    fn stats(&self) -> &StatsRecorder {
        &self.recorder
    }
    fn stats_mut(&mut self) -> &mut StatsRecorder {
        &mut self.recorder
    }
}
