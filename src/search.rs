//! Fixed-depth adversarial game tree search
//!
//! Both engines recurse over a single shared mutable [`Game`] through
//! balanced make/undo pairs, so the board itself doubles as the DFS
//! stack. Leaf positions are scored as `eval(root player) -
//! eval(opponent)`, always anchored to the player the search is run for,
//! never to whoever holds the turn at the leaf.
//!
//! Alpha-beta is a pure optimisation of minimax: given the same board,
//! depth and turn it returns the same move and score, it just visits
//! fewer nodes.

use crate::game::{Game, Player};

/// Default search depth for the search-based players
pub const DEFAULT_DEPTH: u32 = 3;

/// Diagnostic counters accumulated across one search call tree
///
/// Passed by reference through the recursion instead of living in
/// hidden globals, which keeps the engines re-entrant and testable in
/// isolation.
#[derive(Copy, Clone, Debug, Default)]
pub struct SearchStats {
    pub nodes_visited: usize,
    pub pruned_branches: usize,
}

/// Chooses a move for the current player by plain minimax
///
/// Every root move is tried in ascending column order and undone after
/// its subtree is scored; the strictly greatest score wins, so ties go
/// to the first column seen. Returns `None` when no legal move exists.
pub fn minimax_root(
    game: &mut dyn Game,
    depth: u32,
    stats: &mut SearchStats,
) -> (Option<usize>, i32) {
    let me = game.current_player();

    let mut best_score = i32::MIN;
    let mut best_move = None;

    for column in game.valid_moves() {
        if !game.make_move(column) {
            continue;
        }
        let score = minimax(game, depth.saturating_sub(1), false, me, stats);
        game.undo_move();

        if score > best_score {
            best_score = score;
            best_move = Some(column);
        }
    }

    (best_move, best_score)
}

/// Scores a position by exhaustive minimax to the given depth
pub fn minimax(
    game: &mut dyn Game,
    depth: u32,
    my_turn: bool,
    me: Player,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes_visited += 1;

    if depth == 0 {
        return game.cached_eval(me) - game.cached_eval(me.opponent());
    }

    if my_turn {
        // folding over no moves yields the matching extreme bound
        let mut max_score = i32::MIN;
        for column in game.valid_moves() {
            game.make_move(column);
            let score = minimax(game, depth - 1, false, me, stats);
            game.undo_move();

            max_score = max_score.max(score);
        }
        max_score
    } else {
        let mut min_score = i32::MAX;
        for column in game.valid_moves() {
            game.make_move(column);
            let score = minimax(game, depth - 1, true, me, stats);
            game.undo_move();

            min_score = min_score.min(score);
        }
        min_score
    }
}

/// Chooses a move for the current player by alpha-beta search
///
/// Move selection and tie-breaking are identical to [`minimax_root`].
/// `alpha` is threaded across the sibling root moves as progressively
/// tighter lower bounds, but `beta` stays at the widest bound and no
/// pruning happens at the root itself: the root is a maximizing layer
/// with no parent to cut it off.
pub fn alphabeta_root(
    game: &mut dyn Game,
    depth: u32,
    stats: &mut SearchStats,
) -> (Option<usize>, i32) {
    let me = game.current_player();

    let mut best_score = i32::MIN;
    let mut best_move = None;

    let mut alpha = i32::MIN;
    let beta = i32::MAX;

    for column in game.valid_moves() {
        if !game.make_move(column) {
            continue;
        }
        let score = alphabeta(game, depth.saturating_sub(1), false, me, alpha, beta, stats);
        game.undo_move();

        if score > best_score {
            best_score = score;
            best_move = Some(column);
        }
        alpha = alpha.max(best_score);
    }

    (best_move, best_score)
}

/// Scores a position by alpha-beta pruned minimax to the given depth
///
/// The pruned-branch counter increments once per cut event, not once
/// per skipped move.
pub fn alphabeta(
    game: &mut dyn Game,
    depth: u32,
    my_turn: bool,
    me: Player,
    mut alpha: i32,
    mut beta: i32,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes_visited += 1;

    if depth == 0 {
        return game.cached_eval(me) - game.cached_eval(me.opponent());
    }

    if my_turn {
        let mut max_score = i32::MIN;
        for column in game.valid_moves() {
            game.make_move(column);
            let score = alphabeta(game, depth - 1, false, me, alpha, beta, stats);
            game.undo_move();

            max_score = max_score.max(score);
            alpha = alpha.max(max_score);

            // the minimizer above is already guaranteed beta, it will
            // never let play reach the remaining siblings
            if beta <= alpha {
                stats.pruned_branches += 1;
                break;
            }
        }
        max_score
    } else {
        let mut min_score = i32::MAX;
        for column in game.valid_moves() {
            game.make_move(column);
            let score = alphabeta(game, depth - 1, true, me, alpha, beta, stats);
            game.undo_move();

            min_score = min_score.min(score);
            beta = beta.min(min_score);

            if beta <= alpha {
                stats.pruned_branches += 1;
                break;
            }
        }
        min_score
    }
}
