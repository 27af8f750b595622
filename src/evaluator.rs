//! Static position evaluation for [`ConnectFour`]
//!
//! Scores are from a single player's perspective, *not* relative to the
//! opponent; callers difference two calls to get a symmetric score.
//! Blocking weights are deliberately heavier than their attacking
//! counterparts, so a one-move loss outweighs a one-move win.
//!
//! The magnitudes below are an exact contract, pinned by fixture tests:
//!
//! | term                         | own       | opponent   |
//! |------------------------------|-----------|------------|
//! | four in a row                | 1 000 000 | -1 000 000 |
//! | win available next move      |   100 000 |   -150 000 |
//! | per open three               |    50 000 |    -75 000 |
//! | per open two                 |     1 000 |     -1 500 |
//! | per tile in the center column|       100 |       -100 |

use crate::connect_four::ConnectFour;
use crate::game::{Cell, Game, Player};

pub const WIN: i32 = 1_000_000;
pub const OWN_NEXT_MOVE_WIN: i32 = 100_000;
pub const OPPONENT_NEXT_MOVE_WIN: i32 = 150_000;
pub const OWN_OPEN_THREE: i32 = 50_000;
pub const OPPONENT_OPEN_THREE: i32 = 75_000;
pub const OWN_OPEN_TWO: i32 = 1_000;
pub const OPPONENT_OPEN_TWO: i32 = 1_500;
pub const CENTER_TILE: i32 = 100;

/// Scores the position from `player`'s perspective
///
/// A decided position short-circuits to the dominant win constant;
/// everything else is additive. Each term is a fresh full scan of the
/// board, so the whole evaluation stays O(rows * cols).
pub fn evaluate(board: &ConnectFour, player: Player) -> i32 {
    let opponent = player.opponent();

    if board.check_win(player) {
        return WIN;
    }
    if board.check_win(opponent) {
        return -WIN;
    }

    let mut score = 0;

    if can_win_next_move(board, player) {
        score += OWN_NEXT_MOVE_WIN;
    }
    if can_win_next_move(board, opponent) {
        score -= OPPONENT_NEXT_MOVE_WIN;
    }

    score += count_open_threes(board, player) as i32 * OWN_OPEN_THREE;
    score -= count_open_threes(board, opponent) as i32 * OPPONENT_OPEN_THREE;

    score += count_open_twos(board, player) as i32 * OWN_OPEN_TWO;
    score -= count_open_twos(board, opponent) as i32 * OPPONENT_OPEN_TWO;

    // center column control; the 4-wide windows above are implicitly
    // tuned to a 7-wide board where this is the unique middle column
    let center = board.cols() / 2;
    for row in 0..board.rows() {
        match board.cell(row, center) {
            Cell::Taken(p) if p == player => score += CENTER_TILE,
            Cell::Taken(_) => score -= CENTER_TILE,
            Cell::Empty => {}
        }
    }

    score
}

/// True if `player` completes four in a row by dropping into some open
/// column, probed by trial-placing on a scratch copy of the board
pub fn can_win_next_move(board: &ConnectFour, player: Player) -> bool {
    let mut probe = board.clone();
    for column in board.valid_moves() {
        if probe.assume_move(column, player) {
            if probe.check_win(player) {
                return true;
            }
            probe.undo_move();
        }
    }
    false
}

/// Counts 4-cell windows holding exactly three of `player`'s tiles and
/// one empty cell, in any of the four empty-cell positions
pub fn count_open_threes(board: &ConnectFour, player: Player) -> usize {
    board.count_windows(|window| {
        marks(window, player) == 3 && empties(window) == 1
    })
}

/// Counts 4-cell windows holding exactly two of `player`'s tiles and two
/// empty cells. The alternating `_X_X` layout is the one two-tile shape
/// left unscored, leaving five patterns per orientation.
pub fn count_open_twos(board: &ConnectFour, player: Player) -> usize {
    board.count_windows(|window| {
        marks(window, player) == 2
            && empties(window) == 2
            && !(window[0].is_empty() && window[2].is_empty())
    })
}

fn marks(window: &[Cell; 4], player: Player) -> usize {
    window
        .iter()
        .filter(|&&cell| cell == Cell::Taken(player))
        .count()
}

fn empties(window: &[Cell; 4]) -> usize {
    window.iter().filter(|cell| cell.is_empty()).count()
}
