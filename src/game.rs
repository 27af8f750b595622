//! The abstract two-player board game contract shared by the board,
//! the evaluator and the search engine

/// One of the two hostile agents
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The tile character used when printing a board
    pub fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Taken(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

/// The terminal status of a game, only updated by an explicit
/// [`check_game_over`](Game::check_game_over) call
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Won(Player),
    Draw,
}

/// A single recorded placement: the cell filled and by whom
///
/// `row` and `column` are zero-based board indices, unlike the one-based
/// column numbers taken by the move-making operations.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Move {
    pub row: usize,
    pub column: usize,
    pub player: Player,
}

/// A mutable board game explored through balanced make/undo pairs
///
/// Connect Four is the one concrete variant, but the search engine and
/// the player strategies only ever see this contract, so other
/// four-in-a-row style games can slot in without touching them.
pub trait Game {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn cell(&self, row: usize, column: usize) -> Cell;

    fn current_player(&self) -> Player;
    fn set_current_player(&mut self, player: Player);

    /// The moves played so far, oldest first
    fn history(&self) -> &[Move];

    fn move_count(&self) -> usize {
        self.history().len()
    }

    /// Board capacity, an upper bound on the history length
    fn max_moves(&self) -> usize {
        self.rows() * self.cols()
    }

    fn state(&self) -> GameState;

    /// One-based numbers of the columns whose top cell is open, in
    /// ascending order. This order is the move-iteration order for
    /// search, so it decides which of several equally-scored moves a
    /// first-seen tie-break lands on.
    fn valid_moves(&self) -> Vec<usize>;

    /// Drops a tile into `column` (one-based) for the current turn
    /// holder. On success the move is recorded, the turn flips and the
    /// cached evaluation is refreshed. Returns false without mutating
    /// anything if the column is out of range or full.
    fn make_move(&mut self, column: usize) -> bool;

    /// Identical placement mechanics for an arbitrary player, used to
    /// probe hypothetical positions. Does not refresh the cached
    /// evaluation; the caller is responsible for undoing.
    fn assume_move(&mut self, column: usize, player: Player) -> bool;

    /// Reverts the most recent move, restoring the cell and the turn.
    ///
    /// # Panics
    /// Panics if the history is empty. The search engine guarantees
    /// balanced make/undo pairs, so an empty-history undo is a
    /// programming contract breach rather than a recoverable error.
    fn undo_move(&mut self);

    /// True if `player` has four in a row anywhere on the board
    fn check_win(&self, player: Player) -> bool;

    /// Sets the terminal state if either player has won or the board is
    /// full. The driver must call this after every accepted placement;
    /// the search engine never does.
    fn check_game_over(&mut self);

    /// Static heuristic score of the position from `player`'s
    /// perspective (see the [`evaluator`](crate::evaluator) module)
    fn evaluate(&self, player: Player) -> i32;

    /// The evaluation cached by the last forward move. Not refreshed on
    /// undo, so this is stale until the next `make_move`.
    fn cached_eval(&self, player: Player) -> i32;

    /// Clears the board, history, cached evaluation and terminal state
    /// for reuse across repeated matches
    fn reset(&mut self);

    /// Deep value copy, so search can explore hypothetical futures
    /// without touching the real game
    fn boxed_clone(&self) -> Box<dyn Game>;
}
