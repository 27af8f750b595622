use crate::evaluator;
use crate::game::{Cell, Game, GameState, Move, Player};
use crate::{MIN_COLS, MIN_ROWS, WIN_LENGTH};

// window scan directions: horizontal, vertical, diagonal down-right,
// diagonal up-right
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// A gravity-drop four-in-a-row board
///
/// Cells are stored row-major with row 0 at the top, so a dropped tile
/// lands on the highest-index empty row of its column. Dimensions below
/// the minimum viable size are clamped up at construction instead of
/// rejected.
#[derive(Clone, Debug)]
pub struct ConnectFour {
    rows: usize,
    cols: usize,
    grid: Vec<Cell>,
    history: Vec<Move>,
    current: Player,
    eval_one: i32,
    eval_two: i32,
    state: GameState,
}

impl ConnectFour {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_starting_player(rows, cols, Player::One)
    }

    pub fn with_starting_player(rows: usize, cols: usize, player: Player) -> Self {
        let rows = rows.max(MIN_ROWS);
        let cols = cols.max(MIN_COLS);
        Self {
            rows,
            cols,
            grid: vec![Cell::Empty; rows * cols],
            history: Vec::new(),
            current: player,
            eval_one: 0,
            eval_two: 0,
            state: GameState::Playing,
        }
    }

    fn at(&self, row: usize, column: usize) -> Cell {
        self.grid[row * self.cols + column]
    }

    fn set(&mut self, row: usize, column: usize, cell: Cell) {
        self.grid[row * self.cols + column] = cell;
    }

    // the highest-index empty row of a column, where a dropped tile lands
    fn drop_row(&self, column: usize) -> Option<usize> {
        (0..self.rows).rev().find(|&row| self.at(row, column).is_empty())
    }

    fn record_move(&mut self, mv: Move) {
        self.set(mv.row, mv.column, Cell::Taken(mv.player));
        self.history.push(mv);
        self.current = self.current.opponent();
    }

    // shared placement mechanics of make_move and assume_move
    fn place(&mut self, column_one_indexed: usize, player: Player) -> bool {
        if column_one_indexed < 1 || column_one_indexed > self.cols {
            return false;
        }
        let column = column_one_indexed - 1;
        match self.drop_row(column) {
            Some(row) => {
                self.record_move(Move {
                    row,
                    column,
                    player,
                });
                true
            }
            None => false,
        }
    }

    fn refresh_eval(&mut self) {
        self.eval_one = self.evaluate(Player::One);
        self.eval_two = self.evaluate(Player::Two);
    }

    /// True if `player` could complete four in a row with a single
    /// further placement in any open column
    pub fn can_win_next_move(&self, player: Player) -> bool {
        evaluator::can_win_next_move(self, player)
    }

    /// Applies `pred` to every 4-cell window on the board, in all four
    /// orientations, and counts the matches
    pub(crate) fn count_windows<F>(&self, pred: F) -> usize
    where
        F: Fn(&[Cell; 4]) -> bool,
    {
        let span = (WIN_LENGTH - 1) as i32;
        let mut count = 0;
        for &(dr, dc) in DIRECTIONS.iter() {
            for row in 0..self.rows as i32 {
                for col in 0..self.cols as i32 {
                    let end_row = row + span * dr;
                    if end_row < 0 || end_row >= self.rows as i32 || col + span * dc >= self.cols as i32 {
                        continue;
                    }
                    let window = [
                        self.at(row as usize, col as usize),
                        self.at((row + dr) as usize, (col + dc) as usize),
                        self.at((row + 2 * dr) as usize, (col + 2 * dc) as usize),
                        self.at((row + 3 * dr) as usize, (col + 3 * dc) as usize),
                    ];
                    if pred(&window) {
                        count += 1;
                    }
                }
            }
        }
        count
    }
}

impl Game for ConnectFour {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn cell(&self, row: usize, column: usize) -> Cell {
        self.at(row, column)
    }

    fn current_player(&self) -> Player {
        self.current
    }

    fn set_current_player(&mut self, player: Player) {
        self.current = player;
    }

    fn history(&self) -> &[Move] {
        &self.history
    }

    fn state(&self) -> GameState {
        self.state
    }

    fn valid_moves(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&column| self.at(0, column).is_empty())
            .map(|column| column + 1)
            .collect()
    }

    fn make_move(&mut self, column: usize) -> bool {
        let player = self.current;
        if self.place(column, player) {
            self.refresh_eval();
            true
        } else {
            false
        }
    }

    fn assume_move(&mut self, column: usize, player: Player) -> bool {
        self.place(column, player)
    }

    fn undo_move(&mut self) {
        let mv = self
            .history
            .pop()
            .expect("undo_move called with empty move history");
        self.set(mv.row, mv.column, Cell::Empty);
        self.current = self.current.opponent();
        // the cached evaluation is deliberately left at its pre-undo
        // value, see the Game trait docs
    }

    fn check_win(&self, player: Player) -> bool {
        self.count_windows(|window| window.iter().all(|&cell| cell == Cell::Taken(player))) > 0
    }

    fn check_game_over(&mut self) {
        if self.check_win(Player::One) {
            self.state = GameState::Won(Player::One);
        } else if self.check_win(Player::Two) {
            self.state = GameState::Won(Player::Two);
        } else if self.history.len() == self.max_moves() {
            self.state = GameState::Draw;
        }
    }

    fn evaluate(&self, player: Player) -> i32 {
        evaluator::evaluate(self, player)
    }

    fn cached_eval(&self, player: Player) -> i32 {
        match player {
            Player::One => self.eval_one,
            Player::Two => self.eval_two,
        }
    }

    fn reset(&mut self) {
        self.grid = vec![Cell::Empty; self.rows * self.cols];
        self.history.clear();
        self.current = Player::One;
        self.eval_one = 0;
        self.eval_two = 0;
        self.state = GameState::Playing;
    }

    fn boxed_clone(&self) -> Box<dyn Game> {
        Box::new(self.clone())
    }
}
