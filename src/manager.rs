//! The match driver: wires seats to a game, runs interactive games and
//! AI-vs-AI simulations, and tallies results

use anyhow::{bail, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use indicatif::{ProgressBar, ProgressStyle};

use std::io::{stdin, stdout, Write};

use crate::game::{Cell, Game, GameState, Player};
use crate::players::AiPlayer;

/// The controller of one side of the board
pub enum Seat {
    Human,
    Ai(Box<dyn AiPlayer>),
}

impl Seat {
    fn label(&self) -> &str {
        match self {
            Seat::Human => "Human",
            Seat::Ai(ai) => ai.name(),
        }
    }

    fn is_ai(&self) -> bool {
        match self {
            Seat::Ai(_) => true,
            Seat::Human => false,
        }
    }
}

enum Decision {
    Column(usize),
    Quit,
    NoMoves,
}

/// Runs games between two seats over a single reusable [`Game`]
///
/// The manager calls [`check_game_over`](Game::check_game_over) after
/// every accepted placement; the players and the search engine never
/// terminate a game themselves.
pub struct GameManager {
    game: Box<dyn Game>,
    player_one: Seat,
    player_two: Seat,
    games_played: usize,
    player_one_wins: usize,
    player_two_wins: usize,
    draws: usize,
}

impl GameManager {
    pub fn new(game: Box<dyn Game>) -> Self {
        Self {
            game,
            player_one: Seat::Human,
            player_two: Seat::Human,
            games_played: 0,
            player_one_wins: 0,
            player_two_wins: 0,
            draws: 0,
        }
    }

    pub fn set_player_one(&mut self, seat: Seat) {
        self.player_one = seat;
    }

    pub fn set_player_two(&mut self, seat: Seat) {
        self.player_two = seat;
    }

    /// Plays one game interactively, drawing the board and prompting
    /// humans for their moves
    ///
    /// Returns false if a human quit mid-game rather than playing to a
    /// result.
    pub fn play_single_game(&mut self) -> Result<bool> {
        println!("\n=== Game {} ===", self.games_played + 1);
        println!("Player X: {}", self.player_one.label());
        println!("Player O: {}", self.player_two.label());

        loop {
            draw_board(self.game.as_ref())?;
            self.print_eval();

            let decision = {
                let GameManager {
                    game,
                    player_one,
                    player_two,
                    ..
                } = self;
                let seat = match game.current_player() {
                    Player::One => player_one,
                    Player::Two => player_two,
                };

                match seat {
                    Seat::Human => match prompt_human_move(game.as_ref())? {
                        Some(column) => Decision::Column(column),
                        None => Decision::Quit,
                    },
                    Seat::Ai(ai) => match ai.choose_move(game.as_ref()) {
                        Some(column) => {
                            let move_stats = ai.stats().last_move();
                            println!(
                                "[{}] column {}, nodes: {}, pruned: {}, time: {:.1} ms",
                                ai.name(),
                                column,
                                move_stats.nodes_visited,
                                move_stats.pruned_branches,
                                move_stats.time_taken.as_secs_f64() * 1000.0,
                            );
                            Decision::Column(column)
                        }
                        None => Decision::NoMoves,
                    },
                }
            };

            let column = match decision {
                Decision::Column(column) => column,
                Decision::Quit => return Ok(false),
                Decision::NoMoves => break,
            };

            if !self.game.make_move(column) {
                println!("Invalid move, try again.");
                continue;
            }

            self.game.check_game_over();
            if self.game.state() != GameState::Playing {
                draw_board(self.game.as_ref())?;
                announce_result(self.game.state());
                self.process_finished_game();
                break;
            }
        }
        Ok(true)
    }

    /// Runs `num_games` AI-vs-AI games back to back, then prints the
    /// tallies and saves each player's statistics
    pub fn play_matches(&mut self, num_games: usize) -> Result<()> {
        if !self.player_one.is_ai() || !self.player_two.is_ai() {
            bail!("simulations need both seats to be AI controlled");
        }

        let progress = ProgressBar::new(num_games as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
                .progress_chars("█▓▒░  "),
        );

        for _ in 0..num_games {
            loop {
                let chosen = {
                    let GameManager {
                        game,
                        player_one,
                        player_two,
                        ..
                    } = self;
                    let seat = match game.current_player() {
                        Player::One => player_one,
                        Player::Two => player_two,
                    };
                    match seat {
                        Seat::Ai(ai) => ai.choose_move(game.as_ref()),
                        // both seats were checked above
                        Seat::Human => None,
                    }
                };

                let column = match chosen {
                    Some(column) => column,
                    None => break,
                };
                if !self.game.make_move(column) {
                    continue;
                }

                self.game.check_game_over();
                if self.game.state() != GameState::Playing {
                    self.process_finished_game();
                    break;
                }
            }
            progress.inc(1);
        }
        progress.finish();

        self.print_stats();
        self.save_stats()?;
        Ok(())
    }

    /// Tallies the result, rolls the AI recorders over and resets the
    /// game for the next match
    fn process_finished_game(&mut self) {
        match self.game.state() {
            GameState::Won(Player::One) => self.player_one_wins += 1,
            GameState::Won(Player::Two) => self.player_two_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
        self.games_played += 1;

        if let Seat::Ai(ai) = &mut self.player_one {
            ai.stats_mut().finish_game();
        }
        if let Seat::Ai(ai) = &mut self.player_two {
            ai.stats_mut().finish_game();
        }
        self.game.reset();
    }

    fn print_eval(&self) {
        let eval_one = self.game.cached_eval(Player::One);
        let eval_two = self.game.cached_eval(Player::Two);
        println!(
            "Evaluation: X={:+} O={:+} (difference: {:+})",
            eval_one,
            eval_two,
            eval_one - eval_two
        );
    }

    pub fn print_stats(&self) {
        let percent = |wins: usize| {
            if self.games_played > 0 {
                100.0 * wins as f64 / self.games_played as f64
            } else {
                0.0
            }
        };

        println!("\n========================================");
        println!("            GAME STATISTICS");
        println!("========================================");
        println!("Games played: {}", self.games_played);
        println!("----------------------------------------");
        println!(
            "Player X ({}): {:3} wins ({:5.1}%)",
            self.player_one.label(),
            self.player_one_wins,
            percent(self.player_one_wins)
        );
        println!(
            "Player O ({}): {:3} wins ({:5.1}%)",
            self.player_two.label(),
            self.player_two_wins,
            percent(self.player_two_wins)
        );
        println!(
            "Draws: {:3} ({:5.1}%)",
            self.draws,
            percent(self.draws)
        );
        println!("========================================\n");
    }

    /// Writes the CSV statistics of every AI seat
    pub fn save_stats(&self) -> Result<()> {
        for seat in [&self.player_one, &self.player_two].iter() {
            if let Seat::Ai(ai) = seat {
                ai.stats().save_game_log(ai.name())?;
                ai.stats().save_move_averages(ai.name())?;
            }
        }
        Ok(())
    }
}

fn announce_result(state: GameState) {
    match state {
        GameState::Won(player) => println!("\n===== Player {} wins! =====", player.symbol()),
        GameState::Draw => println!("\n===== Draw! ====="),
        GameState::Playing => {}
    }
}

fn prompt_human_move(game: &dyn Game) -> Result<Option<usize>> {
    let stdin = stdin();
    loop {
        print!(
            "Player {}, choose a column (1-{}, 0 to quit): ",
            game.current_player().symbol(),
            game.cols()
        );
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.trim().parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(column) => return Ok(Some(column)),
            Err(_) => println!("Invalid number: {}", buffer.trim()),
        }
    }
}

fn draw_board(game: &dyn Game) -> Result<()> {
    let mut stdout = stdout();

    let mut header = String::from("  ");
    for column in 1..=game.cols() {
        header.push_str(&format!("{} ", column));
    }
    header.push('\n');
    stdout.queue(PrintStyledContent(style(header)))?;

    for row in 0..game.rows() {
        stdout.queue(PrintStyledContent(style(String::from("  "))))?;
        for column in 0..game.cols() {
            let tile = match game.cell(row, column) {
                Cell::Taken(Player::One) => style("X ")
                    .attribute(Attribute::Bold)
                    .with(Color::Red),
                Cell::Taken(Player::Two) => style("O ")
                    .attribute(Attribute::Bold)
                    .with(Color::Yellow),
                Cell::Empty => style(". ").with(Color::DarkBlue),
            };
            stdout.queue(PrintStyledContent(tile))?;
        }
        stdout.queue(PrintStyledContent(style(String::from("\n"))))?;
    }
    stdout.flush()?;
    Ok(())
}
