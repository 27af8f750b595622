//! Per-move, per-game and per-simulation diagnostics for the AI players

use anyhow::Result;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::mem;
use std::time::Duration;

/// The diagnostic side channel of one move decision
#[derive(Clone, Debug, Default)]
pub struct MoveStats {
    pub nodes_visited: usize,
    pub pruned_branches: usize,
    pub time_taken: Duration,
    /// `None` when no legal move existed at decision time
    pub chosen_move: Option<usize>,
}

/// The move decisions of one finished game, in play order
#[derive(Clone, Debug, Default)]
pub struct GameStats {
    pub moves: Vec<MoveStats>,
}

/// Arithmetic means for one move index across repeated games
#[derive(Clone, Debug, Default)]
pub struct MoveAverages {
    pub nodes_visited: f64,
    pub pruned_branches: f64,
    pub time_taken: Duration,
    /// How many games lasted long enough to reach this move index
    pub games_reached: usize,
}

/// Averages nodes, pruned branches and time per move index
///
/// Games end at different lengths, so each index is averaged over the
/// games that actually reached it.
pub fn per_move_averages(games: &[GameStats]) -> Vec<MoveAverages> {
    let longest = games.iter().map(|game| game.moves.len()).max().unwrap_or(0);
    let mut averages = vec![MoveAverages::default(); longest];

    for game in games {
        for (index, move_stats) in game.moves.iter().enumerate() {
            let avg = &mut averages[index];
            avg.nodes_visited += move_stats.nodes_visited as f64;
            avg.pruned_branches += move_stats.pruned_branches as f64;
            avg.time_taken += move_stats.time_taken;
            avg.games_reached += 1;
        }
    }

    for avg in averages.iter_mut() {
        if avg.games_reached > 0 {
            avg.nodes_visited /= avg.games_reached as f64;
            avg.pruned_branches /= avg.games_reached as f64;
            avg.time_taken /= avg.games_reached as u32;
        }
    }

    averages
}

/// Move diagnostics accumulated by one AI player across a simulation
///
/// Each player owns its own recorder, there is no shared mutable state
/// between policies.
#[derive(Debug, Default)]
pub struct StatsRecorder {
    last_move: MoveStats,
    current_game: Vec<MoveStats>,
    finished_games: Vec<GameStats>,
}

impl StatsRecorder {
    pub fn record(&mut self, stats: MoveStats) {
        self.last_move = stats.clone();
        self.current_game.push(stats);
    }

    /// Rolls the current game's moves into the finished-game list
    pub fn finish_game(&mut self) {
        self.finished_games.push(GameStats {
            moves: mem::take(&mut self.current_game),
        });
        self.last_move = MoveStats::default();
    }

    pub fn last_move(&self) -> &MoveStats {
        &self.last_move
    }

    pub fn finished_games(&self) -> &[GameStats] {
        &self.finished_games
    }

    /// Writes the full per-game move log to `<player_name>_games.csv`
    ///
    /// Semicolon-delimited: one header row sized to the longest game,
    /// then four rows per game (chosen move, nodes visited, pruned
    /// branches, time in ms). An absent move is written as -1.
    pub fn save_game_log(&self, player_name: &str) -> Result<()> {
        let mut file = BufWriter::new(File::create(format!("{}_games.csv", player_name))?);

        let longest = self
            .finished_games
            .iter()
            .map(|game| game.moves.len())
            .max()
            .unwrap_or(0);
        write!(file, ";")?;
        for index in 1..=longest {
            write!(file, "Move {};", index)?;
        }
        writeln!(file)?;

        for (index, game) in self.finished_games.iter().enumerate() {
            write!(file, "Game {};", index + 1)?;
            for move_stats in &game.moves {
                let column = move_stats.chosen_move.map(|c| c as i64).unwrap_or(-1);
                write!(file, "{};", column)?;
            }
            writeln!(file)?;

            write!(file, "Nodes visited;")?;
            for move_stats in &game.moves {
                write!(file, "{};", move_stats.nodes_visited)?;
            }
            writeln!(file)?;

            write!(file, "Pruned branches;")?;
            for move_stats in &game.moves {
                write!(file, "{};", move_stats.pruned_branches)?;
            }
            writeln!(file)?;

            write!(file, "Time taken [ms];")?;
            for move_stats in &game.moves {
                write!(file, "{:.3};", move_stats.time_taken.as_secs_f64() * 1000.0)?;
            }
            writeln!(file)?;
            writeln!(file)?;
        }

        Ok(())
    }

    /// Writes the per-move-index averages to
    /// `<player_name>_move_averages.csv`
    pub fn save_move_averages(&self, player_name: &str) -> Result<()> {
        let mut file = BufWriter::new(File::create(format!(
            "{}_move_averages.csv",
            player_name
        ))?);

        writeln!(
            file,
            "Move;Games reached;Nodes visited;Pruned branches;Time taken [ms];"
        )?;
        for (index, avg) in per_move_averages(&self.finished_games).iter().enumerate() {
            writeln!(
                file,
                "{};{};{:.1};{:.1};{:.3};",
                index + 1,
                avg.games_reached,
                avg.nodes_visited,
                avg.pruned_branches,
                avg.time_taken.as_secs_f64() * 1000.0
            )?;
        }

        Ok(())
    }
}
