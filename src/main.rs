use anyhow::Result;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_arena::*;

fn main() -> Result<()> {
    let stdin = stdin();

    println!("Welcome to the Connect 4 arena\n");

    let player_one = choose_seat(&stdin, "Player 1 (X)")?;
    let player_two = choose_seat(&stdin, "Player 2 (O)")?;
    let both_ai = matches!(player_one, Seat::Ai(_)) && matches!(player_two, Seat::Ai(_));

    let mut manager = GameManager::new(Box::new(ConnectFour::new(DEFAULT_ROWS, DEFAULT_COLS)));
    manager.set_player_one(player_one);
    manager.set_player_two(player_two);

    if both_ai {
        let num_games = prompt_number(&stdin, "Number of games to play", 1)?;
        manager.play_matches(num_games as usize)?;
        return Ok(());
    }

    // interactive play, one game at a time
    loop {
        let finished = manager.play_single_game()?;
        if !finished {
            // a player quit mid-game
            break;
        }

        let mut play_again = false;
        loop {
            print!("Play again? y/n: ");
            stdout().flush().expect("failed to flush to stdout!");

            let mut buffer = String::new();
            stdin.read_line(&mut buffer)?;

            match buffer.to_lowercase().chars().next() {
                Some(_letter @ 'y') => {
                    play_again = true;
                    break;
                }
                Some(_letter @ 'n') => break,
                _ => println!("Unknown answer given"),
            }
        }
        if !play_again {
            break;
        }
    }

    manager.print_stats();
    manager.save_stats()?;
    Ok(())
}

fn choose_seat(stdin: &Stdin, label: &str) -> Result<Seat> {
    loop {
        print!(
            "{} - [h]uman, [r]andom, [g]reedy, [m]inimax or [a]lpha-beta: ",
            label
        );
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'h') => return Ok(Seat::Human),
            Some(_letter @ 'r') => return Ok(Seat::Ai(Box::new(RandomPlayer::new()))),
            Some(_letter @ 'g') => return Ok(Seat::Ai(Box::new(GreedyPlayer::new()))),
            Some(_letter @ 'm') => {
                let depth = prompt_number(stdin, "Search depth", DEFAULT_DEPTH as u64)?;
                return Ok(Seat::Ai(Box::new(MinimaxPlayer::new(depth as u32))));
            }
            Some(_letter @ 'a') => {
                let depth = prompt_number(stdin, "Search depth", DEFAULT_DEPTH as u64)?;
                return Ok(Seat::Ai(Box::new(AlphaBetaPlayer::new(depth as u32))));
            }
            _ => println!("Unknown answer given"),
        }
    }
}

fn prompt_number(stdin: &Stdin, label: &str, default: u64) -> Result<u64> {
    loop {
        print!("{} (default {}): ", label, default);
        stdout().flush().expect("failed to flush to stdout!");

        let mut buffer = String::new();
        stdin.read_line(&mut buffer)?;

        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<u64>() {
            Ok(number) => return Ok(number),
            Err(_) => println!("Invalid number: {}", trimmed),
        }
    }
}
