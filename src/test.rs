#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::evaluator;
    use crate::players::{AiPlayer, AlphaBetaPlayer, GreedyPlayer, MinimaxPlayer, RandomPlayer};
    use crate::search::{self, SearchStats};
    use crate::stats::{per_move_averages, MoveStats, StatsRecorder};
    use crate::{Cell, ConnectFour, Game, GameState, Move, Player};

    fn cells(game: &ConnectFour) -> Vec<Cell> {
        let mut cells = Vec::new();
        for row in 0..game.rows() {
            for column in 0..game.cols() {
                cells.push(game.cell(row, column));
            }
        }
        cells
    }

    // bottom-row X tiles in columns 1-3, X to move: column 4 wins
    fn three_in_bottom_row() -> ConnectFour {
        let mut game = ConnectFour::new(6, 7);
        for column in 1..=3 {
            assert!(game.assume_move(column, Player::One));
        }
        game.set_current_player(Player::One);
        game
    }

    // a full 4x4 board with no alignment for either player
    fn full_draw_board() -> ConnectFour {
        let mut game = ConnectFour::new(4, 4);
        // per column, bottom to top
        let columns = [
            [Player::Two, Player::Two, Player::One, Player::One],
            [Player::One, Player::One, Player::Two, Player::Two],
            [Player::Two, Player::Two, Player::One, Player::One],
            [Player::One, Player::One, Player::Two, Player::Two],
        ];
        for (index, column) in columns.iter().enumerate() {
            for &player in column.iter() {
                assert!(game.assume_move(index + 1, player));
            }
        }
        game
    }

    #[test]
    pub fn valid_moves_on_empty_board() {
        let game = ConnectFour::new(6, 7);
        assert_eq!(game.valid_moves(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    pub fn dimensions_clamp_up_to_minimum() {
        let game = ConnectFour::new(2, 3);
        assert_eq!((game.rows(), game.cols()), (4, 4));

        let game = ConnectFour::new(3, 9);
        assert_eq!((game.rows(), game.cols()), (4, 9));
    }

    #[test]
    pub fn gravity_stacking_and_turn_alternation() {
        let mut game = ConnectFour::new(6, 7);
        assert_eq!(game.current_player(), Player::One);

        assert!(game.make_move(4));
        assert_eq!(game.cell(5, 3), Cell::Taken(Player::One));
        assert_eq!(game.current_player(), Player::Two);

        assert!(game.make_move(4));
        assert_eq!(game.cell(4, 3), Cell::Taken(Player::Two));
        assert_eq!(game.current_player(), Player::One);

        assert_eq!(
            game.history(),
            &[
                Move {
                    row: 5,
                    column: 3,
                    player: Player::One
                },
                Move {
                    row: 4,
                    column: 3,
                    player: Player::Two
                },
            ]
        );
    }

    #[test]
    pub fn rejects_out_of_range_and_full_columns() {
        let mut game = ConnectFour::new(6, 7);
        assert!(!game.make_move(0));
        assert!(!game.make_move(8));
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.current_player(), Player::One);

        for _ in 0..6 {
            assert!(game.assume_move(1, Player::One));
        }
        assert!(!game.make_move(1));
        assert_eq!(game.valid_moves(), vec![2, 3, 4, 5, 6, 7]);
    }

    #[test]
    pub fn make_undo_round_trip() {
        let mut game = ConnectFour::new(6, 7);
        assert!(game.make_move(2));

        let cells_before = cells(&game);
        let history_before = game.history().to_vec();
        let player_before = game.current_player();
        let state_before = game.state();

        let moves = [4, 4, 3, 5, 2, 6];
        for &column in moves.iter() {
            assert!(game.make_move(column));
        }
        for _ in 0..moves.len() {
            game.undo_move();
        }

        assert_eq!(cells(&game), cells_before);
        assert_eq!(game.history(), &history_before[..]);
        assert_eq!(game.current_player(), player_before);
        assert_eq!(game.state(), state_before);
    }

    #[test]
    #[should_panic(expected = "empty move history")]
    pub fn undo_with_empty_history_panics() {
        let mut game = ConnectFour::new(6, 7);
        game.undo_move();
    }

    #[test]
    pub fn cached_eval_is_stale_after_undo() {
        let mut game = ConnectFour::new(6, 7);
        assert!(game.make_move(4));

        // one tile in the center column
        assert_eq!(game.cached_eval(Player::One), evaluator::CENTER_TILE);
        assert_eq!(game.cached_eval(Player::Two), -evaluator::CENTER_TILE);

        game.undo_move();

        // the cache still reflects the position before the undo; only a
        // fresh evaluation sees the empty board again
        assert_eq!(game.cached_eval(Player::One), evaluator::CENTER_TILE);
        assert_eq!(game.cached_eval(Player::Two), -evaluator::CENTER_TILE);
        assert_eq!(game.evaluate(Player::One), 0);
        assert_eq!(game.evaluate(Player::Two), 0);
    }

    #[test]
    pub fn evaluator_fixture_scores() {
        let game = ConnectFour::new(6, 7);
        assert_eq!(game.evaluate(Player::One), 0);
        assert_eq!(game.evaluate(Player::Two), 0);

        let game = three_in_bottom_row();
        // next-move win + one open three + one open two
        assert_eq!(
            game.evaluate(Player::One),
            evaluator::OWN_NEXT_MOVE_WIN + evaluator::OWN_OPEN_THREE + evaluator::OWN_OPEN_TWO
        );
        assert_eq!(
            game.evaluate(Player::Two),
            -evaluator::OPPONENT_NEXT_MOVE_WIN
                - evaluator::OPPONENT_OPEN_THREE
                - evaluator::OPPONENT_OPEN_TWO
        );

        let mut game = three_in_bottom_row();
        assert!(game.assume_move(4, Player::One));
        assert_eq!(game.evaluate(Player::One), evaluator::WIN);
        assert_eq!(game.evaluate(Player::Two), -evaluator::WIN);
    }

    #[test]
    pub fn open_window_counts() {
        let game = three_in_bottom_row();
        assert_eq!(evaluator::count_open_threes(&game, Player::One), 1);
        assert_eq!(evaluator::count_open_twos(&game, Player::One), 1);
        assert_eq!(evaluator::count_open_threes(&game, Player::Two), 0);
        assert_eq!(evaluator::count_open_twos(&game, Player::Two), 0);
    }

    #[test]
    pub fn eval_difference_is_antisymmetric() {
        let mut game = ConnectFour::new(6, 7);
        for &column in [4, 3, 4, 5, 2, 2, 6, 1].iter() {
            assert!(game.make_move(column));
            let diff = game.evaluate(Player::One) - game.evaluate(Player::Two);
            let flipped = game.evaluate(Player::Two) - game.evaluate(Player::One);
            assert_eq!(diff, -flipped);
        }
    }

    #[test]
    pub fn next_move_win_detection() {
        let game = three_in_bottom_row();
        assert!(game.can_win_next_move(Player::One));
        assert!(!game.can_win_next_move(Player::Two));

        let game = ConnectFour::new(6, 7);
        assert!(!game.can_win_next_move(Player::One));
    }

    #[test]
    pub fn win_detection_in_all_orientations() {
        // horizontal
        let mut game = three_in_bottom_row();
        assert!(!game.check_win(Player::One));
        assert!(game.assume_move(4, Player::One));
        assert!(game.check_win(Player::One));
        assert!(!game.check_win(Player::Two));

        // vertical
        let mut game = ConnectFour::new(6, 7);
        for _ in 0..4 {
            assert!(game.assume_move(2, Player::One));
        }
        assert!(game.check_win(Player::One));

        // diagonal up-right
        let mut game = ConnectFour::new(6, 7);
        let moves = [
            (1, Player::One),
            (2, Player::Two),
            (2, Player::One),
            (3, Player::Two),
            (3, Player::Two),
            (3, Player::One),
            (4, Player::Two),
            (4, Player::Two),
            (4, Player::Two),
            (4, Player::One),
        ];
        for &(column, player) in moves.iter() {
            assert!(game.assume_move(column, player));
        }
        assert!(game.check_win(Player::One));
        assert!(!game.check_win(Player::Two));

        // diagonal down-right
        let mut game = ConnectFour::new(6, 7);
        let moves = [
            (1, Player::Two),
            (1, Player::Two),
            (1, Player::Two),
            (1, Player::One),
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::One),
            (3, Player::Two),
            (3, Player::One),
            (4, Player::One),
        ];
        for &(column, player) in moves.iter() {
            assert!(game.assume_move(column, player));
        }
        assert!(game.check_win(Player::One));
        assert!(!game.check_win(Player::Two));
    }

    #[test]
    pub fn full_board_without_alignment_is_a_draw() {
        let mut game = full_draw_board();
        assert!(!game.check_win(Player::One));
        assert!(!game.check_win(Player::Two));
        assert_eq!(game.move_count(), game.max_moves());
        assert!(game.valid_moves().is_empty());

        assert_eq!(game.state(), GameState::Playing);
        game.check_game_over();
        assert_eq!(game.state(), GameState::Draw);
    }

    #[test]
    pub fn terminal_check_is_explicit() {
        let mut game = three_in_bottom_row();
        assert!(game.make_move(4));
        // the winner is only set by an explicit terminal check
        assert_eq!(game.state(), GameState::Playing);
        game.check_game_over();
        assert_eq!(game.state(), GameState::Won(Player::One));
    }

    #[test]
    pub fn reset_clears_the_game_for_reuse() {
        let mut game = three_in_bottom_row();
        assert!(game.make_move(4));
        game.check_game_over();

        game.reset();
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.cached_eval(Player::One), 0);
        assert_eq!(game.cached_eval(Player::Two), 0);
        assert_eq!(game.valid_moves(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    pub fn minimax_matches_alphabeta() {
        let mut game = ConnectFour::new(6, 7);
        for &column in [4, 4, 3, 3, 5].iter() {
            assert!(game.make_move(column));
        }

        for depth in 1..=4 {
            let mut minimax_game = game.boxed_clone();
            let mut minimax_stats = SearchStats::default();
            let minimax_result =
                search::minimax_root(minimax_game.as_mut(), depth, &mut minimax_stats);

            let mut alphabeta_game = game.boxed_clone();
            let mut alphabeta_stats = SearchStats::default();
            let alphabeta_result =
                search::alphabeta_root(alphabeta_game.as_mut(), depth, &mut alphabeta_stats);

            // pruning must never change the chosen move or its score
            assert_eq!(minimax_result, alphabeta_result);
            assert!(alphabeta_stats.nodes_visited <= minimax_stats.nodes_visited);
            assert_eq!(minimax_stats.pruned_branches, 0);
        }
    }

    #[test]
    pub fn alphabeta_prunes_against_a_dominant_move() {
        let game = three_in_bottom_row();

        let mut minimax_game = game.boxed_clone();
        let mut minimax_stats = SearchStats::default();
        let (minimax_move, _) = search::minimax_root(minimax_game.as_mut(), 2, &mut minimax_stats);

        let mut alphabeta_game = game.boxed_clone();
        let mut alphabeta_stats = SearchStats::default();
        let (alphabeta_move, _) =
            search::alphabeta_root(alphabeta_game.as_mut(), 2, &mut alphabeta_stats);

        assert_eq!(minimax_move, Some(4));
        assert_eq!(alphabeta_move, Some(4));
        // the winning column raises alpha enough that the later sibling
        // subtrees are cut short
        assert!(alphabeta_stats.pruned_branches >= 1);
        assert!(alphabeta_stats.nodes_visited < minimax_stats.nodes_visited);
    }

    #[test]
    pub fn search_picks_the_immediate_win() {
        let game = three_in_bottom_row();

        let mut scratch = game.boxed_clone();
        let mut stats = SearchStats::default();
        let (chosen, _) = search::minimax_root(scratch.as_mut(), 3, &mut stats);
        assert_eq!(chosen, Some(4));
        assert!(stats.nodes_visited > 0);

        let mut scratch = game.boxed_clone();
        let mut stats = SearchStats::default();
        let (chosen, _) = search::alphabeta_root(scratch.as_mut(), 3, &mut stats);
        assert_eq!(chosen, Some(4));
    }

    #[test]
    pub fn depth_zero_reduces_to_root_evaluation() {
        let game = three_in_bottom_row();

        let mut scratch = game.boxed_clone();
        let mut stats = SearchStats::default();
        let (chosen, score) = search::minimax_root(scratch.as_mut(), 0, &mut stats);
        assert_eq!(chosen, Some(4));
        assert_eq!(score, 2 * evaluator::WIN);

        // the maximum is unique here, so greedy must agree despite its
        // different tie-break policy
        let mut greedy = GreedyPlayer::new();
        assert_eq!(greedy.choose_move(&game), Some(4));
    }

    #[test]
    pub fn search_with_no_legal_moves_yields_no_move() {
        let mut game = full_draw_board();
        let mut stats = SearchStats::default();
        let (chosen, score) = search::minimax_root(&mut game, 3, &mut stats);
        assert_eq!(chosen, None);
        assert_eq!(score, i32::MIN);
    }

    #[test]
    pub fn greedy_always_takes_the_win() {
        let game = three_in_bottom_row();
        let mut greedy = GreedyPlayer::new();
        for _ in 0..20 {
            assert_eq!(greedy.choose_move(&game), Some(4));
        }
    }

    #[test]
    pub fn greedy_breaks_ties_among_all_best_moves() {
        // X tiles in columns 2-4: both column 1 and column 5 complete
        // the alignment, so both must show up over repeated trials
        let mut game = ConnectFour::new(6, 7);
        for column in 2..=4 {
            assert!(game.assume_move(column, Player::One));
        }
        game.set_current_player(Player::One);

        let mut greedy = GreedyPlayer::new();
        let mut seen_left = false;
        let mut seen_right = false;
        for _ in 0..200 {
            match greedy.choose_move(&game) {
                Some(1) => seen_left = true,
                Some(5) => seen_right = true,
                other => panic!("greedy chose a non-winning move: {:?}", other),
            }
        }
        assert!(seen_left && seen_right);
    }

    #[test]
    pub fn random_player_only_plays_legal_moves() {
        let mut game = ConnectFour::new(6, 7);
        for _ in 0..6 {
            assert!(game.assume_move(1, Player::One));
        }
        let legal = game.valid_moves();

        let mut random = RandomPlayer::new();
        for _ in 0..50 {
            let chosen = random.choose_move(&game).unwrap();
            assert!(legal.contains(&chosen));
        }
    }

    #[test]
    pub fn players_record_a_zero_cost_entry_without_moves() {
        let game = full_draw_board();

        let mut players: Vec<Box<dyn AiPlayer>> = vec![
            Box::new(RandomPlayer::new()),
            Box::new(GreedyPlayer::new()),
            Box::new(MinimaxPlayer::new(3)),
            Box::new(AlphaBetaPlayer::new(3)),
        ];
        for player in players.iter_mut() {
            assert_eq!(player.choose_move(&game), None);
            let last = player.stats().last_move();
            assert_eq!(last.chosen_move, None);
            assert_eq!(last.nodes_visited, 0);
            assert_eq!(last.pruned_branches, 0);
        }
    }

    #[test]
    pub fn search_players_report_their_diagnostics() {
        let mut game = ConnectFour::new(6, 7);
        assert!(game.make_move(4));

        let mut minimax = MinimaxPlayer::new(3);
        let chosen = minimax.choose_move(&game);
        let last = minimax.stats().last_move();
        assert_eq!(last.chosen_move, chosen);
        assert!(last.nodes_visited > 0);
        assert_eq!(last.pruned_branches, 0);

        let mut alphabeta = AlphaBetaPlayer::new(3);
        let chosen = alphabeta.choose_move(&game);
        let last = alphabeta.stats().last_move();
        assert_eq!(last.chosen_move, chosen);
        assert!(last.nodes_visited > 0);
        assert!(last.nodes_visited <= minimax.stats().last_move().nodes_visited);
    }

    #[test]
    pub fn recorder_rolls_games_and_averages_by_move_index() {
        let mut recorder = StatsRecorder::default();

        recorder.record(MoveStats {
            nodes_visited: 10,
            pruned_branches: 2,
            time_taken: Duration::from_millis(10),
            chosen_move: Some(4),
        });
        recorder.record(MoveStats {
            nodes_visited: 20,
            pruned_branches: 0,
            time_taken: Duration::from_millis(20),
            chosen_move: Some(3),
        });
        recorder.finish_game();

        recorder.record(MoveStats {
            nodes_visited: 30,
            pruned_branches: 4,
            time_taken: Duration::from_millis(30),
            chosen_move: Some(5),
        });
        recorder.finish_game();

        assert_eq!(recorder.finished_games().len(), 2);
        assert_eq!(recorder.last_move().chosen_move, None);

        let averages = per_move_averages(recorder.finished_games());
        assert_eq!(averages.len(), 2);

        // first move index is reached by both games
        assert_eq!(averages[0].games_reached, 2);
        assert!((averages[0].nodes_visited - 20.0).abs() < f64::EPSILON);
        assert!((averages[0].pruned_branches - 3.0).abs() < f64::EPSILON);
        assert_eq!(averages[0].time_taken, Duration::from_millis(20));

        // second move index only by the first game
        assert_eq!(averages[1].games_reached, 1);
        assert!((averages[1].nodes_visited - 20.0).abs() < f64::EPSILON);
        assert_eq!(averages[1].time_taken, Duration::from_millis(20));
    }
}
