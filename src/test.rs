#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Board, Cell, Piece};
    use crate::error::{EngineError, ErrorKind};
    use crate::heuristic::{evaluate_window, greedy_move, score_position};
    use crate::search::{search, Solver, INFINITY, LOSS_SCORE, NEG_INFINITY, WIN_SCORE};
    use crate::session::{GameConfig, GameSession, GameState};
    use crate::{HEIGHT, WIDTH};

    // plain minimax without pruning, for checking the pruned search
    fn exhaustive(board: &Board, depth: u32, maximizing: bool) -> i64 {
        if depth == 0 || board.is_terminal() {
            return search(board, 0, NEG_INFINITY, INFINITY, true).unwrap().1;
        }
        let piece = if maximizing { Piece::Computer } else { Piece::Human };
        let scores = board.valid_columns().into_iter().map(|column| {
            let mut next = *board;
            next.play(column, piece).unwrap();
            exhaustive(&next, depth - 1, !maximizing)
        });
        if maximizing {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    // every 2x2 block holds both colours
    fn checkerboard() -> Result<Board> {
        "XOXOXOX
         OXOXOXO
         XOXOXOX
         OXOXOXO
         XOXOXOX
         OXOXOXO"
            .parse()
    }

    fn sample_positions() -> Result<Vec<Board>> {
        let mut positions = vec![Board::new()];
        positions.push(
            ".......
             .......
             .......
             .......
             ...O...
             ..XOX.."
                .parse()?,
        );
        positions.push(
            ".......
             .......
             .......
             X......
             XO..O..
             XXOOXO."
                .parse()?,
        );
        positions.push(
            "..O....
             ..X.O..
             .XOXO..
             .OXOX..
             XXOXO.O
             OXXOXXO"
                .parse()?,
        );
        Ok(positions)
    }

    #[test]
    pub fn gravity() -> Result<()> {
        let mut board = Board::new();
        let mut piece = Piece::Human;
        for column in [3, 3, 0, 3, 6, 3, 3, 0, 3].iter() {
            let row = board.next_open_row(*column)?;
            board.drop_piece(row, *column, piece)?;
            piece = piece.opponent();
        }

        for column in 0..WIDTH {
            let mut seen_empty = false;
            for row in 0..HEIGHT {
                let empty = board.get(row, column)?.is_empty();
                assert!(!(seen_empty && !empty), "gap in column {}", column);
                seen_empty |= empty;
            }
        }
        assert!(!board.is_valid_column(3)?);
        assert_eq!(board.valid_columns(), vec![0, 1, 2, 4, 5, 6]);
        assert_eq!(board.num_pieces(), 9);
        Ok(())
    }

    #[test]
    pub fn board_errors() -> Result<()> {
        let mut board = Board::new();

        let err = board.is_valid_column(WIDTH).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = board.drop_piece(HEIGHT, 0, Piece::Human).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        for _ in 0..HEIGHT {
            board.play(2, Piece::Computer)?;
        }
        let err = board.next_open_row(2).unwrap_err();
        assert_eq!(err, EngineError::ColumnFull { column: 2 });
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        Ok(())
    }

    #[test]
    pub fn board_text() -> Result<()> {
        let board = sample_positions()?.remove(2);
        let reparsed: Board = board.to_string().parse()?;
        assert!(board == reparsed);
        assert_eq!(board.get(0, 0)?, Cell::Human);
        assert_eq!(board.get(2, 0)?, Cell::Human);
        assert_eq!(board.get(1, 1)?, Cell::Computer);

        let floating = ".......
                        .......
                        .......
                        .......
                        ...O...
                        ......."
            .parse::<Board>();
        assert!(floating.is_err());
        assert!("XO".parse::<Board>().is_err());
        Ok(())
    }

    #[test]
    pub fn win_detection() -> Result<()> {
        let mut board = Board::new();
        board.drop_piece(0, 0, Piece::Human)?;
        board.drop_piece(0, 1, Piece::Human)?;
        board.drop_piece(1, 0, Piece::Human)?;
        assert!(!board.is_winning_position(Piece::Human));
        board.drop_piece(1, 1, Piece::Human)?;

        assert!(board.is_winning_position(Piece::Human));
        assert!(!board.is_winning_position(Piece::Computer));
        assert!(board.is_terminal());
        // terminality only depends on the board contents
        assert!(board.is_terminal());
        Ok(())
    }

    #[test]
    pub fn lines_do_not_win() -> Result<()> {
        let board: Board = ".......
                            .......
                            O......
                            O......
                            O......
                            OXXXX.."
            .parse()?;
        assert!(!board.is_winning_position(Piece::Human));
        assert!(!board.is_winning_position(Piece::Computer));
        assert!(!board.is_terminal());
        Ok(())
    }

    #[test]
    pub fn window_scores() {
        use crate::board::Cell::{Computer as C, Empty as E, Human as H};

        assert_eq!(evaluate_window(&[C, C, C, C], Piece::Computer), 7);
        assert_eq!(evaluate_window(&[C, C, E, C], Piece::Computer), 5);
        assert_eq!(evaluate_window(&[C, E, E, C], Piece::Computer), 2);
        assert_eq!(evaluate_window(&[H, H, E, H], Piece::Computer), -4);
        assert_eq!(evaluate_window(&[H, H, E, H], Piece::Human), 5);
        assert_eq!(evaluate_window(&[C, C, H, C], Piece::Computer), 0);
        assert_eq!(evaluate_window(&[C, E, E, E], Piece::Computer), 0);
        assert_eq!(evaluate_window(&[C, H, E, E], Piece::Computer), 0);
        assert_eq!(evaluate_window(&[E, E, E, E], Piece::Human), 0);
    }

    #[test]
    pub fn position_scores() -> Result<()> {
        let block: Board = ".......
                            .......
                            .......
                            .......
                            OO.....
                            OO....."
            .parse()?;
        assert_eq!(score_position(&block, Piece::Computer), 7 + 2 + 2);
        assert_eq!(score_position(&block, Piece::Human), 0);

        let threat: Board = ".......
                             .......
                             .......
                             .......
                             X......
                             XX....."
            .parse()?;
        assert_eq!(score_position(&threat, Piece::Computer), -4);
        assert_eq!(score_position(&Board::new(), Piece::Computer), 0);
        Ok(())
    }

    #[test]
    pub fn greedy() -> Result<()> {
        // every single drop scores the same on an empty board
        assert_eq!(greedy_move(&Board::new(), Piece::Computer)?, 0);

        let board: Board = ".......
                            .......
                            .......
                            .......
                            .......
                            ....OO."
            .parse()?;
        // dropping into column 4 or 5 makes a 3+1 window and a 2+2 window
        assert_eq!(greedy_move(&board, Piece::Computer)?, 4);

        let err = greedy_move(&checkerboard()?, Piece::Human).unwrap_err();
        assert_eq!(err, EngineError::NoValidColumns);
        Ok(())
    }

    #[test]
    pub fn depth_zero() -> Result<()> {
        for board in sample_positions()? {
            let result = search(&board, 0, NEG_INFINITY, INFINITY, true)?;
            assert_eq!(result, (None, score_position(&board, Piece::Computer)));
        }
        Ok(())
    }

    #[test]
    pub fn full_board_tie() -> Result<()> {
        let board = checkerboard()?;
        assert!(board.is_terminal());
        assert!(board.valid_columns().is_empty());
        for depth in 0..4 {
            assert_eq!(search(&board, depth, NEG_INFINITY, INFINITY, true)?, (None, 0));
            assert_eq!(search(&board, depth, NEG_INFINITY, INFINITY, false)?, (None, 0));
        }
        Ok(())
    }

    #[test]
    pub fn terminal_scores() -> Result<()> {
        let won: Board = ".......
                          .......
                          .......
                          .......
                          OO.X...
                          OOXX..."
            .parse()?;
        assert_eq!(search(&won, 3, NEG_INFINITY, INFINITY, true)?, (None, WIN_SCORE));

        let lost: Board = ".......
                           .......
                           .......
                           .......
                           XX.O...
                           XXOO..."
            .parse()?;
        assert_eq!(search(&lost, 3, NEG_INFINITY, INFINITY, false)?, (None, LOSS_SCORE));
        Ok(())
    }

    #[test]
    pub fn takes_immediate_win() -> Result<()> {
        let board: Board = ".......
                            .......
                            .......
                            .......
                            O......
                            OO.XXX."
            .parse()?;
        let mut solver = Solver::new(board);
        assert_eq!(solver.solve(1)?, (Some(1), WIN_SCORE));
        Ok(())
    }

    #[test]
    pub fn blocks_human_threat() -> Result<()> {
        let board: Board = ".......
                            .......
                            .......
                            .......
                            X..O...
                            XX.O..O"
            .parse()?;
        let mut solver = Solver::new(board);
        let (column, score) = solver.solve(2)?;
        assert_eq!(column, Some(1));
        assert!(score > LOSS_SCORE);

        // at depth 1 the threat is beyond the horizon
        let (_, shallow) = Solver::new(board).solve(1)?;
        assert!(shallow > LOSS_SCORE);
        Ok(())
    }

    #[test]
    pub fn tie_break_lowest_column() -> Result<()> {
        // a lone piece never scores, so every first move is worth 0
        let (column, score) = search(&Board::new(), 1, NEG_INFINITY, INFINITY, true)?;
        assert_eq!((column, score), (Some(0), 0));

        // mirror positions score the same, the lower column is kept
        let board: Board = ".......
                            .......
                            .......
                            .......
                            .......
                            O.....O"
            .parse()?;
        let (column, _) = search(&board, 1, NEG_INFINITY, INFINITY, true)?;
        assert_eq!(column, Some(0));
        Ok(())
    }

    #[test]
    pub fn alpha_beta_equivalence() -> Result<()> {
        for board in sample_positions()? {
            for depth in 0..=4 {
                for &maximizing in [true, false].iter() {
                    let (_, pruned) = search(&board, depth, NEG_INFINITY, INFINITY, maximizing)?;
                    assert_eq!(
                        pruned,
                        exhaustive(&board, depth, maximizing),
                        "depth {} on\n{}",
                        depth,
                        board
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn pruning_visits_fewer_nodes() -> Result<()> {
        let mut solver = Solver::new(Board::new());
        solver.solve(4)?;
        // a full tree of depth 4 has 1 + 7 + 49 + 343 + 2401 nodes
        assert!(solver.node_count < 2801);
        assert!(solver.node_count > 0);
        Ok(())
    }

    #[test]
    pub fn parallel_matches_sequential() -> Result<()> {
        for board in sample_positions()? {
            for depth in 0..=4 {
                let sequential = Solver::new(board).solve(depth)?;
                let parallel = Solver::new(board).solve_parallel(depth)?;
                let verbose = Solver::new(board).solve_verbose(depth)?;
                assert_eq!(sequential, parallel);
                assert_eq!(sequential, verbose);
            }
        }
        Ok(())
    }

    #[test]
    pub fn search_leaves_board_unchanged() -> Result<()> {
        for board in sample_positions()? {
            let before = board;
            search(&board, 3, NEG_INFINITY, INFINITY, true)?;
            Solver::new(board).solve_parallel(3)?;
            assert!(board == before);
        }
        Ok(())
    }

    #[test]
    pub fn config_depth() {
        assert!(GameConfig::new("ada", Piece::Human, 1).is_ok());
        assert!(GameConfig::new("ada", Piece::Human, 5).is_ok());
        for &depth in [0, 6].iter() {
            let err = GameConfig::new("ada", Piece::Human, depth).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        }
    }

    #[test]
    pub fn session_turns() -> Result<()> {
        let mut session = GameSession::new(GameConfig::new("ada", Piece::Human, 2)?);
        assert_eq!(session.to_move(), Piece::Human);

        let err = session.play_computer(false).unwrap_err();
        assert_eq!(err, EngineError::OutOfTurn { expected: Piece::Human });

        assert_eq!(session.play_human(3)?, GameState::Playing);
        let computer_move = session.play_computer(false)?;
        assert!(computer_move.column < WIDTH);
        assert!(computer_move.node_count > 0);
        assert_eq!(session.to_move(), Piece::Human);
        assert_eq!(session.stats().moves, 2);
        assert_eq!(session.board().num_pieces(), 2);
        Ok(())
    }

    #[test]
    pub fn session_human_win() -> Result<()> {
        let board: Board = ".......
                            .......
                            .......
                            .......
                            X......
                            XX..O.O"
            .parse()?;
        let config = GameConfig::new("ada", Piece::Human, 3)?;
        let mut session = GameSession::with_board(config, board, Piece::Human);

        assert_eq!(session.play_human(1)?, GameState::HumanWin);
        assert_eq!(session.stats().moves, 1);
        assert_eq!(session.play_human(2).unwrap_err(), EngineError::GameOver);
        assert_eq!(session.play_computer(false).unwrap_err(), EngineError::GameOver);
        Ok(())
    }

    #[test]
    pub fn session_computer_win() -> Result<()> {
        let board: Board = ".......
                            .......
                            .......
                            .......
                            O......
                            OO.XXX."
            .parse()?;
        let config = GameConfig::new("ada", Piece::Human, 1)?;
        let mut session = GameSession::with_board(config, board, Piece::Computer);

        let computer_move = session.play_computer(true)?;
        assert_eq!((computer_move.column, computer_move.score), (1, WIN_SCORE));
        assert_eq!(session.state(), GameState::ComputerWin);
        Ok(())
    }

    #[test]
    pub fn session_draw() -> Result<()> {
        let board: Board = "OXOXOX.
                            XOXOXOX
                            OXOXOXO
                            XOXOXOX
                            OXOXOXO
                            XOXOXOX"
            .parse()?;
        let config = GameConfig::new("ada", Piece::Human, 4)?;
        let mut session = GameSession::with_board(config, board, Piece::Computer);
        assert_eq!(session.state(), GameState::Playing);

        let computer_move = session.play_computer(false)?;
        assert_eq!((computer_move.column, computer_move.score), (6, 0));
        assert_eq!(session.state(), GameState::Draw);
        assert!(session.board().is_full());
        Ok(())
    }

    #[test]
    pub fn session_rejects_full_column() -> Result<()> {
        let config = GameConfig::new("ada", Piece::Human, 1)?;
        let mut session = GameSession::new(config);
        let err = session.play_human(WIDTH).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let full: Board = "X......
                           O......
                           X......
                           O......
                           X......
                           O......"
            .parse()?;
        let mut session = GameSession::with_board(session.config().clone(), full, Piece::Human);
        assert_eq!(session.play_human(0).unwrap_err(), EngineError::ColumnFull { column: 0 });
        assert_eq!(session.to_move(), Piece::Human);
        Ok(())
    }
}
