//! Game state owned by the front end: turn order, outcome and statistics

use std::time::{Duration, Instant};

use crate::{
    board::{Board, Piece},
    error::EngineError,
    search::{Solver, MAX_DEPTH},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    HumanWin,
    ComputerWin,
    Draw,
}

/// Settings chosen once before the game starts
#[derive(Clone, Debug)]
pub struct GameConfig {
    pub player_name: String,
    pub first: Piece,
    depth: u32,
}

impl GameConfig {
    pub fn new<S: Into<String>>(player_name: S, first: Piece, depth: u32) -> Result<Self, EngineError> {
        if depth < 1 || depth > MAX_DEPTH {
            return Err(EngineError::DepthOutOfRange {
                depth,
                min: 1,
                max: MAX_DEPTH,
            });
        }
        Ok(Self {
            player_name: player_name.into(),
            first,
            depth,
        })
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// The result of a computer turn
#[derive(Copy, Clone, Debug)]
pub struct ComputerMove {
    pub column: usize,
    pub score: i64,
    pub node_count: usize,
}

#[derive(Copy, Clone, Debug)]
pub struct GameStats {
    pub moves: usize,
    pub elapsed: Duration,
}

pub struct GameSession {
    config: GameConfig,
    board: Board,
    to_move: Piece,
    state: GameState,
    moves: usize,
    started: Instant,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self {
            to_move: config.first,
            config,
            board: Board::new(),
            state: GameState::Playing,
            moves: 0,
            started: Instant::now(),
        }
    }

    /// Starts a session from an existing position, counting moves from zero
    pub fn with_board(config: GameConfig, board: Board, to_move: Piece) -> Self {
        let mut session = Self::new(config);
        session.board = board;
        session.to_move = to_move;
        session.state = if board.is_winning_position(Piece::Human) {
            GameState::HumanWin
        } else if board.is_winning_position(Piece::Computer) {
            GameState::ComputerWin
        } else if board.valid_columns().is_empty() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            moves: self.moves,
            elapsed: self.started.elapsed(),
        }
    }

    fn check_turn(&self, piece: Piece) -> Result<(), EngineError> {
        if self.state != GameState::Playing {
            return Err(EngineError::GameOver);
        }
        if self.to_move != piece {
            return Err(EngineError::OutOfTurn {
                expected: self.to_move,
            });
        }
        Ok(())
    }

    fn apply(&mut self, column: usize, piece: Piece) -> Result<GameState, EngineError> {
        if !self.board.is_valid_column(column)? {
            return Err(EngineError::ColumnFull { column });
        }
        let row = self.board.next_open_row(column)?;
        self.board.drop_piece(row, column, piece)?;
        self.moves += 1;

        self.state = if self.board.is_winning_position(piece) {
            match piece {
                Piece::Human => GameState::HumanWin,
                Piece::Computer => GameState::ComputerWin,
            }
        } else if self.board.valid_columns().is_empty() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.to_move = piece.opponent();
        Ok(self.state)
    }

    /// Plays the human's piece into a zero-indexed column
    pub fn play_human(&mut self, column: usize) -> Result<GameState, EngineError> {
        self.check_turn(Piece::Human)?;
        self.apply(column, Piece::Human)
    }

    /// Searches for and plays the computer's move at the configured depth
    pub fn play_computer(&mut self, parallel: bool) -> Result<ComputerMove, EngineError> {
        self.check_turn(Piece::Computer)?;

        let mut solver = Solver::new(self.board);
        let (column, score) = if parallel {
            solver.solve_parallel(self.config.depth)?
        } else {
            solver.solve(self.config.depth)?
        };
        let column = column.ok_or(EngineError::NoValidColumns)?;
        self.apply(column, Piece::Computer)?;

        Ok(ComputerMove {
            column,
            score,
            node_count: solver.node_count,
        })
    }
}
