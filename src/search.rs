//! A depth-limited minimax agent for the computer side

use rayon::prelude::*;

use crate::{
    board::{Board, Piece},
    error::EngineError,
    heuristic::score_position,
};

/// Score of a position the computer has won
pub const WIN_SCORE: i64 = 100_000_000_000_000;
/// Score of a position the human has won
pub const LOSS_SCORE: i64 = -10_000_000_000_000;
/// Score of a full board with no winner
pub const DRAW_SCORE: i64 = 0;

/// Lower bound of the search window, below every reachable score
pub const NEG_INFINITY: i64 = i64::MIN;
/// Upper bound of the search window, above every reachable score
pub const INFINITY: i64 = i64::MAX;

/// The deepest search the game lets a player configure
pub const MAX_DEPTH: u32 = 5;

/// Searches a position for the best computer move
///
/// Returns the chosen column (`None` at a leaf) and the minimax score of the
/// position, scored from the computer's point of view. `board` is never
/// modified; each explored move is played on a copy.
pub fn search(
    board: &Board,
    depth: u32,
    alpha: i64,
    beta: i64,
    maximizing: bool,
) -> Result<(Option<usize>, i64), EngineError> {
    Solver::new(*board).search(depth, alpha, beta, maximizing)
}

/// An agent that picks computer moves with minimax and alpha-beta pruning
///
/// # Position Scoring
/// A position the computer has won scores [`WIN_SCORE`] and one the human
/// has won scores [`LOSS_SCORE`], regardless of how deep in the tree the win
/// happens. A full board without a winner scores 0. Positions at the depth
/// limit are scored with [`score_position`] for the computer.
#[derive(Clone)]
pub struct Solver {
    board: Board,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` for a snapshot of a board
    pub fn new(board: Board) -> Self {
        Self {
            board,
            node_count: 0,
        }
    }

    /// Runs the search from this solver's position with an explicit window
    pub fn search(
        &mut self,
        depth: u32,
        alpha: i64,
        beta: i64,
        maximizing: bool,
    ) -> Result<(Option<usize>, i64), EngineError> {
        let board = self.board;
        self.minimax(&board, depth, alpha, beta, maximizing)
    }

    fn minimax(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i64,
        mut beta: i64,
        maximizing: bool,
    ) -> Result<(Option<usize>, i64), EngineError> {
        self.node_count += 1;

        let candidates = board.valid_columns();
        if depth == 0 || board.is_terminal() {
            return Ok((None, leaf_score(board, depth)));
        }

        // unreachable through the terminal check, kept as a guard
        let first = *candidates.first().ok_or(EngineError::NoValidColumns)?;

        let piece = if maximizing {
            Piece::Computer
        } else {
            Piece::Human
        };
        let mut best_column = first;
        let mut best_score = if maximizing { NEG_INFINITY } else { INFINITY };

        for column in candidates {
            let mut next = *board;
            next.play(column, piece)?;
            let (_, score) = self.minimax(&next, depth - 1, alpha, beta, !maximizing)?;

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = column;
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = column;
                }
                beta = beta.min(best_score);
            }
            // the opponent will never allow this branch
            if alpha >= beta {
                break;
            }
        }

        Ok((Some(best_column), best_score))
    }

    /// Calculates the best computer move and its score with a full window
    pub fn solve(&mut self, depth: u32) -> Result<(Option<usize>, i64), EngineError> {
        self._solve(depth, true)
    }

    /// Calculates the best computer move, logging the score of every root
    /// move to stdout
    pub fn solve_verbose(&mut self, depth: u32) -> Result<(Option<usize>, i64), EngineError> {
        self._solve(depth, false)
    }

    fn _solve(&mut self, depth: u32, silent: bool) -> Result<(Option<usize>, i64), EngineError> {
        if silent {
            return self.search(depth, NEG_INFINITY, INFINITY, true);
        }

        let board = self.board;
        if depth == 0 || board.is_terminal() {
            return self.search(depth, NEG_INFINITY, INFINITY, true);
        }

        // search each root move with a full window so every logged score is exact,
        // the chosen move is the same as in the pruned root loop
        let mut best: Option<(usize, i64)> = None;
        for column in board.valid_columns() {
            let mut next = board;
            next.play(column, Piece::Computer)?;
            let nodes_before = self.node_count;
            let (_, score) = self.minimax(&next, depth - 1, NEG_INFINITY, INFINITY, false)?;
            println!(
                "Column {}: score {}, {} positions",
                column + 1,
                score,
                self.node_count - nodes_before
            );
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((column, score)),
            }
        }
        self.node_count += 1;

        let (column, score) = best.ok_or(EngineError::NoValidColumns)?;
        println!(
            "Search depth: {}, best column: {}, score: {}, positions: {}",
            depth,
            column + 1,
            score,
            self.node_count
        );
        Ok((Some(column), score))
    }

    /// Calculates the best computer move, searching each root move on its
    /// own thread
    ///
    /// Results are compared in ascending column order once every branch has
    /// finished, so the chosen column and score match [`Solver::solve`].
    pub fn solve_parallel(&mut self, depth: u32) -> Result<(Option<usize>, i64), EngineError> {
        let board = self.board;
        if depth == 0 || board.is_terminal() {
            return self.search(depth, NEG_INFINITY, INFINITY, true);
        }

        let results = board
            .valid_columns()
            .into_par_iter()
            .map(|column| {
                let mut next = board;
                next.play(column, Piece::Computer)?;
                let mut solver = Solver::new(next);
                let (_, score) = solver.search(depth - 1, NEG_INFINITY, INFINITY, false)?;
                Ok::<_, EngineError>((column, score, solver.node_count))
            })
            .collect::<Result<Vec<_>, EngineError>>()?;

        self.node_count += 1;
        let mut best: Option<(usize, i64)> = None;
        for (column, score, nodes) in results {
            self.node_count += nodes;
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((column, score)),
            }
        }

        let (column, score) = best.ok_or(EngineError::NoValidColumns)?;
        Ok((Some(column), score))
    }
}

fn leaf_score(board: &Board, depth: u32) -> i64 {
    if board.is_winning_position(Piece::Computer) {
        WIN_SCORE
    } else if board.is_winning_position(Piece::Human) {
        LOSS_SCORE
    } else if board.is_full() {
        DRAW_SCORE
    } else {
        debug_assert_eq!(depth, 0);
        score_position(board, Piece::Computer)
    }
}

impl std::ops::Deref for Solver {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        &self.board
    }
}
