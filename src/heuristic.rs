//! Positional scoring used at the leaves of the search

use crate::board::{Board, Cell, Piece, Window};
use crate::error::EngineError;

/// Four of our pieces in a block
pub const FOUR_SCORE: i64 = 7;
/// Three of our pieces and one empty cell
pub const THREE_SCORE: i64 = 5;
/// Two of our pieces and two empty cells
pub const TWO_SCORE: i64 = 2;
/// Three opponent pieces and one empty cell
pub const OPPONENT_THREE_SCORE: i64 = -4;

/// Scores a single 2x2 window from the point of view of `piece`
pub fn evaluate_window(window: &Window, piece: Piece) -> i64 {
    let own = Cell::from(piece);
    let opponent = Cell::from(piece.opponent());

    let count = |target: Cell| window.iter().filter(|&&c| c == target).count();
    let (own_count, opponent_count, empty_count) =
        (count(own), count(opponent), count(Cell::Empty));

    let mut score = 0;
    if own_count == 4 {
        score += FOUR_SCORE;
    } else if own_count == 3 && empty_count == 1 {
        score += THREE_SCORE;
    } else if own_count == 2 && empty_count == 2 {
        score += TWO_SCORE;
    }

    if opponent_count == 3 && empty_count == 1 {
        score += OPPONENT_THREE_SCORE;
    }
    score
}

/// Sums [`evaluate_window`] over every 2x2 block of the board
pub fn score_position(board: &Board, piece: Piece) -> i64 {
    board
        .windows()
        .map(|window| evaluate_window(&window, piece))
        .sum()
}

/// Picks the column whose immediate drop scores best for `piece`, looking
/// one ply ahead only
///
/// The lowest column wins ties.
pub fn greedy_move(board: &Board, piece: Piece) -> Result<usize, EngineError> {
    let mut best: Option<(usize, i64)> = None;
    for column in board.valid_columns() {
        let mut next = *board;
        next.play(column, piece)?;
        let score = score_position(&next, piece);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((column, score)),
        }
    }
    best.map(|(column, _)| column)
        .ok_or(EngineError::NoValidColumns)
}
