//! Errors raised by the engine when a caller breaks a precondition

use thiserror::Error;

use crate::board::Piece;

/// The broad class of an [`EngineError`]
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ErrorKind {
    /// An argument was outside its valid range
    InvalidArgument,
    /// The operation is not possible in the current state
    InvalidState,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("column {column} is out of range, columns must be between 0 and {max}")]
    ColumnOutOfRange { column: usize, max: usize },
    #[error("row {row} is out of range, rows must be between 0 and {max}")]
    RowOutOfRange { row: usize, max: usize },
    #[error("depth {depth} is out of range ({min}-{max})")]
    DepthOutOfRange { depth: u32, min: u32, max: u32 },
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    #[error("no valid columns remain")]
    NoValidColumns,
    #[error("the game is already over")]
    GameOver,
    #[error("it is the {expected:?} player's turn")]
    OutOfTurn { expected: Piece },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::ColumnOutOfRange { .. }
            | EngineError::RowOutOfRange { .. }
            | EngineError::DepthOutOfRange { .. } => ErrorKind::InvalidArgument,
            EngineError::ColumnFull { .. }
            | EngineError::NoValidColumns
            | EngineError::GameOver
            | EngineError::OutOfTurn { .. } => ErrorKind::InvalidState,
        }
    }
}
