use thiserror::Error;

use crate::TermInt;

/// Fatal conditions raised by the grid and the movement engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("terminal is too small to play ({rows} rows x {cols} columns)")]
    TerminalTooSmall { rows: TermInt, cols: TermInt },

    #[error("could not allocate a {rows}x{cols} grid")]
    Allocation { rows: TermInt, cols: TermInt },

    /// The snake could not be followed through the grid. Continuing would
    /// read or write cells that no longer belong to it.
    #[error("snake is broken at ({row}, {col}): {reason}")]
    Inconsistent {
        row: TermInt,
        col: TermInt,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
