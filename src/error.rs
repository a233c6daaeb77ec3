use crate::Position;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Position {0} is out of bounds")]
    OutOfBounds(Position),
    #[error("Cannot make a move in the current game state")]
    InvalidGameState,
    #[error("Cell at {0} is already revealed")]
    AlreadyRevealed(Position),
    #[error("Too many mines ({mines}) for board size {height}x{width}")]
    TooManyMines {
        height: usize,
        width: usize,
        mines: usize,
    },
    #[error("Board dimensions must be non-zero, got {height}x{width}")]
    EmptyBoard { height: usize, width: usize },
    #[error("Board of {height}x{width} exceeds the {max} cell limit")]
    BoardTooLarge {
        height: usize,
        width: usize,
        max: usize,
    },
    #[error("Knowledge base is inconsistent: {0}")]
    Inconsistent(String),
}
