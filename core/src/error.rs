use thiserror::Error;

use crate::{CellCount, Coord, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive, got {width}x{height}")]
    EmptyBoard { width: Coord, height: Coord },
    #[error("Board of {width}x{height} exceeds the {max}x{max} limit", max = Coord::MAX)]
    BoardTooLarge { width: usize, height: usize },
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Declared {declared} mines but the board holds {actual}")]
    MineCountMismatch {
        declared: CellCount,
        actual: CellCount,
    },
    #[error("Cell at {coords:?} is both opened and flagged")]
    OpenedAndFlagged { coords: Coord2 },
    #[error("Coordinates {coords:?} are outside the {size:?} board")]
    OutOfRange { coords: Coord2, size: Coord2 },
}

impl GameError {
    /// Whether this error came from an invalid board rather than a bad coordinate.
    pub const fn is_constraint_violation(&self) -> bool {
        !matches!(self, Self::OutOfRange { .. })
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
