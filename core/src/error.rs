use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be positive, got {width}x{height}")]
    InvalidSize { width: Coord, height: Coord },
    #[error("Too many mines: {mines} requested but the board has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout does not match the configured board size")]
    LayoutMismatch,
    #[error("Unknown action, expected \"reveal\" or \"flag\"")]
    UnknownAction,
}

pub type Result<T> = core::result::Result<T, GameError>;
