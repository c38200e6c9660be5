use thiserror::Error;

use crate::types::{CellCount, Coord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game configuration: {width}x{height} with {mines} mines")]
    InvalidConfig {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
    #[error("Square index {index} out of range for a board of {len} squares")]
    IndexOutOfRange { index: CellCount, len: CellCount },
    #[error("Saved game is inconsistent: {0}")]
    CorruptState(&'static str),
    #[error("Could not read saved game: {0}")]
    Deserialize(String),
    #[error("Could not write saved game: {0}")]
    Serialize(String),
}

pub type Result<T> = core::result::Result<T, GameError>;
