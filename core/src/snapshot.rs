use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Everything needed to put a game back exactly where it was.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub config: GameConfig,
    pub squares: Vec<Square>,
    pub remaining_safe_count: SafeCount,
    #[serde(default)]
    pub flag_mode: bool,
}

impl SavedGame {
    pub fn new(minefield: &Minefield, flag_mode: bool) -> Self {
        Self {
            config: minefield.config(),
            squares: minefield.squares().copied().collect(),
            remaining_safe_count: minefield.remaining_safe_count(),
            flag_mode,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| GameError::Serialize(err.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| GameError::Deserialize(err.to_string()))
    }

    /// Rebuilds the minefield, rejecting anything a real game could not have produced.
    pub fn into_minefield(self) -> Result<Minefield> {
        let config = self
            .config
            .validate()
            .map_err(|_| GameError::CorruptState("invalid board configuration"))?;

        if self.squares.len() != usize::from(config.total_cells()) {
            return Err(GameError::CorruptState("square count does not match board size"));
        }

        let mut mines = 0;
        let mut uncovered_safe: SafeCount = 0;
        let mut uncovered_mine = false;
        for (location, square) in self.squares.iter().enumerate() {
            if usize::from(square.location) != location {
                return Err(GameError::CorruptState("square stored out of order"));
            }
            match (square.is_mine, square.covering) {
                (true, Covering::Uncovered) => uncovered_mine = true,
                (false, Covering::Uncovered) => uncovered_safe += 1,
                _ => {}
            }
            mines += CellCount::from(square.is_mine);
        }

        if mines != config.mines {
            return Err(GameError::CorruptState("mine count does not match configuration"));
        }

        let squares = Array2::from_shape_vec(
            [usize::from(config.height), usize::from(config.width)],
            self.squares,
        )
        .map_err(|_| GameError::CorruptState("square count does not match board size"))?;

        let minefield = Minefield {
            config,
            squares,
            remaining_safe_count: self.remaining_safe_count,
        };

        for square in minefield.squares() {
            let expected = minefield
                .neighbors(square.location)
                .filter(|&neighbor| minefield[neighbor].is_mine)
                .count();
            if usize::from(square.adjacent_mine_count) != expected {
                return Err(GameError::CorruptState("adjacent mine count is wrong"));
            }
        }

        let expected_remaining = SafeCount::from(config.safe_cells()) - uncovered_safe;
        let consistent = if uncovered_mine {
            self.remaining_safe_count == LOST_SENTINEL
        } else {
            self.remaining_safe_count == expected_remaining
        };
        if !consistent {
            return Err(GameError::CorruptState("remaining safe count is inconsistent"));
        }

        Ok(minefield)
    }
}
