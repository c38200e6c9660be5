use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
        }
    }

    /// Rejects empty boards and mine counts that leave no mine or no safe square.
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked(width, height, mines).validate()
    }

    pub fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 || self.mines == 0 || self.mines >= self.total_cells()
        {
            return Err(GameError::InvalidConfig {
                width: self.width,
                height: self.height,
                mines: self.mines,
            });
        }
        Ok(self)
    }

    pub const fn size(&self) -> Coord2 {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }
}

/// The 10x10 board with 15 mines.
impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 15)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::default(),
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert_eq!(config.validate(), Ok(config));
        }
    }

    #[test]
    fn rejects_degenerate_boards() {
        assert!(GameConfig::new(0, 5, 1).is_err());
        assert!(GameConfig::new(5, 0, 1).is_err());
        assert!(GameConfig::new(5, 5, 0).is_err());
        assert!(GameConfig::new(5, 5, 25).is_err());
        assert_eq!(
            GameConfig::new(2, 2, 4),
            Err(GameError::InvalidConfig {
                width: 2,
                height: 2,
                mines: 4
            })
        );
    }

    #[test]
    fn accepts_one_safe_square() {
        let config = GameConfig::new(2, 2, 3).unwrap();
        assert_eq!(config.safe_cells(), 1);
    }

    #[test]
    fn deserializes_from_json() {
        let config: GameConfig =
            serde_json::from_str(r#"{"width":4,"height":3,"mines":2}"#).unwrap();
        assert_eq!(config, GameConfig::new_unchecked(4, 3, 2));
        assert_eq!(config.total_cells(), 12);
    }
}
