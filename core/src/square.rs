use serde::{Deserialize, Serialize};

use crate::types::CellCount;

/// Player-visible state of a square.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Covering {
    #[default]
    Covered,
    Uncovered,
    Flagged,
}

impl Covering {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered)
    }

    pub const fn is_uncovered(self) -> bool {
        matches!(self, Self::Uncovered)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// One cell of the grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub location: CellCount,
    pub covering: Covering,
    pub is_mine: bool,
    pub adjacent_mine_count: u8,
}

impl Square {
    pub const fn new(location: CellCount) -> Self {
        Self {
            location,
            covering: Covering::Covered,
            is_mine: false,
            adjacent_mine_count: 0,
        }
    }
}
