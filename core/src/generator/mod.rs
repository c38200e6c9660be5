use crate::*;
pub use random::*;

mod random;

/// Chooses where the mines go for a validated configuration.
pub trait MinefieldGenerator {
    /// Returns `config.mines` distinct locations in placement order.
    fn generate(self, config: GameConfig) -> Vec<CellCount>;
}
