//! Minesweeper board model: mine placement, adjacency counting and the
//! tap/flag/flood-fill state machine, observed by a presentation layer
//! through [`MinefieldEvent`]s.

pub use config::*;
pub use error::*;
pub use event::*;
pub use game::*;
pub use generator::*;
pub use minefield::*;
pub use snapshot::*;
pub use square::*;
pub use types::*;

mod config;
mod error;
mod event;
mod game;
mod generator;
mod minefield;
mod snapshot;
mod square;
mod types;
