use core::ops::Index;
use ndarray::Array2;

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// What a single tap did to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    NoChange,
    Flagged,
    Unflagged,
    Revealed,
    Exploded,
    Won,
}

impl TapOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// The grid of squares and the tap/reveal/flag state machine.
///
/// Squares are stored row-major in a `height x width` array so iteration
/// order matches [`Square::location`].
#[derive(Clone, Debug, PartialEq)]
pub struct Minefield {
    pub(crate) config: GameConfig,
    pub(crate) squares: Array2<Square>,
    pub(crate) remaining_safe_count: SafeCount,
}

impl Minefield {
    /// Random layout seeded from the thread-local generator.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::generate(config, RandomMinefieldGenerator::from_entropy())
    }

    pub fn generate(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let config = config.validate()?;
        let mines = generator.generate(config);
        Self::with_mines(config, &mines)
    }

    /// Builds a known layout, mostly useful for tests and replays.
    pub fn from_mine_locations(width: Coord, height: Coord, mines: &[CellCount]) -> Result<Self> {
        let count = CellCount::try_from(mines.len()).map_err(|_| GameError::InvalidConfig {
            width,
            height,
            mines: CellCount::MAX,
        })?;
        let config = GameConfig::new(width, height, count)?;
        Self::with_mines(config, mines)
    }

    fn with_mines(config: GameConfig, mines: &[CellCount]) -> Result<Self> {
        let width = config.width;
        let mut field = Self {
            config,
            squares: Array2::from_shape_fn(
                [usize::from(config.height), usize::from(config.width)],
                |(y, x)| Square::new(location_of((x as Coord, y as Coord), width)),
            ),
            remaining_safe_count: config.safe_cells().into(),
        };

        for &location in mines {
            field.validate_location(location)?;
            let square = field.square_mut(location);
            if square.is_mine {
                return Err(GameError::InvalidConfig {
                    width: config.width,
                    height: config.height,
                    mines: config.mines,
                });
            }
            square.is_mine = true;
        }

        if mines.len() != usize::from(config.mines) {
            return Err(GameError::InvalidConfig {
                width: config.width,
                height: config.height,
                mines: config.mines,
            });
        }

        for &location in mines {
            for neighbor in field.neighbors(location) {
                field.square_mut(neighbor).adjacent_mine_count += 1;
            }
        }

        log::debug!(
            "New {}x{} minefield with {} mines",
            config.width,
            config.height,
            config.mines
        );
        Ok(field)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    /// Number of squares on the board.
    pub fn len(&self) -> CellCount {
        self.config.total_cells()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining_safe_count(&self) -> SafeCount {
        self.remaining_safe_count
    }

    pub fn state(&self) -> GameState {
        match self.remaining_safe_count {
            LOST_SENTINEL => GameState::Lost,
            0 => GameState::Won,
            _ => GameState::InProgress,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    /// All squares ordered by location.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    pub fn square(&self, location: CellCount) -> Result<&Square> {
        self.validate_location(location)?;
        Ok(&self.squares[self.nd_index(location)])
    }

    pub fn flagged_count(&self) -> CellCount {
        // never exceeds the board size, which already fits
        self.squares()
            .filter(|square| square.covering.is_flagged())
            .count() as CellCount
    }

    pub fn coords_of(&self, location: CellCount) -> Coord2 {
        coords_of(location, self.config.width)
    }

    pub fn index_of(&self, coords: Coord2) -> Result<CellCount> {
        let (width, height) = self.config.size();
        if coords.0 < width && coords.1 < height {
            Ok(location_of(coords, width))
        } else {
            Err(GameError::IndexOutOfRange {
                index: location_of(coords, width),
                len: self.len(),
            })
        }
    }

    /// Locations of the in-bounds neighbors of `location`.
    pub fn neighbors(&self, location: CellCount) -> impl Iterator<Item = CellCount> + use<> {
        NeighborIter::new(self.coords_of(location), self.config.size()).locations()
    }

    pub fn validate_location(&self, location: CellCount) -> Result<CellCount> {
        if location < self.len() {
            Ok(location)
        } else {
            Err(GameError::IndexOutOfRange {
                index: location,
                len: self.len(),
            })
        }
    }

    /// Applies a player tap, emitting one event per square that changed.
    ///
    /// In flag mode a covered or flagged square toggles its flag. Otherwise
    /// flagged squares are ignored, a mine ends the game and anything else
    /// starts a flood-fill reveal. Taps after the game ended change nothing.
    pub fn tap(
        &mut self,
        location: CellCount,
        flag_mode: bool,
        events: &mut (impl EventSink + ?Sized),
    ) -> Result<TapOutcome> {
        let location = self.validate_location(location)?;

        if self.is_finished() {
            return Ok(TapOutcome::NoChange);
        }

        let square = self.square_mut(location);

        if flag_mode && !square.covering.is_uncovered() {
            let outcome = if square.covering.is_covered() {
                square.covering = Covering::Flagged;
                TapOutcome::Flagged
            } else {
                square.covering = Covering::Covered;
                TapOutcome::Unflagged
            };
            events.emit(MinefieldEvent::SquareChanged(*square));
            return Ok(outcome);
        }

        if square.covering.is_flagged() {
            return Ok(TapOutcome::NoChange);
        }

        if square.is_mine {
            square.covering = Covering::Uncovered;
            let square = *square;
            self.remaining_safe_count = LOST_SENTINEL;
            log::debug!("Mine hit at {:?}", self.coords_of(location));
            events.emit(MinefieldEvent::SquareChanged(square));
            return Ok(TapOutcome::Exploded);
        }

        Ok(match self.reveal(location, events) {
            0 => TapOutcome::NoChange,
            _ if self.remaining_safe_count == 0 => TapOutcome::Won,
            _ => TapOutcome::Revealed,
        })
    }

    /// Convenience over [`Minefield::tap`] that collects the emitted events.
    pub fn tap_collect(
        &mut self,
        location: CellCount,
        flag_mode: bool,
    ) -> Result<(TapOutcome, Vec<MinefieldEvent>)> {
        let mut events = Vec::new();
        let outcome = self.tap(location, flag_mode, &mut events)?;
        Ok((outcome, events))
    }

    /// Flood fill from a safe square, returning how many squares were uncovered.
    fn reveal(&mut self, start: CellCount, events: &mut (impl EventSink + ?Sized)) -> CellCount {
        let mut revealed = 0;
        let mut to_visit = vec![start];

        while let Some(location) = to_visit.pop() {
            let square = self.square_mut(location);

            // flagged, uncovered or already visited
            if !square.covering.is_covered() {
                continue;
            }

            square.covering = Covering::Uncovered;
            let square = *square;
            self.remaining_safe_count -= 1;
            revealed += 1;
            log::trace!(
                "Uncovered {:?}, adjacent mines: {}",
                self.coords_of(location),
                square.adjacent_mine_count
            );
            events.emit(MinefieldEvent::SquareChanged(square));

            if square.adjacent_mine_count == 0 {
                to_visit.extend(
                    self.neighbors(location)
                        .filter(|&neighbor| self[neighbor].covering.is_covered()),
                );
            }
        }

        revealed
    }

    fn nd_index(&self, location: CellCount) -> [usize; 2] {
        self.coords_of(location).to_nd_index()
    }

    fn square_mut(&mut self, location: CellCount) -> &mut Square {
        let index = self.nd_index(location);
        &mut self.squares[index]
    }
}

impl Index<CellCount> for Minefield {
    type Output = Square;

    fn index(&self, location: CellCount) -> &Self::Output {
        &self.squares[self.nd_index(location)]
    }
}
