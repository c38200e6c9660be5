use core::fmt;

use crate::*;

/// Summary shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Lost,
    Won,
    Remaining(SafeCount),
}

impl From<&Minefield> for GameStatus {
    fn from(minefield: &Minefield) -> Self {
        match minefield.state() {
            GameState::Lost => Self::Lost,
            GameState::Won => Self::Won,
            GameState::InProgress => Self::Remaining(minefield.remaining_safe_count()),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lost => f.write_str("Boom... you lose!"),
            Self::Won => f.write_str("None... you win!"),
            Self::Remaining(count) => write!(f, "{count}"),
        }
    }
}

/// A running game: the minefield, the player's input mode and whoever is watching.
#[derive(Debug)]
pub struct Game {
    minefield: Minefield,
    flag_mode: bool,
    listeners: Listeners,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::from_minefield(Minefield::new(config)?))
    }

    pub fn from_minefield(minefield: Minefield) -> Self {
        Self {
            minefield,
            flag_mode: false,
            listeners: Listeners::new(),
        }
    }

    pub fn minefield(&self) -> &Minefield {
        &self.minefield
    }

    pub fn flag_mode(&self) -> bool {
        self.flag_mode
    }

    pub fn set_flag_mode(&mut self, flag_mode: bool) {
        self.flag_mode = flag_mode;
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::from(&self.minefield)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&MinefieldEvent) + 'static) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Taps using the current flag mode.
    pub fn tap(&mut self, location: CellCount) -> Result<TapOutcome> {
        self.tap_square(location, self.flag_mode)
    }

    pub fn tap_square(&mut self, location: CellCount, flag_mode: bool) -> Result<TapOutcome> {
        self.minefield.tap(location, flag_mode, &mut self.listeners)
    }

    /// Deals a fresh board with the same configuration.
    pub fn new_game(&mut self) -> Result<()> {
        self.new_game_with(RandomMinefieldGenerator::from_entropy())
    }

    pub fn new_game_with(&mut self, generator: impl MinefieldGenerator) -> Result<()> {
        self.replace_minefield(Minefield::generate(self.minefield.config(), generator)?);
        Ok(())
    }

    /// Swaps in another board and tells listeners to redraw everything.
    pub fn replace_minefield(&mut self, minefield: Minefield) {
        log::debug!("Starting new {:?} game", minefield.config());
        self.minefield = minefield;
        self.listeners.emit(MinefieldEvent::FullRefresh);
    }

    pub fn save(&self) -> Result<String> {
        SavedGame::new(&self.minefield, self.flag_mode).to_json()
    }

    pub fn restore(json: &str) -> Result<Self> {
        let saved = SavedGame::from_json(json)?;
        let flag_mode = saved.flag_mode;
        let mut game = Self::from_minefield(saved.into_minefield()?);
        game.flag_mode = flag_mode;
        Ok(game)
    }

    /// Restores `json`, or starts a fresh `config` game when it cannot be used.
    pub fn restore_or_new(json: &str, config: GameConfig) -> Result<Self> {
        match Self::restore(json) {
            Ok(game) => Ok(game),
            Err(err) => {
                log::warn!("Discarding saved game: {err}");
                Self::new(config)
            }
        }
    }

    /// Loads `json` into this game in place, keeping the listeners.
    pub fn load(&mut self, json: &str) -> Result<()> {
        let saved = SavedGame::from_json(json)?;
        let flag_mode = saved.flag_mode;
        self.replace_minefield(saved.into_minefield()?);
        self.flag_mode = flag_mode;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn game(width: Coord, height: Coord, mines: &[CellCount]) -> Game {
        Game::from_minefield(Minefield::from_mine_locations(width, height, mines).unwrap())
    }

    fn recorder(game: &mut Game) -> Rc<RefCell<Vec<MinefieldEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        game.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn status_text_follows_the_counter() {
        let mut game = game(3, 3, &[4]);
        assert_eq!(game.status().to_string(), "8");

        game.tap(0).unwrap();
        assert_eq!(game.status(), GameStatus::Remaining(7));

        game.tap(4).unwrap();
        assert_eq!(game.status().to_string(), "Boom... you lose!");

        let mut game = self::game(2, 1, &[0]);
        game.tap(1).unwrap();
        assert_eq!(game.status().to_string(), "None... you win!");
    }

    #[test]
    fn tap_uses_current_flag_mode() {
        let mut game = game(3, 3, &[4]);
        let events = recorder(&mut game);

        game.set_flag_mode(true);
        assert_eq!(game.tap(0).unwrap(), TapOutcome::Flagged);
        game.set_flag_mode(false);
        assert_eq!(game.tap(0).unwrap(), TapOutcome::NoChange);
        assert_eq!(game.tap_square(0, true).unwrap(), TapOutcome::Unflagged);
        assert_eq!(game.tap(0).unwrap(), TapOutcome::Revealed);

        let coverings: Vec<_> = events
            .borrow()
            .iter()
            .filter_map(|event| event.square().map(|square| square.covering))
            .collect();
        assert_eq!(
            coverings,
            vec![Covering::Flagged, Covering::Covered, Covering::Uncovered]
        );
    }

    #[test]
    fn new_game_broadcasts_full_refresh() {
        let mut game = game(3, 3, &[4]);
        game.tap(0).unwrap();
        let events = recorder(&mut game);

        game.new_game_with(RandomMinefieldGenerator::new(9)).unwrap();

        assert_eq!(*events.borrow(), vec![MinefieldEvent::FullRefresh]);
        assert_eq!(game.minefield().config(), GameConfig::new_unchecked(3, 3, 1));
        assert_eq!(game.minefield().remaining_safe_count(), 8);
        assert!(game.minefield().squares().all(|s| s.covering.is_covered()));
    }

    #[test]
    fn unsubscribed_listener_stops_receiving() {
        let mut game = game(3, 3, &[4]);
        let events = Rc::new(RefCell::new(0));
        let id = {
            let events = Rc::clone(&events);
            game.subscribe(move |_| *events.borrow_mut() += 1)
        };

        game.tap(0).unwrap();
        assert!(game.unsubscribe(id));
        game.tap(1).unwrap();

        assert_eq!(*events.borrow(), 1);
    }

    #[test]
    fn save_and_restore_round_trip() {
        let mut game = game(5, 4, &[3, 12, 19]);
        game.tap(0).unwrap();
        game.tap_square(18, true).unwrap();
        game.set_flag_mode(true);

        let restored = Game::restore(&game.save().unwrap()).unwrap();

        assert_eq!(restored.minefield(), game.minefield());
        assert!(restored.flag_mode());
        assert_eq!(restored.status(), game.status());
    }

    #[test]
    fn load_keeps_listeners_and_refreshes() {
        let mut source = game(3, 3, &[4]);
        source.tap(0).unwrap();
        let json = source.save().unwrap();

        let mut game = game(4, 4, &[0]);
        let events = recorder(&mut game);
        game.load(&json).unwrap();

        assert_eq!(game.minefield(), source.minefield());
        assert_eq!(*events.borrow(), vec![MinefieldEvent::FullRefresh]);
    }

    #[test]
    fn restore_or_new_falls_back_on_corrupt_state() {
        let config = GameConfig::beginner();

        let game = Game::restore_or_new("definitely not a game", config).unwrap();
        assert_eq!(game.minefield().config(), config);
        assert_eq!(game.status(), GameStatus::Remaining(71));
        assert!(!game.flag_mode());

        let mut saved = SavedGame::new(self::game(3, 3, &[4]).minefield(), true);
        saved.squares[0].adjacent_mine_count = 5;
        let json = saved.to_json().unwrap();
        assert!(matches!(
            Game::restore(&json),
            Err(GameError::CorruptState(_))
        ));
        let game = Game::restore_or_new(&json, config).unwrap();
        assert_eq!(game.minefield().config(), config);
    }
}
