use super::*;

/// Uniform placement by rejection sampling: draw any location, retry when it already holds a mine.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seeds from the thread-local generator.
    pub fn from_entropy() -> Self {
        use rand::prelude::*;

        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Vec<CellCount> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut taken = vec![false; total_cells.into()];
        let mut placed = Vec::with_capacity(config.mines.into());

        // a full board would never terminate below
        let wanted = config.mines.min(total_cells);
        if wanted != config.mines {
            log::warn!(
                "Requested {} mines but board only fits {}",
                config.mines,
                total_cells
            );
        }

        while placed.len() < usize::from(wanted) {
            let place: CellCount = rng.random_range(0..total_cells);
            if taken[usize::from(place)] {
                continue;
            }
            taken[usize::from(place)] = true;
            placed.push(place);
        }

        log::trace!("Placed mines with seed {}: {:?}", self.seed, placed);
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exactly_the_requested_distinct_mines() {
        let config = GameConfig::new(10, 10, 15).unwrap();

        for seed in 0..32 {
            let mut mines = RandomMinefieldGenerator::new(seed).generate(config);
            assert_eq!(mines.len(), 15);
            assert!(mines.iter().all(|&m| m < config.total_cells()));
            mines.sort_unstable();
            mines.dedup();
            assert_eq!(mines.len(), 15);
        }
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::expert();
        let a = RandomMinefieldGenerator::new(42).generate(config);
        let b = RandomMinefieldGenerator::new(42).generate(config);
        assert_eq!(a, b);
    }

    #[test]
    fn fills_all_but_one_square() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        let mines = RandomMinefieldGenerator::new(7).generate(config);
        assert_eq!(mines.len(), 8);
    }

    #[test]
    fn every_square_can_receive_a_mine() {
        let config = GameConfig::new(4, 4, 1).unwrap();
        let mut seen = [false; 16];
        for seed in 0..2000 {
            let mines = RandomMinefieldGenerator::new(seed).generate(config);
            seen[usize::from(mines[0])] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
