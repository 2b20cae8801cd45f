use super::*;

/// Uniformly random deal, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
    pool: SymbolPool,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64, pool: SymbolPool) -> Self {
        Self { seed, pool }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, pair_count: TileCount) -> Result<Board> {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let board = generate_board(pair_count, &self.pool, &mut rng)?;
        log::debug!(
            "dealt {} tiles from {} symbols, seed {}",
            board.len(),
            self.pool.len(),
            self.seed
        );
        Ok(board)
    }
}
