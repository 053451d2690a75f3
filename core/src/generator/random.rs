use super::*;

/// Places mines uniformly at random, without replacement, from a fixed seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineFieldGenerator {
    seed: u64,
}

impl RandomMineFieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineFieldGenerator for RandomMineFieldGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        use rand::prelude::*;
        use rand::seq::index;

        let (size_x, size_y) = config.size;
        let width = size_x as usize;
        let total_cells = config.total_cells() as usize;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        // linear index is `y * width + x`
        for linear in index::sample(&mut rng, total_cells, config.mines as usize) {
            mine_mask[[linear % width, linear / width]] = true;
        }

        log::debug!(
            "Generated {}x{} minefield with {} mines (seed {})",
            size_x,
            size_y,
            config.mines,
            self.seed
        );
        MineField {
            mine_mask,
            mine_count: config.mines,
        }
    }
}
