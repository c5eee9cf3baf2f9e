use ndarray::Array2;

use super::*;

/// Places mines uniformly at random, every layout with the requested mine count being equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineLayoutGenerator {
    seed: u64,
}

impl RandomMineLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineLayoutGenerator for RandomMineLayoutGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;
        use rand::seq::index;

        let total_cells = usize::from(config.total_cells());
        let mines = usize::from(config.mines).min(total_cells);
        if mines < usize::from(config.mines) {
            log::warn!(
                "Minefield already full, requested {} mines but only {} fit",
                config.mines,
                total_cells
            );
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let (size_x, size_y) = config.size;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        // cells are numbered row-major, `x + y * width`
        for place in index::sample(&mut rng, total_cells, mines) {
            let x = place % usize::from(size_x);
            let y = place / usize::from(size_x);
            debug_assert!(y < usize::from(size_y));
            mine_mask[[x, y]] = true;
        }

        log::debug!(
            "Generated {}x{} layout with {} mines from seed {}",
            size_x,
            size_y,
            mines,
            self.seed
        );
        MineLayout::from_mine_mask(mine_mask)
    }
}
