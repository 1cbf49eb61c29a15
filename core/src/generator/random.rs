use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Places mines uniformly at random, every subset of the requested size being equally likely.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Generator with a fresh seed drawn from the thread RNG.
    pub fn from_entropy() -> Self {
        use rand::Rng;

        let seed: u64 = rand::rng().random();
        log::debug!("Drawn mine generator seed {}", seed);
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        let total_cells = config.total_cells();
        let size = config.size.to_nd_index();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Board already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(size, true));
        }

        let mut mine_mask: Array2<bool> = Array2::default(size);
        let height = usize::from(config.height());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let indices = rand::seq::index::sample(&mut rng, total_cells.into(), config.mines.into());
        for index in indices.into_iter() {
            // linear index follows the x-major order of `all_coords`
            mine_mask[[index / height, index % height]] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask)?;
        log::debug!(
            "Generated {} mines on a {}x{} board with seed {}",
            layout.mine_count(),
            config.width(),
            config.height(),
            self.seed
        );
        Ok(layout)
    }
}
