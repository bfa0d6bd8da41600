use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Uniform placement without replacement, reproducible when seeded.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RandomMinefieldGenerator {
    seed: Option<u64>,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let total_cells = config.total_cells() as usize;
        let width = config.width as usize;
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        for cell in index::sample(&mut rng, total_cells, config.mines as usize) {
            mines[[cell / width, cell % width]] = true;
        }

        let layout = MineLayout::from_mine_mask(mines);
        // double check mine count
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated layout count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        log::debug!(
            "Generated {}x{} layout with {} mines (seed: {:?})",
            config.width,
            config.height,
            layout.mine_count(),
            self.seed
        );
        Ok(layout)
    }
}
