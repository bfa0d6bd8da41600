use crate::*;
pub use random::*;

mod random;

pub trait MinefieldGenerator {
    fn generate(&self, config: &GameConfig) -> Result<MineLayout>;
}

/// A fixed layout generates itself, as long as it fits the requested board.
impl MinefieldGenerator for MineLayout {
    fn generate(&self, config: &GameConfig) -> Result<MineLayout> {
        config.validate()?;
        if self.size() != config.size() || self.mine_count() != config.mines {
            return Err(GameError::LayoutMismatch);
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_layout_must_match_config() {
        let layout = MineLayout::from_mine_coords((2, 3), &[(0, 1)]).unwrap();

        assert_eq!(
            layout.generate(&GameConfig::new_unchecked(3, 2, 1)),
            Ok(layout.clone())
        );
        assert_eq!(
            layout.generate(&GameConfig::new_unchecked(2, 3, 1)),
            Err(GameError::LayoutMismatch)
        );
        assert_eq!(
            layout.generate(&GameConfig::new_unchecked(3, 2, 2)),
            Err(GameError::LayoutMismatch)
        );
    }
}
