use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod session;
mod tile;
mod types;

/// Everything needed to build a fresh board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub mines: CellCount,
    /// Same seed, size and mine count always give the same layout.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub mask: AdjacencyMask,
}

impl GameConfig {
    pub fn new_unchecked(width: Coord, height: Coord, mines: CellCount) -> Self {
        Self {
            width,
            height,
            mines,
            seed: None,
            mask: AdjacencyMask::default(),
        }
    }

    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(width, height, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn beginner() -> Self {
        Self::new_unchecked(8, 8, 10)
    }

    pub fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub fn expert() -> Self {
        Self::new_unchecked(30, 16, 99)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mask(mut self, mask: AdjacencyMask) -> Self {
        self.mask = mask;
        self
    }

    /// At least one safe cell is required, so `mines < width * height`.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }

        Ok(())
    }

    /// Grid bounds as `(height, width)`, the order coordinates are given in.
    pub const fn size(&self) -> Coord2 {
        (self.height, self.width)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Where the mines are, independent of any play state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "MineMask")]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

/// Serialized form of a layout; the count is always derived from the mask.
#[derive(Deserialize)]
struct MineMask {
    mine_mask: Array2<bool>,
}

impl From<MineMask> for MineLayout {
    fn from(repr: MineMask) -> Self {
        Self::from_mine_mask(repr.mine_mask)
    }
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Layout of `size = (height, width)` with mines at the given `(row, col)`s.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 <= 0 || size.1 <= 0 {
            return Err(GameError::InvalidSize {
                width: size.1,
                height: size.0,
            });
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        let (height, width) = self.size();
        GameConfig::new_unchecked(width, height, self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2, mask: &AdjacencyMask) -> u8 {
        let count = mask
            .iter_neighbors(coords, self.size())
            .filter(|&pos| self[pos])
            .count();
        u8::try_from(count).unwrap_or(u8::MAX)
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}
