use core::fmt;
use ndarray::Array2;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

/// Mine field plus the per-cell revealed and flagged state of one game.
///
/// Coordinates are `(row, col)` and are never an error: anything outside the
/// grid is a no-op for every operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    layout: MineLayout,
    mask: AdjacencyMask,
    values: Array2<CellValue>,
    revealed: Array2<bool>,
    flagged: Array2<bool>,
    safe_revealed: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Builds a board with a random layout, seeded by `config.seed` when set.
    pub fn new(config: &GameConfig) -> Result<Self> {
        Self::generate(config, &RandomMinefieldGenerator::new(config.seed))
    }

    pub fn generate(config: &GameConfig, generator: &impl MinefieldGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        Ok(Self::build(layout, config.mask.clone()))
    }

    /// Board over an explicit layout, rejected like any other configuration
    /// if it has no safe cell or an empty grid.
    pub fn from_layout(layout: MineLayout, mask: AdjacencyMask) -> Result<Self> {
        let config = layout.game_config().with_mask(mask);
        Self::generate(&config, &layout)
    }

    fn build(layout: MineLayout, mask: AdjacencyMask) -> Self {
        let size = layout.size();
        let values = Array2::from_shape_fn(size.to_nd_index(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if layout[coords] {
                CellValue::Mine
            } else {
                CellValue::Count(layout.adjacent_mine_count(coords, &mask))
            }
        });
        log::debug!(
            "New {}x{} board with {} mines",
            size.1,
            size.0,
            layout.mine_count()
        );

        Self {
            layout,
            mask,
            values,
            revealed: Array2::default(size.to_nd_index()),
            flagged: Array2::default(size.to_nd_index()),
            safe_revealed: 0,
            flagged_count: 0,
        }
    }

    /// Grid bounds as `(height, width)`.
    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn mask(&self) -> &AdjacencyMask {
        &self.mask
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn mine_count(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Revealed cells that are not mines.
    pub fn safe_revealed_count(&self) -> CellCount {
        self.safe_revealed
    }

    pub fn is_valid_coord(&self, row: Coord, col: Coord) -> bool {
        in_bounds((row, col), self.size())
    }

    pub fn value_at(&self, row: Coord, col: Coord) -> Option<CellValue> {
        self.index(row, col).map(|idx| self.values[idx])
    }

    pub fn is_mine(&self, row: Coord, col: Coord) -> bool {
        self.index(row, col)
            .is_some_and(|idx| self.values[idx].is_mine())
    }

    pub fn is_revealed(&self, row: Coord, col: Coord) -> bool {
        self.index(row, col).is_some_and(|idx| self.revealed[idx])
    }

    pub fn is_flagged(&self, row: Coord, col: Coord) -> bool {
        self.index(row, col).is_some_and(|idx| self.flagged[idx])
    }

    /// Every safe cell is revealed. Flags play no part in this.
    pub fn is_complete(&self) -> bool {
        self.safe_revealed == self.layout.safe_cell_count()
    }

    /// Toggles the flag on a cell that is not revealed yet.
    pub fn flag(&mut self, row: Coord, col: Coord) -> MarkOutcome {
        let Some(idx) = self.index(row, col) else {
            return MarkOutcome::NoChange;
        };
        if self.revealed[idx] {
            return MarkOutcome::NoChange;
        }

        let flagged = !self.flagged[idx];
        self.flagged[idx] = flagged;
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("({}, {}) flagged: {}", row, col, flagged);
        MarkOutcome::Changed
    }

    /// Reveals a cell and returns whether a mine was hit.
    ///
    /// A hidden, unflagged cell is opened and a zero count goes on to reveal
    /// every neighbor under the mask. An already revealed number whose flagged
    /// neighbors match it reveals the hidden, unflagged neighbors it had at
    /// that moment (chord). Neighbors are revisited through this same rule,
    /// depth first and in mask order, so a revealed number reached by a flood
    /// fill may chord too. Everything else is a no-op.
    pub fn reveal(&mut self, row: Coord, col: Coord) -> bool {
        if !self.is_valid_coord(row, col) {
            return false;
        }

        // each frame holds the neighbors still to visit for one pending cell
        let mut frames: Vec<smallvec::IntoIter<[Coord2; 8]>> = Vec::new();
        let mut hit_mine = self.reveal_step((row, col), &mut frames);

        while let Some(frame) = frames.last_mut() {
            match frame.next() {
                Some(coords) => hit_mine |= self.reveal_step(coords, &mut frames),
                None => {
                    frames.pop();
                }
            }
        }

        if hit_mine && !self.layout[(row, col)] {
            log::warn!("({}, {}) cascade revealed a mine", row, col);
        }
        hit_mine
    }

    /// Handles one in-bounds cell and pushes a frame if it cascades.
    fn reveal_step(
        &mut self,
        coords: Coord2,
        frames: &mut Vec<smallvec::IntoIter<[Coord2; 8]>>,
    ) -> bool {
        let bounds = self.size();
        let idx = coords.to_nd_index();
        let value = self.values[idx];

        if !self.revealed[idx] && !self.flagged[idx] {
            self.revealed[idx] = true;
            match value {
                CellValue::Mine => {
                    log::trace!("{:?} mine revealed", coords);
                    return true;
                }
                CellValue::Count(count) => {
                    self.safe_revealed += 1;
                    if count == 0 {
                        let neighbors: SmallVec<[Coord2; 8]> =
                            self.mask.iter_neighbors(coords, bounds).collect();
                        frames.push(neighbors.into_iter());
                    }
                }
            }
        } else if self.revealed[idx]
            && let CellValue::Count(count) = value
            && count > 0
        {
            let mut flags = 0usize;
            let mut hidden: SmallVec<[Coord2; 8]> = SmallVec::new();
            for pos in self.mask.iter_neighbors(coords, bounds) {
                let pos_idx = pos.to_nd_index();
                if self.flagged[pos_idx] {
                    flags += 1;
                } else if !self.revealed[pos_idx] {
                    hidden.push(pos);
                }
            }

            if flags == usize::from(count) {
                log::trace!("{:?} chord opens {} cells", coords, hidden.len());
                frames.push(hidden.into_iter());
            }
        }
        false
    }

    /// Player-visible grid. While the game runs no mine is ever disclosed.
    pub fn visible_state(&self, game_over: bool, won: bool) -> Array2<VisibleCell> {
        Array2::from_shape_fn(self.values.dim(), |idx| {
            self.visible_cell(idx, game_over, won)
        })
    }

    fn visible_cell(&self, idx: (usize, usize), game_over: bool, won: bool) -> VisibleCell {
        use VisibleCell::*;

        let revealed = self.revealed[idx];
        let flagged = self.flagged[idx];

        match (self.values[idx], game_over) {
            (CellValue::Mine, false) if flagged => Flag,
            (CellValue::Mine, false) => Hidden,
            (CellValue::Mine, true) if won => Flag,
            (CellValue::Mine, true) if revealed => ExplodedMine,
            (CellValue::Mine, true) if flagged => Flag,
            (CellValue::Mine, true) => RevealedMineOnLoss,
            (CellValue::Count(_), true) if flagged => IncorrectFlag,
            (CellValue::Count(_), false) if flagged => Flag,
            (CellValue::Count(count), _) if revealed => Count(count),
            (CellValue::Count(_), _) => Hidden,
        }
    }

    fn index(&self, row: Coord, col: Coord) -> Option<[usize; 2]> {
        self.is_valid_coord(row, col)
            .then(|| (row, col).to_nd_index())
    }
}

/// Dumps the hidden solution, `*` for mines and the count otherwise.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.values.rows() {
            for value in row {
                match value {
                    CellValue::Mine => write!(f, " * ")?,
                    CellValue::Count(count) => write!(f, " {count} ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
