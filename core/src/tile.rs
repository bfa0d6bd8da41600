use serde::{Deserialize, Serialize};

/// Hidden truth of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellValue {
    Mine,
    /// Mines among the cell's neighbors under the board's mask.
    Count(u8),
}

impl CellValue {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Count(count) => Some(count),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibleCell {
    Hidden,
    Flag,
    Count(u8),
    /// The mine that ended the game.
    ExplodedMine,
    /// Unflagged mine disclosed after a loss.
    RevealedMineOnLoss,
    /// Flag placed on a safe cell, disclosed once the game is over.
    IncorrectFlag,
}

impl VisibleCell {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::ExplodedMine | Self::RevealedMineOnLoss)
    }
}

impl Default for VisibleCell {
    fn default() -> Self {
        Self::Hidden
    }
}
