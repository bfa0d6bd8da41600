use core::fmt;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Reveal,
    Flag,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Reveal => "reveal",
            Self::Flag => "flag",
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reveal" => Ok(Self::Reveal),
            "flag" => Ok(Self::Flag),
            _ => Err(GameError::UnknownAction),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot returned by [`GameSession::step`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub board: Array2<VisibleCell>,
    pub num_mines: CellCount,
    pub game_over: bool,
    pub won: bool,
}

/// Snapshot returned by [`GameSession::state`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Array2<VisibleCell>,
    pub num_mines: CellCount,
    pub game_over: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
enum LayoutSource {
    Random,
    Preset(MineLayout),
}

/// One game: a board plus the bookkeeping that decides when it is over.
///
/// Sessions share nothing, so any number of them can run side by side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSession {
    config: GameConfig,
    source: LayoutSource,
    board: Board,
    game_over: bool,
    won: bool,
    moves: u32,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self> {
        let board = Board::new(&config)?;
        Ok(Self::with_board(config, LayoutSource::Random, board))
    }

    /// Session that plays `layout` again on every reset.
    pub fn from_layout(layout: MineLayout, mask: AdjacencyMask) -> Result<Self> {
        let config = layout.game_config().with_mask(mask);
        let board = Board::generate(&config, &layout)?;
        Ok(Self::with_board(config, LayoutSource::Preset(layout), board))
    }

    fn with_board(config: GameConfig, source: LayoutSource, board: Board) -> Self {
        Self {
            config,
            source,
            board,
            game_over: false,
            won: false,
            moves: 0,
        }
    }

    /// Throws the board away and builds a new one from the stored config.
    ///
    /// A seeded session gets the same layout back.
    pub fn reset(&mut self) -> Result<()> {
        self.board = match &self.source {
            LayoutSource::Random => Board::new(&self.config)?,
            LayoutSource::Preset(layout) => Board::generate(&self.config, layout)?,
        };
        self.game_over = false;
        self.won = false;
        self.moves = 0;
        log::debug!("Session reset (seed: {:?})", self.config.seed);
        Ok(())
    }

    /// Applies one action. After the game is over this only reports state.
    pub fn step(&mut self, action: Action, row: Coord, col: Coord) -> StepResult {
        if self.game_over {
            log::trace!("({}, {}) {} ignored, game is over", row, col, action);
            return self.step_result();
        }

        match action {
            Action::Reveal => {
                self.moves = self.moves.saturating_add(1);
                if self.board.reveal(row, col) {
                    self.end_game(false);
                } else if self.board.is_complete() {
                    self.end_game(true);
                }
            }
            Action::Flag => {
                self.board.flag(row, col);
            }
        }

        self.step_result()
    }

    pub fn state(&self) -> GameState {
        GameState {
            board: self.visible_board(),
            num_mines: self.board.mine_count(),
            game_over: self.game_over,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_win(&self) -> bool {
        self.game_over && self.won
    }

    /// Share of safe cells revealed so far, from `0.0` to `1.0` on a win.
    pub fn score(&self) -> f64 {
        let safe_cells = self.board.layout().safe_cell_count();
        if safe_cells == 0 {
            return 1.0;
        }
        f64::from(self.board.safe_revealed_count()) / f64::from(safe_cells)
    }

    /// Reveal actions taken since the last reset.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn flags_placed(&self) -> CellCount {
        self.board.flagged_count()
    }

    /// Whether acting on the cell can change anything: inside the grid and
    /// neither revealed nor flagged.
    pub fn is_valid_action(&self, row: Coord, col: Coord) -> bool {
        self.board.is_valid_coord(row, col)
            && !self.board.is_revealed(row, col)
            && !self.board.is_flagged(row, col)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mask(&self) -> &AdjacencyMask {
        self.board.mask()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn end_game(&mut self, won: bool) {
        self.game_over = true;
        self.won = won;
        log::debug!(
            "Game {} after {} moves, score {:.2}",
            if won { "won" } else { "lost" },
            self.moves,
            self.score()
        );
    }

    fn visible_board(&self) -> Array2<VisibleCell> {
        self.board.visible_state(self.game_over, self.won)
    }

    fn step_result(&self) -> StepResult {
        StepResult {
            board: self.visible_board(),
            num_mines: self.board.mine_count(),
            game_over: self.game_over,
            won: self.won,
        }
    }
}
