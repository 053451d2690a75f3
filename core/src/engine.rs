use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    #[default]
    InProgress,
    Lost,
    Won,
}

impl GameOutcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Result of a successful move: the game outcome after the move, and what
/// happened to the targeted cell.
pub type MoveResult = (GameOutcome, CellOutcome);

/// Owns the mine field and everything the player has done to it.
///
/// Only flagging can win a game: the player wins the moment the set of flagged
/// cells equals the set of mines. Revealing a mine loses it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    mine_field: MineField,
    board: Array2<CellStatus>,
    flagged_count: Saturating<CellCount>,
    outcome: GameOutcome,
    triggered_mine: Option<Coord2>,
}

impl GameEngine {
    pub fn new(mine_field: MineField) -> Self {
        let size = mine_field.size();
        Self {
            mine_field,
            board: Array2::default(size.to_nd_index()),
            flagged_count: Saturating(0),
            outcome: Default::default(),
            triggered_mine: None,
        }
    }

    /// Validates the configuration and lays out a fresh random field.
    pub fn new_game(width: Coord, height: Coord, mines: CellCount, seed: u64) -> Result<Self> {
        let config = GameConfig::new((width, height), mines)?;
        let mine_field = RandomMineFieldGenerator::new(seed).generate(config);
        log::info!("New {}x{} game with {} mines", width, height, mines);
        Ok(Self::new(mine_field))
    }

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_field.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_field.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn mines_left(&self) -> CellCount {
        self.mine_field.mine_count() - self.flagged_count.0
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<CellStatus> {
        let coords = self.mine_field.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    /// The mine that was revealed, once the game is lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// What the player currently knows, indexed `[x, y]`.
    pub fn display_grid(&self) -> &Array2<CellStatus> {
        &self.board
    }

    /// Every cell with its mine flag and current status, indexed `[x, y]`.
    /// Meant for the end-of-game board; does not change any state.
    pub fn reveal_full_field(&self) -> Array2<FieldCell> {
        let mut field = Array2::default(self.board.dim());
        ndarray::Zip::from(&mut field)
            .and(self.mine_field.mine_mask())
            .and(&self.board)
            .for_each(|cell: &mut FieldCell, &is_mine, &status| {
                *cell = FieldCell { is_mine, status };
            });
        field
    }

    /// Reveals one cell. A flagged cell is revealed as well, losing its flag.
    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveResult> {
        use CellStatus::*;

        let coords = self.mine_field.validate_coords(coords)?;
        self.check_in_progress()?;

        match self.board[coords.to_nd_index()] {
            Hidden => {}
            Flagged => self.flagged_count -= 1,
            Revealed(_) | Exploded => return Err(GameError::IllegalMove),
        }

        if self.mine_field.mine_at(coords) {
            self.board[coords.to_nd_index()] = Exploded;
            self.triggered_mine = Some(coords);
            self.outcome = GameOutcome::Lost;
            log::info!("Mine revealed at {:?}, game lost", coords);
            return Ok((self.outcome, CellOutcome::Exploded));
        }

        let adjacent_mines = self.mine_field.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = Revealed(adjacent_mines);
        log::debug!("Revealed {:?}: {} adjacent mines", coords, adjacent_mines);
        Ok((self.outcome, CellOutcome::Revealed(adjacent_mines)))
    }

    /// Flags a hidden cell or unflags a flagged one. Setting a flag may win the
    /// game.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MoveResult> {
        use CellStatus::*;

        let coords = self.mine_field.validate_coords(coords)?;
        self.check_in_progress()?;

        let cell_outcome = match self.board[coords.to_nd_index()] {
            Hidden => {
                self.board[coords.to_nd_index()] = Flagged;
                self.flagged_count += 1;
                if self.all_mines_flagged() {
                    self.outcome = GameOutcome::Won;
                    log::info!("All mines flagged, game won");
                }
                CellOutcome::Flagged
            }
            Flagged => {
                self.board[coords.to_nd_index()] = Hidden;
                self.flagged_count -= 1;
                CellOutcome::Unflagged
            }
            Revealed(_) | Exploded => return Err(GameError::IllegalMove),
        };
        log::debug!("Flag toggled at {:?}: {:?}", coords, cell_outcome);

        Ok((self.outcome, cell_outcome))
    }

    /// True only when the flagged cells are exactly the mines. Stops at the
    /// first flag that sits on a safe cell.
    fn all_mines_flagged(&self) -> bool {
        if self.flagged_count.0 != self.mine_field.mine_count() {
            return false;
        }

        self.board
            .iter()
            .zip(self.mine_field.mine_mask().iter())
            .all(|(&status, &is_mine)| (status == CellStatus::Flagged) == is_mine)
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.outcome.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
