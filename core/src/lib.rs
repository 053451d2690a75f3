#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

/// Board dimensions and mine count of a game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Rejects non-positive dimensions and mine counts, and mine counts that
    /// would leave no safe cell.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Result<Self> {
        if size_x <= 0 || size_y <= 0 || mines <= 0 || mines >= mult(size_x, size_y) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self {
            size: (size_x, size_y),
            mines,
        })
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Ground truth of where the mines are. Never changes once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineField {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (size_x, size_y) = mine_mask.dim();
        let size: Coord2 = (
            size_x.try_into().map_err(|_| GameError::InvalidConfiguration)?,
            size_y.try_into().map_err(|_| GameError::InvalidConfiguration)?,
        );
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        GameConfig::new(size, mine_count)?;
        Ok(Self {
            mine_mask,
            mine_count,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        if size.0 <= 0 || size.1 <= 0 {
            return Err(GameError::InvalidConfiguration);
        }
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.mine_mask.dim();
        (x as Coord, y as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Out-of-bounds coordinates never hold a mine.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self.mine_at(coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords).filter(|&pos| self.mine_at(pos)).count() as u8
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }

    pub(crate) fn mine_mask(&self) -> &Array2<bool> {
        &self.mine_mask
    }

    /// Callers bounds check `coords` first.
    pub(crate) fn mine_at(&self, coords: Coord2) -> bool {
        self.mine_mask[coords.to_nd_index()]
    }
}
