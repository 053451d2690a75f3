use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    Flagged,
    /// Safe cell, with the number of mines around it.
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
}

impl CellStatus {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// What a single move did to the targeted cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellOutcome {
    Revealed(u8),
    Exploded,
    Flagged,
    Unflagged,
}

/// One cell of the end-of-game snapshot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCell {
    pub is_mine: bool,
    pub status: CellStatus,
}
