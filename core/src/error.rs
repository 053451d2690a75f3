use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: dimensions and mine count must be positive, with fewer mines than cells")]
    InvalidConfiguration,
    #[error("Coordinates are outside the board")]
    OutOfBounds,
    #[error("Move is not allowed on a cell in this state")]
    IllegalMove,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
