use thiserror::Error;

/// Errors raised by the game core.
///
/// Collisions are not errors: they end the game through the engine state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The grid has no room for the initial snake and its fruit
    #[error("grid {width}x{height} is too small to play on")]
    InvalidGrid { width: usize, height: usize },

    /// Every interior cell is occupied, so no fruit can be placed
    #[error("no free interior cell left to spawn fruit")]
    NoSpaceAvailable,

    #[error("invalid game configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
