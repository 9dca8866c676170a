use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::grid::Grid;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Type of collision that ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Lifecycle of a play session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Playing,
    Paused,
    GameOver,
}

/// Everything a renderer needs to draw one frame.
///
/// Snapshots are plain values; holding one never borrows the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Snake cells, tail first and head last
    pub snake: Vec<Position>,
    pub heading: Direction,
    pub fruits: Vec<Position>,
    pub score: u32,
    /// Current tick interval in milliseconds
    pub speed_ms: u64,
    pub state: SessionState,
    pub grid: Grid,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.last().copied()
    }

    pub fn is_alive(&self) -> bool {
        self.state != SessionState::GameOver
    }
}
