//! Core game logic module for Kobra
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it decoded commands once per tick and draw the snapshots it returns.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod fruit;
pub mod grid;
pub mod navigator;
pub mod session;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use error::GameError;
pub use fruit::FruitField;
pub use grid::Grid;
pub use session::{Pilot, SessionController};
pub use snake::Snake;
pub use state::{CollisionType, GameSnapshot, Position, SessionState};
