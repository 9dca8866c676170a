use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::error::GameError;
use super::grid::Grid;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid, walls included
    pub grid_width: usize,
    /// Height of the game grid, walls included
    pub grid_height: usize,

    /// Tick interval in milliseconds at the start of a game
    pub initial_speed_ms: u64,
    /// How much the tick interval shrinks per fruit eaten
    pub speed_step_ms: u64,
    /// Shortest tick interval the driver will honor
    pub min_speed_ms: u64,
    /// Tick interval used while the autopilot steers
    pub ai_tick_ms: u64,

    /// Number of fruit kept on the board
    pub fruit_count: usize,
    /// Seed for fruit placement; random when unset
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_speed_ms: 400,
            speed_step_ms: 10,
            min_speed_ms: 50,
            ai_tick_ms: 100,
            fruit_count: 1,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Build the grid described by this configuration
    pub fn grid(&self) -> Result<Grid, GameError> {
        Grid::new(self.grid_width, self.grid_height)
    }

    /// Check that a game can be played with these settings
    pub fn validate(&self) -> Result<(), GameError> {
        if self.fruit_count == 0 {
            return Err(GameError::InvalidConfig(
                "fruit_count must be at least 1".to_string(),
            ));
        }
        if self.initial_speed_ms == 0 {
            return Err(GameError::InvalidConfig(
                "initial_speed_ms must be positive".to_string(),
            ));
        }

        // Room for the one-cell snake plus every fruit
        let grid = self.grid()?;
        if grid.interior_area() < 1 + self.fruit_count {
            return Err(GameError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        Ok(())
    }
}
