use std::collections::HashSet;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    config::GameConfig,
    error::Result,
    fruit::FruitField,
    grid::Grid,
    navigator,
    snake::Snake,
    state::{CollisionType, GameSnapshot, Position, SessionState},
};

/// Where a fresh snake starts, heading East
const START_POSITION: Position = Position { x: 1, y: 1 };

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn finished(collision_type: Option<CollisionType>) -> Self {
        Self {
            terminated: true,
            info: StepInfo {
                ate_food: false,
                collision_type,
            },
        }
    }
}

/// The game engine that handles all game logic.
///
/// Owns the snake and the fruit; nothing else mutates them. One call to
/// [`GameEngine::tick`] advances the simulation by exactly one cell.
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    fruits: FruitField,
    speed_ms: u64,
    score: u32,
    steps: u32,
    alive: bool,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration, ready to play
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut engine = Self {
            speed_ms: config.initial_speed_ms,
            config,
            grid,
            snake: Snake::new(START_POSITION, Direction::East),
            fruits: FruitField::new(),
            score: 0,
            steps: 0,
            alive: true,
            rng,
        };
        engine.reset()?;
        Ok(engine)
    }

    /// Start from an arbitrary position instead of the usual opening.
    ///
    /// Score is derived from the snake length. Fruit overlapping the snake is
    /// dropped and the field is topped up to at least one fruit.
    pub fn from_parts(config: GameConfig, snake: Snake, fruits: FruitField) -> Result<Self> {
        let mut engine = Self::new(config)?;
        engine.score = (snake.len() - 1) as u32;
        engine.snake = snake;
        engine.fruits.clear();
        for fruit in fruits.iter() {
            if engine.grid.is_interior(fruit) && !engine.snake.contains(fruit) {
                engine.fruits.insert(fruit);
            }
        }
        if engine.fruits.is_empty() {
            let occupied = engine.occupied();
            engine.fruits.spawn(&engine.grid, &occupied, &mut engine.rng)?;
        }
        Ok(engine)
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> Result<()> {
        self.snake = Snake::new(START_POSITION, Direction::East);
        self.speed_ms = self.config.initial_speed_ms;
        self.score = 0;
        self.steps = 0;
        self.alive = true;

        self.fruits.clear();
        let occupied = self.occupied();
        for _ in 0..self.config.fruit_count {
            self.fruits.spawn(&self.grid, &occupied, &mut self.rng)?;
        }

        debug!(
            "engine reset on {}x{} grid with {} fruit",
            self.grid.width(),
            self.grid.height(),
            self.fruits.len()
        );
        Ok(())
    }

    /// Execute one step of the game.
    ///
    /// A present `command` replaces the heading, reversals included. Hitting
    /// a wall ends the game before anything moves; running into the body ends
    /// it with the fatal move kept for display. After the game has ended this
    /// is a no-op.
    pub fn tick(&mut self, command: Option<Direction>) -> Result<StepResult> {
        if !self.alive {
            return Ok(StepResult::finished(None));
        }

        let heading = command.unwrap_or(self.snake.direction);
        let candidate = self.snake.head().moved_in_direction(heading);

        if !self.grid.is_interior(candidate) {
            self.snake.direction = heading;
            self.steps += 1;
            self.game_over(CollisionType::Wall);
            return Ok(StepResult::finished(Some(CollisionType::Wall)));
        }

        let ate_food = self.fruits.contains(candidate);
        if ate_food {
            // The tail stays put this step, so every current cell is taken.
            // Must run before any mutation: a failed spawn leaves the tick
            // unapplied.
            let mut occupied = self.occupied();
            occupied.insert(candidate);
            self.fruits
                .consume(candidate, &self.grid, &occupied, &mut self.rng)?;

            self.score += 1;
            self.speed_ms = self.speed_ms.saturating_sub(self.config.speed_step_ms);
            debug!(
                "fruit eaten at ({}, {}), score {} speed {}ms",
                candidate.x, candidate.y, self.score, self.speed_ms
            );
        }

        self.snake.direction = heading;
        self.steps += 1;
        self.snake.advance(candidate, ate_food);

        if self.snake.collides_with_self() {
            self.game_over(CollisionType::SelfCollision);
            return Ok(StepResult {
                terminated: true,
                info: StepInfo {
                    ate_food,
                    collision_type: Some(CollisionType::SelfCollision),
                },
            });
        }

        Ok(StepResult {
            terminated: false,
            info: StepInfo {
                ate_food,
                collision_type: None,
            },
        })
    }

    /// Direction the greedy autopilot would take from the current position
    pub fn autopilot_direction(&self) -> Direction {
        match self.fruits.closest_to(self.snake.head()) {
            Some(fruit) => navigator::next_direction(&self.snake, fruit, &self.grid),
            None => navigator::avoid_wall(&self.snake, &self.grid),
        }
    }

    /// Capture the current position for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.cells().collect(),
            heading: self.snake.direction,
            fruits: self.fruits.iter().collect(),
            score: self.score,
            speed_ms: self.speed_ms,
            state: if self.alive {
                SessionState::Playing
            } else {
                SessionState::GameOver
            },
            grid: self.grid,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn fruits(&self) -> &FruitField {
        &self.fruits
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    fn occupied(&self) -> HashSet<Position> {
        self.snake.cells().collect()
    }

    fn game_over(&mut self, cause: CollisionType) {
        self.alive = false;
        info!(
            "game over ({:?}) after {} steps, score {}",
            cause, self.steps, self.score
        );
    }
}
