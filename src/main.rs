use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kobra::game::{GameConfig, Pilot};
use kobra::modes::PlayMode;
use kobra::render::fit_grid;
use log::{LevelFilter, info, warn};
use simplelog::{Config, WriteLogger};

#[derive(Parser)]
#[command(name = "kobra")]
#[command(version, about = "Terminal snake game with a greedy autopilot")]
struct Cli {
    /// Open the menu, or start a game right away
    #[arg(long, default_value = "menu")]
    mode: Mode,

    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width, walls included (default: fit the terminal, at most 20)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height, walls included (default: fit the terminal, at most 20)
    #[arg(long)]
    height: Option<usize>,

    /// Starting tick interval in milliseconds
    #[arg(long)]
    speed: Option<u64>,

    /// Seed for fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Show the start menu
    Menu,
    /// Play snake with keyboard controls
    Play,
    /// Watch the greedy autopilot play
    Ai,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => self.fitted_config(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(speed) = self.speed {
            config.initial_speed_ms = speed;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    /// Default settings, with the grid shrunk to what the terminal can show
    fn fitted_config(&self) -> GameConfig {
        let mut config = GameConfig::default();
        if self.width.is_some() && self.height.is_some() {
            return config;
        }

        match crossterm::terminal::size() {
            Ok((cols, rows)) => match fit_grid(cols, rows) {
                Some((width, height)) => {
                    config.grid_width = config.grid_width.min(width);
                    config.grid_height = config.grid_height.min(height);
                }
                None => warn!("terminal {}x{} is too small for any grid", cols, rows),
            },
            Err(err) => warn!("could not read terminal size: {}", err),
        }
        config
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        WriteLogger::init(cli.log_level, Config::default(), file)
            .context("Failed to install logger")?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.game_config()?;
    info!(
        "starting on {}x{} grid at {}ms",
        config.grid_width, config.grid_height, config.initial_speed_ms
    );

    let pilot = match cli.mode {
        Mode::Menu => None,
        Mode::Play => Some(Pilot::Human),
        Mode::Ai => Some(Pilot::Ai),
    };

    let mut play_mode = PlayMode::new(config, pilot)?;
    play_mode.run().await?;

    Ok(())
}
