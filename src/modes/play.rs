//! Interactive terminal driver
//!
//! Owns the terminal, the timers and the key stream, and feeds the session
//! one tick at a time. The tick period follows the snake's speed for a human
//! pilot and the fixed autopilot interval otherwise.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{debug, info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

use super::menu::{Menu, MenuItem, MenuKind};
use crate::game::{Command, Direction, GameConfig, GameError, Pilot, SessionController};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at 30 FPS (33ms per frame)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// What is on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Menu(Menu),
    Playing,
    GameOver,
}

pub struct PlayMode {
    session: SessionController,
    config: GameConfig,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    screen: Screen,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl PlayMode {
    /// Open on the start menu, or jump straight into a game with `pilot`
    pub fn new(config: GameConfig, pilot: Option<Pilot>) -> Result<Self> {
        let session =
            SessionController::new(config.clone()).context("Failed to create game session")?;

        let mut mode = Self {
            session,
            config,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            screen: Screen::Menu(Menu::start()),
            should_quit: false,
            pending_direction: None,
        };

        if let Some(pilot) = pilot {
            mode.begin(pilot)?;
        }
        Ok(mode)
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_period = self.tick_period();
        let mut tick_timer = periodic(tick_period);

        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    if self.screen == Screen::Playing {
                        self.update_game()?;
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        match &self.screen {
                            Screen::Menu(menu) => {
                                self.renderer.render_menu(frame, menu, &self.metrics);
                            }
                            Screen::Playing | Screen::GameOver => {
                                let snapshot = self.session.snapshot();
                                self.renderer.render(frame, &snapshot, &self.metrics);
                            }
                        }
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.quit();
                }
            }

            if self.should_quit {
                break;
            }

            // Speed changes take effect from the next tick
            let period = self.tick_period();
            if period != tick_period {
                debug!("tick period {:?} -> {:?}", tick_period, period);
                tick_period = period;
                tick_timer = periodic_after(period);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.handle_action(action)?;
        }

        Ok(())
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        if action == KeyAction::Command(Command::Quit) {
            self.quit();
            return Ok(());
        }

        match &mut self.screen {
            Screen::Menu(menu) => match action {
                KeyAction::Command(Command::Move(Direction::North)) => menu.move_up(),
                KeyAction::Command(Command::Move(Direction::South)) => menu.move_down(),
                KeyAction::Select => {
                    let item = menu.selected();
                    self.activate(item)?;
                }
                // Esc on the pause menu goes straight back to the game
                KeyAction::Command(Command::Pause) if menu.kind == MenuKind::Pause => {
                    self.resume();
                }
                _ => {}
            },
            Screen::Playing => match action {
                KeyAction::Command(Command::Move(direction)) => {
                    // The autopilot does its own steering
                    if self.session.pilot() == Pilot::Human {
                        self.pending_direction = Some(direction);
                    }
                }
                KeyAction::Command(Command::Pause) => {
                    if self.session.pause() {
                        self.metrics.on_pause();
                        self.pending_direction = None;
                        self.screen = Screen::Menu(Menu::pause());
                    }
                }
                KeyAction::Restart => self.begin(self.session.pilot())?,
                _ => {}
            },
            Screen::GameOver => match action {
                KeyAction::Restart => self.begin(self.session.pilot())?,
                KeyAction::Select => self.screen = Screen::Menu(Menu::start()),
                _ => {}
            },
        }

        Ok(())
    }

    fn activate(&mut self, item: MenuItem) -> Result<()> {
        match item {
            MenuItem::Play => self.begin(Pilot::Human)?,
            MenuItem::PlayAi => self.begin(Pilot::Ai)?,
            MenuItem::Resume => self.resume(),
            MenuItem::MainMenu => self.screen = Screen::Menu(Menu::start()),
            MenuItem::Quit => self.quit(),
        }
        Ok(())
    }

    fn begin(&mut self, pilot: Pilot) -> Result<()> {
        self.session
            .restart_with(pilot)
            .context("Failed to start a new game")?;
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.screen = Screen::Playing;
        Ok(())
    }

    fn resume(&mut self) {
        if self.session.resume() {
            self.metrics.on_resume();
            self.screen = Screen::Playing;
        }
    }

    fn update_game(&mut self) -> Result<()> {
        // Read once and clear, so a key press steers exactly one tick
        let command = self.pending_direction.take();

        let result = match self.session.tick(command) {
            Ok(result) => result,
            // Nowhere left to put fruit: the game cannot go on
            Err(GameError::NoSpaceAvailable) => {
                warn!("board is full, ending the game");
                self.session.finish();
                self.end_game();
                return Ok(());
            }
            Err(err) => return Err(anyhow::Error::new(err).context("Game tick failed")),
        };

        if result.is_some_and(|result| result.terminated) {
            self.end_game();
        }

        Ok(())
    }

    fn end_game(&mut self) {
        let score = self.session.snapshot().score;
        self.metrics.on_game_over(score);
        self.screen = Screen::GameOver;
    }

    fn quit(&mut self) {
        self.session.quit();
        self.should_quit = true;
    }

    fn tick_period(&self) -> Duration {
        let millis = match self.session.pilot() {
            Pilot::Human => self.session.snapshot().speed_ms.max(self.config.min_speed_ms),
            Pilot::Ai => self.config.ai_tick_ms,
        };
        Duration::from_millis(millis.max(1))
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        info!(
            "exiting after {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );
        Ok(())
    }
}

fn periodic(period: Duration) -> Interval {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

fn periodic_after(period: Duration) -> Interval {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}
