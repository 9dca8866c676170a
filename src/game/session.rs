use log::{info, warn};

use super::{
    action::Direction,
    config::GameConfig,
    engine::{GameEngine, StepResult},
    error::Result,
    state::{GameSnapshot, SessionState},
};

/// Who steers the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pilot {
    Human,
    /// The greedy autopilot picks a direction whenever no command is given
    Ai,
}

/// State machine around a [`GameEngine`], driven by the menu and input layer.
///
/// Commands that do not apply to the current state are no-ops: they return
/// `false` (or `Ok(None)` for [`SessionController::tick`]) and leave every
/// piece of game state untouched. After [`SessionController::quit`] all
/// commands are no-ops.
pub struct SessionController {
    engine: GameEngine,
    state: SessionState,
    pilot: Pilot,
    terminated: bool,
}

impl SessionController {
    /// Create an idle session; fails if the configuration cannot be played
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            engine: GameEngine::new(config)?,
            state: SessionState::Idle,
            pilot: Pilot::Human,
            terminated: false,
        })
    }

    /// Begin a fresh game from Idle or GameOver
    pub fn start(&mut self, pilot: Pilot) -> Result<bool> {
        if self.terminated || !matches!(self.state, SessionState::Idle | SessionState::GameOver) {
            warn!("start ignored in state {:?}", self.state);
            return Ok(false);
        }

        self.pilot = pilot;
        self.begin()?;
        Ok(true)
    }

    /// Advance the game by one tick.
    ///
    /// Only does anything while Playing. With an AI pilot and no command the
    /// autopilot chooses the direction. Moves into GameOver when the engine
    /// reports a collision.
    pub fn tick(&mut self, command: Option<Direction>) -> Result<Option<StepResult>> {
        if self.terminated || self.state != SessionState::Playing {
            return Ok(None);
        }

        let command = match (command, self.pilot) {
            (None, Pilot::Ai) => Some(self.engine.autopilot_direction()),
            (command, _) => command,
        };

        let result = self.engine.tick(command)?;
        if result.terminated {
            self.state = SessionState::GameOver;
            info!("session over with score {}", self.engine.score());
        }
        Ok(Some(result))
    }

    /// Playing -> Paused
    pub fn pause(&mut self) -> bool {
        self.transition(SessionState::Playing, SessionState::Paused)
    }

    /// Paused -> Playing
    pub fn resume(&mut self) -> bool {
        self.transition(SessionState::Paused, SessionState::Playing)
    }

    /// End a running or paused game without a collision.
    ///
    /// Used when the engine cannot continue, e.g. no free cell is left for
    /// fruit.
    pub fn finish(&mut self) -> bool {
        if self.terminated || !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return false;
        }
        self.state = SessionState::GameOver;
        info!("session finished with score {}", self.engine.score());
        true
    }

    /// Throw away the current game and start over with the same pilot
    pub fn reset(&mut self) -> Result<bool> {
        if self.terminated {
            return Ok(false);
        }

        self.state = SessionState::Idle;
        self.begin()?;
        Ok(true)
    }

    /// Switch pilot and start over, whatever the current state
    pub fn restart_with(&mut self, pilot: Pilot) -> Result<bool> {
        if self.terminated {
            return Ok(false);
        }

        self.pilot = pilot;
        self.reset()
    }

    /// End the session for good
    pub fn quit(&mut self) {
        if !self.terminated {
            info!("session quit in state {:?}", self.state);
        }
        self.terminated = true;
    }

    /// Renderable view of the game, tagged with the session state
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            state: self.state,
            ..self.engine.snapshot()
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn pilot(&self) -> Pilot {
        self.pilot
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    fn begin(&mut self) -> Result<()> {
        self.engine.reset()?;
        self.state = SessionState::Playing;
        info!("session started with {:?} pilot", self.pilot);
        Ok(())
    }

    fn transition(&mut self, from: SessionState, to: SessionState) -> bool {
        if self.terminated || self.state != from {
            return false;
        }
        self.state = to;
        info!("session {:?} -> {:?}", from, to);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionController {
        SessionController::new(GameConfig {
            rng_seed: Some(5),
            ..GameConfig::small()
        })
        .unwrap()
    }

    /// Tick until the engine reports game over, bounded so a bug cannot hang
    fn play_out(session: &mut SessionController) {
        for _ in 0..10_000 {
            if session.state() == SessionState::GameOver {
                return;
            }
            session.tick(Some(Direction::North)).unwrap();
        }
        panic!("game never ended");
    }

    #[test]
    fn test_starts_idle() {
        let session = session();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.is_terminated());
        assert!(SessionController::new(GameConfig::new(2, 2)).is_err());
    }

    #[test]
    fn test_tick_outside_playing_is_noop() {
        let mut session = session();
        let before = session.snapshot();

        assert_eq!(session.tick(Some(Direction::South)).unwrap(), None);
        assert_eq!(session.snapshot(), before);

        session.start(Pilot::Human).unwrap();
        session.pause();
        let paused = session.snapshot();
        assert_eq!(session.tick(Some(Direction::South)).unwrap(), None);
        assert_eq!(session.snapshot(), paused);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut session = session();

        // Resume from Idle is rejected
        assert!(!session.resume());
        assert_eq!(session.state(), SessionState::Idle);
        assert!(!session.pause());

        assert!(session.start(Pilot::Human).unwrap());
        assert!(session.pause());
        assert!(!session.pause());
        assert_eq!(session.state(), SessionState::Paused);

        assert!(session.resume());
        assert_eq!(session.state(), SessionState::Playing);
        assert!(!session.resume());
    }

    #[test]
    fn test_start_only_from_idle_or_game_over() {
        let mut session = session();
        assert!(session.start(Pilot::Human).unwrap());
        session.tick(None).unwrap();

        assert!(!session.start(Pilot::Ai).unwrap());
        assert_eq!(session.pilot(), Pilot::Human);
        assert_eq!(session.engine().steps(), 1);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut session = session();
        session.start(Pilot::Human).unwrap();
        play_out(&mut session);

        let snapshot = session.snapshot();
        assert!(!snapshot.is_alive());
        for _ in 0..5 {
            assert_eq!(session.tick(Some(Direction::East)).unwrap(), None);
        }
        assert_eq!(session.snapshot(), snapshot);

        // A new game can follow
        assert!(session.start(Pilot::Human).unwrap());
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.snapshot().score, 0);
    }

    #[test]
    fn test_reset_from_any_state() {
        let mut session = session();
        assert!(session.reset().unwrap());
        assert_eq!(session.state(), SessionState::Playing);

        session.tick(Some(Direction::South)).unwrap();
        session.pause();
        assert!(session.reset().unwrap());
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.engine().steps(), 0);
        assert_eq!(session.snapshot().snake.len(), 1);
    }

    #[test]
    fn test_finish_only_ends_live_games() {
        let mut session = session();
        assert!(!session.finish());
        assert_eq!(session.state(), SessionState::Idle);

        session.start(Pilot::Human).unwrap();
        session.pause();
        assert!(session.finish());
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.tick(None).unwrap(), None);
        assert!(!session.finish());
    }

    #[test]
    fn test_quit_stops_everything() {
        let mut session = session();
        session.start(Pilot::Human).unwrap();
        session.quit();

        assert!(session.is_terminated());
        assert_eq!(session.tick(None).unwrap(), None);
        assert!(!session.pause());
        assert!(!session.reset().unwrap());
        assert!(!session.start(Pilot::Human).unwrap());
    }

    #[test]
    fn test_ai_pilot_steers_itself() {
        let mut session = session();
        session.start(Pilot::Ai).unwrap();

        let expected = session.engine().autopilot_direction();
        session.tick(None).unwrap();
        assert_eq!(session.snapshot().heading, expected);

        // An explicit command overrides the autopilot
        if session.state() == SessionState::Playing {
            session.tick(Some(Direction::South)).unwrap();
            assert_eq!(session.snapshot().heading, Direction::South);
        }
    }

    #[test]
    fn test_score_matches_length_under_ai() {
        let mut session = session();
        session.restart_with(Pilot::Ai).unwrap();

        for _ in 0..300 {
            if session.state() != SessionState::Playing {
                break;
            }
            session.tick(None).unwrap();
            let snapshot = session.snapshot();
            assert_eq!(snapshot.score as usize, snapshot.snake.len() - 1);
            assert!(!snapshot.fruits.is_empty());
        }
    }
}
