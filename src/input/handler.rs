use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    /// Confirm the focused menu item
    Select,
    Restart,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Command(Command::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Command(Command::Move(Direction::North)),
            KeyCode::Down => KeyAction::Command(Command::Move(Direction::South)),
            KeyCode::Left => KeyAction::Command(Command::Move(Direction::West)),
            KeyCode::Right => KeyAction::Command(Command::Move(Direction::East)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::Command(Command::Move(Direction::North))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::Command(Command::Move(Direction::South))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::Command(Command::Move(Direction::West))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::Command(Command::Move(Direction::East))
            }

            // Controls
            KeyCode::Esc | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::Command(Command::Pause)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Command(Command::Quit),
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Select,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(
            press(KeyCode::Up),
            KeyAction::Command(Command::Move(Direction::North))
        );
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::Command(Command::Move(Direction::South))
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::Command(Command::Move(Direction::West))
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::Command(Command::Move(Direction::East))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::Command(Command::Move(Direction::North))
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::Command(Command::Move(Direction::West))
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::Command(Command::Move(Direction::South))
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::Command(Command::Move(Direction::East))
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::Command(Command::Move(Direction::North))
        );
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Esc), KeyAction::Command(Command::Pause));
        assert_eq!(press(KeyCode::Char('p')), KeyAction::Command(Command::Pause));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Command(Command::Quit));

        let handler = InputHandler::new();
        let q_upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(q_upper),
            KeyAction::Command(Command::Quit)
        );
    }

    #[test]
    fn test_select_and_restart() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Select);
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::Select);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }

    #[test]
    fn test_ctrl_c() {
        let handler = InputHandler::new();

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handler.handle_key_event(ctrl_c),
            KeyAction::Command(Command::Quit)
        );
    }
}
