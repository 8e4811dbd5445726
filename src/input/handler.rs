use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Action, Direction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameAction(Action),
    Quit,
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
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::GameAction(Action::Move(Direction::Up)),
            KeyCode::Down => KeyAction::GameAction(Action::Move(Direction::Down)),
            KeyCode::Left => KeyAction::GameAction(Action::Move(Direction::Left)),
            KeyCode::Right => KeyAction::GameAction(Action::Move(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => {
                KeyAction::GameAction(Action::Move(Direction::Up))
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                KeyAction::GameAction(Action::Move(Direction::Down))
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                KeyAction::GameAction(Action::Move(Direction::Left))
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                KeyAction::GameAction(Action::Move(Direction::Right))
            }

            // Space pauses, or restarts once the round is over
            KeyCode::Char(' ') => KeyAction::GameAction(Action::Pause),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameAction(Action::Restart),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Turn a tap at (`column`, `row`) on a `width` x `height` screen into a move.
    ///
    /// The middle third of the screen is split into a left and a right button.
    /// Taps above or below that band steer up or down, split at half height.
    pub fn handle_tap(&self, column: u16, row: u16, width: u16, height: u16) -> KeyAction {
        let (x, y) = (u32::from(column), u32::from(row));
        let (w, h) = (u32::from(width), u32::from(height));
        let middle_band = 3 * y >= h && 3 * y < 2 * h;

        let direction = if middle_band && 2 * x >= w {
            Direction::Right
        } else if middle_band {
            Direction::Left
        } else if 2 * y <= h {
            Direction::Up
        } else {
            Direction::Down
        };

        KeyAction::GameAction(Action::Move(direction))
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
        assert_eq!(press(KeyCode::Up), KeyAction::GameAction(Action::Move(Direction::Up)));
        assert_eq!(
            press(KeyCode::Down),
            KeyAction::GameAction(Action::Move(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Left),
            KeyAction::GameAction(Action::Move(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Right),
            KeyAction::GameAction(Action::Move(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w')),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
        assert_eq!(
            press(KeyCode::Char('a')),
            KeyAction::GameAction(Action::Move(Direction::Left))
        );
        assert_eq!(
            press(KeyCode::Char('s')),
            KeyAction::GameAction(Action::Move(Direction::Down))
        );
        assert_eq!(
            press(KeyCode::Char('d')),
            KeyAction::GameAction(Action::Move(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_uppercase() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
    }

    #[test]
    fn test_space_pauses() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::GameAction(Action::Pause));
    }

    #[test]
    fn test_restart_key() {
        let handler = InputHandler::new();

        assert_eq!(
            press(KeyCode::Char('r')),
            KeyAction::GameAction(Action::Restart)
        );

        let r_upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(r_upper),
            KeyAction::GameAction(Action::Restart)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_tap_zones() {
        let handler = InputHandler::new();
        let tap = |column, row| handler.handle_tap(column, row, 90, 30);

        assert_eq!(tap(10, 15), KeyAction::GameAction(Action::Move(Direction::Left)));
        assert_eq!(tap(80, 15), KeyAction::GameAction(Action::Move(Direction::Right)));
        assert_eq!(tap(45, 10), KeyAction::GameAction(Action::Move(Direction::Right)));
        assert_eq!(tap(10, 2), KeyAction::GameAction(Action::Move(Direction::Up)));
        assert_eq!(tap(80, 25), KeyAction::GameAction(Action::Move(Direction::Down)));
    }

    #[test]
    fn test_tap_on_empty_screen() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_tap(0, 0, 0, 0),
            KeyAction::GameAction(Action::Move(Direction::Up))
        );
        assert_eq!(
            handler.handle_tap(3, 3, 0, 0),
            KeyAction::GameAction(Action::Move(Direction::Down))
        );
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
    }
}
