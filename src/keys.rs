use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::Direction;

/// A key press reduced to what the game cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicalKey {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Pause,
    Other,
}

impl LogicalKey {
    pub fn direction(self) -> Option<Direction> {
        match self {
            LogicalKey::Up => Some(Direction::Up),
            LogicalKey::Down => Some(Direction::Down),
            LogicalKey::Left => Some(Direction::Left),
            LogicalKey::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<KeyEvent> for LogicalKey {
    fn from(ev: KeyEvent) -> Self {
        // Raw mode turns off signal processing, so Ctrl+C arrives as a key.
        if is_ctrl_c(&ev) {
            return LogicalKey::Quit;
        }

        match ev.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => LogicalKey::Quit,
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => LogicalKey::Up,
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => LogicalKey::Left,
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => LogicalKey::Down,
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => LogicalKey::Right,
            KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') | KeyCode::Esc => {
                LogicalKey::Pause
            }
            _ => LogicalKey::Other,
        }
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> LogicalKey {
        LogicalKey::from(KeyEvent::from(code))
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(key(KeyCode::Up), LogicalKey::Up);
        assert_eq!(key(KeyCode::Down), LogicalKey::Down);
        assert_eq!(key(KeyCode::Left), LogicalKey::Left);
        assert_eq!(key(KeyCode::Right), LogicalKey::Right);

        assert_eq!(key(KeyCode::Char('w')), LogicalKey::Up);
        assert_eq!(key(KeyCode::Char('S')), LogicalKey::Down);
        assert_eq!(key(KeyCode::Char('a')), LogicalKey::Left);
        assert_eq!(key(KeyCode::Char('D')), LogicalKey::Right);

        assert_eq!(LogicalKey::Left.direction(), Some(Direction::Left));
        assert_eq!(LogicalKey::Pause.direction(), None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(key(KeyCode::Char('q')), LogicalKey::Quit);
        assert_eq!(key(KeyCode::Char('Q')), LogicalKey::Quit);
        assert_eq!(
            LogicalKey::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            LogicalKey::Quit
        );
        assert_eq!(key(KeyCode::Char('c')), LogicalKey::Other);
    }

    #[test]
    fn pause_keys() {
        assert_eq!(key(KeyCode::Char('p')), LogicalKey::Pause);
        assert_eq!(key(KeyCode::Char(' ')), LogicalKey::Pause);
        assert_eq!(key(KeyCode::Esc), LogicalKey::Pause);
        assert_eq!(key(KeyCode::Enter), LogicalKey::Other);
    }
}
