use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::SpeedSetting;
use crate::direction::Direction;

/// High-level input events consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    SelectSpeed(SpeedSetting),
    Pause,
    Confirm,
    Reset,
    ToggleLeaderboard,
    Quit,
}

/// Polls crossterm for key presses and maps them to [`GameInput`].
#[derive(Debug, Clone, Copy)]
pub struct InputHandler {
    poll_timeout: Duration,
}

impl InputHandler {
    #[must_use]
    pub fn new(poll_timeout: Duration) -> Self {
        Self { poll_timeout }
    }

    /// Returns the next mapped input, or `None` when nothing relevant arrived.
    pub fn poll_input(&mut self) -> io::Result<Option<GameInput>> {
        if !event::poll(self.poll_timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps one key event to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'k') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'j') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'h') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'l') => GameInput::Direction(Direction::Right),
        KeyCode::Char('1') => GameInput::SelectSpeed(SpeedSetting::Slow),
        KeyCode::Char('2') => GameInput::SelectSpeed(SpeedSetting::Medium),
        KeyCode::Char('3') => GameInput::SelectSpeed(SpeedSetting::Fast),
        KeyCode::Char(' ' | 'p') => GameInput::Pause,
        KeyCode::Enter => GameInput::Confirm,
        KeyCode::Char('r') => GameInput::Reset,
        KeyCode::Char('b') | KeyCode::Tab => GameInput::ToggleLeaderboard,
        KeyCode::Char('q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::config::SpeedSetting;
    use crate::direction::Direction;

    use super::{map_key, GameInput};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_map_to_directions() {
        assert_eq!(
            map_key(key(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('j'))),
            Some(GameInput::Direction(Direction::Down))
        );
    }

    #[test]
    fn number_keys_select_speed() {
        assert_eq!(
            map_key(key(KeyCode::Char('3'))),
            Some(GameInput::SelectSpeed(SpeedSetting::Fast))
        );
    }

    #[test]
    fn space_pauses_and_ctrl_c_quits() {
        assert_eq!(map_key(key(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(map_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn b_and_tab_toggle_the_leaderboard() {
        assert_eq!(
            map_key(key(KeyCode::Char('b'))),
            Some(GameInput::ToggleLeaderboard)
        );
        assert_eq!(map_key(key(KeyCode::Tab)), Some(GameInput::ToggleLeaderboard));
    }
}
