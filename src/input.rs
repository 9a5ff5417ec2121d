//! Key bindings for the terminal front end.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{GameState, Intent};

/// Map a key press to an intent. The game-over menu only understands retry
/// and quit.
pub fn key_to_intent(key: KeyEvent, state: GameState) -> Intent {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Intent::Quit,
            _ => Intent::None,
        };
    }

    match state {
        GameState::Playing => match key.code {
            KeyCode::Left => Intent::MoveLeft,
            KeyCode::Right => Intent::MoveRight,
            KeyCode::Down => Intent::SoftDrop,
            KeyCode::Up => Intent::HardDrop,
            KeyCode::Char(' ') => Intent::RotateCw,
            KeyCode::Char('r') | KeyCode::Char('R') => Intent::RotateCcw,
            KeyCode::Char('n') => Intent::SpawnNextDebug,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Intent::Quit,
            _ => Intent::None,
        },
        GameState::GameOverMenu => match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => Intent::Restart,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Intent::Quit,
            _ => Intent::None,
        },
        GameState::Terminated => Intent::None,
    }
}
