//! Key mapping from terminal events to game actions.

use crate::types::{Action, TransformKind};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Key releases and control chords map to nothing.
pub fn handle_key_event(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    let action = match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => {
            Action::Transform(TransformKind::Left)
        }
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => {
            Action::Transform(TransformKind::Right)
        }
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => {
            Action::Transform(TransformKind::FastDown)
        }
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => {
            Action::Transform(TransformKind::Rotate)
        }
        KeyCode::Char(' ') => Action::Transform(TransformKind::Fall),

        // Game flow
        KeyCode::Enter => Action::Start,
        KeyCode::Char('p' | 'P') => Action::Pause,
        KeyCode::Char('r' | 'R') => Action::Reset,

        // Settings
        KeyCode::Char('m' | 'M') => Action::ToggleSound,
        KeyCode::Char('o' | 'O') => Action::OpenSettings,

        _ => return None,
    };
    Some(action)
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
