//! Key-to-intent mapping.
//!
//! Arrows or hjkl move the hovering piece, space rotates, enter places,
//! `r` restarts. `q` and Esc quit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use tui_pipes_types::GameAction;

/// Map a key event to a game action, if any
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(GameAction::MoveRight),
        KeyCode::Up | KeyCode::Char('k') => Some(GameAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(GameAction::MoveDown),
        KeyCode::Char(' ') => Some(GameAction::Rotate),
        KeyCode::Enter => Some(GameAction::Place),
        KeyCode::Char('r') => Some(GameAction::Restart),
        _ => None,
    }
}

/// Quit keys: `q`, Esc, or Ctrl-C
pub fn should_quit(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
