//! Key bindings: arrows, wasd and vim-style.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Drop,
    Quit,
    None,
}

/// Map key event to game action.
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent {
        code, modifiers, ..
    } = key;
    if !(modifiers.is_empty() || modifiers == KeyModifiers::SHIFT) {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Left | KeyCode::Char('a' | 'h') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d' | 'l') => Action::MoveRight,
        KeyCode::Down | KeyCode::Char('s' | 'j') => Action::Drop,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_letters_map_to_same_actions() {
        assert_eq!(key_to_action(press(KeyCode::Left)), Action::MoveLeft);
        assert_eq!(key_to_action(press(KeyCode::Char('a'))), Action::MoveLeft);
        assert_eq!(key_to_action(press(KeyCode::Char('l'))), Action::MoveRight);
        assert_eq!(key_to_action(press(KeyCode::Down)), Action::Drop);
        assert_eq!(key_to_action(press(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(key_to_action(press(KeyCode::Esc)), Action::Quit);
        assert_eq!(key_to_action(press(KeyCode::Char('x'))), Action::None);
    }

    #[test]
    fn modified_keys_are_ignored() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(key), Action::None);
    }
}
