use eframe::egui::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Next,
    Previous,
    CloseNote,
    ToggleFullscreen,
    ToggleTheme,
    Quit,
}

/// Map a key press to an action.
///
/// While a note is open the modal captures the keyboard: only Escape is
/// honoured, and it only closes the note.
pub fn route_key(key: Key, note_open: bool) -> Option<KeyAction> {
    if note_open {
        return (key == Key::Escape).then_some(KeyAction::CloseNote);
    }
    match key {
        Key::ArrowRight | Key::ArrowDown => Some(KeyAction::Next),
        Key::ArrowLeft | Key::ArrowUp => Some(KeyAction::Previous),
        Key::F => Some(KeyAction::ToggleFullscreen),
        Key::D => Some(KeyAction::ToggleTheme),
        Key::Q => Some(KeyAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_navigate_when_closed() {
        assert_eq!(route_key(Key::ArrowRight, false), Some(KeyAction::Next));
        assert_eq!(route_key(Key::ArrowDown, false), Some(KeyAction::Next));
        assert_eq!(route_key(Key::ArrowLeft, false), Some(KeyAction::Previous));
        assert_eq!(route_key(Key::ArrowUp, false), Some(KeyAction::Previous));
    }

    #[test]
    fn window_keys_when_closed() {
        assert_eq!(route_key(Key::F, false), Some(KeyAction::ToggleFullscreen));
        assert_eq!(route_key(Key::D, false), Some(KeyAction::ToggleTheme));
        assert_eq!(route_key(Key::Q, false), Some(KeyAction::Quit));
    }

    #[test]
    fn other_keys_do_nothing() {
        for key in [Key::Space, Key::Enter, Key::A, Key::Home, Key::End, Key::Escape] {
            assert_eq!(route_key(key, false), None, "{key:?}");
        }
    }

    #[test]
    fn open_note_captures_keyboard() {
        assert_eq!(route_key(Key::Escape, true), Some(KeyAction::CloseNote));
        for key in [
            Key::ArrowRight,
            Key::ArrowDown,
            Key::ArrowLeft,
            Key::ArrowUp,
            Key::F,
            Key::D,
            Key::Q,
            Key::Enter,
        ] {
            assert_eq!(route_key(key, true), None, "{key:?}");
        }
    }
}
