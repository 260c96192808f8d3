use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Keys the projector distinguishes. Everything else collapses into `Other`
/// and passes through the keyboard machine untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Control,
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PageUp,
    PageDown,
    Escape,
    Enter,
    Other,
}

impl Key {
    /// ASCII digit value, if this is one of `0`..=`9`.
    pub fn digit(self) -> Option<u32> {
        match self {
            Key::Char(ch) if ch.is_ascii_digit() => ch.to_digit(10),
            _ => None,
        }
    }

    pub fn is_digit(self) -> bool {
        self.digit().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// One key event as the keyboard machine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    pub phase: KeyPhase,
}

impl KeyInput {
    pub fn down(key: Key, ctrl: bool) -> Self {
        Self {
            key,
            ctrl,
            phase: KeyPhase::Down,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            phase: KeyPhase::Up,
        }
    }

    /// Translate a crossterm event. Key repeats count as presses.
    pub fn from_crossterm(event: &KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Modifier(ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl) => {
                Key::Control
            }
            KeyCode::Char(ch) => Key::Char(ch),
            KeyCode::Left => Key::ArrowLeft,
            KeyCode::Right => Key::ArrowRight,
            KeyCode::Up => Key::ArrowUp,
            KeyCode::Down => Key::ArrowDown,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Esc => Key::Escape,
            KeyCode::Enter => Key::Enter,
            _ => Key::Other,
        };
        let phase = match event.kind {
            KeyEventKind::Release => KeyPhase::Up,
            KeyEventKind::Press | KeyEventKind::Repeat => KeyPhase::Down,
        };
        Self {
            key,
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            phase,
        }
    }
}
