//! Ctrl+digit song number entry and plain page stepping.
//!
//! The digit buffer itself lives in the keyboard machine; these functions take
//! the current buffer and answer the next one so they stay trivially testable.

use crate::paging::clamp_page;

use super::Key;

/// Longest song number accepted. Eight digits always fit a `u32`, so typing
/// more simply stops extending the buffer.
pub const MAX_BUFFER_DIGITS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDownResult {
    pub buffer: String,
    pub prevent_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUpResult {
    pub buffer: String,
    /// Song to load when Control was released over a non-empty buffer.
    pub sequence_number: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageNavigation {
    pub page: usize,
    pub prevent_default: bool,
}

/// Pressing Control starts a fresh number; Ctrl+digit appends to it.
pub fn handle_key_down(key: Key, ctrl: bool, buffer: &str) -> KeyDownResult {
    match key {
        Key::Control => KeyDownResult {
            buffer: String::new(),
            prevent_default: false,
        },
        Key::Char(digit) if ctrl && key.is_digit() => {
            let mut next = buffer.to_string();
            if next.len() < MAX_BUFFER_DIGITS {
                next.push(digit);
            }
            KeyDownResult {
                buffer: next,
                prevent_default: true,
            }
        }
        _ => KeyDownResult {
            buffer: buffer.to_string(),
            prevent_default: false,
        },
    }
}

/// Releasing Control commits the buffer. Leading zeros are fine.
pub fn handle_key_up(key: Key, buffer: &str) -> KeyUpResult {
    if key != Key::Control {
        return KeyUpResult {
            buffer: buffer.to_string(),
            sequence_number: None,
        };
    }
    KeyUpResult {
        buffer: String::new(),
        sequence_number: buffer.parse().ok(),
    }
}

/// Arrow and Page keys step one page, clamped to the song.
pub fn page_navigation(key: Key, total_pages: usize, current_page: usize) -> Option<PageNavigation> {
    let delta: isize = match key {
        Key::ArrowRight | Key::PageDown => 1,
        Key::ArrowLeft | Key::PageUp => -1,
        _ => return None,
    };
    Some(PageNavigation {
        page: clamp_page(current_page as isize + delta, total_pages),
        prevent_default: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_press_clears_buffer() {
        let result = handle_key_down(Key::Control, true, "12");
        assert_eq!(result.buffer, "");
        assert!(!result.prevent_default);
    }

    #[test]
    fn ctrl_digit_appends() {
        let result = handle_key_down(Key::Char('5'), true, "29");
        assert_eq!(result.buffer, "295");
        assert!(result.prevent_default);
    }

    #[test]
    fn digit_without_ctrl_and_ctrl_letter_are_ignored() {
        assert_eq!(handle_key_down(Key::Char('3'), false, "1").buffer, "1");
        let letter = handle_key_down(Key::Char('a'), true, "1");
        assert_eq!(letter.buffer, "1");
        assert!(!letter.prevent_default);
        assert_eq!(handle_key_down(Key::ArrowUp, false, "").buffer, "");
    }

    #[test]
    fn buffer_stops_at_eight_digits() {
        let mut buffer = String::new();
        for ch in "1234567890".chars() {
            buffer = handle_key_down(Key::Char(ch), true, &buffer).buffer;
        }
        assert_eq!(buffer, "12345678");
        assert_eq!(handle_key_up(Key::Control, &buffer).sequence_number, Some(12_345_678));
    }

    #[test]
    fn control_release_commits() {
        let result = handle_key_up(Key::Control, "294");
        assert_eq!(result.sequence_number, Some(294));
        assert_eq!(result.buffer, "");
    }

    #[test]
    fn control_release_with_empty_buffer_is_a_no_op() {
        let result = handle_key_up(Key::Control, "");
        assert_eq!(result.sequence_number, None);
        assert_eq!(result.buffer, "");
    }

    #[test]
    fn other_release_keeps_buffer() {
        let result = handle_key_up(Key::Char('1'), "1");
        assert_eq!(result.sequence_number, None);
        assert_eq!(result.buffer, "1");
    }

    #[test]
    fn leading_zeros_parse() {
        assert_eq!(handle_key_up(Key::Control, "007").sequence_number, Some(7));
    }

    #[test]
    fn arrows_and_page_keys_step_pages() {
        assert_eq!(page_navigation(Key::ArrowRight, 5, 1).map(|n| n.page), Some(2));
        assert_eq!(page_navigation(Key::PageDown, 5, 0).map(|n| n.page), Some(1));
        assert_eq!(page_navigation(Key::ArrowLeft, 5, 2).map(|n| n.page), Some(1));
        assert_eq!(page_navigation(Key::PageUp, 5, 2).map(|n| n.page), Some(1));
        assert_eq!(page_navigation(Key::ArrowRight, 3, 2).map(|n| n.page), Some(2));
        assert_eq!(page_navigation(Key::ArrowLeft, 3, 0).map(|n| n.page), Some(0));
    }

    #[test]
    fn digits_and_other_keys_do_not_navigate() {
        assert_eq!(page_navigation(Key::Char('2'), 5, 0), None);
        assert_eq!(page_navigation(Key::Enter, 5, 0), None);
    }
}
