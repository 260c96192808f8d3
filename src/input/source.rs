use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::supports_keyboard_enhancement;
use log::{debug, trace, warn};

use super::{Key, KeyInput, KeyPhase};

/// Key that opens song-number entry on terminals without release reporting.
pub const LEGACY_SONG_NUMBER_KEY: char = '#';

/// A stream of key events. Creating a source registers for keyboard input and
/// dropping it unregisters; in between the host polls it.
pub trait KeySource {
    /// Wait up to `timeout` for the next key event.
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyInput>>;

    /// Whether Control releases and a bare `Esc` are reported faithfully.
    fn reports_key_releases(&self) -> bool {
        true
    }
}

/// Keys read from the controlling terminal through crossterm.
///
/// Song numbers are committed when Control is released, which terminals only
/// report under the keyboard enhancement protocol. Legacy terminals encode
/// Ctrl+digit as control bytes (Ctrl+3 is `Esc`, Ctrl+1 a bare `1`), so there
/// Control chords are dropped and a song number is typed as `#`, digits,
/// `Enter`; `Esc` cancels. The entry is replayed to the keyboard machine as
/// the equivalent Control chord.
pub struct TerminalKeys {
    enhanced: bool,
    entering_number: bool,
    pending: VecDeque<KeyInput>,
}

impl TerminalKeys {
    pub fn register() -> Result<Self> {
        let enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
                )
            )
            .context("failed to enable keyboard enhancement")?;
        } else {
            warn!(
                "terminal does not report key releases; enter song numbers as \
                 '{LEGACY_SONG_NUMBER_KEY}' digits Enter"
            );
        }
        debug!("keyboard registered (enhanced = {enhanced})");
        Ok(Self::with_protocol(enhanced))
    }

    pub(crate) fn with_protocol(enhanced: bool) -> Self {
        Self {
            enhanced,
            entering_number: false,
            pending: VecDeque::new(),
        }
    }

    /// Queue the events `input` stands for and hand them back.
    pub(crate) fn translate(&mut self, input: KeyInput) -> Vec<KeyInput> {
        self.push(input);
        self.pending.drain(..).collect()
    }

    fn push(&mut self, input: KeyInput) {
        if self.enhanced {
            self.pending.push_back(input);
            return;
        }
        if input.phase == KeyPhase::Up {
            return;
        }
        if self.entering_number {
            match input.key {
                Key::Char(_) if input.key.is_digit() => {
                    self.pending.push_back(KeyInput::down(input.key, true));
                }
                Key::Enter => {
                    self.entering_number = false;
                    self.pending.push_back(KeyInput::up(Key::Control));
                }
                Key::Escape => {
                    self.entering_number = false;
                    // A fresh Control press empties the buffer; the release
                    // then has nothing to commit.
                    self.pending.push_back(KeyInput::down(Key::Control, true));
                    self.pending.push_back(KeyInput::up(Key::Control));
                }
                _ => trace!("ignoring {:?} during song number entry", input.key),
            }
            return;
        }
        if input.ctrl || input.key == Key::Control {
            trace!("dropping legacy control chord {:?}", input.key);
            return;
        }
        if input.key == Key::Char(LEGACY_SONG_NUMBER_KEY) {
            self.entering_number = true;
            self.pending.push_back(KeyInput::down(Key::Control, true));
            return;
        }
        self.pending.push_back(input);
    }
}

impl KeySource for TerminalKeys {
    fn next_key(&mut self, timeout: Duration) -> Result<Option<KeyInput>> {
        if let Some(input) = self.pending.pop_front() {
            return Ok(Some(input));
        }
        if !event::poll(timeout).context("event polling failed")? {
            return Ok(None);
        }
        if let Event::Key(key_event) = event::read().context("failed to read event")? {
            self.push(KeyInput::from_crossterm(&key_event));
        }
        Ok(self.pending.pop_front())
    }

    fn reports_key_releases(&self) -> bool {
        self.enhanced
    }
}

impl Drop for TerminalKeys {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// Replays a fixed list of key events, then reports silence.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    events: VecDeque<KeyInput>,
}

impl ScriptedKeys {
    pub fn new(events: impl IntoIterator<Item = KeyInput>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Ctrl+digit presses for `number` followed by the Control release.
    pub fn song_number(number: &str) -> Self {
        let mut events = vec![KeyInput::down(Key::Control, true)];
        events.extend(number.chars().map(|ch| KeyInput::down(Key::Char(ch), true)));
        events.push(KeyInput::up(Key::Control));
        Self::new(events)
    }

    pub fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self, _timeout: Duration) -> Result<Option<KeyInput>> {
        Ok(self.events.pop_front())
    }
}
