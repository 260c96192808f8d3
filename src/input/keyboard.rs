//! The navigation state machine.
//!
//! There is a single "listening" state, so the machine is a plain reducer:
//! every key event is processed to completion and answers the effects the
//! host must apply. The machine itself only owns the pending song number; page
//! position, chorus-only state and font size belong to the host and change
//! only through the returned effects.

use log::{debug, trace};

use crate::paging::{should_enter_chorus_only_on_zero, stanza_index_for_verse};

use super::chorus_nav::{chorus_only_navigation, ChorusOnlyNavigation, ChorusOnlyPosition};
use super::song_number::{handle_key_down, handle_key_up, page_navigation};
use super::{Key, KeyInput, KeyPhase};

/// Default distance moved by ArrowUp/ArrowDown on a scrollable surface.
pub const SCROLL_STEP: i64 = 56;

/// Side effects requested from the host, one per callback it exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Navigate(usize),
    FontSizeDelta(i8),
    LoadSong(u32),
    /// Open the chorus-only view for a verse, or close it with `None`.
    ChorusOnlyChange(Option<usize>),
    ChorusOnlyPageNavigate(usize),
    ScrollToChorus,
}

/// Result of one key event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<Effect>,
    /// The host should suppress its own handling of the key.
    pub prevent_default: bool,
}

impl Transition {
    fn emit(&mut self, effect: Effect) {
        self.effects.push(effect);
        self.prevent_default = true;
    }
}

/// A vertically scrollable lyrics area. Implementations clamp the offset to
/// their own extent, which is how the machine notices it hit an edge.
pub trait ScrollSurface {
    fn scroll_offset(&self) -> i64;
    fn set_scroll_offset(&mut self, offset: i64);
}

/// Host state captured at the moment a key goes down.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySnapshot<'a> {
    pub total_pages: usize,
    pub current_page: usize,
    pub stanza_index_by_page: &'a [usize],
    pub first_stanza_index_by_page: &'a [usize],
    /// Not consulted by the reducer; carried so the snapshot holds the full
    /// pagination the host renders from.
    pub chorus_start_line_index_by_page: &'a [Option<usize>],
    pub is_chorus: &'a [bool],
    /// Set while the chorus-only view is open.
    pub chorus_only: Option<ChorusOnlyPosition>,
    pub total_verses: usize,
    pub current_verse: usize,
}

#[derive(Debug, Clone)]
pub struct KeyboardMachine {
    digit_buffer: String,
    scroll_step: i64,
}

impl Default for KeyboardMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardMachine {
    pub fn new() -> Self {
        Self::with_scroll_step(SCROLL_STEP)
    }

    pub fn with_scroll_step(scroll_step: i64) -> Self {
        Self {
            digit_buffer: String::new(),
            scroll_step,
        }
    }

    /// Digits typed with Control held that have not been committed yet.
    pub fn digit_buffer(&self) -> &str {
        &self.digit_buffer
    }

    /// Dispatch a key event by phase.
    pub fn handle(
        &mut self,
        input: KeyInput,
        snapshot: &KeySnapshot<'_>,
        scroll: Option<&mut dyn ScrollSurface>,
    ) -> Transition {
        match input.phase {
            KeyPhase::Down => self.key_down(input.key, input.ctrl, snapshot, scroll),
            KeyPhase::Up => self.key_up(input.key),
        }
    }

    pub fn key_down(
        &mut self,
        key: Key,
        ctrl: bool,
        snapshot: &KeySnapshot<'_>,
        scroll: Option<&mut dyn ScrollSurface>,
    ) -> Transition {
        let parsed = handle_key_down(key, ctrl, &self.digit_buffer);
        self.digit_buffer = parsed.buffer;
        let mut transition = Transition {
            effects: Vec::new(),
            prevent_default: parsed.prevent_default,
        };

        match key.digit() {
            Some(_) if ctrl => {}
            Some(0) => self.enter_chorus_only(snapshot, &mut transition),
            Some(verse) => self.jump_to_verse(verse as usize, snapshot, &mut transition),
            None => self.navigate(key, snapshot, &mut transition),
        }

        match key {
            Key::Char('=') | Key::Char('+') => transition.emit(Effect::FontSizeDelta(1)),
            Key::Char('-') => transition.emit(Effect::FontSizeDelta(-1)),
            Key::ArrowUp | Key::ArrowDown => {
                if let Some(surface) = scroll {
                    let step = if key == Key::ArrowDown {
                        self.scroll_step
                    } else {
                        -self.scroll_step
                    };
                    let before = surface.scroll_offset();
                    surface.set_scroll_offset(before + step);
                    if surface.scroll_offset() != before {
                        transition.prevent_default = true;
                    }
                }
            }
            _ => {}
        }

        trace!("key down {key:?} ctrl={ctrl} -> {transition:?}");
        transition
    }

    /// Only releasing Control matters: it commits a pending song number.
    pub fn key_up(&mut self, key: Key) -> Transition {
        let parsed = handle_key_up(key, &self.digit_buffer);
        self.digit_buffer = parsed.buffer;
        let mut transition = Transition::default();
        if let Some(number) = parsed.sequence_number {
            debug!("song number {number} entered");
            transition.effects.push(Effect::LoadSong(number));
        }
        transition
    }

    fn jump_to_verse(&self, verse: usize, snapshot: &KeySnapshot<'_>, transition: &mut Transition) {
        if snapshot.stanza_index_by_page.is_empty() || snapshot.is_chorus.is_empty() {
            return;
        }
        if verse > snapshot.total_verses {
            return;
        }
        let Some(stanza) = stanza_index_for_verse(verse, snapshot.is_chorus) else {
            return;
        };
        let Some(page) = snapshot
            .first_stanza_index_by_page
            .iter()
            .position(|&s| s == stanza)
        else {
            return;
        };
        if snapshot.chorus_only.is_some() {
            transition.emit(Effect::ChorusOnlyChange(None));
        }
        transition.emit(Effect::Navigate(page));
    }

    fn enter_chorus_only(&self, snapshot: &KeySnapshot<'_>, transition: &mut Transition) {
        let open_verse = snapshot.chorus_only.map(|position| position.verse);
        if should_enter_chorus_only_on_zero(
            open_verse,
            snapshot.current_verse,
            snapshot.first_stanza_index_by_page,
            snapshot.is_chorus,
        ) {
            transition.emit(Effect::ChorusOnlyChange(Some(snapshot.current_verse)));
            transition.emit(Effect::ScrollToChorus);
        }
    }

    fn navigate(&self, key: Key, snapshot: &KeySnapshot<'_>, transition: &mut Transition) {
        if let Some(position) = snapshot.chorus_only {
            let decision = chorus_only_navigation(
                key,
                position,
                snapshot.total_verses,
                snapshot.first_stanza_index_by_page,
                snapshot.is_chorus,
            );
            match decision {
                Some(ChorusOnlyNavigation::ExitToVerse {
                    target_page: Some(page),
                }) => {
                    transition.emit(Effect::ChorusOnlyChange(None));
                    transition.emit(Effect::Navigate(page));
                    return;
                }
                Some(ChorusOnlyNavigation::ExitToVerse { target_page: None }) => {
                    transition.prevent_default = true;
                    return;
                }
                Some(ChorusOnlyNavigation::ChorusPage { page }) => {
                    transition.emit(Effect::ChorusOnlyPageNavigate(page));
                    return;
                }
                None => {}
            }
        }

        if let Some(nav) = page_navigation(key, snapshot.total_pages, snapshot.current_page) {
            transition.emit(Effect::Navigate(nav.page));
        }
    }
}
