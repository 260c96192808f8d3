//! Keyboard side of the projector: raw key translation, the Ctrl+digit song
//! number parser, chorus-only navigation rules and the reducer that turns one
//! key event into the effects the host applies.

mod chorus_nav;
mod keyboard;
mod keys;
mod song_number;
mod source;

pub use chorus_nav::{chorus_only_navigation, ChorusOnlyNavigation, ChorusOnlyPosition};
pub use keyboard::{
    Effect, KeySnapshot, KeyboardMachine, ScrollSurface, Transition, SCROLL_STEP,
};
pub use keys::{Key, KeyInput, KeyPhase};
pub use song_number::{
    handle_key_down, handle_key_up, page_navigation, KeyDownResult, KeyUpResult, PageNavigation,
    MAX_BUFFER_DIGITS,
};
pub use source::{KeySource, ScriptedKeys, TerminalKeys, LEGACY_SONG_NUMBER_KEY};
