//! Ratatui front-end: the projector screen and the loop that drives it.

mod app;
mod helpers;
mod screens;
mod terminal;

pub use app::{App, LoadStatus, LyricsScroll};
pub use terminal::{event_loop, run_app};
