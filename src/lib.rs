//! Core library surface for the Projectionist lyrics projector.
//!
//! `paging` and `input` are the pure engine: pagination, line decorations,
//! the chorus-only view and the keyboard state machine. `db`, `config`,
//! `logging` and `ui` wrap that engine into a terminal application.
pub mod config;
pub mod db;
pub mod input;
pub mod logging;
pub mod models;
pub mod paging;
pub mod ui;

pub use config::{load_config, Config, ConfigError};
pub use db::{fetch_song, LoadError, SongRepository, SqliteSongs};
pub use models::Song;
pub use ui::{run_app, App};
