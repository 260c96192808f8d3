use std::path::PathBuf;

use serde::Deserialize;

use crate::paging::DEFAULT_LYRICS_FONT_SIZE_INDEX;

/// Source hymnal queried when none is configured.
pub const DEFAULT_SOURCE_ID: i64 = 1;
/// Song shown on start-up.
pub const DEFAULT_INITIAL_SONG: u32 = 294;
/// Rows moved per ArrowUp/ArrowDown in the terminal lyrics area.
pub const DEFAULT_SCROLL_STEP: i64 = 3;
const DEFAULT_LOG_ROTATE_SIZE: u64 = 1024 * 1024;
const DEFAULT_LOG_ROTATE_KEEP: usize = 3;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Explicit database location; otherwise the usual candidates are tried.
    pub database_path: Option<PathBuf>,
    pub source_id: i64,
    pub initial_song: u32,
    pub font_size_index: usize,
    pub scroll_step: i64,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            source_id: DEFAULT_SOURCE_ID,
            initial_song: DEFAULT_INITIAL_SONG,
            font_size_index: DEFAULT_LYRICS_FONT_SIZE_INDEX,
            scroll_step: DEFAULT_SCROLL_STEP,
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter, e.g. `info` or `projectionist=debug`. `RUST_LOG` wins.
    pub level: String,
    pub path: Option<PathBuf>,
    pub rotate_size: u64,
    pub rotate_keep: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            path: None,
            rotate_size: DEFAULT_LOG_ROTATE_SIZE,
            rotate_keep: DEFAULT_LOG_ROTATE_KEEP,
        }
    }
}
