//! Read-only access to the songs database.
//!
//! The projector only ever asks one question of storage: "give me song N of
//! source S". [`SongRepository`] is that seam so the UI can be driven by an
//! in-memory catalogue in tests, while [`SqliteSongs`] answers it from the
//! hymnal SQLite file.

mod connection;
mod error;
mod songs;

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;

pub use connection::{database_candidates, open_database, resolve_database_path, DB_FILE_NAME};
pub use error::LoadError;
pub use songs::fetch_song;

use crate::models::Song;

/// Something that can look songs up by number.
pub trait SongRepository {
    fn load_song(&self, source_id: i64, sequence_number: u32) -> Result<Option<Song>, LoadError>;
}

/// Songs served from a SQLite hymnal database.
pub struct SqliteSongs {
    conn: Connection,
}

impl SqliteSongs {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, LoadError> {
        open_database(path).map(Self::new)
    }
}

impl SongRepository for SqliteSongs {
    fn load_song(&self, source_id: i64, sequence_number: u32) -> Result<Option<Song>, LoadError> {
        fetch_song(&self.conn, source_id, sequence_number)
    }
}

/// Songs kept in memory, keyed by `(source_id, sequence_number)`.
#[derive(Debug, Default, Clone)]
pub struct MemorySongs {
    songs: HashMap<(i64, u32), Song>,
}

impl MemorySongs {
    pub fn new(songs: impl IntoIterator<Item = Song>) -> Self {
        Self {
            songs: songs
                .into_iter()
                .map(|song| ((song.source_id, song.sequence_number), song))
                .collect(),
        }
    }
}

impl SongRepository for MemorySongs {
    fn load_song(&self, source_id: i64, sequence_number: u32) -> Result<Option<Song>, LoadError> {
        Ok(self.songs.get(&(source_id, sequence_number)).cloned())
    }
}
