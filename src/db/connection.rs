use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{Connection, OpenFlags};

use super::LoadError;
use crate::config::{Config, ConfigPaths};

/// Songs database file name, looked up in the working directory first.
pub const DB_FILE_NAME: &str = "songs.sqlite3";

/// Candidate database locations in lookup order: the configured path, the
/// working directory, then the data directory.
pub fn database_candidates(config: &Config, paths: &ConfigPaths) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(configured) = &config.database_path {
        candidates.push(configured.clone());
    }
    candidates.push(PathBuf::from(DB_FILE_NAME));
    candidates.push(paths.default_database());
    candidates
}

/// First candidate that exists on disk.
pub fn resolve_database_path(config: &Config, paths: &ConfigPaths) -> Result<PathBuf, LoadError> {
    let candidates = database_candidates(config, paths);
    for candidate in &candidates {
        debug!("looking for songs database at {}", candidate.display());
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    Err(LoadError::DatabaseNotFound { tried: candidates })
}

/// Open the songs database read-only. The projector never writes to it.
pub fn open_database(path: &Path) -> Result<Connection, LoadError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    info!("opened songs database {}", path.display());
    Ok(conn)
}
