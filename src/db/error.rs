use std::path::PathBuf;

/// Failures surfaced while locating or reading the songs database.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("no songs database found (tried {})", display_paths(.tried))]
    DatabaseNotFound { tried: Vec<PathBuf> },
    #[error("failed to open songs database at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("song query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
