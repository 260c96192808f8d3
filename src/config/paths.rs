use std::path::PathBuf;

use directories::BaseDirs;

use super::ConfigError;
use crate::db::DB_FILE_NAME;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".projectionist";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Where the projector keeps its configuration, logs and default database.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl ConfigPaths {
    pub fn resolve(config_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let data_dir = data_dir()?;
        Ok(Self {
            config_file: config_override.unwrap_or_else(|| data_dir.join(CONFIG_FILE_NAME)),
            logs_dir: data_dir.join("logs"),
            data_dir,
        })
    }

    /// Paths rooted somewhere other than the home directory.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        let data_dir = dir.into();
        Self {
            config_file: data_dir.join(CONFIG_FILE_NAME),
            logs_dir: data_dir.join("logs"),
            data_dir,
        }
    }

    pub fn default_database(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dirs = BaseDirs::new().ok_or(ConfigError::MissingHome)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}
