use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Config, ConfigError, ConfigPaths};

#[derive(Debug)]
pub struct LoadedConfig {
    pub config: Config,
    pub paths: ConfigPaths,
    pub config_exists: bool,
}

pub fn load_config(path_override: Option<PathBuf>) -> Result<LoadedConfig, ConfigError> {
    let paths = ConfigPaths::resolve(path_override)?;
    load_from(paths)
}

/// Read the config file under `paths`, creating the data directories.
pub(crate) fn load_from(paths: ConfigPaths) -> Result<LoadedConfig, ConfigError> {
    fs::create_dir_all(&paths.data_dir)?;
    fs::create_dir_all(&paths.logs_dir)?;
    let (config, config_exists) = read_config(&paths.config_file)?;
    Ok(LoadedConfig {
        config,
        paths,
        config_exists,
    })
}

fn read_config(path: &Path) -> Result<(Config, bool), ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok((toml::from_str(&contents)?, true)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok((Config::default(), false)),
        Err(err) => Err(ConfigError::Io(err)),
    }
}
