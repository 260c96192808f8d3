//! User configuration read from `~/.projectionist/config.toml`. A missing
//! file is not an error: every field has a default so the projector starts
//! with nothing but a songs database next to it.

mod error;
mod load;
mod paths;
mod types;

pub use error::ConfigError;
pub use load::{load_config, LoadedConfig};
pub use paths::ConfigPaths;
pub use types::{Config, LoggingConfig};
