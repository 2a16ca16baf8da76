//! First-run configuration
//!
//! When taggroup runs without a config file, a configuration with a single
//! store named `default` under the local data directory is written.

use super::TaggroupConfig;
use config::ConfigError;
use std::path::PathBuf;
use tracing::info;

/// Name of the store created on first run
pub const DEFAULT_DATABASE_NAME: &str = "default";

/// Location of a named store under the local data directory
///
/// # Errors
///
/// Returns `ConfigError` if the system data directory cannot be determined.
pub fn default_database_path(name: &str) -> Result<PathBuf, ConfigError> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("taggroup").join(name))
}

/// Build the first-run configuration without saving it
///
/// # Errors
///
/// Returns `ConfigError` if the system data directory cannot be determined.
pub fn initial_config() -> Result<TaggroupConfig, ConfigError> {
    let mut config = TaggroupConfig::default();
    config
        .databases
        .insert(DEFAULT_DATABASE_NAME.to_string(), default_database_path(DEFAULT_DATABASE_NAME)?);
    config.default_database = Some(DEFAULT_DATABASE_NAME.to_string());
    Ok(config)
}

/// Write the first-run configuration and return it
///
/// # Errors
///
/// Returns `ConfigError` if the data directory cannot be determined or the
/// configuration cannot be saved.
pub fn first_time_setup() -> Result<TaggroupConfig, ConfigError> {
    let config = initial_config()?;
    config.save()?;
    info!(path = ?TaggroupConfig::config_path()?, "created initial configuration");
    Ok(config)
}
