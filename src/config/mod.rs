//! Configuration module for taggroup
//!
//! Manages application configuration: named item stores, output defaults and
//! the grouping settings handed to the engine.
//! Configuration is stored in the user's config directory as
//! `taggroup/config.toml`.
//!
//! ```toml
//! default_database = "lakes"
//! quiet = false
//! comparison = "loose"
//! selection_order = ["category", "country"]
//!
//! [databases]
//! lakes = "/home/me/.local/share/taggroup/lakes"
//! ```

mod setup;

pub use setup::{DEFAULT_DATABASE_NAME, default_database_path, first_time_setup};

use crate::group::EngineSettings;
use crate::model::ComparisonPolicy;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TaggroupConfig {
    /// Map of store names to their filesystem paths
    #[serde(default)]
    pub databases: HashMap<String, PathBuf>,

    /// The store to use when none is specified
    #[serde(default)]
    pub default_database: Option<String>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// How filter values are compared with tag values
    #[serde(default)]
    pub comparison: ComparisonPolicy,

    /// Tag order walked by the `options` command when none is given
    #[serde(default)]
    pub selection_order: Vec<String>,
}

impl TaggroupConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("taggroup").join("config.toml"))
    }

    /// Load configuration from file, running first-time setup if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return first_time_setup();
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the user's config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Add a store to the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn add_database(&mut self, name: String, path: PathBuf) -> Result<(), ConfigError> {
        self.databases.insert(name, path);
        self.save()
    }

    /// Remove a store from the configuration
    ///
    /// Clears the default when it named the removed store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if saving the configuration fails.
    pub fn remove_database(&mut self, name: &str) -> Result<Option<PathBuf>, ConfigError> {
        let removed = self.databases.remove(name);
        if self.default_database.as_deref() == Some(name) {
            self.default_database = None;
        }
        self.save()?;
        Ok(removed)
    }

    /// Get a store path by name
    #[must_use]
    pub fn get_database(&self, name: &str) -> Option<&PathBuf> {
        self.databases.get(name)
    }

    /// List all store names, sorted
    #[must_use]
    pub fn list_databases(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.databases.keys().collect();
        names.sort();
        names
    }

    /// Set the default store
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the store name doesn't exist in the configuration
    /// or if saving the configuration fails.
    pub fn set_default_database(&mut self, name: String) -> Result<(), ConfigError> {
        if !self.databases.contains_key(&name) {
            return Err(ConfigError::Message(format!(
                "Database '{name}' does not exist in configuration"
            )));
        }
        self.default_database = Some(name);
        self.save()
    }

    /// Get the default store name
    #[must_use]
    pub const fn get_default_database(&self) -> Option<&String> {
        self.default_database.as_ref()
    }

    /// Path of the store named `name`, or of the default store
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the name is unknown or no default is configured.
    pub fn resolve_database(&self, name: Option<&str>) -> Result<&PathBuf, ConfigError> {
        let name = match name {
            Some(name) => name,
            None => self
                .default_database
                .as_deref()
                .ok_or_else(|| ConfigError::Message("No default database configured".to_string()))?,
        };

        self.get_database(name)
            .ok_or_else(|| ConfigError::Message(format!("Database '{name}' does not exist in configuration")))
    }

    /// Grouping settings for the engine
    #[must_use]
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            comparison: self.comparison,
            selection_order: self.selection_order.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TaggroupConfig::default();
        assert!(config.databases.is_empty());
        assert!(config.default_database.is_none());
        assert!(!config.quiet);
        assert_eq!(config.comparison, ComparisonPolicy::Loose);
        assert!(config.selection_order.is_empty());
    }

    #[test]
    fn test_add_database() {
        let mut config = TaggroupConfig::default();
        config.databases.insert("lakes".to_string(), PathBuf::from("/tmp/lakes"));

        assert_eq!(config.databases.len(), 1);
        assert_eq!(config.get_database("lakes"), Some(&PathBuf::from("/tmp/lakes")));
    }

    #[test]
    fn test_list_databases_sorted() {
        let mut config = TaggroupConfig::default();
        config.databases.insert("gamma".to_string(), PathBuf::from("/tmp/gamma"));
        config.databases.insert("alpha".to_string(), PathBuf::from("/tmp/alpha"));
        config.databases.insert("beta".to_string(), PathBuf::from("/tmp/beta"));

        let names = config.list_databases();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_resolve_database() {
        let mut config = TaggroupConfig::default();
        config.databases.insert("db1".to_string(), PathBuf::from("/tmp/db1"));
        config.databases.insert("db2".to_string(), PathBuf::from("/tmp/db2"));

        assert!(config.resolve_database(None).is_err());
        assert_eq!(config.resolve_database(Some("db2")).unwrap(), &PathBuf::from("/tmp/db2"));
        assert!(config.resolve_database(Some("missing")).is_err());

        config.default_database = Some("db1".to_string());
        assert_eq!(config.resolve_database(None).unwrap(), &PathBuf::from("/tmp/db1"));
    }

    #[test]
    fn test_engine_settings() {
        let config = TaggroupConfig {
            comparison: ComparisonPolicy::Strict,
            selection_order: vec!["category".to_string(), "country".to_string()],
            ..TaggroupConfig::default()
        };

        let settings = config.engine_settings();
        assert_eq!(settings.comparison, ComparisonPolicy::Strict);
        assert_eq!(settings.selection_order, vec!["category", "country"]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = TaggroupConfig::default();
        config.databases.insert("lakes".to_string(), PathBuf::from("/tmp/lakes"));
        config.default_database = Some("lakes".to_string());
        config.comparison = ComparisonPolicy::Strict;
        config.selection_order = vec!["category".to_string()];
        config.save_to(&path).unwrap();

        let loaded = TaggroupConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = TaggroupConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert!(loaded.databases.is_empty());
        assert_eq!(loaded.comparison, ComparisonPolicy::Loose);
    }

    #[test]
    fn test_load_rejects_unknown_comparison() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "comparison = \"fuzzy\"\n").unwrap();

        assert!(TaggroupConfig::load_from(&path).is_err());
    }
}
