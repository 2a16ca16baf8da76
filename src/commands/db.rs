//! Db command - manage the configured stores

use crate::{
    TaggroupError,
    cli::DbCommands,
    config::{TaggroupConfig, default_database_path},
};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Where a store given on the command line lives
///
/// A bare name is placed under the data directory; anything with more than
/// one path component is used as given.
///
/// # Errors
///
/// Returns `TaggroupError::ConfigError` if the data directory cannot be determined.
pub fn resolve_store_path(path: &Path) -> Result<PathBuf> {
    if path.components().count() == 1 && !path.is_absolute() {
        Ok(default_database_path(&path.to_string_lossy())?)
    } else {
        Ok(path.to_path_buf())
    }
}

/// Execute a db subcommand
///
/// # Errors
///
/// Returns `TaggroupError` if the named store is unknown or already exists,
/// or if the configuration cannot be saved.
pub fn execute(config: &mut TaggroupConfig, command: &DbCommands, quiet: bool) -> Result<()> {
    match command {
        DbCommands::Add { name, path } => add(config, name, path, quiet),
        DbCommands::List => {
            list(config, quiet);
            Ok(())
        }
        DbCommands::Remove { name, delete_files } => remove(config, name, *delete_files, quiet),
        DbCommands::SetDefault { name } => {
            if config.get_database(name).is_none() {
                return Err(TaggroupError::InvalidInput(format!("Database '{name}' does not exist")));
            }

            config.set_default_database(name.clone())?;

            if !quiet {
                println!("Set '{name}' as default database");
            }
            Ok(())
        }
    }
}

fn add(config: &mut TaggroupConfig, name: &str, path: &Path, quiet: bool) -> Result<()> {
    if config.get_database(name).is_some() {
        return Err(TaggroupError::InvalidInput(format!("Database '{name}' already exists")));
    }

    let resolved_path = resolve_store_path(path)?;
    config.add_database(name.to_string(), resolved_path.clone())?;

    if !resolved_path.exists() {
        std::fs::create_dir_all(&resolved_path)?;
    }

    if !quiet {
        println!("Database '{name}' added at {}", resolved_path.display());
    }

    if config.databases.len() == 1 {
        config.set_default_database(name.to_string())?;
        if !quiet {
            println!("Set '{name}' as default database");
        }
    }
    Ok(())
}

fn list(config: &TaggroupConfig, quiet: bool) {
    if config.databases.is_empty() {
        if !quiet {
            println!("No databases configured.");
            println!("Add one with: taggroup db add <name> <path>");
        }
        return;
    }

    if !quiet {
        println!("Configured databases:");
    }

    let default_db = config.get_default_database();
    for name in config.list_databases() {
        if let Some(path) = config.get_database(name) {
            if quiet {
                println!("{name}");
            } else {
                let marker = if default_db == Some(name) { " (default)" } else { "" };
                println!("  {name} -> {}{marker}", path.display());
            }
        }
    }
}

fn remove(config: &mut TaggroupConfig, name: &str, delete_files: bool, quiet: bool) -> Result<()> {
    if config.get_database(name).is_none() {
        return Err(TaggroupError::InvalidInput(format!("Database '{name}' does not exist")));
    }

    let was_default = config.get_default_database().map(String::as_str) == Some(name);
    let Some(path) = config.remove_database(name)? else {
        return Ok(());
    };

    if !quiet {
        println!("Database '{name}' removed from configuration");
        if was_default {
            println!("Warning: Removed the default database. Set a new one with 'taggroup db set-default'.");
        }
    }

    if !delete_files {
        if !quiet {
            println!("Note: Database files at {} were NOT deleted", path.display());
        }
        return Ok(());
    }

    if path.exists() {
        match std::fs::remove_dir_all(&path) {
            Ok(()) => {
                if !quiet {
                    println!("Database files deleted from {}", path.display());
                }
            }
            Err(e) => {
                if !quiet {
                    eprintln!("Warning: Failed to delete database files: {e}");
                }
            }
        }
    } else if !quiet {
        println!("Database files at {} do not exist (already deleted)", path.display());
    }
    Ok(())
}
