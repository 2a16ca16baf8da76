//! Command-line interface definitions and parsing
//!
//! This module defines the complete CLI structure for taggroup using the `clap` crate.
//!
//! # Commands
//!
//! - **tree**: Fold the matching items into a tree along a tag order
//! - **options**: Show the values of the next undecided tag of a tag order
//! - **values**: Show the distinct values of one tag across the matching items
//! - **match**: Check whether one item belongs to the group a filter defines
//! - **import**: Load an items JSON file into a store
//! - **tag**: Set or append tag values of a stored item
//! - **remove**: Remove an item from a store
//! - **list**: List all items of the source
//! - **db**: Manage multiple stores (add, remove, list, set-default)
//!
//! Items come from the configured store, or from a JSON file given with the
//! global `--input` flag. Filters are written as repeated `-t tag=value`
//! arguments; values that parse as integers are treated as integers.
//!
//! # Examples
//!
//! ```
//! use taggroup::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from_args(["taggroup", "tree", "-o", "category", "-t", "country=Peru"]);
//! assert!(matches!(cli.command, Commands::Tree { .. }));
//! ```

use crate::model::{Filter, Scalar};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse a `tag=value` argument
///
/// The value is split at the first `=`; an integer value becomes
/// [`Scalar::Int`], anything else [`Scalar::Text`].
///
/// # Errors
///
/// Returns a message if the argument has no `=` or an empty tag name.
pub fn parse_tag_assignment(arg: &str) -> Result<(String, Scalar), String> {
    let (tag, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected TAG=VALUE, found '{arg}'"))?;

    let tag = tag.trim();
    if tag.is_empty() {
        return Err(format!("empty tag name in '{arg}'"));
    }

    Ok((tag.to_string(), Scalar::infer(value)))
}

/// Build a filter from parsed `tag=value` arguments
///
/// A tag given twice keeps its last value.
#[must_use]
pub fn filter_from_assignments(assignments: &[(String, Scalar)]) -> Filter {
    let mut filter = Filter::any();
    for (tag, value) in assignments {
        filter.set(tag.clone(), value.clone());
    }
    filter
}

/// Filter arguments shared by the query commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only consider items with this tag value (can specify multiple: -t a=1 -t b=2)
    #[arg(short = 't', long = "tag", value_name = "TAG=VALUE", value_parser = parse_tag_assignment)]
    pub tags: Vec<(String, Scalar)>,

    /// Filter as a JSON document, e.g. '{"tags": {"country": "Peru"}}'
    #[arg(long = "filter-json", value_name = "JSON", conflicts_with = "tags")]
    pub filter_json: Option<String>,
}

impl FilterArgs {
    /// The filter as a JSON value, ready for the engine's normalization
    ///
    /// # Errors
    ///
    /// Returns the parse error if `--filter-json` is not valid JSON.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match &self.filter_json {
            Some(text) => serde_json::from_str(text),
            None => serde_json::to_value(filter_from_assignments(&self.tags)),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "taggroup")]
#[command(about = "Group tagged items into filters, drill-down options and trees", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Log debug details to stderr (overrides RUST_LOG)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Compare values strictly: "5" no longer matches 5 (overrides config)
    #[arg(long = "strict", global = true)]
    pub strict: bool,

    /// Read items from a JSON file instead of a store
    #[arg(short = 'i', long = "input", value_name = "FILE", global = true, conflicts_with = "db")]
    pub input: Option<PathBuf>,

    /// Use a specific store instead of the default
    #[arg(long = "db", value_name = "NAME", global = true)]
    pub db: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fold the matching items into a tree keyed by a tag order
    #[command(visible_alias = "t")]
    Tree {
        /// Tags defining the tree levels, outermost first
        #[arg(short = 'o', long = "order", value_name = "TAG", num_args = 1.., required = true)]
        order: Vec<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Use the compact shape: plain keys, items appended under their parent
        #[arg(short = 'c', long = "compact")]
        compact: bool,

        /// Print the tree as JSON
        #[arg(long = "json")]
        json: bool,
    },

    /// Show the values of the next undecided tag of a tag order
    #[command(visible_alias = "o")]
    Options {
        /// Tag order to walk (defaults to `selection_order` from the config)
        #[arg(short = 'o', long = "order", value_name = "TAG", num_args = 1..)]
        order: Vec<String>,

        /// Values already selected along the order
        #[arg(short = 's', long = "selected", value_name = "TAG=VALUE", value_parser = parse_tag_assignment)]
        selected: Vec<(String, Scalar)>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Show the distinct values of a tag across the matching items
    #[command(visible_alias = "v")]
    Values {
        /// Tag to enumerate
        tag: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Check whether an item belongs to the group a filter defines
    #[command(name = "match", visible_alias = "m")]
    Match {
        /// Id of the item to check
        id: String,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Import items from a JSON file into the store
    Import {
        /// JSON file holding an array of items
        file: PathBuf,

        /// Clear the store before importing
        #[arg(long = "replace")]
        replace: bool,
    },

    /// Set tag values of a stored item, replacing the previous values
    Tag {
        /// Id of the item to edit
        id: String,

        /// Values to set (TAG=VALUE, can specify multiple)
        #[arg(value_name = "TAG=VALUE", required = true, value_parser = parse_tag_assignment)]
        assignments: Vec<(String, Scalar)>,

        /// Append the values to the tags instead of replacing them
        #[arg(short = 'a', long = "add")]
        add: bool,
    },

    /// Remove an item from the store
    #[command(visible_alias = "rm")]
    Remove {
        /// Id of the item to remove
        id: String,
    },

    /// List all items of the source
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Manage stores
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

/// Store management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum DbCommands {
    /// Add a new store
    Add {
        /// Name of the store
        name: String,

        /// Path to the store directory (a bare name is placed under the data directory)
        path: PathBuf,
    },

    /// List all stores
    List,

    /// Remove a store from configuration
    #[command(visible_alias = "rm")]
    Remove {
        /// Name of the store to remove
        name: String,

        /// Also delete store files from disk
        #[arg(short = 'd', long = "delete-files")]
        delete_files: bool,
    },

    /// Set the default store
    #[command(name = "set-default")]
    SetDefault {
        /// Name of the store to set as default
        name: String,
    },
}

impl Cli {
    /// Parse command-line arguments from the process environment
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse command-line arguments from an iterator
    #[must_use]
    pub fn parse_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(args)
    }
}
