//! taggroup CLI application entry point
//!
//! This is the main executable for the taggroup grouping engine. It provides a
//! command-line interface for filtering tagged items, drilling down through
//! tag values and folding items into trees.
//!
//! # Usage
//!
//! ```bash
//! # Load items into the default store
//! taggroup import lakes.json
//!
//! # Tree of all items by category, then sub-category
//! taggroup tree -o category sub-category
//!
//! # Same, restricted to items tagged country=Peru, as compact JSON
//! taggroup tree -o category -t country=Peru --compact --json
//!
//! # Drill down: which sub-categories exist once category 1 is chosen?
//! taggroup options -o category sub-category -s category=1
//!
//! # Work on a JSON file directly instead of a store
//! taggroup --input lakes.json values country
//!
//! # Append a value to a stored item
//! taggroup tag "Titicaca Lake" country=Bolivia --add
//!
//! # Quiet mode (only output results)
//! taggroup -q match "Titicaca Lake" -t country=Peru
//! ```
//!
//! # Configuration
//!
//! On first run, taggroup writes a configuration with a single `default`
//! store. Configuration is stored in the user's config directory
//! (`~/.config/taggroup/config.toml` on Linux).
//!
//! # Logging
//!
//! Diagnostics go to stderr through `tracing`. `RUST_LOG` selects the level
//! (`warn` when unset); `-v` raises it to `debug`.

use taggroup::{
    TaggroupError,
    cli::{Cli, Commands},
    commands,
    config::TaggroupConfig,
    db::ItemStore,
    group::{GroupEngine, ItemSource},
    model::ComparisonPolicy,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, TaggroupError>;

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("taggroup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Open the item source selected by the global flags
///
/// # Errors
///
/// Returns `TaggroupError` if the items file cannot be loaded, the store is
/// unknown or the store cannot be opened.
fn open_source(cli: &Cli, config: &TaggroupConfig) -> Result<Box<dyn ItemSource>> {
    if let Some(input) = &cli.input {
        return Ok(Box::new(commands::load_items_file(input)?));
    }

    let db_path = config.resolve_database(cli.db.as_deref())?;
    debug!(path = %db_path.display(), "opening store");
    Ok(Box::new(ItemStore::open(db_path)?))
}

fn open_store(cli: &Cli, config: &TaggroupConfig) -> Result<ItemStore> {
    if cli.input.is_some() {
        return Err(TaggroupError::InvalidInput(
            "this command writes to a store; --input cannot be used here".into(),
        ));
    }
    Ok(ItemStore::open(config.resolve_database(cli.db.as_deref())?)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let mut config = TaggroupConfig::load()?;
    let quiet = cli.quiet || config.quiet;

    match &cli.command {
        Commands::Db { command } => return commands::db(&mut config, command, quiet),
        Commands::Import { file, replace } => {
            let store = open_store(&cli, &config)?;
            return commands::import(&store, file, *replace, quiet);
        }
        Commands::Tag { id, assignments, add } => {
            let store = open_store(&cli, &config)?;
            return commands::tag(&store, id, assignments, *add, quiet);
        }
        Commands::Remove { id } => {
            let store = open_store(&cli, &config)?;
            return commands::remove(&store, id, quiet);
        }
        _ => {}
    }

    let mut settings = config.engine_settings();
    if cli.strict {
        settings.comparison = ComparisonPolicy::Strict;
    }
    let engine = GroupEngine::with_settings(open_source(&cli, &config)?, settings);

    match &cli.command {
        Commands::Tree {
            order,
            filter,
            compact,
            json,
        } => commands::tree(&engine, order, filter, *compact, *json, quiet),
        Commands::Options {
            order,
            selected,
            filter,
        } => commands::options(&engine, order, selected, filter, quiet),
        Commands::Values { tag, filter } => commands::values(&engine, tag, filter, quiet),
        Commands::Match { id, filter } => commands::member(&engine, id, filter, quiet),
        Commands::List { filter } => commands::list(&engine, filter, quiet),
        Commands::Db { .. } | Commands::Import { .. } | Commands::Tag { .. } | Commands::Remove { .. } => Ok(()),
    }
}
