//! List command - list the items of the source

use crate::{
    TaggroupError,
    cli::FilterArgs,
    group::{GroupEngine, ItemSource},
    output,
};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Execute the list command
///
/// # Errors
///
/// Returns `TaggroupError` if the filter is malformed or the source fails.
pub fn execute<S: ItemSource>(engine: &GroupEngine<S>, filter: &FilterArgs, quiet: bool) -> Result<()> {
    let items = engine.group_items(&filter.to_json()?)?;

    if items.is_empty() {
        if !quiet {
            println!("No items found.");
        }
    } else {
        if !quiet {
            println!("Items ({}):", items.len());
        }
        for item in &items {
            println!("{}", output::item_line(item, quiet));
        }
    }
    Ok(())
}
