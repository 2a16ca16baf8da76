//! Values command - distinct values of one tag across the matching items

use crate::{
    TaggroupError,
    cli::FilterArgs,
    group::{GroupEngine, ItemSource},
    output,
};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Execute the values command
///
/// # Errors
///
/// Returns `TaggroupError` if the filter is malformed or the source fails.
pub fn execute<S: ItemSource>(engine: &GroupEngine<S>, tag: &str, filter: &FilterArgs, quiet: bool) -> Result<()> {
    let values = engine.values_of_tag_across_matches(tag, &filter.to_json()?)?;

    if values.is_empty() {
        if !quiet {
            println!("No values found for tag '{tag}'.");
        }
        return Ok(());
    }

    if !quiet {
        println!("Values of '{tag}':");
    }
    for value in values.iter() {
        println!("{}", output::option_line(value, quiet));
    }
    Ok(())
}
