//! Match command - check one item against a filter

use crate::{
    TaggroupError,
    cli::FilterArgs,
    group::{GroupEngine, GroupError, ItemSource},
    model::{Scalar, TaggedItem},
};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Find an item of the source by id
///
/// The id is compared under the engine's comparison policy, so `5` finds an
/// item stored with id `"5"` unless comparison is strict.
///
/// # Errors
///
/// Returns `TaggroupError::GroupError` if the source fails.
pub fn find_item<S: ItemSource>(engine: &GroupEngine<S>, id: &str) -> Result<Option<TaggedItem>> {
    let wanted = Scalar::infer(id);
    let policy = engine.settings().comparison;
    let items = engine.source().all_items().map_err(GroupError::Source)?;
    Ok(items.into_iter().find(|item| policy.equals(&item.id, &wanted)))
}

/// Execute the match command
///
/// # Errors
///
/// Returns `TaggroupError::InvalidInput` if no item has this id, or another
/// `TaggroupError` if the filter is malformed or the source fails.
pub fn execute<S: ItemSource>(engine: &GroupEngine<S>, id: &str, filter: &FilterArgs, quiet: bool) -> Result<()> {
    let item = find_item(engine, id)?.ok_or_else(|| TaggroupError::InvalidInput(format!("Item '{id}' not found")))?;
    let excluded = engine.is_item_excluded(&item, &filter.to_json()?)?;

    if quiet {
        println!("{}", !excluded);
    } else if excluded {
        println!("Item '{}' is excluded by the filter", item.id);
    } else {
        println!("Item '{}' matches the filter", item.id);
    }
    Ok(())
}
