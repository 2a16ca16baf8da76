//! Tree command - fold the matching items into a tree along a tag order

use crate::{
    TaggroupError,
    cli::FilterArgs,
    group::{GroupEngine, ItemSource, TreeConfig, TreeOutput},
    output,
};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Lines to print for a built tree
///
/// # Errors
///
/// Returns `TaggroupError::JsonError` if the tree cannot be serialized.
pub fn render(tree: &TreeOutput, json: bool, quiet: bool) -> Result<Vec<String>> {
    if json {
        return Ok(vec![serde_json::to_string_pretty(tree)?]);
    }
    Ok(output::tree_lines(tree, quiet))
}

/// Execute the tree command
///
/// # Errors
///
/// Returns `TaggroupError` if the filter is malformed or the source fails.
pub fn execute<S: ItemSource>(
    engine: &GroupEngine<S>,
    order: &[String],
    filter: &FilterArgs,
    compact: bool,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let config = TreeConfig {
        store_node_values_as_array_keys: compact,
    };
    let tree = engine.build_group_tree(order, &filter.to_json()?, config)?;

    if tree.leaf_count() == 0 && !json {
        if !quiet {
            println!("No items match.");
        }
        return Ok(());
    }

    for line in render(&tree, json, quiet)? {
        println!("{line}");
    }
    Ok(())
}
