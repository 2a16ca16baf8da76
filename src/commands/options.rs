//! Options command - values of the next undecided tag of a tag order

use crate::{
    TaggroupError,
    cli::{FilterArgs, filter_from_assignments},
    group::{GroupEngine, ItemSource, TagOptions},
    model::Scalar,
    output,
};

type Result<T> = std::result::Result<T, TaggroupError>;

/// Tag order to walk: the given one, else the configured selection order
///
/// # Errors
///
/// Returns `TaggroupError::InvalidInput` when both are empty.
pub fn effective_order<'a>(given: &'a [String], configured: &'a [String]) -> Result<&'a [String]> {
    match (given.is_empty(), configured.is_empty()) {
        (false, _) => Ok(given),
        (true, false) => Ok(configured),
        (true, true) => Err(TaggroupError::InvalidInput(
            "No tag order given. Use -o TAG... or set selection_order in the config.".into(),
        )),
    }
}

/// Compute the next options for a drill-down state
///
/// # Errors
///
/// Returns `TaggroupError` if no order is available, the filter is malformed
/// or the source fails.
pub fn next<S: ItemSource>(
    engine: &GroupEngine<S>,
    order: &[String],
    selected: &[(String, Scalar)],
    filter: &FilterArgs,
) -> Result<Option<TagOptions>> {
    let order = effective_order(order, &engine.settings().selection_order)?;
    let selected = filter_from_assignments(selected);
    Ok(engine.next_option_values(&selected, &filter.to_json()?, order)?)
}

/// Execute the options command
///
/// # Errors
///
/// Returns `TaggroupError` if no order is available, the filter is malformed
/// or the source fails.
pub fn execute<S: ItemSource>(
    engine: &GroupEngine<S>,
    order: &[String],
    selected: &[(String, Scalar)],
    filter: &FilterArgs,
    quiet: bool,
) -> Result<()> {
    let Some(options) = next(engine, order, selected, filter)? else {
        if !quiet {
            println!("Every tag of the order is selected.");
        }
        return Ok(());
    };

    if !quiet {
        println!("Next tag: {} ({} option(s))", options.tag, options.values.len());
    }
    for value in options.values.iter() {
        println!("{}", output::option_line(value, quiet));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::EngineSettings;
    use crate::testing::category_items;

    fn order(tags: &[&str]) -> Vec<String> {
        tags.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_effective_order() {
        let given = order(&["a"]);
        let configured = order(&["b", "c"]);
        assert_eq!(effective_order(&given, &configured).unwrap(), given.as_slice());
        assert_eq!(effective_order(&[], &configured).unwrap(), configured.as_slice());
        assert!(effective_order(&[], &[]).is_err());
    }

    #[test]
    fn test_next_walks_selections() {
        let engine = GroupEngine::new(category_items());
        let tags = order(&["category", "sub-category"]);

        let first = next(&engine, &tags, &[], &FilterArgs::default()).unwrap().unwrap();
        assert_eq!(first.tag, "category");

        let selected = vec![("category".to_string(), Scalar::Int(3))];
        let second = next(&engine, &tags, &selected, &FilterArgs::default()).unwrap().unwrap();
        assert_eq!(second.tag, "sub-category");
        assert_eq!(second.values.into_vec(), vec![Scalar::Int(2), Scalar::Int(1)]);
    }

    #[test]
    fn test_next_falls_back_to_configured_order() {
        let settings = EngineSettings {
            selection_order: order(&["sub-category"]),
            ..EngineSettings::default()
        };
        let engine = GroupEngine::with_settings(category_items(), settings);

        let options = next(&engine, &[], &[], &FilterArgs::default()).unwrap().unwrap();
        assert_eq!(options.tag, "sub-category");
        assert_eq!(options.values.len(), 5);
    }
}
