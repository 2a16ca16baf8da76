//! Group membership test
//!
//! An item belongs to the group defined by a filter when every tag named by
//! the filter is satisfied by the item:
//!
//! - single value stored: it must equal the expected value
//! - list stored: the expected value must be one of its members
//! - tag absent from the item: never satisfied
//!
//! Equality follows the [`ComparisonPolicy`] in effect. An absent or empty
//! filter excludes nothing.

use crate::model::{ComparisonPolicy, Filter, TaggedItem};
use tracing::debug;

/// Whether `item` falls outside the group defined by `filter`
///
/// # Examples
/// ```
/// use taggroup::group::is_item_excluded;
/// use taggroup::model::{ComparisonPolicy, Filter, TaggedItem};
///
/// let lake = TaggedItem::new("Titicaca Lake")
///     .with_added("country", "Peru")
///     .with_added("country", "Bolivia");
///
/// let peru = Filter::any().with_tag("country", "Peru");
/// let chile = Filter::any().with_tag("country", "Chile");
///
/// assert!(!is_item_excluded(&lake, Some(&peru), ComparisonPolicy::Loose));
/// assert!(is_item_excluded(&lake, Some(&chile), ComparisonPolicy::Loose));
/// assert!(!is_item_excluded(&lake, None, ComparisonPolicy::Loose));
/// ```
#[must_use]
pub fn is_item_excluded(item: &TaggedItem, filter: Option<&Filter>, policy: ComparisonPolicy) -> bool {
    let Some(filter) = filter else {
        return false;
    };

    for (tag, expected) in filter.tags.iter() {
        match item.tag_value(tag) {
            Some(stored) if stored.satisfies(expected, policy) => {}
            Some(stored) => {
                debug!(item = %item.id, tag, %expected, %stored, "excluded: value mismatch");
                return true;
            }
            None => {
                debug!(item = %item.id, tag, %expected, "excluded: tag missing");
                return true;
            }
        }
    }

    false
}

/// Keep the items of `items` belonging to the group defined by `filter`
///
/// Scans every item once and preserves the input order.
#[must_use]
pub fn matching_items(items: Vec<TaggedItem>, filter: Option<&Filter>, policy: ComparisonPolicy) -> Vec<TaggedItem> {
    items
        .into_iter()
        .filter(|item| !is_item_excluded(item, filter, policy))
        .collect()
}
