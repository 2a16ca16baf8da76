//! Flat tag paths
//!
//! Walking a tag order over one item yields the item's position(s) in the
//! group tree. A multi-valued tag forks the walk: each existing path is
//! extended once per value, so an item with `k` values for a tag appears
//! under `k` sibling branches. With several multi-valued tags the number of
//! paths is the product of the value counts.
//!
//! ```text
//! tag order: [category, country]
//! item:      category = A, country = [Peru, Bolivia]
//! paths:     [A, Peru], [A, Bolivia]
//! ```

use crate::model::{Scalar, TaggedItem};
use serde::{Serialize, Serializer};
use std::fmt;

/// Literal shown for a tag the item does not carry
pub const MISSING_PLACEHOLDER: &str = "null";

/// One step of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A value of the tag
    Value(Scalar),
    /// The item lacks the tag
    Missing,
}

impl Segment {
    /// The tag value, `None` for the placeholder
    #[must_use]
    pub const fn value(&self) -> Option<&Scalar> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing => None,
        }
    }

    /// Key under which this segment is stored among its siblings
    ///
    /// Segments rendering to the same text share a key: `1` and `"1"` do,
    /// and so do the placeholder and the text `"null"`.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Missing => f.write_str(MISSING_PLACEHOLDER),
        }
    }
}

impl Serialize for Segment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Missing => serializer.serialize_str(MISSING_PLACEHOLDER),
        }
    }
}

impl From<Scalar> for Segment {
    fn from(value: Scalar) -> Self {
        Self::Value(value)
    }
}

impl From<i64> for Segment {
    fn from(value: i64) -> Self {
        Self::Value(value.into())
    }
}

impl From<i32> for Segment {
    fn from(value: i32) -> Self {
        Self::Value(value.into())
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

/// Ordered segments from the tree root down to an item's terminal node
pub type TagPath = Vec<Segment>;

/// Segments an item contributes for one tag
fn segments_for(item: &TaggedItem, tag: &str) -> Vec<Segment> {
    match item.tag_value(tag) {
        Some(value) if !value.is_empty() => value.values().iter().cloned().map(Segment::Value).collect(),
        _ => vec![Segment::Missing],
    }
}

/// Every path of `item` along `tag_order`
///
/// Starts from a single empty path and replaces the path set, tag by tag, with
/// its product with the tag's values. The product is value-major: all paths
/// extended by the first value come before those extended by the second.
/// Each returned path has exactly `tag_order.len()` segments.
#[must_use]
pub fn expand_paths<T: AsRef<str>>(item: &TaggedItem, tag_order: &[T]) -> Vec<TagPath> {
    let mut paths: Vec<TagPath> = vec![Vec::with_capacity(tag_order.len())];

    for tag in tag_order {
        let segments = segments_for(item, tag.as_ref());
        let mut next = Vec::with_capacity(paths.len() * segments.len());
        for segment in &segments {
            for path in &paths {
                let mut extended = path.clone();
                extended.push(segment.clone());
                next.push(extended);
            }
        }
        paths = next;
    }

    paths
}

/// Flatten items into `(item index, path)` pairs, item by item
#[must_use]
pub fn flatten<T: AsRef<str>>(items: &[TaggedItem], tag_order: &[T]) -> Vec<(usize, TagPath)> {
    items
        .iter()
        .enumerate()
        .flat_map(|(index, item)| {
            expand_paths(item, tag_order)
                .into_iter()
                .map(move |path| (index, path))
        })
        .collect()
}
