//! Drill-down option enumeration
//!
//! Supports "narrow the selection" interfaces: with a fixed tag order such as
//! `[continent, country]`, the user first picks a continent among the values
//! present in the group, then a country among the values left by that choice.
//! Exactly one tag's options are revealed per step.

use crate::model::{Filter, Scalar, TagId, TaggedItem};
use serde::Serialize;
use std::collections::HashSet;

/// Distinct tag values in first-occurrence order
///
/// Values are told apart by their rendered text, so `1` and `"1"` count once
/// and the first one seen is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet {
    values: Vec<Scalar>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl OptionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value; returns `false` if it was already present
    pub fn insert(&mut self, value: Scalar) -> bool {
        if !self.seen.insert(value.to_string()) {
            return false;
        }
        self.values.push(value);
        true
    }

    #[must_use]
    pub fn contains(&self, value: &Scalar) -> bool {
        self.seen.contains(&value.to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in first-occurrence order
    #[must_use]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scalar> {
        self.values.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Scalar> {
        self.values
    }
}

impl FromIterator<Scalar> for OptionSet {
    fn from_iter<I: IntoIterator<Item = Scalar>>(iter: I) -> Self {
        let mut set = Self::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// The options of the next tag to decide on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOptions {
    pub tag: TagId,
    pub values: OptionSet,
}

/// Collect the distinct values of `tag` across `items`
///
/// Every member of a list counts. Items lacking the tag contribute nothing.
#[must_use]
pub fn values_of_tag<'a>(items: impl IntoIterator<Item = &'a TaggedItem>, tag: &str) -> OptionSet {
    items
        .into_iter()
        .flat_map(|item| item.tag_values(tag).iter().cloned())
        .collect()
}

/// Decision point of a drill-down walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextStep {
    /// First tag of the order without a selected value
    pub tag: TagId,
    /// Base filter narrowed by every selection made before `tag`
    pub filter: Option<Filter>,
}

/// Walk `tag_order`, folding selected values into the filter
///
/// Returns `None` once every tag of the order has a selected value. Selected
/// tags that are not part of the order are ignored.
#[must_use]
pub fn next_step<T: AsRef<str>>(selected: &Filter, filter: Option<Filter>, tag_order: &[T]) -> Option<NextStep> {
    let mut working = filter;

    for tag in tag_order {
        let tag = tag.as_ref();
        match selected.get(tag) {
            Some(value) => working.get_or_insert_with(Filter::any).set(tag, value.clone()),
            None => {
                return Some(NextStep {
                    tag: tag.to_string(),
                    filter: working,
                });
            }
        }
    }

    None
}
