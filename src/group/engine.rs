//! Grouping engine
//!
//! [`GroupEngine`] ties an [`ItemSource`] to the matching, option and tree
//! algorithms. Each public operation normalizes its filter and configuration
//! arguments first, takes one snapshot of the source and then runs as a pure
//! function of that snapshot. Nothing is cached between calls.

use super::error::GroupError;
use super::matcher::{is_item_excluded, matching_items};
use super::options::{next_step, values_of_tag, OptionSet, TagOptions};
use super::path::flatten;
use super::source::ItemSource;
use super::tree::{GroupTree, IntoTreeConfig, TreeOutput};
use crate::model::{ComparisonPolicy, Filter, IntoFilter, TaggedItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Settings applied to every operation of an engine
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct EngineSettings {
    /// Equality rule for filter values
    #[serde(default)]
    pub comparison: ComparisonPolicy,

    /// Tag order used by [`GroupEngine::next_options`]
    #[serde(default)]
    pub selection_order: Vec<String>,
}

/// Filters, enumerates and groups the items of a source
#[derive(Debug, Clone)]
pub struct GroupEngine<S> {
    source: S,
    settings: EngineSettings,
}

impl<S: ItemSource> GroupEngine<S> {
    /// Create an engine with default settings
    pub fn new(source: S) -> Self {
        Self::with_settings(source, EngineSettings::default())
    }

    pub const fn with_settings(source: S, settings: EngineSettings) -> Self {
        Self { source, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Set the tag order used by [`GroupEngine::next_options`]
    pub fn set_selection_order<T: Into<String>>(&mut self, order: impl IntoIterator<Item = T>) {
        self.settings.selection_order = order.into_iter().map(Into::into).collect();
    }

    pub const fn set_comparison(&mut self, policy: ComparisonPolicy) {
        self.settings.comparison = policy;
    }

    /// Whether `item` falls outside the group defined by `filter`
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` if the filter has the wrong shape.
    pub fn is_item_excluded<F: IntoFilter>(&self, item: &TaggedItem, filter: F) -> Result<bool, GroupError> {
        let filter = filter.into_filter()?;
        Ok(is_item_excluded(item, filter.as_ref(), self.settings.comparison))
    }

    /// Items of the source belonging to the group defined by `filter`
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` for a malformed filter and
    /// `GroupError::Source` if the source fails.
    pub fn group_items<F: IntoFilter>(&self, filter: F) -> Result<Vec<TaggedItem>, GroupError> {
        let filter = filter.into_filter()?;
        self.matching(filter.as_ref())
    }

    fn matching(&self, filter: Option<&Filter>) -> Result<Vec<TaggedItem>, GroupError> {
        let all = self.source.all_items().map_err(GroupError::Source)?;
        let total = all.len();
        let matched = matching_items(all, filter, self.settings.comparison);
        debug!(total, matched = matched.len(), "scanned item source");
        Ok(matched)
    }

    /// Distinct values of `tag` across the items matching `filter`
    ///
    /// Values come in first-occurrence order over the source snapshot; every
    /// member of a multi-valued tag counts.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` for a malformed filter and
    /// `GroupError::Source` if the source fails.
    pub fn values_of_tag_across_matches<F: IntoFilter>(&self, tag: &str, filter: F) -> Result<OptionSet, GroupError> {
        info!(tag, "collecting tag values");
        let filter = filter.into_filter()?;
        let items = self.matching(filter.as_ref())?;
        Ok(values_of_tag(&items, tag))
    }

    /// Options of the next undecided tag of `tag_order`
    ///
    /// Tags already present in `selected` narrow the filter in order; the
    /// first tag of the order without a selection is the next decision point
    /// and its values among the narrowed group are returned. `None` means
    /// every tag of the order has been selected.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` for a malformed filter and
    /// `GroupError::Source` if the source fails.
    pub fn next_option_values<F: IntoFilter, T: AsRef<str>>(
        &self,
        selected: &Filter,
        filter: F,
        tag_order: &[T],
    ) -> Result<Option<TagOptions>, GroupError> {
        let filter = filter.into_filter()?;
        let Some(step) = next_step(selected, filter, tag_order) else {
            info!("every tag of the order is selected");
            return Ok(None);
        };

        info!(tag = %step.tag, "next decision point");
        let items = self.matching(step.filter.as_ref())?;
        Ok(Some(TagOptions {
            values: values_of_tag(&items, &step.tag),
            tag: step.tag,
        }))
    }

    /// [`GroupEngine::next_option_values`] along the configured selection order
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` for a malformed filter and
    /// `GroupError::Source` if the source fails.
    pub fn next_options<F: IntoFilter>(&self, selected: &Filter, filter: F) -> Result<Option<TagOptions>, GroupError> {
        self.next_option_values(selected, filter, self.settings.selection_order.as_slice())
    }

    /// Arrange the items matching `filter` into a tree along `tag_order`
    ///
    /// Each matching item lands under one branch per combination of its
    /// values for the tags of the order; items lacking a tag land under the
    /// missing-value placeholder. The output shape follows `config`.
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` for a malformed filter or
    /// configuration and `GroupError::Source` if the source fails.
    pub fn build_group_tree<F: IntoFilter, C: IntoTreeConfig, T: AsRef<str>>(
        &self,
        tag_order: &[T],
        filter: F,
        config: C,
    ) -> Result<TreeOutput, GroupError> {
        let order: Vec<&str> = tag_order.iter().map(|tag| tag.as_ref()).collect();
        info!(order = %order.join(","), "building group tree");

        let filter = filter.into_filter()?;
        let config = config.into_tree_config()?;
        let items = self.matching(filter.as_ref())?;

        let paths = flatten(&items, order.as_slice());
        debug!(items = items.len(), paths = paths.len(), "expanded tag paths");

        let tree = GroupTree::fold(items, paths);
        info!(leaves = tree.leaf_count(), "group tree built");
        Ok(TreeOutput::shaped(tree, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::path::Segment;
    use crate::group::source::from_fn;
    use crate::group::tree::TreeConfig;
    use crate::model::Scalar;
    use crate::testing::{category_items, lake_items};
    use serde_json::json;

    fn seg<S: Into<Segment>>(s: S) -> Segment {
        s.into()
    }

    #[test]
    fn test_group_items_with_json_filter() {
        let engine = GroupEngine::new(category_items());
        let items = engine.group_items(json!({"tags": {"category": 2}})).unwrap();
        let ids: Vec<Scalar> = items.into_iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![Scalar::from(4), Scalar::from(5)]);
    }

    #[test]
    fn test_group_items_rejects_malformed_filter() {
        let engine = GroupEngine::new(category_items());
        let err = engine.group_items(json!(["category", 2])).unwrap_err();
        assert!(matches!(err, GroupError::InvalidArgument(_)));
    }

    #[test]
    fn test_is_item_excluded_through_engine() {
        let engine = GroupEngine::new(lake_items());
        let lake = &lake_items()[0];
        assert!(!engine.is_item_excluded(lake, json!({"tags": {"country": "Peru"}})).unwrap());
        assert!(engine.is_item_excluded(lake, json!({"tags": {"country": "Chile"}})).unwrap());
        assert!(!engine.is_item_excluded(lake, None::<Filter>).unwrap());
    }

    #[test]
    fn test_values_of_tag_across_matches() {
        let engine = GroupEngine::new(category_items());

        let all = engine.values_of_tag_across_matches("sub-category", Filter::any()).unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(all.as_slice()[0], Scalar::from(5));

        let narrowed = engine
            .values_of_tag_across_matches("sub-category", Filter::any().with_tag("category", 3))
            .unwrap();
        assert_eq!(narrowed.into_vec(), vec![Scalar::from(2), Scalar::from(1)]);
    }

    #[test]
    fn test_next_option_values_steps() {
        let engine = GroupEngine::new(category_items());
        let order = ["category", "sub-category"];

        let first = engine.next_option_values(&Filter::any(), Filter::any(), &order).unwrap().unwrap();
        assert_eq!(first.tag, "category");
        assert_eq!(
            first.values.into_vec(),
            vec![Scalar::from(1), Scalar::from(2), Scalar::from(3)]
        );

        let selected = Filter::any().with_tag("category", 1);
        let second = engine.next_option_values(&selected, Filter::any(), &order).unwrap().unwrap();
        assert_eq!(second.tag, "sub-category");
        assert_eq!(second.values.into_vec(), vec![Scalar::from(5), Scalar::from(4)]);

        let done = Filter::any().with_tag("category", 1).with_tag("sub-category", 5);
        assert!(engine.next_option_values(&done, Filter::any(), &order).unwrap().is_none());
    }

    #[test]
    fn test_next_options_uses_selection_order() {
        let mut engine = GroupEngine::new(category_items());
        engine.set_selection_order(["sub-category", "category"]);

        let options = engine.next_options(&Filter::any(), None::<Filter>).unwrap().unwrap();
        assert_eq!(options.tag, "sub-category");

        let selected = Filter::any().with_tag("sub-category", 3);
        let options = engine.next_options(&selected, None::<Filter>).unwrap().unwrap();
        assert_eq!(options.tag, "category");
        assert_eq!(options.values.into_vec(), vec![Scalar::from(2)]);
    }

    #[test]
    fn test_next_options_without_order_is_empty() {
        let engine = GroupEngine::new(category_items());
        assert!(engine.next_options(&Filter::any(), Filter::any()).unwrap().is_none());
    }

    #[test]
    fn test_build_group_tree_compact() {
        let engine = GroupEngine::new(category_items());
        let output = engine
            .build_group_tree(&["category", "sub-category"], None::<Filter>, TreeConfig::compact())
            .unwrap();

        let tree = output.as_compact().unwrap();
        assert_eq!(tree.keys(), vec![seg(1), seg(2), seg(3)]);
        assert_eq!(tree.get(&seg(3)).unwrap().keys(), vec![seg(2), seg(1)]);
    }

    #[test]
    fn test_build_group_tree_rejects_malformed_config() {
        let engine = GroupEngine::new(category_items());
        let err = engine
            .build_group_tree(&["category"], None::<Filter>, json!("compact"))
            .unwrap_err();
        assert!(matches!(err, GroupError::InvalidArgument(_)));
    }

    #[test]
    fn test_strict_policy_through_engine() {
        let mut engine = GroupEngine::new(category_items());
        let filter = json!({"tags": {"category": "1"}});
        assert_eq!(engine.group_items(&filter).unwrap().len(), 3);

        engine.set_comparison(ComparisonPolicy::Strict);
        assert!(engine.group_items(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_large_integer_filter_is_exact() {
        let engine = GroupEngine::new(vec![TaggedItem::new(1).with_tag("code", 9_007_199_254_740_993_i64)]);
        let wrong = Filter::any().with_tag("code", 9_007_199_254_740_992_i64);
        assert!(engine.group_items(wrong).unwrap().is_empty());

        let right = Filter::any().with_tag("code", "9007199254740993");
        assert_eq!(engine.group_items(right).unwrap().len(), 1);
    }

    #[test]
    fn test_number_and_numeric_text_values_merge() {
        let engine = GroupEngine::new(vec![
            TaggedItem::new(1).with_tag("category", 1),
            TaggedItem::new(2).with_tag("category", "1"),
        ]);

        let values = engine.values_of_tag_across_matches("category", None::<Filter>).unwrap();
        assert_eq!(values.into_vec(), vec![Scalar::from(1)]);

        let output = engine
            .build_group_tree(&["category"], None::<Filter>, TreeConfig::compact())
            .unwrap();
        assert_eq!(output.leaf_count(), 2);
        assert_eq!(output.as_compact().unwrap().keys(), vec![seg(1)]);
    }

    #[test]
    fn test_source_failure_propagates() {
        let engine = GroupEngine::new(from_fn(|| Err("backend unavailable".into())));
        let err = engine
            .build_group_tree(&["category"], None::<Filter>, TreeConfig::default())
            .unwrap_err();

        match err {
            GroupError::Source(source) => assert_eq!(source.to_string(), "backend unavailable"),
            other => panic!("Expected Source error, got {other:?}"),
        }
    }
}
