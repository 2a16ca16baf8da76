//! Tag-based grouping
//!
//! Provides the three grouping operations over an [`ItemSource`]:
//!
//! 1. **Membership**: [`is_item_excluded`] decides whether an item belongs to
//!    the group a [`Filter`](crate::model::Filter) defines.
//! 2. **Drill-down options**: [`GroupEngine::next_option_values`] reveals the
//!    values of the next undecided tag of a fixed tag order.
//! 3. **Trees**: [`GroupEngine::build_group_tree`] folds the matching items
//!    into a tree keyed by an ordered list of tags.
//!
//! Items with several values for a tag in the tree's order appear under one
//! branch per value. That duplication is part of the result.

pub mod engine;
pub mod error;
pub mod matcher;
pub mod options;
pub mod path;
pub mod source;
pub mod tree;

pub use engine::{EngineSettings, GroupEngine};
pub use error::{GroupError, SourceError};
pub use matcher::{is_item_excluded, matching_items};
pub use options::{OptionSet, TagOptions};
pub use path::{MISSING_PLACEHOLDER, Segment, TagPath};
pub use source::{FnSource, ItemSource, from_fn};
pub use tree::{CompactTree, GroupTree, IntoTreeConfig, NodeData, NodeId, TreeConfig, TreeOutput};
