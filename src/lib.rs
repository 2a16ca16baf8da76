//! taggroup - Tag-based grouping of items
//!
//! This library groups items carrying tag values. A [`Filter`](model::Filter)
//! defines a group as the items whose tags hold the expected values; the
//! [`GroupEngine`](group::GroupEngine) answers three questions about such a
//! group:
//!
//! - which items belong to it ([`is_item_excluded`](group::GroupEngine::is_item_excluded)),
//! - which values the next undecided tag of a drill-down order can take
//!   ([`next_option_values`](group::GroupEngine::next_option_values)),
//! - how its items fold into a tree keyed by an ordered list of tags
//!   ([`build_group_tree`](group::GroupEngine::build_group_tree)).
//!
//! Items come from any [`ItemSource`](group::ItemSource); the sled-backed
//! [`ItemStore`](db::ItemStore) is one.
//!
//! # Examples
//!
//! ```
//! use taggroup::group::{GroupEngine, TreeConfig};
//! use taggroup::model::{Filter, TaggedItem};
//!
//! let items = vec![
//!     TaggedItem::new(1).with_tag("category", 1).with_tag("sub-category", 5),
//!     TaggedItem::new(2).with_tag("category", 2).with_tag("sub-category", 3),
//! ];
//! let engine = GroupEngine::new(items);
//! let tree = engine
//!     .build_group_tree(&["category", "sub-category"], None::<Filter>, TreeConfig::compact())
//!     .unwrap();
//! assert_eq!(tree.leaf_count(), 2);
//! ```

use thiserror::Error;

pub mod cli;
pub mod commands;
pub mod config;
pub mod db;
pub mod group;
pub mod model;
pub mod output;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum TaggroupError {
    /// Grouping error
    #[error("Grouping error: {0}")]
    GroupError(#[from] group::GroupError),
    /// Store error
    #[error("Database error: {0}")]
    DbError(#[from] db::DbError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    /// Represents a JSON parsing or serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_from_group_error() {
        let error: TaggroupError = group::GroupError::InvalidArgument("filter must be an object".into()).into();
        assert_eq!(
            error.to_string(),
            "Grouping error: Invalid argument: filter must be an object"
        );
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_from_db_error() {
        let error: TaggroupError = db::DbError::ItemNotFound("1".into()).into();
        assert_eq!(error.to_string(), "Database error: Item not found: 1");
    }

    #[test]
    fn test_invalid_input_error() {
        let error = TaggroupError::InvalidInput("No tag order given".into());
        assert_eq!(error.to_string(), "Invalid input: No tag order given");
    }
}
