//! Data model the grouping algorithms operate on
//!
//! - [`TaggedItem`]: an id plus, per tag, one value or a list of values
//! - [`TagValue`] / [`Scalar`]: explicit single-vs-multi value shapes
//! - [`Filter`]: expected tag values defining a group
//! - [`TagMap`]: the insertion-ordered map backing both

pub mod filter;
pub mod item;
pub mod tag_map;
pub mod value;

pub use filter::{Filter, IntoFilter};
pub use item::TaggedItem;
pub use tag_map::TagMap;
pub use value::{ComparisonPolicy, Scalar, TagValue};

/// Identifier of a tag (e.g. `"category"`)
pub type TagId = String;
