//! Grouping error types
//!
//! The grouping engine distinguishes only two failure kinds:
//!
//! - **`InvalidArgument`**: a filter or tree configuration with an unusable
//!   shape. Raised during normalization, before any item is looked at.
//! - **`Source`**: the item source failed to produce its snapshot. The
//!   original error is kept as the `source()` of this one.
//!
//! Items lacking a tag are not errors: the matcher treats them as
//! non-matching and the tree builder files them under the missing-value
//! placeholder.

use thiserror::Error;

/// Error produced by an [`ItemSource`](super::ItemSource) implementation
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Grouping errors
#[derive(Debug, Error)]
pub enum GroupError {
    /// Filter or tree configuration has an unusable shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The item source failed
    #[error("Item source failed: {0}")]
    Source(#[source] SourceError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
