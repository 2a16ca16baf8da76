//! Item sources
//!
//! The grouping engine never owns items. It asks an [`ItemSource`] for a
//! snapshot of every candidate item at the start of each operation and works
//! on that snapshot only. Implementations exist for in-memory collections,
//! for closures (see [`from_fn`]) and for the persistent
//! [`ItemStore`](crate::db::ItemStore).

use super::error::SourceError;
use crate::model::TaggedItem;

/// Capability to enumerate every item of a collection
pub trait ItemSource {
    /// Return a finite snapshot of all items, in a stable order
    ///
    /// The order of the snapshot drives the order of options and tree
    /// branches, so two calls against an unchanged collection should return
    /// the items in the same order.
    ///
    /// # Errors
    ///
    /// Returns the underlying failure of the collection; the engine passes it
    /// on to the caller unchanged.
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError>;
}

impl ItemSource for [TaggedItem] {
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        Ok(self.to_vec())
    }
}

impl ItemSource for Vec<TaggedItem> {
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        Ok(self.clone())
    }
}

impl<S: ItemSource + ?Sized> ItemSource for &S {
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        (**self).all_items()
    }
}

impl<S: ItemSource + ?Sized> ItemSource for Box<S> {
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        (**self).all_items()
    }
}

/// Item source backed by a closure
pub struct FnSource<F>(F);

impl<F> ItemSource for FnSource<F>
where
    F: Fn() -> Result<Vec<TaggedItem>, SourceError>,
{
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        (self.0)()
    }
}

/// Wrap a closure as an item source
///
/// # Examples
/// ```
/// use taggroup::group::{from_fn, ItemSource};
/// use taggroup::model::TaggedItem;
///
/// let source = from_fn(|| Ok(vec![TaggedItem::new(1).with_tag("category", 1)]));
/// assert_eq!(source.all_items().unwrap().len(), 1);
/// ```
pub const fn from_fn<F>(f: F) -> FnSource<F>
where
    F: Fn() -> Result<Vec<TaggedItem>, SourceError>,
{
    FnSource(f)
}
