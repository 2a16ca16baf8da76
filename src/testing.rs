//! Testing utilities for taggroup
//!
//! This module provides item fixtures and a `TestDb` wrapper for temporary
//! store management.
//!
//! Only available when compiled with `cfg(test)`.

use crate::db::ItemStore;
use crate::model::TaggedItem;
use std::path::Path;
use tempfile::TempDir;

/// Seven items spread over three categories and five sub-categories
///
/// | id | category | sub-category |
/// |----|----------|--------------|
/// | 1  | 1        | 5            |
/// | 2  | 1        | 5            |
/// | 3  | 1        | 4            |
/// | 4  | 2        | 3            |
/// | 5  | 2        | 3            |
/// | 6  | 3        | 2            |
/// | 7  | 3        | 1            |
#[must_use]
pub fn category_items() -> Vec<TaggedItem> {
    [(1, 1, 5), (2, 1, 5), (3, 1, 4), (4, 2, 3), (5, 2, 3), (6, 3, 2), (7, 3, 1)]
        .into_iter()
        .map(|(id, category, sub)| {
            TaggedItem::new(id)
                .with_tag("category", category)
                .with_tag("sub-category", sub)
        })
        .collect()
}

/// A single lake shared by two countries
#[must_use]
pub fn lake_items() -> Vec<TaggedItem> {
    let mut lake = TaggedItem::new("Titicaca Lake");
    lake.add_tag_value("category", "Lakes of Peru");
    lake.add_tag_value("category", "Lakes of Bolivia");
    lake.add_tag_value("country", "Peru");
    lake.add_tag_value("country", "Bolivia");
    vec![lake]
}

/// Wrapper for a temporary test store that cleans up on drop
///
/// The store lives in its own temporary directory which is removed when the
/// wrapper goes out of scope, so tests don't leave artifacts behind.
pub struct TestDb {
    // Field order matters: the store must be dropped before its directory.
    store: ItemStore,
    dir: TempDir,
}

impl TestDb {
    /// Create a new, empty test store
    ///
    /// # Panics
    /// Panics if the temporary directory or the store cannot be created.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let store = ItemStore::open(dir.path().join(name)).expect("Failed to open test store");
        Self { store, dir }
    }

    /// Get a reference to the underlying store
    #[must_use]
    pub const fn store(&self) -> &ItemStore {
        &self.store
    }

    /// Get the directory holding the test store
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
