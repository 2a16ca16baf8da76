//! Persistent item store for taggroup
//!
//! Provides a clean API for storing and retrieving tagged items
//! using sled as the embedded database backend.
//!
//! Uses two sled trees:
//! - `items`: Main tree mapping insertion sequence numbers to items
//! - `ids`: Lookup tree mapping item ids to their sequence number
//!
//! Sequence keys are big-endian, so iterating `items` yields the items in the
//! order they were first inserted. Replacing an item keeps its sequence number
//! and therefore its position.

use crate::group::{ItemSource, SourceError};
use crate::model::{Scalar, TagValue, TaggedItem};
use sled::{Db, Tree};
use std::path::Path;
use tracing::debug;

pub mod error;
pub mod types;

pub use error::DbError;
pub use types::{ItemKey, SeqKey, StoredItem};

/// Item store that encapsulates all database operations
pub struct ItemStore {
    db: Db,
    items: Tree, // seq -> item
    ids: Tree,   // id -> seq
}

impl ItemStore {
    /// Opens or creates a store at the specified path
    ///
    /// # Examples
    /// ```no_run
    /// use taggroup::db::ItemStore;
    /// let store = ItemStore::open("my_store").unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the database cannot be opened or if the internal trees cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let db = sled::open(path)?;
        let items = db.open_tree("items")?;
        let ids = db.open_tree("ids")?;
        Ok(Self { db, items, ids })
    }

    fn seq_of(&self, id: &Scalar) -> Result<Option<SeqKey>, DbError> {
        let key: Vec<u8> = ItemKey::new(id.clone()).try_into()?;
        self.ids
            .get(key.as_slice())?
            .map(|raw| SeqKey::from_bytes(&raw))
            .transpose()
    }

    /// Insert an item, replacing any stored item with the same id
    ///
    /// # Examples
    /// ```no_run
    /// use taggroup::{db::ItemStore, model::TaggedItem};
    ///
    /// let store = ItemStore::open("my_store").unwrap();
    /// store.insert(&TaggedItem::new(1).with_tag("category", 1)).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations or serialization fail.
    pub fn insert(&self, item: &TaggedItem) -> Result<(), DbError> {
        let seq = match self.seq_of(&item.id)? {
            Some(seq) => seq,
            None => {
                let seq = SeqKey(self.db.generate_id()?);
                let key: Vec<u8> = ItemKey::new(item.id.clone()).try_into()?;
                self.ids.insert(key, &seq.to_bytes()[..])?;
                seq
            }
        };

        let value = StoredItem::from(item).to_bytes()?;
        self.items.insert(seq.to_bytes(), value)?;
        debug!(id = %item.id, seq = seq.0, "stored item");
        Ok(())
    }

    /// Insert many items, in order
    ///
    /// # Returns
    /// Number of items written
    ///
    /// # Errors
    ///
    /// Returns `DbError` on the first item that cannot be stored.
    pub fn insert_all<'a>(&self, items: impl IntoIterator<Item = &'a TaggedItem>) -> Result<usize, DbError> {
        let mut written = 0;
        for item in items {
            self.insert(item)?;
            written += 1;
        }
        Ok(written)
    }

    /// Get the item stored under `id`
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or deserialization errors occur.
    pub fn get(&self, id: &Scalar) -> Result<Option<TaggedItem>, DbError> {
        let Some(seq) = self.seq_of(id)? else {
            return Ok(None);
        };

        match self.items.get(seq.to_bytes())? {
            Some(raw) => Ok(Some(StoredItem::from_bytes(&raw)?.into())),
            None => Ok(None),
        }
    }

    /// Remove an item from the store
    ///
    /// # Returns
    /// * `true` if the item was removed
    /// * `false` if it was not stored
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail.
    pub fn remove(&self, id: &Scalar) -> Result<bool, DbError> {
        let Some(seq) = self.seq_of(id)? else {
            return Ok(false);
        };

        let key: Vec<u8> = ItemKey::new(id.clone()).try_into()?;
        self.ids.remove(key)?;
        self.items.remove(seq.to_bytes())?;
        Ok(true)
    }

    fn update<F: FnOnce(&mut TaggedItem)>(&self, id: &Scalar, change: F) -> Result<(), DbError> {
        let mut item = self
            .get(id)?
            .ok_or_else(|| DbError::ItemNotFound(id.to_string()))?;
        change(&mut item);
        self.insert(&item)
    }

    /// Set the value of one tag of a stored item
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has this id.
    pub fn set_tag_value(&self, id: &Scalar, tag: &str, value: impl Into<TagValue>) -> Result<(), DbError> {
        let value = value.into();
        self.update(id, |item| item.set_tag_value(tag, value))
    }

    /// Append a value to one tag of a stored item
    ///
    /// # Errors
    ///
    /// Returns `DbError::ItemNotFound` if no item has this id.
    pub fn add_tag_value(&self, id: &Scalar, tag: &str, value: impl Into<Scalar>) -> Result<(), DbError> {
        let value = value.into();
        self.update(id, |item| item.add_tag_value(tag, value))
    }

    /// List all items in insertion order
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database iteration fails or deserialization errors occur.
    pub fn list_all(&self) -> Result<Vec<TaggedItem>, DbError> {
        let mut items = Vec::new();
        for result in &self.items {
            let (_, value) = result?;
            items.push(StoredItem::from_bytes(&value)?.into());
        }
        Ok(items)
    }

    /// Get the number of stored items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Check if an item with this id is stored
    ///
    /// # Errors
    ///
    /// Returns `DbError` if database operations fail or serialization errors occur.
    pub fn contains(&self, id: &Scalar) -> Result<bool, DbError> {
        let key: Vec<u8> = ItemKey::new(id.clone()).try_into()?;
        Ok(self.ids.contains_key(key.as_slice())?)
    }

    /// Flush all pending writes to disk
    ///
    /// # Errors
    ///
    /// Returns `DbError` if the flush operation fails.
    pub fn flush(&self) -> Result<(), DbError> {
        self.db.flush()?;
        Ok(())
    }

    /// Clear all items from the store
    ///
    /// # Warning
    /// This operation is irreversible!
    ///
    /// # Errors
    ///
    /// Returns `DbError` if clearing either tree fails.
    pub fn clear(&self) -> Result<(), DbError> {
        self.items.clear()?;
        self.ids.clear()?;
        Ok(())
    }
}

impl ItemSource for ItemStore {
    fn all_items(&self) -> Result<Vec<TaggedItem>, SourceError> {
        self.list_all().map_err(Into::into)
    }
}

impl Drop for ItemStore {
    fn drop(&mut self) {
        let _ = self.db.flush();
    }
}
