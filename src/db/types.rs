//! Type wrappers for store keys and values
//!
//! # Types
//!
//! - **`ItemKey`**: an item id encoded with bincode, key of the `ids` tree
//! - **`SeqKey`**: an insertion sequence number, key of the `items` tree.
//!   Encoded big-endian so that sled's byte order is insertion order.
//! - **`StoredItem`**: the encoded form of a [`TaggedItem`]
//!
//! # Examples
//!
//! ```
//! use taggroup::db::types::{ItemKey, SeqKey};
//! use taggroup::model::Scalar;
//!
//! let key = ItemKey::new(Scalar::from("Titicaca Lake"));
//! let bytes: Vec<u8> = key.try_into().unwrap();
//! assert_eq!(ItemKey::from_bytes(&bytes).unwrap().as_scalar(), &Scalar::from("Titicaca Lake"));
//!
//! assert!(SeqKey(1).to_bytes() < SeqKey(256).to_bytes());
//! ```

use super::error::DbError;
use crate::model::{Scalar, TagValue, TaggedItem};
use bincode::{Decode, Encode};

/// Item id usable as a store key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey(pub Scalar);

impl TryFrom<ItemKey> for Vec<u8> {
    type Error = DbError;

    fn try_from(key: ItemKey) -> Result<Self, Self::Error> {
        Ok(bincode::encode_to_vec(&key.0, bincode::config::standard())?)
    }
}

impl ItemKey {
    pub fn new(id: impl Into<Scalar>) -> Self {
        Self(id.into())
    }

    /// # Errors
    ///
    /// Returns `DbError` if the bytes cannot be deserialized into an id.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let (id, _): (Scalar, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(Self(id))
    }

    #[must_use]
    pub fn into_inner(self) -> Scalar {
        self.0
    }

    #[must_use]
    pub const fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

/// Insertion sequence number
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SeqKey(pub u64);

impl SeqKey {
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// # Errors
    ///
    /// Returns `DbError::SerializeError` if `bytes` is not exactly 8 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let raw: [u8; 8] = bytes
            .try_into()
            .map_err(|_| DbError::SerializeError(format!("sequence key has {} bytes", bytes.len())))?;
        Ok(Self(u64::from_be_bytes(raw)))
    }
}

/// Encoded form of a tagged item
#[derive(Encode, Decode, Debug, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub id: Scalar,
    pub tags: Vec<(String, TagValue)>,
}

impl From<&TaggedItem> for StoredItem {
    fn from(item: &TaggedItem) -> Self {
        Self {
            id: item.id.clone(),
            tags: item
                .tags
                .iter()
                .map(|(tag, value)| (tag.to_string(), value.clone()))
                .collect(),
        }
    }
}

impl From<StoredItem> for TaggedItem {
    fn from(stored: StoredItem) -> Self {
        Self {
            id: stored.id,
            tags: stored.tags.into_iter().collect(),
        }
    }
}

impl StoredItem {
    /// # Errors
    ///
    /// Returns `DbError::EncodeError` if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DbError> {
        Ok(bincode::encode_to_vec(self, bincode::config::standard())?)
    }

    /// # Errors
    ///
    /// Returns `DbError::DecodeError` if the bytes do not hold a stored item.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DbError> {
        let (stored, _): (Self, usize) = bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Ok(stored)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
