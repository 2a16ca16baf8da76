//! Insertion-ordered map from tag ids to values
//!
//! Items and filters carry only a handful of tags, so a vector of pairs with
//! linear lookup is both the simplest and the fastest representation. Keeping
//! insertion order also keeps serialized documents stable.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// Ordered `tag id -> V` map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for TagMap<V> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<V> TagMap<V> {
    /// Create an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Value stored for `tag`
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == tag).map(|(_, v)| v)
    }

    /// Mutable value stored for `tag`
    pub fn get_mut(&mut self, tag: &str) -> Option<&mut V> {
        self.entries.iter_mut().find(|(k, _)| k == tag).map(|(_, v)| v)
    }

    /// Insert or replace; a replaced tag keeps its original position
    pub fn insert(&mut self, tag: impl Into<String>, value: V) -> Option<V> {
        let tag = tag.into();
        if let Some(slot) = self.get_mut(&tag) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((tag, value));
        None
    }

    /// Remove `tag`, returning its value
    pub fn remove(&mut self, tag: &str) -> Option<V> {
        let pos = self.entries.iter().position(|(k, _)| k == tag)?;
        Some(self.entries.remove(pos).1)
    }

    #[must_use]
    pub fn contains_key(&self, tag: &str) -> bool {
        self.get(tag).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(tag, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Tag ids in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for TagMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V: Serialize> Serialize for TagMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TagMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for TagMapVisitor<V> {
    type Value = TagMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of tag ids to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = TagMap::new();
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            map.insert(k, v);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for TagMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TagMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut map = TagMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        assert_eq!(map.insert("b", 3), Some(1));

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("b", &3), ("a", &2)]);
    }

    #[test]
    fn test_remove() {
        let mut map: TagMap<i32> = [("x", 1), ("y", 2)].into_iter().collect();
        assert_eq!(map.remove("x"), Some(1));
        assert_eq!(map.remove("x"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["y"]);
    }

    #[test]
    fn test_deserialize_preserves_document_order() {
        let map: TagMap<i32> = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }
}
