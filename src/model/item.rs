//! Tagged items, the unit being grouped

use super::tag_map::TagMap;
use super::value::{Scalar, TagValue};
use serde::{Deserialize, Serialize};

/// An item carrying one value or a list of values per tag
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaggedItem {
    pub id: Scalar,
    #[serde(default)]
    pub tags: TagMap<TagValue>,
}

impl TaggedItem {
    /// Create an item without tags
    #[must_use]
    pub fn new(id: impl Into<Scalar>) -> Self {
        Self {
            id: id.into(),
            tags: TagMap::new(),
        }
    }

    /// Builder form of [`TaggedItem::set_tag_value`]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, value: impl Into<TagValue>) -> Self {
        self.set_tag_value(tag, value);
        self
    }

    /// Builder form of [`TaggedItem::add_tag_value`]
    #[must_use]
    pub fn with_added(mut self, tag: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.add_tag_value(tag, value);
        self
    }

    /// Set the value of a tag, replacing whatever was stored
    pub fn set_tag_value(&mut self, tag: impl Into<String>, value: impl Into<TagValue>) {
        self.tags.insert(tag, value.into());
    }

    /// Append a value to a tag
    ///
    /// The first value added to an absent tag already uses the list form, so a
    /// tag built with `add_tag_value` is always multi-valued.
    ///
    /// # Examples
    /// ```
    /// # use taggroup::model::{TaggedItem, TagValue, Scalar};
    /// let mut item = TaggedItem::new("Titicaca Lake");
    /// item.add_tag_value("country", "Peru");
    /// item.add_tag_value("country", "Bolivia");
    /// assert_eq!(
    ///     item.tag_value("country"),
    ///     Some(&TagValue::Many(vec![Scalar::from("Peru"), Scalar::from("Bolivia")]))
    /// );
    /// ```
    pub fn add_tag_value(&mut self, tag: impl Into<String>, value: impl Into<Scalar>) {
        let tag = tag.into();
        let value = value.into();
        match self.tags.get_mut(&tag) {
            Some(existing) => existing.push(value),
            None => {
                self.tags.insert(tag, TagValue::Many(vec![value]));
            }
        }
    }

    /// The value(s) stored for a tag, `None` when the item lacks it
    #[must_use]
    pub fn tag_value(&self, tag: &str) -> Option<&TagValue> {
        self.tags.get(tag)
    }

    /// The value(s) stored for a tag as a slice (empty when absent)
    #[must_use]
    pub fn tag_values(&self, tag: &str) -> &[Scalar] {
        self.tag_value(tag).map_or(&[] as &[Scalar], TagValue::values)
    }

    /// Build an item from a JSON object `{ "id": ..., "tags": { ... } }`
    ///
    /// Returns a description of the problem when the document has the wrong
    /// shape. Tags holding `null` or empty lists are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error message if `id` is missing or not a scalar, or if
    /// `tags` is present but not an object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("expected an item object, found {value}"))?;

        let id = object
            .get("id")
            .and_then(Scalar::from_json)
            .ok_or_else(|| "item is missing a scalar 'id'".to_string())?;

        let mut item = Self::new(id);
        match object.get("tags") {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Object(tags)) => {
                for (tag, raw) in tags {
                    if let Some(tag_value) = TagValue::from_json(raw) {
                        item.set_tag_value(tag.clone(), tag_value);
                    }
                }
            }
            Some(other) => {
                return Err(format!("tags of item '{}' must be an object, found {other}", item.id));
            }
        }
        Ok(item)
    }
}
