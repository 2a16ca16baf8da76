//! Filters defining group membership
//!
//! A [`Filter`] maps tag ids to the value an item must carry for that tag.
//! Public entry points accept anything implementing [`IntoFilter`]: the native
//! type, a `serde_json::Value` or JSON text. Every accepted shape is normalized
//! into `Option<Filter>` once, before any matching happens.
//!
//! The serialized form mirrors the native one:
//!
//! ```json
//! { "tags": { "country": "Peru", "category": 3 } }
//! ```
//!
//! `null` means "no filter". A document without a `tags` key, or with an empty
//! one, matches everything as well.

use super::tag_map::TagMap;
use super::value::Scalar;
use crate::group::GroupError;
use serde::{Deserialize, Serialize};

/// Expected tag values an item must satisfy
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    #[serde(default)]
    pub tags: TagMap<Scalar>,
}

impl Filter {
    /// A filter matching every item
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Builder form of [`Filter::set`]
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.set(tag, value);
        self
    }

    /// Require `tag` to hold `value`, replacing any previous requirement
    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<Scalar>) {
        self.tags.insert(tag, value.into());
    }

    /// Expected value for `tag`
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Scalar> {
        self.tags.get(tag)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Normalize a JSON document into a filter
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` if the document is neither `null`
    /// nor an object, if `tags` is not an object, or if a tag value is not a
    /// scalar.
    pub fn from_json(value: &serde_json::Value) -> Result<Option<Self>, GroupError> {
        let object = match value {
            serde_json::Value::Null => return Ok(None),
            serde_json::Value::Object(object) => object,
            other => {
                return Err(GroupError::InvalidArgument(format!(
                    "filter must be an object or null, found {other}"
                )));
            }
        };

        let mut filter = Self::any();
        match object.get("tags") {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::Object(tags)) => {
                for (tag, raw) in tags {
                    let expected = Scalar::from_json(raw).ok_or_else(|| {
                        GroupError::InvalidArgument(format!(
                            "filter value for tag '{tag}' must be a string or a number, found {raw}"
                        ))
                    })?;
                    filter.set(tag.clone(), expected);
                }
            }
            Some(other) => {
                return Err(GroupError::InvalidArgument(format!(
                    "filter 'tags' must be an object, found {other}"
                )));
            }
        }
        Ok(Some(filter))
    }
}

/// Conversion of accepted filter shapes into the canonical `Option<Filter>`
pub trait IntoFilter {
    /// Normalize into an optional filter (`None` matches everything)
    ///
    /// # Errors
    ///
    /// Returns `GroupError::InvalidArgument` when the input has the wrong shape.
    fn into_filter(self) -> Result<Option<Filter>, GroupError>;
}

impl IntoFilter for Filter {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Ok(Some(self))
    }
}

impl IntoFilter for &Filter {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Ok(Some(self.clone()))
    }
}

impl IntoFilter for Option<Filter> {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Ok(self)
    }
}

impl IntoFilter for Option<&Filter> {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Ok(self.cloned())
    }
}

impl IntoFilter for &serde_json::Value {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Filter::from_json(self)
    }
}

impl IntoFilter for serde_json::Value {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        Filter::from_json(&self)
    }
}

/// JSON text
impl IntoFilter for &str {
    fn into_filter(self) -> Result<Option<Filter>, GroupError> {
        let value: serde_json::Value = serde_json::from_str(self)
            .map_err(|e| GroupError::InvalidArgument(format!("filter is not valid JSON: {e}")))?;
        Filter::from_json(&value)
    }
}
