//! Tag values and the rules for comparing them
//!
//! A tag holds either a single [`Scalar`] or a list of scalars. The two shapes
//! are modelled explicitly by [`TagValue`], so every algorithm downstream
//! matches on a known shape instead of inspecting values at runtime.
//!
//! # Comparison
//!
//! Values arriving from JSON documents, CLI arguments and the store do not
//! always agree on their representation (`"5"` vs `5`). [`ComparisonPolicy`]
//! makes the equality rule explicit:
//!
//! - **`Loose`** (default): numeric strings compare equal to the numbers they
//!   spell, so a filter value `"5"` selects items tagged with `5`.
//! - **`Strict`**: values compare equal only when both kind and content match.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single tag value
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value
    Int(i64),
    /// Text value
    Text(String),
}

impl Scalar {
    /// Convert a JSON value into a scalar
    ///
    /// Integers (and floats without a fractional part) become [`Scalar::Int`],
    /// strings and other floats become [`Scalar::Text`]. Booleans are coerced
    /// to `1`/`0`. Returns `None` for `null`, arrays and objects.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Self::Text(s.clone())),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Self::Int(i))
                } else {
                    match n.as_f64() {
                        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Some(Self::Int(f as i64)),
                        _ => Some(Self::Text(n.to_string())),
                    }
                }
            }
            serde_json::Value::Bool(b) => Some(Self::Int(i64::from(*b))),
            _ => None,
        }
    }

    /// Infer a scalar from free text, as typed on a command line
    ///
    /// # Examples
    /// ```
    /// # use taggroup::model::Scalar;
    /// assert_eq!(Scalar::infer("42"), Scalar::Int(42));
    /// assert_eq!(Scalar::infer("Peru"), Scalar::Text("Peru".into()));
    /// ```
    #[must_use]
    pub fn infer(text: &str) -> Self {
        text.trim()
            .parse::<i64>()
            .map_or_else(|_| Self::Text(text.to_string()), Self::Int)
    }

    /// Numeric reading of this value, if it has one
    ///
    /// Integral text reads as an integer so large values keep their precision.
    fn numeric(&self) -> Option<Numeric> {
        match self {
            Self::Int(i) => Some(Numeric::Int(*i)),
            Self::Text(s) => {
                let text = s.trim();
                text.parse::<i64>().map(Numeric::Int).ok().or_else(|| {
                    text.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(Numeric::Float)
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    fn equals(self, other: Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (a, b) => (a.as_f64() - b.as_f64()).abs() < f64::EPSILON,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Equality rule applied when matching filter values against item values
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonPolicy {
    /// Numeric strings equal the numbers they spell
    #[default]
    Loose,
    /// Kind and content must both match
    Strict,
}

impl ComparisonPolicy {
    /// Compare two scalars under this policy
    ///
    /// # Examples
    /// ```
    /// # use taggroup::model::{ComparisonPolicy, Scalar};
    /// assert!(ComparisonPolicy::Loose.equals(&Scalar::from("5"), &Scalar::from(5)));
    /// assert!(!ComparisonPolicy::Strict.equals(&Scalar::from("5"), &Scalar::from(5)));
    /// ```
    #[must_use]
    pub fn equals(self, left: &Scalar, right: &Scalar) -> bool {
        if left == right {
            return true;
        }

        match self {
            Self::Strict => false,
            Self::Loose => match (left.numeric(), right.numeric()) {
                (Some(a), Some(b)) => a.equals(b),
                _ => false,
            },
        }
    }
}

/// The value(s) an item holds for one tag
#[derive(Encode, Decode, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TagValue {
    /// Exactly one value
    One(Scalar),
    /// A list of values, never empty
    Many(Vec<Scalar>),
}

impl TagValue {
    /// All values held, in insertion order
    #[must_use]
    pub fn values(&self) -> &[Scalar] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values,
        }
    }

    /// Number of values held
    #[must_use]
    pub fn len(&self) -> usize {
        self.values().len()
    }

    /// `true` only for a degenerate `Many` with no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    /// Whether `expected` is satisfied by this value
    ///
    /// A single value is compared for equality; a list is tested for
    /// membership. Both use `policy`.
    #[must_use]
    pub fn satisfies(&self, expected: &Scalar, policy: ComparisonPolicy) -> bool {
        match self {
            Self::One(value) => policy.equals(expected, value),
            Self::Many(values) => values.iter().any(|v| policy.equals(expected, v)),
        }
    }

    /// Append a value, turning a single value into a list
    pub fn push(&mut self, value: Scalar) {
        match self {
            Self::One(existing) => {
                let first = std::mem::replace(existing, Scalar::Int(0));
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(values) => values.push(value),
        }
    }

    /// Convert a JSON value (scalar or array of scalars) into a tag value
    ///
    /// Returns `None` for `null`, objects, empty arrays and arrays holding
    /// non-scalar entries.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Array(entries) => {
                let values: Option<Vec<Scalar>> = entries.iter().map(Scalar::from_json).collect();
                values.filter(|v| !v.is_empty()).map(Self::Many)
            }
            other => Scalar::from_json(other).map(Self::One),
        }
    }
}

impl From<Scalar> for TagValue {
    fn from(value: Scalar) -> Self {
        Self::One(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::One(value.into())
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        Self::One(value.into())
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::One(value.into())
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::One(value.into())
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One(value) => write!(f, "{value}"),
            Self::Many(values) => {
                let joined: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{}", joined.join(", "))
            }
        }
    }
}
