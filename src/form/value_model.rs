use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::schema::field_model::FieldKind;

/// The value held by one field.
///
/// Serialized untagged so snapshots read as plain JSON: a string, a number,
/// or (checkbox only) an array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Choices(Vec<String>),
}

impl FieldValue {
    /// Empty string and empty array count as "no value". Numbers never do.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Choices(values) => values.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_choices(&self) -> Option<&[String]> {
        match self {
            FieldValue::Choices(values) => Some(values),
            _ => None,
        }
    }

    /// Whether this value has the shape the field kind stores.
    pub fn fits(&self, kind: &FieldKind) -> bool {
        match kind {
            FieldKind::Text
            | FieldKind::Number(_)
            | FieldKind::Textarea
            | FieldKind::Radio(_)
            | FieldKind::Dropdown(_) => matches!(self, FieldValue::Text(_)),
            FieldKind::Checkbox(_) => matches!(self, FieldValue::Choices(_)),
            FieldKind::Slider(_) => matches!(self, FieldValue::Number(n) if n.is_finite()),
            FieldKind::Unknown(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Choices(values) => f.write_str(&values.join(", ")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Choices(values)
    }
}

/// Values of one group, keyed by field name.
pub type GroupValues = BTreeMap<String, FieldValue>;

/// Values of the whole form, keyed by group title. This is the snapshot.
pub type FormValues = BTreeMap<String, GroupValues>;

/// A field addressed by its owning group, so names may repeat across groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldKey {
    pub group: String,
    pub field: String,
}

impl FieldKey {
    pub fn new(group: &str, field: &str) -> Self {
        Self {
            group: group.to_string(),
            field: field.to_string(),
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.field)
    }
}

pub type TouchedSet = BTreeSet<FieldKey>;
