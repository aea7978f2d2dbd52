use serde::{Deserialize, Serialize};

use crate::schema::field_model::{Field, FieldOption};

// ============================================================================
// Raw (pre-normalization) schema shapes, as found in the JSON document
// ============================================================================

/// Top-level schema document: `{ "form": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub form: RawForm,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawForm {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub groups: Vec<RawGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawGroup {
    pub title: String,
    pub fields: Vec<RawField>,
}

/// A field as written by hand: every key optional, options loosely typed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawField {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<RawOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
}

impl RawField {
    /// Shorthand used by the authoring path and tests.
    pub fn new(field_type: &str, name: &str) -> Self {
        Self {
            field_type: Some(field_type.to_string()),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// An option is either a bare string or a `{label, value}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOption {
    Bare(String),
    Pair {
        #[serde(default)]
        label: Option<String>,
        value: String,
    },
}

impl From<&FieldOption> for RawOption {
    fn from(option: &FieldOption) -> Self {
        RawOption::Pair {
            label: Some(option.label.clone()),
            value: option.value.clone(),
        }
    }
}

// ============================================================================
// Normalized schema
// ============================================================================

/// A named, ordered set of fields shown together as one step of the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawGroup", try_from = "RawGroup")]
pub struct Group {
    pub title: String,
    pub fields: Vec<Field>,
}

impl Group {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A fully normalized form schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub title: String,
    pub description: Option<String>,
    pub groups: Vec<Group>,
}

impl FormSchema {
    pub fn group(&self, title: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.title == title)
    }

    /// Convert back to the document shape for writing to disk.
    pub fn to_document(&self) -> SchemaDocument {
        SchemaDocument {
            form: RawForm {
                title: self.title.clone(),
                description: self.description.clone(),
                groups: self.groups.iter().cloned().map(RawGroup::from).collect(),
            },
        }
    }

    /// Stable SHA-1 of the normalized groups.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(&self.groups).unwrap_or_default();
        crate::schema::normalize::text_fingerprint(&canonical)
    }
}
