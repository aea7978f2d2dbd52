use serde::{Deserialize, Serialize};

use crate::schema::schema_model::RawField;

// ============================================================================
// Field vocabulary
// ============================================================================

/// The seven field kinds a schema may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Textarea,
    Radio,
    Checkbox,
    Dropdown,
    Slider,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Dropdown,
        FieldType::Slider,
    ];

    /// Parse the schema's `type` string. Unrecognized names yield `None`.
    pub fn parse(name: &str) -> Option<FieldType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "text" => Some(FieldType::Text),
            "number" => Some(FieldType::Number),
            "textarea" => Some(FieldType::Textarea),
            "radio" => Some(FieldType::Radio),
            "checkbox" => Some(FieldType::Checkbox),
            "dropdown" => Some(FieldType::Dropdown),
            "slider" => Some(FieldType::Slider),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Dropdown => "dropdown",
            FieldType::Slider => "slider",
        }
    }

    /// Human-readable name, as offered by the authoring dialog.
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Number => "Number",
            FieldType::Textarea => "Textarea",
            FieldType::Radio => "Radio",
            FieldType::Checkbox => "Checkbox",
            FieldType::Dropdown => "Dropdown",
            FieldType::Slider => "Slider",
        }
    }

    /// Radio, checkbox and dropdown carry an option list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Radio | FieldType::Checkbox | FieldType::Dropdown)
    }

    /// Slider and number carry min/max/step.
    pub fn has_bounds(&self) -> bool {
        matches!(self, FieldType::Slider | FieldType::Number)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable choice of a radio, checkbox or dropdown field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A bare option string is both label and value.
    pub fn bare(s: impl Into<String>) -> Self {
        let s = s.into();
        Self {
            label: s.clone(),
            value: s,
        }
    }
}

/// Numeric constraints of slider and number fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

/// Type-specific payload of a field. Adding a kind means adding a variant
/// here and one arm in each exhaustive match over it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number(Bounds),
    Textarea,
    Radio(Vec<FieldOption>),
    Checkbox(Vec<FieldOption>),
    Dropdown(Vec<FieldOption>),
    Slider(Bounds),
    /// A `type` the engine does not know. Kept so the rest of the form still
    /// loads; rendered as an inline diagnostic.
    Unknown(String),
}

impl FieldKind {
    pub fn field_type(&self) -> Option<FieldType> {
        match self {
            FieldKind::Text => Some(FieldType::Text),
            FieldKind::Number(_) => Some(FieldType::Number),
            FieldKind::Textarea => Some(FieldType::Textarea),
            FieldKind::Radio(_) => Some(FieldType::Radio),
            FieldKind::Checkbox(_) => Some(FieldType::Checkbox),
            FieldKind::Dropdown(_) => Some(FieldType::Dropdown),
            FieldKind::Slider(_) => Some(FieldType::Slider),
            FieldKind::Unknown(_) => None,
        }
    }

    /// The schema `type` string this kind was declared with.
    pub fn type_name(&self) -> &str {
        match self {
            FieldKind::Unknown(name) => name,
            other => other.field_type().map(|t| t.as_str()).unwrap_or_default(),
        }
    }

    pub fn options(&self) -> &[FieldOption] {
        match self {
            FieldKind::Radio(options) | FieldKind::Checkbox(options) | FieldKind::Dropdown(options) => {
                options
            }
            _ => &[],
        }
    }

    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            FieldKind::Number(bounds) | FieldKind::Slider(bounds) => Some(bounds),
            _ => None,
        }
    }
}

/// A normalized form field.
///
/// Serializes to the flat schema shape (`type`, `label`, `name`, ...) and
/// deserializes through the normalizer, so any JSON accepted here has been
/// checked and canonicalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RawField", try_from = "RawField")]
pub struct Field {
    pub name: String,
    pub label: String,
    pub placeholder: Option<String>,
    pub required: bool,
    pub kind: FieldKind,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            placeholder: None,
            required: false,
            kind,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn options(&self) -> &[FieldOption] {
        self.kind.options()
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|o| o.value == value)
    }
}
