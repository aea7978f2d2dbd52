use serde::Serialize;

use crate::{
    form::{
        error::InputError,
        value_model::{FieldKey, FieldValue},
    },
    schema::field_model::{Field, FieldKind, FieldOption},
};

// ============================================================================
// Rendered description of a single control
// ============================================================================

/// Everything a presentation layer needs to draw one field and route its
/// change/blur events back through `key`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedField {
    pub key: FieldKey,
    pub label: String,
    pub required: bool,
    pub invalid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub control: Control,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum Control {
    TextInput {
        input_type: &'static str,
        value: String,
        placeholder: Option<String>,
    },
    TextArea {
        value: String,
        placeholder: Option<String>,
    },
    RadioGroup {
        options: Vec<RenderedOption>,
    },
    CheckboxGroup {
        options: Vec<RenderedOption>,
    },
    Dropdown {
        options: Vec<RenderedOption>,
        value: String,
        /// What the closed dropdown shows: the value, or the first option
        /// while nothing is chosen. Never written back into the form.
        display: String,
    },
    Slider {
        value: f64,
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
    },
    /// Diagnostic marker for a field whose type is not known.
    Invalid {
        type_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedOption {
    pub id: String,
    pub label: String,
    pub value: String,
    pub selected: bool,
}

// ============================================================================
// Defaults and coercion
// ============================================================================

/// The value a field holds before the user touches it.
pub fn default_value(field: &Field) -> FieldValue {
    match &field.kind {
        FieldKind::Checkbox(_) => FieldValue::Choices(Vec::new()),
        FieldKind::Slider(bounds) => FieldValue::Number(bounds.min.unwrap_or(0.0)),
        FieldKind::Text
        | FieldKind::Number(_)
        | FieldKind::Textarea
        | FieldKind::Radio(_)
        | FieldKind::Dropdown(_)
        | FieldKind::Unknown(_) => FieldValue::Text(String::new()),
    }
}

/// Add `value` if absent, remove it if present. Order of the remaining
/// choices is preserved.
pub fn toggle_choice(current: &[String], value: &str) -> Vec<String> {
    if current.iter().any(|v| v == value) {
        current.iter().filter(|v| *v != value).cloned().collect()
    } else {
        let mut next = current.to_vec();
        next.push(value.to_string());
        next
    }
}

/// Turn a raw UI value into the field's stored value.
///
/// `current` matters only for checkboxes, where the raw value is the option
/// being toggled.
pub fn coerce(field: &Field, current: Option<&FieldValue>, raw: &str) -> Result<FieldValue, InputError> {
    match &field.kind {
        FieldKind::Text | FieldKind::Number(_) | FieldKind::Textarea => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Radio(_) => {
            require_option(field, raw)?;
            Ok(FieldValue::Text(raw.to_string()))
        }
        FieldKind::Dropdown(_) => {
            if !raw.is_empty() {
                require_option(field, raw)?;
            }
            Ok(FieldValue::Text(raw.to_string()))
        }
        FieldKind::Checkbox(_) => {
            require_option(field, raw)?;
            let chosen = current.and_then(FieldValue::as_choices).unwrap_or_default();
            Ok(FieldValue::Choices(toggle_choice(chosen, raw)))
        }
        FieldKind::Slider(_) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(FieldValue::Number)
            .ok_or_else(|| InputError::NotANumber {
                field: field.name.clone(),
                value: raw.to_string(),
            }),
        FieldKind::Unknown(type_name) => Err(InputError::UnsupportedField {
            field: field.name.clone(),
            type_name: type_name.clone(),
        }),
    }
}

fn require_option(field: &Field, raw: &str) -> Result<(), InputError> {
    if field.has_option(raw) {
        Ok(())
    } else {
        Err(InputError::UnknownOption {
            field: field.name.clone(),
            value: raw.to_string(),
        })
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Describe one field. `error` is the message to show inline, already gated
/// on touched state by the caller.
pub fn render_field(group: &str, field: &Field, value: &FieldValue, error: Option<String>) -> RenderedField {
    let text = value.as_text().unwrap_or_default();

    let control = match &field.kind {
        FieldKind::Text | FieldKind::Number(_) => Control::TextInput {
            input_type: if matches!(field.kind, FieldKind::Number(_)) { "number" } else { "text" },
            value: text.to_string(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Textarea => Control::TextArea {
            value: text.to_string(),
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Radio(options) => Control::RadioGroup {
            options: render_options(&field.name, options, |v| v == text),
        },
        FieldKind::Checkbox(options) => {
            let chosen = value.as_choices().unwrap_or_default();
            Control::CheckboxGroup {
                options: render_options(&field.name, options, |v| chosen.iter().any(|c| c == v)),
            }
        }
        FieldKind::Dropdown(options) => {
            let display = if text.is_empty() {
                options.first().map(|o| o.value.clone()).unwrap_or_default()
            } else {
                text.to_string()
            };
            Control::Dropdown {
                options: render_options(&field.name, options, |v| v == text),
                value: text.to_string(),
                display,
            }
        }
        FieldKind::Slider(bounds) => Control::Slider {
            value: value.as_number().unwrap_or(bounds.min.unwrap_or(0.0)),
            min: bounds.min,
            max: bounds.max,
            step: bounds.step,
        },
        FieldKind::Unknown(type_name) => Control::Invalid {
            type_name: type_name.clone(),
        },
    };

    RenderedField {
        key: FieldKey::new(group, &field.name),
        label: field.label.clone(),
        required: field.required,
        invalid: error.is_some(),
        error,
        control,
    }
}

fn render_options(name: &str, options: &[FieldOption], selected: impl Fn(&str) -> bool) -> Vec<RenderedOption> {
    options
        .iter()
        .enumerate()
        .map(|(index, option)| RenderedOption {
            id: format!("{}-{}", name, index),
            label: option.label.clone(),
            value: option.value.clone(),
            selected: selected(&option.value),
        })
        .collect()
}
