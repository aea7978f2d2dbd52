use serde::{Deserialize, Serialize};

use crate::{
    form::value_model::{FieldValue, GroupValues},
    render::input::default_value,
    schema::{
        field_model::{Field, FieldKind},
        schema_model::Group,
    },
};

/// A single validation rule: `Some(message)` when the value is rejected.
pub type Rule = fn(&Field, Option<&FieldValue>) -> Option<String>;

/// Rules run in order; the first message wins.
pub const RULES: &[Rule] = &[required_rule];

/// A failed field, reported inline under the field. Never fatal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub group: String,
    pub field: String,
    pub message: String,
}

/// Validate one field against its current value.
///
/// `None` means valid. Fields of an unknown type hold no value and are never
/// rejected.
pub fn validate(field: &Field, value: Option<&FieldValue>) -> Option<String> {
    if matches!(field.kind, FieldKind::Unknown(_)) {
        return None;
    }
    RULES.iter().find_map(|rule| rule(field, value))
}

/// Validate every field of a group, in field order. All failures are
/// returned, not just the first. A field with no stored value is checked
/// against its default, so an untouched slider holds its minimum.
pub fn validate_group(group: &Group, values: Option<&GroupValues>) -> Vec<ValidationError> {
    group
        .fields
        .iter()
        .filter_map(|field| {
            let value = values
                .and_then(|v| v.get(&field.name))
                .cloned()
                .unwrap_or_else(|| default_value(field));
            validate(field, Some(&value)).map(|message| ValidationError {
                group: group.title.clone(),
                field: field.name.clone(),
                message,
            })
        })
        .collect()
}

fn required_rule(field: &Field, value: Option<&FieldValue>) -> Option<String> {
    let empty = value.map_or(true, FieldValue::is_empty);
    (field.required && empty).then(|| format!("{} is required.", field.label))
}
