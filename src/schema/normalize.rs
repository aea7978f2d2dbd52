use std::collections::HashSet;

use crate::schema::{
    error::SchemaError,
    field_model::{Bounds, Field, FieldKind, FieldOption, FieldType},
    schema_model::{FormSchema, Group, RawField, RawGroup, RawOption, SchemaDocument},
};

// ============================================================================
// Options
// ============================================================================

/// Coerce loosely typed options into `{label, value}` pairs.
///
/// Bare strings become `{label: s, value: s}` and a pair without a label
/// falls back to its value. A blank value is an error.
pub fn normalize_options(name: &str, raw: Vec<RawOption>) -> Result<Vec<FieldOption>, SchemaError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, option)| {
            let (label, value) = match &option {
                RawOption::Bare(s) => (None, s.trim()),
                RawOption::Pair { label, value } => (label.as_deref(), value.trim()),
            };
            if value.is_empty() {
                return Err(SchemaError::BlankOption {
                    name: name.to_string(),
                    index,
                });
            }
            let label = non_blank(label).unwrap_or(value);
            Ok(FieldOption::new(label, value))
        })
        .collect()
}

// ============================================================================
// Fields
// ============================================================================

/// Normalize a single raw field.
pub fn normalize_field(raw: RawField) -> Result<Field, SchemaError> {
    normalize_field_at(0, raw)
}

/// Normalize a field list, reporting the position of the first bad field.
pub fn normalize_fields(raw: Vec<RawField>) -> Result<Vec<Field>, SchemaError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, field)| normalize_field_at(index, field))
        .collect()
}

fn normalize_field_at(index: usize, raw: RawField) -> Result<Field, SchemaError> {
    let type_name = non_blank(raw.field_type.as_deref()).ok_or(SchemaError::MissingType { index })?;
    let name = non_blank(raw.name.as_deref()).ok_or(SchemaError::MissingName { index })?;

    let label = non_blank(raw.label.as_deref()).unwrap_or(name).to_string();
    let placeholder = non_blank(raw.placeholder.as_deref()).map(str::to_string);
    let required = raw.required.unwrap_or(false);

    let kind = match FieldType::parse(type_name) {
        Some(field_type) if field_type.has_options() => {
            let options = normalize_options(name, raw.options.unwrap_or_default())?;
            check_options(name, field_type, &options)?;
            match field_type {
                FieldType::Radio => FieldKind::Radio(options),
                FieldType::Checkbox => FieldKind::Checkbox(options),
                _ => FieldKind::Dropdown(options),
            }
        }
        Some(field_type) if field_type.has_bounds() => {
            let bounds = Bounds {
                min: raw.min,
                max: raw.max,
                step: raw.step,
            };
            check_bounds(name, &bounds)?;
            match field_type {
                FieldType::Slider => FieldKind::Slider(bounds),
                _ => FieldKind::Number(bounds),
            }
        }
        Some(FieldType::Textarea) => FieldKind::Textarea,
        Some(_) => FieldKind::Text,
        None => FieldKind::Unknown(type_name.to_string()),
    };

    Ok(Field {
        name: name.to_string(),
        label,
        placeholder,
        required,
        kind,
    })
}

fn check_options(name: &str, field_type: FieldType, options: &[FieldOption]) -> Result<(), SchemaError> {
    if options.is_empty() {
        return Err(SchemaError::MissingOptions {
            name: name.to_string(),
            field_type: field_type.as_str().to_string(),
        });
    }

    let mut seen = HashSet::new();
    for option in options {
        if !seen.insert(option.value.as_str()) {
            return Err(SchemaError::DuplicateOption {
                name: name.to_string(),
                value: option.value.clone(),
            });
        }
    }
    Ok(())
}

fn check_bounds(name: &str, bounds: &Bounds) -> Result<(), SchemaError> {
    if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
        if min > max {
            return Err(SchemaError::InvalidRange {
                name: name.to_string(),
                min,
                max,
            });
        }
    }
    if let Some(step) = bounds.step {
        if step <= 0.0 {
            return Err(SchemaError::InvalidStep {
                name: name.to_string(),
                step,
            });
        }
    }
    Ok(())
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ============================================================================
// Groups and documents
// ============================================================================

/// Normalize one group: non-blank title, valid fields, unique field names.
pub fn normalize_group(raw: RawGroup) -> Result<Group, SchemaError> {
    let title = raw.title.trim();
    if title.is_empty() {
        return Err(SchemaError::EmptyTitle);
    }

    let fields = normalize_fields(raw.fields).map_err(|e| e.in_group(title))?;

    let mut names = HashSet::new();
    for field in &fields {
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                group: title.to_string(),
                name: field.name.clone(),
            });
        }
    }

    Ok(Group {
        title: title.to_string(),
        fields,
    })
}

/// Normalize a group list; titles must be unique across the list.
pub fn normalize_groups(raw: Vec<RawGroup>) -> Result<Vec<Group>, SchemaError> {
    let mut titles = HashSet::new();
    let mut groups = Vec::with_capacity(raw.len());

    for group in raw {
        let group = normalize_group(group)?;
        if !titles.insert(group.title.clone()) {
            return Err(SchemaError::DuplicateGroup(group.title));
        }
        groups.push(group);
    }

    Ok(groups)
}

pub fn normalize_document(doc: SchemaDocument) -> Result<FormSchema, SchemaError> {
    let groups = normalize_groups(doc.form.groups)?;
    if groups.is_empty() {
        return Err(SchemaError::NoGroups);
    }

    Ok(FormSchema {
        title: doc.form.title.trim().to_string(),
        description: non_blank(doc.form.description.as_deref()).map(str::to_string),
        groups,
    })
}

/// Parse and normalize a schema JSON document.
pub fn parse_schema(json: &str) -> Result<FormSchema, SchemaError> {
    let doc: SchemaDocument =
        serde_json::from_str(json).map_err(|e| SchemaError::Parse(e.to_string()))?;
    normalize_document(doc)
}

pub fn load_schema(path: &str) -> Result<FormSchema, SchemaError> {
    let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Read {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_schema(&content)
}

pub fn text_fingerprint(text: &str) -> String {
    use sha1::{Digest, Sha1};

    let mut hasher = Sha1::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ============================================================================
// serde bridges: normalized types travel as their raw shapes
// ============================================================================

impl From<Field> for RawField {
    fn from(field: Field) -> Self {
        let bounds = field.kind.bounds().copied().unwrap_or_default();
        let options = field.kind.field_type().filter(FieldType::has_options).map(|_| {
            field.kind.options().iter().map(RawOption::from).collect()
        });

        RawField {
            field_type: Some(field.kind.type_name().to_string()),
            label: Some(field.label),
            name: Some(field.name),
            placeholder: field.placeholder,
            options,
            required: Some(field.required),
            min: bounds.min,
            max: bounds.max,
            step: bounds.step,
        }
    }
}

impl TryFrom<RawField> for Field {
    type Error = SchemaError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        normalize_field(raw)
    }
}

impl From<Group> for RawGroup {
    fn from(group: Group) -> Self {
        RawGroup {
            title: group.title,
            fields: group.fields.into_iter().map(RawField::from).collect(),
        }
    }
}

impl TryFrom<RawGroup> for Group {
    type Error = SchemaError;

    fn try_from(raw: RawGroup) -> Result<Self, Self::Error> {
        normalize_group(raw)
    }
}
