use crate::schema::{
    error::SchemaError,
    normalize::normalize_group,
    schema_model::{Group, RawField, RawGroup},
};

/// Build a new group from user-authored field definitions.
///
/// Pure: the caller decides whether and when to hand the result to
/// `FormMachine::add_group`.
pub fn build_group(title: &str, raw_fields: Vec<RawField>) -> Result<Group, SchemaError> {
    if title.trim().is_empty() {
        return Err(SchemaError::EmptyTitle);
    }

    normalize_group(RawGroup {
        title: title.to_string(),
        fields: raw_fields,
    })
}

/// Build a group from a YAML or JSON definition `{ title, fields }`.
pub fn parse_group_definition(content: &str) -> Result<Group, SchemaError> {
    // JSON documents are valid YAML.
    let raw: RawGroup = serde_yaml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    build_group(&raw.title, raw.fields)
}
