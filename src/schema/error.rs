use thiserror::Error;

/// A malformed field or group definition. Never repaired silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("field #{index} has no type")]
    MissingType { index: usize },

    #[error("field #{index} has no name")]
    MissingName { index: usize },

    #[error("group title must not be empty")]
    EmptyTitle,

    #[error("schema defines no groups")]
    NoGroups,

    #[error("duplicate group title '{0}'")]
    DuplicateGroup(String),

    #[error("duplicate field name '{name}' in group '{group}'")]
    DuplicateField { group: String, name: String },

    #[error("{field_type} field '{name}' needs at least one option")]
    MissingOptions { name: String, field_type: String },

    #[error("field '{name}' has a blank value at option #{index}")]
    BlankOption { name: String, index: usize },

    #[error("field '{name}' lists option value '{value}' more than once")]
    DuplicateOption { name: String, value: String },

    #[error("field '{name}' has min {min} greater than max {max}")]
    InvalidRange { name: String, min: f64, max: f64 },

    #[error("field '{name}' has non-positive step {step}")]
    InvalidStep { name: String, step: f64 },

    #[error("group '{group}': {source}")]
    InGroup {
        group: String,
        #[source]
        source: Box<SchemaError>,
    },

    #[error("malformed definition: {0}")]
    Parse(String),

    #[error("could not read schema '{path}': {message}")]
    Read { path: String, message: String },
}

impl SchemaError {
    /// Attach the owning group's title to a field-level error.
    pub fn in_group(self, group: &str) -> SchemaError {
        match self {
            SchemaError::InGroup { .. } | SchemaError::DuplicateGroup(_) | SchemaError::EmptyTitle => self,
            other => SchemaError::InGroup {
                group: group.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with group context stripped.
    pub fn root(&self) -> &SchemaError {
        match self {
            SchemaError::InGroup { source, .. } => source.root(),
            other => other,
        }
    }
}
