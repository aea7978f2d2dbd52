use thiserror::Error;

use crate::{persist::error::PersistenceError, schema::error::SchemaError};

/// A raw UI value that cannot be stored in the target field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("'{value}' is not an option of field '{field}'")]
    UnknownOption { field: String, value: String },

    #[error("field '{field}' expects a number, got '{value}'")]
    NotANumber { field: String, value: String },

    #[error("field '{field}' has unsupported type '{type_name}'")]
    UnsupportedField { field: String, type_name: String },
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("no group titled '{0}'")]
    UnknownGroup(String),

    #[error("group '{group}' has no field '{field}'")]
    UnknownField { group: String, field: String },

    #[error("value for '{group}/{field}' does not fit a {type_name} field")]
    ValueShape {
        group: String,
        field: String,
        type_name: String,
    },

    #[error("form has already been submitted")]
    Submitted,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The snapshot could not be written; the transition did not happen but
    /// the in-memory values are intact.
    #[error("snapshot not saved: {0}")]
    Persistence(#[from] PersistenceError),
}
