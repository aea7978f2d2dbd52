use thiserror::Error;

use crate::{
    builder::group_builder::build_group,
    schema::{
        error::SchemaError,
        field_model::{FieldOption, FieldType},
        schema_model::{Group, RawField, RawOption},
    },
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Both label and value are required for options.")]
    IncompleteOption,

    #[error("option value '{0}' already exists")]
    DuplicateOption(String),

    #[error("{} fields do not take options", .0.display_name())]
    NotAChoiceField(FieldType),

    #[error("no field at position {0}")]
    NoSuchField(usize),
}

/// A field being authored. Every edit produces a consistent draft; nothing
/// is validated until the group is built.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub field_type: FieldType,
    pub label: String,
    pub name: String,
    pub placeholder: String,
    pub required: bool,
    pub options: Vec<FieldOption>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self {
            field_type: FieldType::Text,
            label: String::new(),
            name: String::new(),
            placeholder: String::new(),
            required: false,
            options: Vec::new(),
            min: None,
            max: None,
            step: None,
        }
    }
}

impl FieldDraft {
    /// Switch type. Options survive only between choice types, bounds only
    /// between numeric types.
    pub fn set_type(&mut self, field_type: FieldType) {
        self.field_type = field_type;
        if !field_type.has_options() {
            self.options.clear();
        }
        if !field_type.has_bounds() {
            self.min = None;
            self.max = None;
            self.step = None;
        }
    }

    pub fn add_option(&mut self, label: &str, value: &str) -> Result<(), DraftError> {
        if !self.field_type.has_options() {
            return Err(DraftError::NotAChoiceField(self.field_type));
        }
        let (label, value) = (label.trim(), value.trim());
        if label.is_empty() || value.is_empty() {
            return Err(DraftError::IncompleteOption);
        }
        if self.options.iter().any(|o| o.value == value) {
            return Err(DraftError::DuplicateOption(value.to_string()));
        }
        self.options.push(FieldOption::new(label, value));
        Ok(())
    }

    pub fn remove_option(&mut self, index: usize) -> Option<FieldOption> {
        (index < self.options.len()).then(|| self.options.remove(index))
    }

    /// Replace options from comma-separated text; each entry is both label
    /// and value.
    pub fn set_options_csv(&mut self, text: &str) -> Result<(), DraftError> {
        if !self.field_type.has_options() {
            return Err(DraftError::NotAChoiceField(self.field_type));
        }
        self.options = text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(FieldOption::bare)
            .collect();
        Ok(())
    }

    pub fn options_csv(&self) -> String {
        self.options
            .iter()
            .map(|o| o.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn set_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        if self.field_type.has_bounds() {
            self.min = min;
            self.max = max;
        }
    }

    pub fn to_raw(&self) -> RawField {
        let blank_to_none = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
        RawField {
            field_type: Some(self.field_type.as_str().to_string()),
            label: blank_to_none(&self.label),
            name: blank_to_none(&self.name),
            placeholder: blank_to_none(&self.placeholder),
            options: self
                .field_type
                .has_options()
                .then(|| self.options.iter().map(RawOption::from).collect()),
            required: Some(self.required),
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

/// A group being authored in the "add group" dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupDraft {
    pub title: String,
    pub fields: Vec<FieldDraft>,
}

impl GroupDraft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fields: Vec::new(),
        }
    }

    /// Append a blank text field and return it for editing.
    pub fn add_field(&mut self) -> &mut FieldDraft {
        self.fields.push(FieldDraft::default());
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    pub fn field_mut(&mut self, index: usize) -> Result<&mut FieldDraft, DraftError> {
        self.fields.get_mut(index).ok_or(DraftError::NoSuchField(index))
    }

    pub fn remove_field(&mut self, index: usize) -> Result<FieldDraft, DraftError> {
        if index < self.fields.len() {
            Ok(self.fields.remove(index))
        } else {
            Err(DraftError::NoSuchField(index))
        }
    }

    pub fn build(&self) -> Result<Group, SchemaError> {
        build_group(&self.title, self.fields.iter().map(FieldDraft::to_raw).collect())
    }
}
