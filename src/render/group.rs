use serde::Serialize;

use crate::{
    form::value_model::{FieldKey, GroupValues, TouchedSet},
    render::input::{RenderedField, default_value, render_field},
    schema::schema_model::Group,
    validate::validator::validate,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedGroup {
    pub title: String,
    pub fields: Vec<RenderedField>,
}

impl RenderedGroup {
    pub fn invalid_fields(&self) -> impl Iterator<Item = &RenderedField> {
        self.fields.iter().filter(|f| f.invalid)
    }
}

/// Describe a group for display.
///
/// Touched state is read from the machine's set; a field shows its error only
/// after it has been touched.
pub fn render_group(group: &Group, values: Option<&GroupValues>, touched: &TouchedSet) -> RenderedGroup {
    let fields = group
        .fields
        .iter()
        .map(|field| {
            let value = values
                .and_then(|v| v.get(&field.name))
                .cloned()
                .unwrap_or_else(|| default_value(field));
            let is_touched = touched.contains(&FieldKey::new(&group.title, &field.name));
            let error = if is_touched { validate(field, Some(&value)) } else { None };
            render_field(&group.title, field, &value, error)
        })
        .collect();

    RenderedGroup {
        title: group.title.clone(),
        fields,
    }
}
