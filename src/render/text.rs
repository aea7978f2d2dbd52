use crate::render::{
    input::{Control, RenderedField, RenderedOption},
    view::FormView,
};

// ============================================================================
// Plain-text renderer for the CLI's presentation layer
// ============================================================================

/// Render a form view as terminal text.
///
/// ```text
/// === Registration ===
///
/// > Account
///   Profile
///
/// --- Account (1/2) ---
/// Email *
///   [ x@y.com ]
///
/// [ Next ]
/// ```
pub fn format_form_view(view: &FormView) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", view.title));
    if let Some(ref description) = view.description {
        out.push_str(&format!("{}\n", description));
    }
    out.push('\n');

    for item in &view.sidebar {
        let marker = if item.active { ">" } else { " " };
        out.push_str(&format!("{} {}\n", marker, item.title));
    }

    out.push_str(&format!(
        "\n--- {} ({}/{}) ---\n",
        view.active.title, view.navigation.position, view.navigation.total
    ));

    for field in &view.active.fields {
        out.push_str(&format_field(field));
    }

    out.push_str(&format!("\n[ {} ]\n", view.navigation.next_action.label()));

    if let Some(ref warning) = view.warning {
        out.push_str(&format!("warning: {}\n", warning));
    }

    out
}

/// Render one field: label line, control line, optional inline error.
pub fn format_field(field: &RenderedField) -> String {
    let required = if field.required { " *" } else { "" };
    let mut out = format!("{}{}\n", field.label, required);

    let control = match &field.control {
        Control::TextInput { value, placeholder, .. } | Control::TextArea { value, placeholder } => {
            if value.is_empty() {
                format!("[ {} ]", placeholder.as_deref().unwrap_or(""))
            } else {
                format!("[ {} ]", value)
            }
        }
        Control::RadioGroup { options } => format_options(options, "(*)", "( )"),
        Control::CheckboxGroup { options } => format_options(options, "[x]", "[ ]"),
        Control::Dropdown { display, .. } => format!("< {} >", display),
        Control::Slider { value, min, max, step } => {
            let range = match (min, max) {
                (Some(min), Some(max)) => format!(" ({}..{})", min, max),
                _ => String::new(),
            };
            let step = step.map(|s| format!(" step {}", s)).unwrap_or_default();
            format!("|--| {}{}{}", value, range, step)
        }
        Control::Invalid { type_name } => format!("!! invalid field (type '{}')", type_name),
    };
    out.push_str(&format!("  {}\n", control));

    if let Some(ref error) = field.error {
        out.push_str(&format!("  ! {}\n", error));
    }

    out
}

fn format_options(options: &[RenderedOption], on: &str, off: &str) -> String {
    options
        .iter()
        .map(|o| format!("{} {}", if o.selected { on } else { off }, o.label))
        .collect::<Vec<_>>()
        .join("  ")
}
