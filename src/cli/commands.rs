use crate::builder::group_builder::parse_group_definition;
use crate::cli::config::SessionSettings;
use crate::form::machine::FormMachine;
use crate::persist::gateway::PersistenceGateway;
use crate::persist::store::JsonFileStore;
use crate::render::text::format_form_view;
use crate::report::console::format_console_report;
use crate::report::report_model::SessionSuiteReport;
use crate::schema::field_model::FieldKind;
use crate::schema::normalize::load_schema;
use crate::schema::schema_model::FormSchema;
use crate::session::runner::ScriptRunner;
use crate::session::script_model::SessionScript;
use crate::trace::logger::TraceLogger;

// ============================================================================
// check subcommand
// ============================================================================

pub fn cmd_check(schema_path: &str, verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    print!("{}", format_schema_summary(&schema, verbose > 0));
    Ok(())
}

/// One line per group, plus a warning per field whose type is unknown.
pub fn format_schema_summary(schema: &FormSchema, list_fields: bool) -> String {
    let field_count: usize = schema.groups.iter().map(|g| g.fields.len()).sum();
    let mut out = format!(
        "Schema '{}': {} groups, {} fields (fingerprint {})\n",
        schema.title,
        schema.groups.len(),
        field_count,
        schema.fingerprint()
    );

    for group in &schema.groups {
        out.push_str(&format!("  - {} ({} fields)\n", group.title, group.fields.len()));
        for field in &group.fields {
            if let FieldKind::Unknown(type_name) = &field.kind {
                out.push_str(&format!(
                    "      warning: field '{}' has unknown type '{}' and will render as invalid\n",
                    field.name, type_name
                ));
            } else if list_fields {
                let required = if field.required { ", required" } else { "" };
                out.push_str(&format!(
                    "      {} [{}{}]\n",
                    field.name,
                    field.kind.type_name(),
                    required
                ));
            }
        }
    }

    out
}

// ============================================================================
// render subcommand
// ============================================================================

pub fn cmd_render(
    schema_path: &str,
    group: Option<&str>,
    format: &str,
    settings: &SessionSettings,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    let mut machine = build_machine(schema, settings)?;

    let restored = machine.restore()?;
    if verbose > 0 {
        eprintln!(
            "Snapshot '{}': {}",
            machine.snapshot_key(),
            if restored { "restored" } else { "none found" }
        );
    }

    if let Some(title) = group {
        machine.go_to_group(title)?;
    }

    let view = machine.view();
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&view)?),
        _ => print!("{}", format_form_view(&view)),
    }

    Ok(())
}

// ============================================================================
// run subcommand
// ============================================================================

/// Replay scripts and return whether all passed.
pub fn cmd_run(
    schema_path: &str,
    script_path: &str,
    output: Option<&str>,
    settings: &SessionSettings,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    let scripts = load_scripts(script_path)?;

    if scripts.is_empty() {
        eprintln!("No session scripts found at: {}", script_path);
        return Ok(true);
    }

    if verbose > 0 {
        eprintln!("Replaying {} scripts against '{}'...", scripts.len(), schema.title);
    }

    let start = std::time::Instant::now();

    let mut results = Vec::new();
    for script in &scripts {
        if verbose > 0 {
            eprintln!("  Running: {}", script.name);
        }
        // Each script starts from a fresh form.
        let mut machine = build_machine(schema.clone(), settings)?;
        let result = ScriptRunner::run(script, &mut machine);
        for warning in &result.warnings {
            eprintln!("Warning: {}", warning);
        }
        results.push(result);
    }

    let duration = start.elapsed().as_millis();

    let report = SessionSuiteReport::from_results(schema_path, results).with_duration(duration);
    let all_passed = report.all_passed();
    let output_content = format_console_report(&report);

    match output {
        Some(path) => std::fs::write(path, &output_content)?,
        None => print!("{}", output_content),
    }

    Ok(all_passed)
}

/// Load scripts from a single YAML file or a directory of YAML files.
pub fn load_scripts(path: &str) -> Result<Vec<SessionScript>, Box<dyn std::error::Error>> {
    let metadata = std::fs::metadata(path)?;
    if metadata.is_dir() {
        let mut scripts = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let p = entry.path();
            if p.extension().map_or(false, |e| e == "yaml" || e == "yml") {
                let content = std::fs::read_to_string(&p)?;
                let script: SessionScript = serde_yaml::from_str(&content)?;
                scripts.push(script);
            }
        }
        // Sort by name for deterministic order
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(scripts)
    } else {
        let content = std::fs::read_to_string(path)?;
        let script: SessionScript = serde_yaml::from_str(&content)?;
        Ok(vec![script])
    }
}

// ============================================================================
// add-group subcommand
// ============================================================================

pub fn cmd_add_group(
    schema_path: &str,
    group_path: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let schema = load_schema(schema_path)?;
    let definition = std::fs::read_to_string(group_path)?;
    let group = parse_group_definition(&definition)?;
    let title = group.title.clone();

    let mut machine = FormMachine::new(schema, PersistenceGateway::in_memory())?;
    machine.add_group(group)?;

    let json = serde_json::to_string_pretty(&machine.schema().to_document())?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", json))?;
            if verbose > 0 {
                eprintln!("Added group '{}', wrote {}", title, path);
            }
        }
        None => println!("{}", json),
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Build a machine wired to the configured store and trace file.
pub fn build_machine(
    schema: FormSchema,
    settings: &SessionSettings,
) -> Result<FormMachine, Box<dyn std::error::Error>> {
    let gateway = match settings.store_path.as_deref() {
        Some(path) => PersistenceGateway::new(JsonFileStore::new(path)),
        None => PersistenceGateway::in_memory(),
    };
    let tracer = match settings.trace_path.as_deref() {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };

    Ok(FormMachine::new(schema, gateway)?
        .with_snapshot_key(&settings.snapshot_key)
        .with_tracer(tracer))
}
