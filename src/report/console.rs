use std::fmt::Write;

use crate::report::report_model::SessionSuiteReport;
use crate::session::script_model::{Expectation, ExpectationResult, ScriptResult};

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a session suite report for terminal output.
///
/// ```text
/// === Session Suite: signup.json ===
///
/// ✓ PASS  happy path (6 steps, 3 expectations)
/// ✗ FAIL  skip email (2 steps, 1 expectations)
///     [FAIL] Step 1: ActiveGroup: Active group is not 'Profile' (got: Account)
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// ```
pub fn format_console_report(report: &SessionSuiteReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Session Suite: {} ===\n", report.suite_name);
    for result in &report.script_results {
        write_script(&mut out, result);
    }

    let _ = write!(
        out,
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    );
    if let Some(ms) = report.duration_ms {
        let _ = write!(out, " in {:.1}s", ms as f64 / 1000.0);
    }
    out.push_str(" ===\n");

    out
}

fn write_script(out: &mut String, result: &ScriptResult) {
    let marker = if result.passed { "\u{2713} PASS" } else { "\u{2717} FAIL" };
    let _ = writeln!(
        out,
        "{}  {} ({} steps, {} expectations)",
        marker,
        result.script_name,
        result.steps_run,
        result.expectation_results.len()
    );

    if let Some(error) = &result.error {
        let _ = writeln!(out, "    [ERROR] {}", error);
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "    [WARN] {}", warning);
    }
    for failed in result.expectation_results.iter().filter(|er| !er.passed) {
        let _ = writeln!(out, "    [FAIL] {}", failure_line(failed));
    }
}

/// `Step N: Kind: message`, followed by the observed value when one was
/// recorded and the message does not already carry it.
fn failure_line(er: &ExpectationResult) -> String {
    let detail = er.message.as_deref().unwrap_or("expectation failed");
    let mut line = format!("Step {}: {}: {}", er.step_index, expectation_kind(&er.expectation), detail);
    if let Some(actual) = er.actual.as_deref().filter(|a| a.is_empty() || !detail.contains(*a)) {
        let _ = write!(line, " (got: {})", display_actual(actual));
    }
    line
}

fn display_actual(actual: &str) -> &str {
    if actual.is_empty() { "<empty>" } else { actual }
}

fn expectation_kind(expectation: &Expectation) -> &'static str {
    match expectation {
        Expectation::ActiveGroup { .. } => "ActiveGroup",
        Expectation::Submitted { .. } => "Submitted",
        Expectation::GroupCount { .. } => "GroupCount",
        Expectation::Value { .. } => "Value",
        Expectation::Touched { .. } => "Touched",
        Expectation::Invalid { .. } => "Invalid",
        Expectation::BlockedFields { .. } => "BlockedFields",
        Expectation::Saves { .. } => "Saves",
    }
}
