use crate::{
    builder::group_builder::build_group,
    form::{
        error::FormError,
        machine::{FormMachine, Navigation},
    },
    session::{
        context::SessionContext,
        script_model::{Expectation, ExpectationResult, ScriptResult, SessionScript, SessionStep},
    },
};

/// Replays a SessionScript step-by-step against a FormMachine.
pub struct ScriptRunner;

impl ScriptRunner {
    /// Run a complete script.
    ///
    /// A step that fails with a form error aborts the script. A snapshot that
    /// fails to save is recorded as a warning and the script continues, as a
    /// user would.
    pub fn run(script: &SessionScript, machine: &mut FormMachine) -> ScriptResult {
        let mut ctx = SessionContext::new();

        for (i, step) in script.steps.iter().enumerate() {
            ctx.current_step = i;

            if let Err(e) = Self::execute_step(step, i, machine, &mut ctx) {
                return ScriptResult {
                    script_name: script.name.clone(),
                    passed: false,
                    steps_run: i + 1,
                    expectation_results: ctx.expectation_results,
                    error: Some(format!("Step {} failed: {}", i, e)),
                    warnings: ctx.warnings,
                };
            }
        }

        ScriptResult {
            script_name: script.name.clone(),
            passed: ctx.all_passed(),
            steps_run: script.steps.len(),
            expectation_results: ctx.expectation_results,
            error: None,
            warnings: ctx.warnings,
        }
    }

    fn execute_step(
        step: &SessionStep,
        step_index: usize,
        machine: &mut FormMachine,
        ctx: &mut SessionContext,
    ) -> Result<(), FormError> {
        match step {
            SessionStep::Input { group, field, value } => machine.input(group, field, value),

            SessionStep::Set { group, field, value } => machine.set_value(group, field, value.clone()),

            SessionStep::Blur { group, field } => machine.blur(group, field),

            SessionStep::Next => match machine.next() {
                Ok(navigation) => {
                    ctx.record_navigation(navigation);
                    Ok(())
                }
                Err(FormError::Persistence(e)) => {
                    ctx.warn(format!("Step {}: snapshot not saved: {}", step_index, e));
                    Ok(())
                }
                Err(e) => Err(e),
            },

            SessionStep::GoTo { group } => machine.go_to_group(group),

            SessionStep::AddGroup { title, fields } => {
                let group = build_group(title, fields.clone())?;
                machine.add_group(group)
            }

            SessionStep::Expect { expectations } => {
                let results = expectations
                    .iter()
                    .map(|expectation| Self::evaluate_one(expectation, step_index, machine, ctx))
                    .collect();
                ctx.record_expectations(results);
                Ok(())
            }
        }
    }

    fn evaluate_one(
        expectation: &Expectation,
        step_index: usize,
        machine: &FormMachine,
        ctx: &SessionContext,
    ) -> ExpectationResult {
        let (passed, actual, failure) = match expectation {
            Expectation::ActiveGroup { expected } => {
                let actual = machine.active_group().title.clone();
                let passed = actual == *expected;
                (passed, actual, format!("Active group is not '{}'", expected))
            }

            Expectation::Submitted { expected } => {
                let actual = machine.is_submitted();
                (
                    actual == *expected,
                    actual.to_string(),
                    format!("Expected submitted = {}", expected),
                )
            }

            Expectation::GroupCount { expected } => {
                let actual = machine.groups().len();
                (
                    actual == *expected,
                    actual.to_string(),
                    format!("Group count is {} but expected {}", actual, expected),
                )
            }

            Expectation::Value { group, field, expected } => match machine.value(group, field) {
                Some(value) => (
                    value == expected,
                    format!("{:?}", value),
                    format!("Value of '{}/{}' does not equal {:?}", group, field, expected),
                ),
                None => (
                    false,
                    "(unset)".to_string(),
                    format!("Field '{}/{}' has no value", group, field),
                ),
            },

            Expectation::Touched { group, field, expected } => {
                let actual = machine.is_touched(group, field);
                (
                    actual == *expected,
                    actual.to_string(),
                    format!("Expected '{}/{}' touched = {}", group, field, expected),
                )
            }

            Expectation::Invalid { group, field, expected } => match machine.render_group(group) {
                Ok(rendered) => {
                    let actual = rendered
                        .fields
                        .iter()
                        .any(|f| f.key.field == *field && f.invalid);
                    (
                        actual == *expected,
                        actual.to_string(),
                        format!("Expected '{}/{}' invalid = {}", group, field, expected),
                    )
                }
                Err(e) => (false, String::new(), format!("Failed to render group: {}", e)),
            },

            Expectation::BlockedFields { expected } => {
                let actual: Vec<String> = ctx
                    .last_navigation
                    .as_ref()
                    .map(Navigation::errors)
                    .unwrap_or_default()
                    .iter()
                    .map(|e| e.field.clone())
                    .collect();
                (
                    actual == *expected,
                    actual.join(", "),
                    format!("Blocked fields are not [{}]", expected.join(", ")),
                )
            }

            Expectation::Saves { expected } => (
                ctx.saves == *expected,
                ctx.saves.to_string(),
                format!("{} snapshots saved but expected {}", ctx.saves, expected),
            ),
        };

        ExpectationResult {
            step_index,
            expectation: expectation.clone(),
            passed,
            actual: Some(actual),
            message: if passed { None } else { Some(failure) },
        }
    }
}
