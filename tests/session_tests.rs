use schema_form::{
    form::{machine::FormMachine, value_model::FieldValue},
    persist::gateway::PersistenceGateway,
    session::{
        context::SessionContext,
        runner::ScriptRunner,
        script_model::{Expectation, SessionScript, SessionStep},
    },
};

mod common;
use crate::common::fixtures::{FailingStore, RecordingStore, full_schema, two_group_schema};

fn parse(yaml: &str) -> SessionScript {
    serde_yaml::from_str(yaml).unwrap()
}

fn two_group_machine() -> FormMachine {
    FormMachine::new(two_group_schema(), PersistenceGateway::new(RecordingStore::new())).unwrap()
}

// =========================================================================
// Script parsing
// =========================================================================

#[test]
fn parses_every_step_kind() {
    let script = parse(
        r#"
name: everything
steps:
  - action: input
    group: A
    field: email
    value: x@y.com
  - action: set
    group: Preferences
    field: hobbies
    value: [Chess]
  - action: blur
    group: A
    field: email
  - action: next
  - action: go_to
    group: B
  - action: add_group
    title: C
    fields:
      - type: text
        name: extra
  - action: expect
    expectations:
      - type: active_group
        expected: B
      - type: submitted
      - type: touched
        group: A
        field: email
      - type: saves
        expected: 1
"#,
    );

    assert_eq!(script.name, "everything");
    assert_eq!(script.steps.len(), 7);
    assert!(matches!(
        script.steps[1],
        SessionStep::Set { ref value, .. } if *value == FieldValue::Choices(vec!["Chess".into()])
    ));
    assert_eq!(script.steps[3], SessionStep::Next);
    let SessionStep::Expect { expectations } = &script.steps[6] else {
        panic!("expected an expect step");
    };
    assert_eq!(expectations[1], Expectation::Submitted { expected: true });
    assert_eq!(
        expectations[2],
        Expectation::Touched {
            group: "A".into(),
            field: "email".into(),
            expected: true
        }
    );
}

// =========================================================================
// Replay
// =========================================================================

#[test]
fn happy_path_script_passes() {
    let script = parse(
        r#"
name: happy path
steps:
  - action: next
  - action: expect
    expectations:
      - type: active_group
        expected: A
      - type: blocked_fields
        expected: [email]
      - type: invalid
        group: A
        field: email
      - type: saves
        expected: 0
  - action: input
    group: A
    field: email
    value: x@y.com
  - action: next
  - action: next
  - action: expect
    expectations:
      - type: submitted
      - type: saves
        expected: 2
      - type: value
        group: A
        field: email
        expected: x@y.com
      - type: invalid
        group: A
        field: email
        expected: false
"#,
    );

    let mut machine = two_group_machine();
    let result = ScriptRunner::run(&script, &mut machine);

    assert!(result.passed, "{:?}", result);
    assert_eq!(result.steps_run, 6);
    assert_eq!(result.expectation_results.len(), 8);
    assert!(result.error.is_none());
    assert!(result.warnings.is_empty());
}

#[test]
fn failed_expectations_carry_actual_values() {
    let script = parse(
        r#"
name: wrong guesses
steps:
  - action: expect
    expectations:
      - type: active_group
        expected: B
      - type: value
        group: A
        field: email
        expected: someone
      - type: group_count
        expected: 5
"#,
    );

    let mut machine = two_group_machine();
    let result = ScriptRunner::run(&script, &mut machine);

    assert!(!result.passed);
    assert!(result.error.is_none());
    let failures: Vec<_> = result.expectation_results.iter().filter(|r| !r.passed).collect();
    assert_eq!(failures.len(), 3);
    assert_eq!(failures[0].actual.as_deref(), Some("A"));
    assert_eq!(failures[0].message.as_deref(), Some("Active group is not 'B'"));
    assert_eq!(failures[1].actual.as_deref(), Some("(unset)"));
    assert_eq!(failures[2].actual.as_deref(), Some("2"));
}

#[test]
fn invalid_step_aborts_the_script() {
    let script = parse(
        r#"
name: bad option
steps:
  - action: input
    group: Basics
    field: gender
    value: unknown
  - action: next
"#,
    );

    let mut machine = FormMachine::new(full_schema(), PersistenceGateway::in_memory()).unwrap();
    let result = ScriptRunner::run(&script, &mut machine);

    assert!(!result.passed);
    assert_eq!(result.steps_run, 1);
    let error = result.error.unwrap();
    assert!(error.starts_with("Step 0 failed:"), "{}", error);
    assert!(error.contains("gender"));
}

#[test]
fn failed_save_becomes_a_warning() {
    let script = parse(
        r#"
name: offline
steps:
  - action: input
    group: A
    field: email
    value: x@y.com
  - action: next
  - action: expect
    expectations:
      - type: active_group
        expected: A
      - type: value
        group: A
        field: email
        expected: x@y.com
      - type: saves
        expected: 0
"#,
    );

    let mut machine = FormMachine::new(two_group_schema(), PersistenceGateway::new(FailingStore)).unwrap();
    let result = ScriptRunner::run(&script, &mut machine);

    assert!(result.passed, "{:?}", result);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Step 1: snapshot not saved:"));
    assert!(result.warnings[0].contains("disk full"));
}

#[test]
fn script_can_author_and_fill_a_new_group() {
    let script = parse(
        r#"
name: authoring
steps:
  - action: add_group
    title: C
    fields:
      - type: radio
        name: plan
        required: true
        options: [free, pro]
  - action: expect
    expectations:
      - type: group_count
        expected: 3
  - action: go_to
    group: C
  - action: next
  - action: expect
    expectations:
      - type: blocked_fields
        expected: [plan]
  - action: input
    group: C
    field: plan
    value: pro
  - action: next
  - action: expect
    expectations:
      - type: submitted
"#,
    );

    let mut machine = two_group_machine();
    let result = ScriptRunner::run(&script, &mut machine);
    assert!(result.passed, "{:?}", result);
    assert_eq!(machine.groups().len(), 3);
}

#[test]
fn duplicate_authored_group_aborts() {
    let script = parse(
        r#"
name: duplicate
steps:
  - action: add_group
    title: A
"#,
    );
    let result = ScriptRunner::run(&script, &mut two_group_machine());
    assert!(result.error.unwrap().contains("duplicate group title 'A'"));
}

#[test]
fn context_counts_results() {
    let mut ctx = SessionContext::default();
    assert!(ctx.all_passed());
    assert_eq!((ctx.pass_count(), ctx.fail_count()), (0, 0));

    ctx.warn("careful".into());
    assert_eq!(ctx.warnings, vec!["careful".to_string()]);
}
