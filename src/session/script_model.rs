use serde::{Deserialize, Serialize};

use crate::{form::value_model::FieldValue, schema::schema_model::RawField};

/// A scripted sequence of UI events replayed against a form, with
/// expectations checked along the way. Loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionScript {
    /// Human-readable name for this script
    pub name: String,

    /// Ordered list of events and expectations
    pub steps: Vec<SessionStep>,
}

/// A single scripted event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SessionStep {
    /// Raw change event, coerced by the field's type (checkbox toggles)
    Input {
        group: String,
        field: String,
        value: String,
    },

    /// Store an already typed value
    Set {
        group: String,
        field: String,
        value: FieldValue,
    },

    /// Field lost focus
    Blur { group: String, field: String },

    /// Press the next/submit button
    Next,

    /// Sidebar click
    GoTo { group: String },

    /// Author a new group at runtime
    AddGroup {
        title: String,
        #[serde(default)]
        fields: Vec<RawField>,
    },

    /// Check the form state
    Expect { expectations: Vec<Expectation> },
}

fn default_true() -> bool {
    true
}

/// A single check against the form state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// Title of the active group
    ActiveGroup { expected: String },

    /// Whether the form reached the submitted state
    Submitted {
        #[serde(default = "default_true")]
        expected: bool,
    },

    /// Number of groups in the schema
    GroupCount { expected: usize },

    /// Stored value of a field
    Value {
        group: String,
        field: String,
        expected: FieldValue,
    },

    /// Whether a field has been touched
    Touched {
        group: String,
        field: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    /// Whether a field currently renders as invalid
    Invalid {
        group: String,
        field: String,
        #[serde(default = "default_true")]
        expected: bool,
    },

    /// Field names reported by the most recent blocked `next`
    BlockedFields { expected: Vec<String> },

    /// Number of snapshots written so far
    Saves { expected: usize },
}

/// Result of evaluating a single expectation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpectationResult {
    /// Which step this expectation belongs to (0-indexed)
    pub step_index: usize,

    pub expectation: Expectation,

    pub passed: bool,

    /// Actual value found (for debugging failures)
    pub actual: Option<String>,

    /// Human-readable failure message
    pub message: Option<String>,
}

/// Result of replaying a complete script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub script_name: String,

    /// Whether all steps ran and all expectations passed
    pub passed: bool,

    pub steps_run: usize,

    pub expectation_results: Vec<ExpectationResult>,

    /// Error that aborted the script (not an expectation failure)
    pub error: Option<String>,

    /// Non-blocking problems, e.g. snapshots that failed to save
    #[serde(default)]
    pub warnings: Vec<String>,
}
