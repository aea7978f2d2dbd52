use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{form::machine::FormPhase, validate::validator::ValidationError};

/// One line of the JSON-lines transition trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub phase: String,
    pub active_group: String,

    pub event: String,
    pub outcome: Option<String>,

    pub errors: Vec<String>,
    pub schema: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, phase: FormPhase, active_group: &str, event: impl ToString) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            phase: format!("{:?}", phase),
            active_group: active_group.to_string(),
            event: event.to_string(),
            outcome: None,
            errors: vec![],
            schema: None,
        }
    }

    pub fn with_outcome(mut self, outcome: impl ToString) -> Self {
        self.outcome = Some(outcome.to_string());
        self
    }

    pub fn with_errors(mut self, errors: &[ValidationError]) -> Self {
        self.errors = errors
            .iter()
            .map(|e| format!("{}/{}: {}", e.group, e.field, e.message))
            .collect();
        self
    }

    pub fn with_error(mut self, error: &dyn std::error::Error) -> Self {
        self.errors = vec![error.to_string()];
        self
    }

    pub fn with_schema(mut self, fingerprint: &str) -> Self {
        self.schema = Some(fingerprint.to_string());
        self
    }
}
