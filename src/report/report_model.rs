use serde::{Deserialize, Serialize};

use crate::session::script_model::ScriptResult;

// ============================================================================
// Session suite report: aggregates multiple ScriptResult instances
// ============================================================================

/// Aggregated report for a batch of replayed scripts.
///
/// Built from a `Vec<ScriptResult>` via `from_results()` and consumed by the
/// console reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSuiteReport {
    pub suite_name: String,

    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Total execution duration in milliseconds (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub script_results: Vec<ScriptResult>,
}

impl SessionSuiteReport {
    /// Build a suite report; counts are derived from the results.
    pub fn from_results(suite_name: &str, results: Vec<ScriptResult>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;
        Self {
            suite_name: suite_name.to_string(),
            total,
            passed,
            failed,
            duration_ms: None,
            script_results: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn warning_count(&self) -> usize {
        self.script_results.iter().map(|r| r.warnings.len()).sum()
    }
}
