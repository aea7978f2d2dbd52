use crate::{form::machine::Navigation, session::script_model::ExpectationResult};

/// Tracks the execution state and results of a running script.
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Current step index (0-based)
    pub current_step: usize,

    pub expectation_results: Vec<ExpectationResult>,

    /// Outcome of the most recent `next`
    pub last_navigation: Option<Navigation>,

    /// Snapshots written successfully
    pub saves: usize,

    pub warnings: Vec<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        SessionContext {
            current_step: 0,
            expectation_results: Vec::new(),
            last_navigation: None,
            saves: 0,
            warnings: Vec::new(),
        }
    }

    pub fn record_expectations(&mut self, results: Vec<ExpectationResult>) {
        self.expectation_results.extend(results);
    }

    /// Record a `next` outcome; advancing and submitting both imply a save.
    pub fn record_navigation(&mut self, navigation: Navigation) {
        if matches!(navigation, Navigation::Advanced { .. } | Navigation::Submitted) {
            self.saves += 1;
        }
        self.last_navigation = Some(navigation);
    }

    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn all_passed(&self) -> bool {
        self.expectation_results.iter().all(|r| r.passed)
    }

    pub fn pass_count(&self) -> usize {
        self.expectation_results.iter().filter(|r| r.passed).count()
    }

    pub fn fail_count(&self) -> usize {
        self.expectation_results.iter().filter(|r| !r.passed).count()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
