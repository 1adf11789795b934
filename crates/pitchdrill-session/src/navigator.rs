//! Practice-session navigator.
//!
//! Holds an ordered scenario list and a current index that only ever
//! moves forward. Advancing at the last scenario is a terminal signal,
//! not an out-of-range step: the index stays put and the caller learns
//! the session is complete.

use std::collections::HashMap;

use serde::Serialize;

use pitchdrill_core::types::{FeedbackResult, ResponseKind, Scenario};

/// Result of an `advance()` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the scenario at this index.
    Moved(usize),
    /// Already at the last scenario; index unchanged. Idempotent at the
    /// boundary.
    Complete,
}

/// Read-only view of the practice session for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct NavigatorSnapshot {
    pub total: usize,
    pub current_index: usize,
    pub answered: usize,
    pub input: String,
    pub input_kind: ResponseKind,
}

/// One practice session: scenarios, progress, and per-scenario history.
#[derive(Debug, Default)]
pub struct SessionNavigator {
    scenarios: Vec<Scenario>,
    current_index: usize,
    responses: HashMap<i64, String>,
    feedback: HashMap<i64, FeedbackResult>,
    input: String,
    input_kind: ResponseKind,
}

impl SessionNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the scenario list with a fresh set, resetting the index
    /// to 0 and clearing all history and the input buffer.
    pub fn load(&mut self, scenarios: Vec<Scenario>) {
        tracing::info!(count = scenarios.len(), "Practice session loaded");
        self.scenarios = scenarios;
        self.current_index = 0;
        self.responses.clear();
        self.feedback.clear();
        self.input.clear();
        self.input_kind = ResponseKind::Text;
    }

    /// Drop everything, returning to the empty state.
    pub fn clear(&mut self) {
        self.load(Vec::new());
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The scenario at the current index, when the session is non-empty.
    pub fn current(&self) -> Option<&Scenario> {
        self.scenarios.get(self.current_index)
    }

    /// Whether the current scenario is the last one.
    pub fn at_last(&self) -> bool {
        !self.scenarios.is_empty() && self.current_index + 1 == self.scenarios.len()
    }

    /// Move to the next scenario.
    ///
    /// At the last index (or on an empty session) the index stays
    /// unchanged and `Complete` is returned. Otherwise the index moves
    /// forward by exactly one and the active input buffer is reset so
    /// the user starts fresh; recorded history is kept.
    pub fn advance(&mut self) -> Advance {
        if self.current_index + 1 >= self.scenarios.len() {
            return Advance::Complete;
        }
        self.current_index += 1;
        self.input.clear();
        self.input_kind = ResponseKind::Text;
        tracing::debug!(index = self.current_index, "Advanced to next scenario");
        Advance::Moved(self.current_index)
    }

    /// Replace the active input buffer.
    pub fn set_input(&mut self, text: String, kind: ResponseKind) {
        self.input = text;
        self.input_kind = kind;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_kind(&self) -> ResponseKind {
        self.input_kind
    }

    /// Record the submitted response for a scenario.
    pub fn record_response(&mut self, scenario_id: i64, text: String) {
        self.responses.insert(scenario_id, text);
    }

    pub fn response_for(&self, scenario_id: i64) -> Option<&str> {
        self.responses.get(&scenario_id).map(String::as_str)
    }

    /// Record the feedback received for a scenario.
    pub fn record_feedback(&mut self, scenario_id: i64, feedback: FeedbackResult) {
        self.feedback.insert(scenario_id, feedback);
    }

    pub fn feedback_for(&self, scenario_id: i64) -> Option<&FeedbackResult> {
        self.feedback.get(&scenario_id)
    }

    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            total: self.scenarios.len(),
            current_index: self.current_index,
            answered: self.responses.len(),
            input: self.input.clone(),
            input_kind: self.input_kind,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
