//! Trait seam for the external reasoning service, plus a mock
//! implementation for tests.
//!
//! The gateway and controller depend only on this trait, so unit tests
//! exercise the full request lifecycle with canned responses and call
//! counters instead of a network.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pitchdrill_core::error::{Result, TrainerError};
use pitchdrill_core::types::{FeedbackResult, ObjectionReply, ResponseKind, Scenario};

/// The external reasoning/catalog service, transport-agnostic.
#[async_trait]
pub trait TrainingService: Send + Sync {
    /// Full scenario catalog for manual selection.
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>>;

    /// Distinct category labels, for display grouping.
    async fn fetch_categories(&self) -> Result<Vec<String>>;

    /// A fresh, server-chosen practice subset. Each call yields a new
    /// selection.
    async fn fetch_practice_scenarios(&self) -> Result<Vec<Scenario>>;

    /// Coaching response for an objection, optionally tied to a catalog
    /// scenario.
    async fn handle_objection(
        &self,
        objection_text: &str,
        language: &str,
        scenario_id: Option<i64>,
    ) -> Result<ObjectionReply>;

    /// Scored feedback for a practice response.
    async fn practice_feedback(
        &self,
        scenario_id: i64,
        user_response: &str,
        response_type: ResponseKind,
    ) -> Result<FeedbackResult>;
}

/// A shared service handle is itself a service. Lets callers keep a
/// handle for inspection while the gateway owns another.
#[async_trait]
impl<S: TrainingService + ?Sized> TrainingService for Arc<S> {
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>> {
        (**self).fetch_scenarios().await
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        (**self).fetch_categories().await
    }

    async fn fetch_practice_scenarios(&self) -> Result<Vec<Scenario>> {
        (**self).fetch_practice_scenarios().await
    }

    async fn handle_objection(
        &self,
        objection_text: &str,
        language: &str,
        scenario_id: Option<i64>,
    ) -> Result<ObjectionReply> {
        (**self)
            .handle_objection(objection_text, language, scenario_id)
            .await
    }

    async fn practice_feedback(
        &self,
        scenario_id: i64,
        user_response: &str,
        response_type: ResponseKind,
    ) -> Result<FeedbackResult> {
        (**self)
            .practice_feedback(scenario_id, user_response, response_type)
            .await
    }
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Canned-response service for tests.
///
/// Every call is counted so tests can assert the zero-call side effect
/// of local validation and the single-call effect of the in-flight
/// guard.
#[derive(Default)]
pub struct MockTrainingService {
    scenarios: Mutex<Vec<Scenario>>,
    practice: Mutex<Vec<Scenario>>,
    categories: Mutex<Vec<String>>,
    objection_response: Mutex<Option<String>>,
    objection_error: Mutex<Option<String>>,
    feedback: Mutex<Option<FeedbackResult>>,
    feedback_error: Mutex<Option<String>>,
    objection_calls: AtomicUsize,
    feedback_calls: AtomicUsize,
    practice_fetches: AtomicUsize,
}

impl MockTrainingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scenario with filled-in text fields, for test fixtures.
    pub fn scenario(id: i64, category: &str, objection: &str) -> Scenario {
        Scenario {
            id,
            category: category.to_string(),
            objection: objection.to_string(),
            context: format!("Context for scenario {}", id),
            suggested_response: None,
        }
    }

    pub fn with_scenarios(self, scenarios: Vec<Scenario>) -> Self {
        *self.scenarios.lock().expect("mock mutex poisoned") = scenarios;
        self
    }

    pub fn with_practice_scenarios(self, scenarios: Vec<Scenario>) -> Self {
        *self.practice.lock().expect("mock mutex poisoned") = scenarios;
        self
    }

    pub fn with_categories(self, categories: Vec<String>) -> Self {
        *self.categories.lock().expect("mock mutex poisoned") = categories;
        self
    }

    pub fn with_objection_response(self, response: &str) -> Self {
        *self.objection_response.lock().expect("mock mutex poisoned") =
            Some(response.to_string());
        self
    }

    /// Make `handle_objection` fail with a service error.
    pub fn with_objection_error(self, message: &str) -> Self {
        *self.objection_error.lock().expect("mock mutex poisoned") = Some(message.to_string());
        self
    }

    pub fn with_feedback(self, feedback: FeedbackResult) -> Self {
        *self.feedback.lock().expect("mock mutex poisoned") = Some(feedback);
        self
    }

    /// Make `practice_feedback` fail with a service error.
    pub fn with_feedback_error(self, message: &str) -> Self {
        *self.feedback_error.lock().expect("mock mutex poisoned") = Some(message.to_string());
        self
    }

    pub fn objection_calls(&self) -> usize {
        self.objection_calls.load(Ordering::SeqCst)
    }

    pub fn feedback_calls(&self) -> usize {
        self.feedback_calls.load(Ordering::SeqCst)
    }

    pub fn practice_fetches(&self) -> usize {
        self.practice_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrainingService for MockTrainingService {
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>> {
        Ok(self.scenarios.lock().expect("mock mutex poisoned").clone())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        Ok(self.categories.lock().expect("mock mutex poisoned").clone())
    }

    async fn fetch_practice_scenarios(&self) -> Result<Vec<Scenario>> {
        self.practice_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.practice.lock().expect("mock mutex poisoned").clone())
    }

    async fn handle_objection(
        &self,
        _objection_text: &str,
        _language: &str,
        _scenario_id: Option<i64>,
    ) -> Result<ObjectionReply> {
        self.objection_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .objection_error
            .lock()
            .expect("mock mutex poisoned")
            .clone()
        {
            return Err(TrainerError::Service(message));
        }
        let response = self
            .objection_response
            .lock()
            .expect("mock mutex poisoned")
            .clone()
            .unwrap_or_else(|| "mock response".to_string());
        Ok(ObjectionReply {
            response,
            scenario_used: None,
        })
    }

    async fn practice_feedback(
        &self,
        _scenario_id: i64,
        _user_response: &str,
        _response_type: ResponseKind,
    ) -> Result<FeedbackResult> {
        self.feedback_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self
            .feedback_error
            .lock()
            .expect("mock mutex poisoned")
            .clone()
        {
            return Err(TrainerError::Service(message));
        }
        Ok(self
            .feedback
            .lock()
            .expect("mock mutex poisoned")
            .clone()
            .unwrap_or(FeedbackResult {
                feedback: "mock feedback".to_string(),
                score: Some(7),
                suggestions: vec![],
            }))
    }
}
