//! Request gateway: the two guarded submit operations plus catalog
//! pass-throughs.
//!
//! Each submit validates locally first (empty text never reaches the
//! network), then drives its call site through
//! InFlight -> Succeeded | Failed. Failures are stored on the site as a
//! display message, not returned as errors: a failed request is a
//! terminal outcome for that site, and the caller surfaces it from the
//! site state.

use pitchdrill_core::error::{Result, TrainerError};
use pitchdrill_core::types::{FeedbackResult, ResponseKind, Scenario};

use crate::call_site::{CallSite, RequestStatus};
use crate::service::TrainingService;

/// What happened to a submit call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The request ran to completion; the site holds the result or the
    /// failure message.
    Completed,
    /// A request was already in flight for this site; nothing was sent.
    Busy,
}

/// Owns the service handle and one call site per endpoint.
pub struct RequestGateway<S> {
    service: S,
    objection: CallSite<String>,
    feedback: CallSite<FeedbackResult>,
}

impl<S: TrainingService> RequestGateway<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            objection: CallSite::new(),
            feedback: CallSite::new(),
        }
    }

    // =========================================================================
    // Objection handling site
    // =========================================================================

    /// Submit an objection for a coaching response.
    ///
    /// Fails fast with `Validation` when the trimmed text is empty; no
    /// network call is made. Returns `Busy` without calling the service
    /// while a previous submit is still in flight. The response text is
    /// stored verbatim on success.
    pub async fn submit_objection(
        &mut self,
        text: &str,
        language: &str,
        scenario_id: Option<i64>,
    ) -> Result<SubmitOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TrainerError::Validation(
                "objection text is empty".to_string(),
            ));
        }

        let Some(ticket) = self.objection.begin() else {
            tracing::debug!("Objection submit ignored: request already in flight");
            return Ok(SubmitOutcome::Busy);
        };

        match self
            .service
            .handle_objection(trimmed, language, scenario_id)
            .await
        {
            Ok(reply) => {
                tracing::info!(response_len = reply.response.len(), "Objection response received");
                self.objection.succeed(ticket, reply.response);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Objection request failed");
                self.objection.fail(ticket, e.to_string());
            }
        }
        Ok(SubmitOutcome::Completed)
    }

    pub fn objection_status(&self) -> RequestStatus {
        self.objection.status()
    }

    /// The stored coaching response, verbatim, if the last request
    /// succeeded.
    pub fn objection_response(&self) -> Option<&str> {
        self.objection.payload().map(String::as_str)
    }

    pub fn objection_error(&self) -> Option<&str> {
        self.objection.error()
    }

    /// Reset the objection site (mode exit). Any in-flight completion
    /// becomes stale and will be discarded.
    pub fn reset_objection_site(&mut self) {
        self.objection.reset();
    }

    // =========================================================================
    // Practice feedback site
    // =========================================================================

    /// Submit a practice response for scored feedback.
    ///
    /// Same validation and in-flight guard as the objection site. On
    /// success the feedback is stored on the site and also returned so
    /// the caller can record it against the scenario.
    pub async fn submit_practice_feedback(
        &mut self,
        scenario_id: i64,
        text: &str,
        kind: ResponseKind,
    ) -> Result<SubmitOutcome> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TrainerError::Validation(
                "practice response is empty".to_string(),
            ));
        }

        let Some(ticket) = self.feedback.begin() else {
            tracing::debug!("Feedback submit ignored: request already in flight");
            return Ok(SubmitOutcome::Busy);
        };

        match self
            .service
            .practice_feedback(scenario_id, trimmed, kind)
            .await
        {
            Ok(feedback) => {
                tracing::info!(scenario_id, score = ?feedback.score, "Practice feedback received");
                self.feedback.succeed(ticket, feedback);
            }
            Err(e) => {
                tracing::warn!(scenario_id, error = %e, "Feedback request failed");
                self.feedback.fail(ticket, e.to_string());
            }
        }
        Ok(SubmitOutcome::Completed)
    }

    pub fn feedback_status(&self) -> RequestStatus {
        self.feedback.status()
    }

    pub fn feedback_result(&self) -> Option<&FeedbackResult> {
        self.feedback.payload()
    }

    pub fn feedback_error(&self) -> Option<&str> {
        self.feedback.error()
    }

    /// Reset the feedback site (mode exit or scenario advance).
    pub fn reset_feedback_site(&mut self) {
        self.feedback.reset();
    }

    // =========================================================================
    // Catalog pass-throughs (idempotent reads, no guard)
    // =========================================================================

    pub async fn fetch_catalog(&self) -> Result<Vec<Scenario>> {
        self.service.fetch_scenarios().await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<String>> {
        self.service.fetch_categories().await
    }

    pub async fn fetch_practice_set(&self) -> Result<Vec<Scenario>> {
        self.service.fetch_practice_scenarios().await
    }

    #[cfg(test)]
    fn force_objection_in_flight(&mut self) {
        self.objection.begin();
    }

    #[cfg(test)]
    fn force_feedback_in_flight(&mut self) {
        self.feedback.begin();
    }
}

// =============================================================================
// Tests
// =============================================================================
