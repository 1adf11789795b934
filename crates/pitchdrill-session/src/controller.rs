//! Top-level trainer controller: the mode machine.
//!
//! Owns the dictation manager, the request gateway, and the practice
//! navigator, and enforces the mode-exit policy: leaving a mode stops
//! any active dictation and clears that mode's local state, so stale
//! responses and transcripts never survive into the next visit.

use tokio::sync::broadcast;

use pitchdrill_core::error::{Result, TrainerError};
use pitchdrill_core::events::TrainerEvent;
use pitchdrill_core::types::{Mode, ResponseKind, Scenario, TargetField};
use pitchdrill_dictation::{DictationManager, DictationSignal, RecognizerEvent, SpeechRecognizer};
use pitchdrill_gateway::{RequestGateway, SubmitOutcome, TrainingService};

use crate::navigator::{Advance, SessionNavigator};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Coordinates all trainer state behind a single mutable handle.
pub struct TrainerController<S> {
    mode: Mode,
    dictation: DictationManager,
    gateway: RequestGateway<S>,
    navigator: SessionNavigator,
    catalog: Vec<Scenario>,
    categories: Vec<String>,
    selected_scenario: Option<i64>,
    objection_input: String,
    language: String,
    events: broadcast::Sender<TrainerEvent>,
}

impl<S: TrainingService> TrainerController<S> {
    pub fn new(service: S, recognizer: Box<dyn SpeechRecognizer>, language: &str) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            mode: Mode::Home,
            dictation: DictationManager::new(recognizer),
            gateway: RequestGateway::new(service),
            navigator: SessionNavigator::new(),
            catalog: Vec::new(),
            categories: Vec::new(),
            selected_scenario: None,
            objection_input: String::new(),
            language: language.to_string(),
            events,
        }
    }

    /// Subscribe to domain events. Slow subscribers may miss events;
    /// they are notifications, not state.
    pub fn subscribe(&self) -> broadcast::Receiver<TrainerEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: TrainerEvent) {
        // No receivers is fine; events are best-effort notifications.
        let _ = self.events.send(event);
    }

    // =========================================================================
    // Mode machine
    // =========================================================================

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch to another mode.
    ///
    /// Entering the current mode is a no-op (no state is cleared and no
    /// fetch happens). Otherwise any active dictation is stopped, the
    /// departing mode's local state is cleared, and entering Practice
    /// fetches a fresh practice set.
    pub async fn enter(&mut self, mode: Mode) -> Result<()> {
        if mode == self.mode {
            tracing::debug!(mode = %mode, "Already in requested mode");
            return Ok(());
        }

        if let Some(target) = self.dictation.stop() {
            self.emit(TrainerEvent::DictationStopped { target });
        }

        let from = self.mode;
        match from {
            Mode::Home => {}
            Mode::ObjectionHandling => {
                self.gateway.reset_objection_site();
                self.objection_input.clear();
                self.selected_scenario = None;
            }
            Mode::Practice => {
                self.gateway.reset_feedback_site();
                self.navigator.clear();
            }
        }

        self.mode = mode;
        tracing::info!(from = %from, to = %mode, "Mode changed");
        self.emit(TrainerEvent::ModeChanged { from, to: mode });

        if mode == Mode::Practice {
            self.load_practice_set().await?;
        }
        Ok(())
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full scenario catalog and category labels.
    pub async fn refresh_catalog(&mut self) -> Result<()> {
        self.catalog = self.gateway.fetch_catalog().await?;
        self.categories = self.gateway.fetch_categories().await?;
        tracing::info!(
            scenarios = self.catalog.len(),
            categories = self.categories.len(),
            "Catalog refreshed"
        );
        self.emit(TrainerEvent::ScenariosLoaded {
            count: self.catalog.len(),
        });
        Ok(())
    }

    pub fn catalog(&self) -> &[Scenario] {
        &self.catalog
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Select a catalog scenario to anchor the next objection submit.
    /// Returns false when the id is not in the loaded catalog.
    pub fn select_scenario(&mut self, id: i64) -> bool {
        if self.catalog.iter().any(|s| s.id == id) {
            self.selected_scenario = Some(id);
            true
        } else {
            tracing::warn!(scenario_id = id, "Unknown scenario selected");
            false
        }
    }

    pub fn selected_scenario(&self) -> Option<i64> {
        self.selected_scenario
    }

    // =========================================================================
    // Practice session
    // =========================================================================

    async fn load_practice_set(&mut self) -> Result<()> {
        let scenarios = self.gateway.fetch_practice_set().await?;
        let count = scenarios.len();
        self.navigator.load(scenarios);
        self.emit(TrainerEvent::ScenariosLoaded { count });
        Ok(())
    }

    /// Start the practice session over with a fresh server-chosen set.
    pub async fn restart_practice(&mut self) -> Result<()> {
        if self.mode != Mode::Practice {
            return Err(TrainerError::Validation(
                "practice can only restart in practice mode".to_string(),
            ));
        }
        self.gateway.reset_feedback_site();
        self.load_practice_set().await
    }

    pub fn navigator(&self) -> &SessionNavigator {
        &self.navigator
    }

    /// Replace the typed practice response.
    pub fn set_practice_input(&mut self, text: &str) {
        self.navigator.set_input(text.to_string(), ResponseKind::Text);
    }

    /// Move to the next practice scenario. The feedback site is reset on
    /// a real move so the new scenario starts clean.
    pub fn advance(&mut self) -> Advance {
        let outcome = self.navigator.advance();
        match outcome {
            Advance::Moved(index) => {
                self.gateway.reset_feedback_site();
                self.emit(TrainerEvent::SessionAdvanced { index });
            }
            Advance::Complete => {
                self.emit(TrainerEvent::SessionCompleted {
                    total: self.navigator.len(),
                });
            }
        }
        outcome
    }

    // =========================================================================
    // Dictation
    // =========================================================================

    /// Start dictation into `target`.
    ///
    /// The target must belong to the active mode; a mismatch is a
    /// validation error, not a mode switch. Objection dictation uses the
    /// configured language; practice dictation always captures in
    /// English, matching what the feedback scoring expects.
    pub fn start_dictation(&mut self, target: TargetField) -> Result<()> {
        let valid = matches!(
            (self.mode, target),
            (Mode::ObjectionHandling, TargetField::Objection)
                | (Mode::Practice, TargetField::PracticeResponse)
        );
        if !valid {
            return Err(TrainerError::Validation(format!(
                "cannot dictate into {} while in {} mode",
                target, self.mode
            )));
        }

        let language = match target {
            TargetField::Objection => self.language.as_str(),
            TargetField::PracticeResponse => "English",
        };
        let session_id = self.dictation.start(target, language)?;
        self.emit(TrainerEvent::DictationStarted {
            session_id,
            target,
            language_code: self
                .dictation
                .snapshot()
                .language_code
                .unwrap_or_default(),
        });
        Ok(())
    }

    /// Stop any active dictation. Idempotent.
    pub fn stop_dictation(&mut self) {
        if let Some(target) = self.dictation.stop() {
            self.emit(TrainerEvent::DictationStopped { target });
        }
    }

    pub fn dictation(&self) -> &DictationManager {
        &self.dictation
    }

    /// Apply one recognizer event, routing transcript text into the
    /// field the session targets. Dictated practice input is tagged as
    /// voice so the submit reports the channel correctly.
    pub fn handle_recognizer_event(&mut self, event: RecognizerEvent) {
        let Some(signal) = self.dictation.handle_event(event) else {
            return;
        };
        match signal {
            DictationSignal::TranscriptUpdated { target, text } => {
                let text_length = text.len();
                match target {
                    TargetField::Objection => self.objection_input = text,
                    TargetField::PracticeResponse => {
                        self.navigator.set_input(text, ResponseKind::Voice);
                    }
                }
                self.emit(TrainerEvent::TranscriptUpdated {
                    target,
                    text_length,
                });
            }
            DictationSignal::Stopped { target } => {
                self.emit(TrainerEvent::DictationStopped { target });
            }
            DictationSignal::Failed { target, message } => {
                self.emit(TrainerEvent::DictationFailed { target, message });
            }
        }
    }

    // =========================================================================
    // Objection handling
    // =========================================================================

    /// Replace the objection input text.
    pub fn set_objection_text(&mut self, text: &str) {
        self.objection_input = text.to_string();
    }

    pub fn objection_input(&self) -> &str {
        &self.objection_input
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: &str) {
        self.language = language.to_string();
    }

    /// Submit the current objection text for a coaching response.
    pub async fn submit_objection_text(&mut self) -> Result<SubmitOutcome> {
        let text = self.objection_input.clone();
        let language = self.language.clone();
        let outcome = self
            .gateway
            .submit_objection(&text, &language, self.selected_scenario)
            .await?;
        self.surface_objection_outcome(outcome);
        Ok(outcome)
    }

    /// Submit the selected catalog scenario's own objection text, so the
    /// user can see a worked example for it.
    pub async fn submit_selected_scenario(&mut self) -> Result<SubmitOutcome> {
        let Some(id) = self.selected_scenario else {
            return Err(TrainerError::Validation(
                "no scenario selected".to_string(),
            ));
        };
        let objection = self
            .catalog
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.objection.clone())
            .ok_or_else(|| TrainerError::Validation("selected scenario not in catalog".to_string()))?;
        let language = self.language.clone();
        let outcome = self
            .gateway
            .submit_objection(&objection, &language, Some(id))
            .await?;
        self.surface_objection_outcome(outcome);
        Ok(outcome)
    }

    fn surface_objection_outcome(&self, outcome: SubmitOutcome) {
        if outcome != SubmitOutcome::Completed {
            return;
        }
        if let Some(response) = self.gateway.objection_response() {
            self.emit(TrainerEvent::ResponseReceived {
                text_length: response.len(),
            });
        } else if let Some(message) = self.gateway.objection_error() {
            self.emit(TrainerEvent::RequestFailed {
                message: message.to_string(),
            });
        }
    }

    pub fn gateway(&self) -> &RequestGateway<S> {
        &self.gateway
    }

    // =========================================================================
    // Practice feedback
    // =========================================================================

    /// Submit the current scenario's response input for scored feedback.
    ///
    /// On success the response and feedback are recorded in the session
    /// history; a failed request leaves the history untouched so the
    /// user can retry or advance past the scenario.
    pub async fn submit_practice_response(&mut self) -> Result<SubmitOutcome> {
        let Some(scenario) = self.navigator.current() else {
            return Err(TrainerError::Validation(
                "no practice scenario loaded".to_string(),
            ));
        };
        let scenario_id = scenario.id;
        let text = self.navigator.input().to_string();
        let kind = self.navigator.input_kind();

        let outcome = self
            .gateway
            .submit_practice_feedback(scenario_id, &text, kind)
            .await?;
        if outcome != SubmitOutcome::Completed {
            return Ok(outcome);
        }

        if let Some(feedback) = self.gateway.feedback_result().cloned() {
            self.navigator.record_response(scenario_id, text);
            self.emit(TrainerEvent::FeedbackReceived {
                scenario_id,
                score: feedback.score,
            });
            self.navigator.record_feedback(scenario_id, feedback);
        } else if let Some(message) = self.gateway.feedback_error() {
            self.emit(TrainerEvent::RequestFailed {
                message: message.to_string(),
            });
        }
        Ok(outcome)
    }
}

// =============================================================================
// Tests
// =============================================================================
