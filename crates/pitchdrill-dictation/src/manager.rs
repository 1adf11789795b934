//! Dictation session manager.
//!
//! Owns the singleton recognizer and at most one active capture session.
//! Lifecycle:
//! - inactive -> active (start; stops a previous session first)
//! - active -> inactive (stop, recognizer error, or device end)
//!
//! Transcript delivery is last-write-wins: every `Transcript` event
//! replaces the session's transcript with the newest recognized result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use pitchdrill_core::error::{Result, TrainerError};
use pitchdrill_core::types::TargetField;

use crate::language;
use crate::recognizer::{RecognizerEvent, SpeechRecognizer};

/// Data for the currently active capture session.
#[derive(Debug, Clone)]
struct ActiveDictation {
    id: Uuid,
    started_at: DateTime<Utc>,
    target: TargetField,
    language_code: String,
    transcript: String,
}

impl ActiveDictation {
    fn new(target: TargetField, language_code: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            target,
            language_code,
            transcript: String::new(),
        }
    }

    fn elapsed_secs(&self) -> f32 {
        let elapsed = Utc::now() - self.started_at;
        elapsed.num_milliseconds() as f32 / 1000.0
    }
}

/// Outcome of applying a recognizer event, for the caller to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictationSignal {
    /// The active field's transcript was replaced with new text.
    TranscriptUpdated { target: TargetField, text: String },
    /// The session ended normally (device end).
    Stopped { target: TargetField },
    /// The recognizer reported an error; the session is terminated and
    /// must be surfaced to the user. No automatic retry.
    Failed { target: TargetField, message: String },
}

/// Read-only view of the dictation state for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct DictationSnapshot {
    pub is_active: bool,
    pub target: Option<TargetField>,
    pub language_code: Option<String>,
    pub transcript: String,
}

/// State machine wrapping the singleton speech recognizer.
///
/// All transitions go through `start` / `stop` / `handle_event`; there is
/// no path that leaves the manager active after a recognizer error.
pub struct DictationManager {
    recognizer: Box<dyn SpeechRecognizer>,
    active: Option<ActiveDictation>,
}

impl std::fmt::Debug for DictationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictationManager")
            .field("active", &self.active)
            .finish()
    }
}

impl DictationManager {
    pub fn new(recognizer: Box<dyn SpeechRecognizer>) -> Self {
        Self {
            recognizer,
            active: None,
        }
    }

    /// Whether a capture session is active right now.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The field the active session writes into, if any.
    pub fn active_target(&self) -> Option<TargetField> {
        self.active.as_ref().map(|a| a.target)
    }

    /// Start a capture session for `target` in the named language.
    ///
    /// Fails with `UnsupportedCapability` when the platform has no
    /// recognizer. If another session is active it is stopped first; the
    /// device is never driven by two sessions at once. Unknown language
    /// names fall back to en-US via the registry.
    pub fn start(&mut self, target: TargetField, language_name: &str) -> Result<Uuid> {
        if !self.recognizer.is_available() {
            return Err(TrainerError::UnsupportedCapability);
        }

        if let Some(prev) = self.active.take() {
            tracing::info!(
                session_id = %prev.id,
                target = %prev.target,
                "Stopping previous dictation session before starting a new one"
            );
            self.recognizer.stop();
        }

        let code = language::locale_for(language_name);
        if let Err(e) = self.recognizer.start(code) {
            tracing::warn!(error = %e, "Recognizer failed to start");
            return Err(e);
        }

        let session = ActiveDictation::new(target, code.to_string());
        let id = session.id;
        tracing::info!(
            session_id = %id,
            target = %target,
            language_code = code,
            "Dictation session started"
        );
        self.active = Some(session);
        Ok(id)
    }

    /// Stop the active session. Idempotent: a stop with no active
    /// session is a no-op. Returns the field that was being captured.
    ///
    /// Transcript already delivered is not invalidated by stopping.
    pub fn stop(&mut self) -> Option<TargetField> {
        let session = self.active.take()?;
        self.recognizer.stop();
        tracing::info!(
            session_id = %session.id,
            elapsed_secs = session.elapsed_secs(),
            "Dictation session stopped"
        );
        Some(session.target)
    }

    /// Apply one recognizer event.
    ///
    /// Events arriving with no active session (late deliveries after a
    /// stop) are discarded. Returns the signal the caller should surface,
    /// if any.
    pub fn handle_event(&mut self, event: RecognizerEvent) -> Option<DictationSignal> {
        match event {
            RecognizerEvent::Started => {
                if let Some(ref session) = self.active {
                    tracing::debug!(session_id = %session.id, "Recognizer capture began");
                }
                None
            }
            RecognizerEvent::Transcript(text) => {
                let session = self.active.as_mut()?;
                session.transcript = text.clone();
                Some(DictationSignal::TranscriptUpdated {
                    target: session.target,
                    text,
                })
            }
            RecognizerEvent::Error(message) => {
                let session = self.active.take()?;
                self.recognizer.stop();
                tracing::warn!(
                    session_id = %session.id,
                    error = %message,
                    "Dictation session terminated by recognizer error"
                );
                Some(DictationSignal::Failed {
                    target: session.target,
                    message,
                })
            }
            RecognizerEvent::Ended => {
                let session = self.active.take()?;
                tracing::debug!(session_id = %session.id, "Recognizer capture ended");
                Some(DictationSignal::Stopped {
                    target: session.target,
                })
            }
        }
    }

    /// Read-only snapshot for rendering.
    pub fn snapshot(&self) -> DictationSnapshot {
        match self.active {
            Some(ref session) => DictationSnapshot {
                is_active: true,
                target: Some(session.target),
                language_code: Some(session.language_code.clone()),
                transcript: session.transcript.clone(),
            },
            None => DictationSnapshot {
                is_active: false,
                target: None,
                language_code: None,
                transcript: String::new(),
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{MockRecognizer, UnavailableRecognizer};

    fn manager_with_mock() -> (DictationManager, crate::recognizer::MockRecognizerHandle) {
        let rec = MockRecognizer::new();
        let handle = rec.handle();
        (DictationManager::new(Box::new(rec)), handle)
    }

    #[test]
    fn test_start_without_capability() {
        let mut mgr = DictationManager::new(Box::new(UnavailableRecognizer));
        let result = mgr.start(TargetField::Objection, "English");
        assert!(matches!(result, Err(TrainerError::UnsupportedCapability)));
        assert!(!mgr.is_active());
    }

    #[test]
    fn test_availability_probed_before_device_start() {
        let rec = MockRecognizer::unavailable();
        let handle = rec.handle();
        let mut mgr = DictationManager::new(Box::new(rec));

        let result = mgr.start(TargetField::Objection, "English");
        assert!(matches!(result, Err(TrainerError::UnsupportedCapability)));
        // The device was never driven: absence is detected up front.
        assert!(handle.starts().is_empty());
        assert!(!mgr.is_active());
    }

    #[test]
    fn test_start_resolves_language_code() {
        let (mut mgr, handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "Hindi").unwrap();
        assert_eq!(handle.starts(), vec!["hi-IN".to_string()]);

        let snap = mgr.snapshot();
        assert!(snap.is_active);
        assert_eq!(snap.language_code.as_deref(), Some("hi-IN"));
        assert_eq!(snap.target, Some(TargetField::Objection));
    }

    #[test]
    fn test_unknown_language_falls_back_to_en_us() {
        let (mut mgr, handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "Esperanto").unwrap();
        assert_eq!(handle.starts(), vec!["en-US".to_string()]);
    }

    #[test]
    fn test_transcript_replaces_not_appends() {
        let (mut mgr, _handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "English").unwrap();

        mgr.handle_event(RecognizerEvent::Transcript("your commission".to_string()));
        let signal = mgr
            .handle_event(RecognizerEvent::Transcript(
                "your commission is too high".to_string(),
            ))
            .unwrap();

        assert_eq!(
            signal,
            DictationSignal::TranscriptUpdated {
                target: TargetField::Objection,
                text: "your commission is too high".to_string(),
            }
        );
        // The snapshot holds exactly the newest result, never a concatenation.
        assert_eq!(mgr.snapshot().transcript, "your commission is too high");
    }

    #[test]
    fn test_single_active_session_systemwide() {
        let (mut mgr, handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "English").unwrap();
        assert!(mgr.is_active());

        // Starting for the other field stops the first session before the
        // device is reused: never two concurrent captures.
        mgr.start(TargetField::PracticeResponse, "English").unwrap();
        assert_eq!(handle.stops(), 1);
        assert_eq!(handle.starts().len(), 2);
        assert_eq!(mgr.active_target(), Some(TargetField::PracticeResponse));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut mgr, handle) = manager_with_mock();
        assert!(mgr.stop().is_none());

        mgr.start(TargetField::Objection, "English").unwrap();
        assert_eq!(mgr.stop(), Some(TargetField::Objection));
        assert!(mgr.stop().is_none());
        assert_eq!(handle.stops(), 1);
    }

    #[test]
    fn test_error_deactivates_and_surfaces() {
        let (mut mgr, _handle) = manager_with_mock();
        mgr.start(TargetField::PracticeResponse, "English").unwrap();

        let signal = mgr
            .handle_event(RecognizerEvent::Error("no-speech".to_string()))
            .unwrap();
        assert_eq!(
            signal,
            DictationSignal::Failed {
                target: TargetField::PracticeResponse,
                message: "no-speech".to_string(),
            }
        );
        // Never stuck active after an error.
        assert!(!mgr.is_active());
    }

    #[test]
    fn test_device_end_deactivates() {
        let (mut mgr, _handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "English").unwrap();

        let signal = mgr.handle_event(RecognizerEvent::Ended).unwrap();
        assert_eq!(
            signal,
            DictationSignal::Stopped {
                target: TargetField::Objection,
            }
        );
        assert!(!mgr.is_active());
    }

    #[test]
    fn test_late_events_after_stop_are_discarded() {
        let (mut mgr, _handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "English").unwrap();
        mgr.stop();

        assert!(mgr
            .handle_event(RecognizerEvent::Transcript("late".to_string()))
            .is_none());
        assert!(mgr
            .handle_event(RecognizerEvent::Error("late".to_string()))
            .is_none());
        assert!(mgr.handle_event(RecognizerEvent::Ended).is_none());
    }

    #[test]
    fn test_start_failure_leaves_manager_inactive() {
        let mut mgr = DictationManager::new(Box::new(MockRecognizer::failing()));
        let result = mgr.start(TargetField::Objection, "English");
        assert!(matches!(result, Err(TrainerError::Capture(_))));
        assert!(!mgr.is_active());
    }

    #[test]
    fn test_restart_after_error() {
        let (mut mgr, handle) = manager_with_mock();
        mgr.start(TargetField::Objection, "English").unwrap();
        mgr.handle_event(RecognizerEvent::Error("aborted".to_string()));

        // A fresh session starts cleanly after a device error.
        mgr.start(TargetField::Objection, "Tamil").unwrap();
        assert!(mgr.is_active());
        assert_eq!(handle.starts().last().unwrap(), "ta-IN");
        assert_eq!(mgr.snapshot().transcript, "");
    }

    #[test]
    fn test_snapshot_when_inactive() {
        let (mgr, _handle) = manager_with_mock();
        let snap = mgr.snapshot();
        assert!(!snap.is_active);
        assert!(snap.target.is_none());
        assert!(snap.language_code.is_none());
        assert!(snap.transcript.is_empty());
    }
}
