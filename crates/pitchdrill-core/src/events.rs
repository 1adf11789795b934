use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Mode, TargetField};

/// All domain events the trainer can emit.
///
/// Events are emitted by the controller after state changes and consumed
/// by the presentation layer, replacing ad-hoc toast calls: every
/// user-visible outcome, including every error, travels through here.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TrainerEvent {
    // =========================================================================
    // Dictation
    // =========================================================================
    /// A dictation session started capturing for a field.
    DictationStarted {
        session_id: Uuid,
        target: TargetField,
        language_code: String,
    },

    /// The recognizer delivered a new transcript for the active field.
    /// The text fully replaces the previous value.
    TranscriptUpdated {
        target: TargetField,
        text_length: usize,
    },

    /// A dictation session stopped (user stop or recognizer end).
    DictationStopped { target: TargetField },

    /// The recognizer reported a runtime error; the session is over.
    DictationFailed {
        target: TargetField,
        message: String,
    },

    // =========================================================================
    // Requests
    // =========================================================================
    /// The objection-handling site produced a response.
    ResponseReceived { text_length: usize },

    /// The feedback site produced a scored result for a scenario.
    FeedbackReceived {
        scenario_id: i64,
        score: Option<u8>,
    },

    /// A request site finished with an error message for display.
    RequestFailed { message: String },

    // =========================================================================
    // Navigation
    // =========================================================================
    /// The mode changed.
    ModeChanged { from: Mode, to: Mode },

    /// The practice session moved to a new scenario index.
    SessionAdvanced { index: usize },

    /// `advance()` was called at the final scenario; the session is done.
    SessionCompleted { total: usize },

    /// A fresh scenario list was loaded (catalog or practice set).
    ScenariosLoaded { count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serializes() {
        let ev = TrainerEvent::TranscriptUpdated {
            target: TargetField::Objection,
            text_length: 12,
        };
        let json = serde_json::to_string(&ev).unwrap();
        assert!(json.contains("TranscriptUpdated"));
        assert!(json.contains("objection"));
    }

    #[test]
    fn test_mode_changed_roundtrip() {
        let ev = TrainerEvent::ModeChanged {
            from: Mode::Home,
            to: Mode::Practice,
        };
        let json = serde_json::to_string(&ev).unwrap();
        let back: TrainerEvent = serde_json::from_str(&json).unwrap();
        match back {
            TrainerEvent::ModeChanged { from, to } => {
                assert_eq!(from, Mode::Home);
                assert_eq!(to, Mode::Practice);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
