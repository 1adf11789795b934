//! PitchDrill dictation crate - recognizer adapter seam, the dictation
//! session state machine, and the language registry.
//!
//! The recognizer is a singleton resource: at most one dictation session
//! is active system-wide, and the manager enforces that by stopping any
//! previous session before starting a new one. Recognizer callbacks are
//! modeled as `RecognizerEvent` messages applied through
//! `DictationManager::handle_event`, keeping the state machine free of
//! nested callbacks and fully testable without a device.

pub mod language;
pub mod manager;
pub mod recognizer;

pub use language::{locale_for, DEFAULT_LOCALE, SUPPORTED_LANGUAGES};
pub use manager::{DictationManager, DictationSignal, DictationSnapshot};
pub use recognizer::{MockRecognizer, RecognizerEvent, SpeechRecognizer, UnavailableRecognizer};
