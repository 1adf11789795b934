//! Speech recognizer adapter seam.
//!
//! Platform speech capabilities (browser SpeechRecognition, OS dictation
//! APIs) expose a callback lifecycle: onstart / onresult / onerror /
//! onend. The adapter translates those callbacks into `RecognizerEvent`
//! messages that the dictation manager applies, so the state machine
//! never runs inside a device callback.

use std::sync::{Arc, Mutex};

use pitchdrill_core::error::{Result, TrainerError};

/// One message from the recognizer adapter to the dictation manager.
///
/// Events for a session arrive in device-recognition order. Each
/// `Transcript` carries the full text of the newest recognized result,
/// not a delta.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecognizerEvent {
    /// Capture actually began on the device.
    Started,
    /// A new (possibly interim) recognition result. Replaces any prior
    /// transcript for the active field.
    Transcript(String),
    /// The recognizer hit a runtime error; capture is over.
    Error(String),
    /// Capture ended on the device side (end of speech, device stop).
    Ended,
}

/// Adapter over a platform speech-recognition capability.
///
/// Implementations wrap one physical recognizer in continuous,
/// interim-results mode. `start`/`stop` control the device; recognition
/// output is delivered out-of-band as [`RecognizerEvent`]s.
pub trait SpeechRecognizer: Send {
    /// Whether the platform offers speech recognition at all. Checked
    /// before every start so absence is reported, never a crash.
    fn is_available(&self) -> bool;

    /// Begin continuous capture in the given locale.
    fn start(&mut self, language_code: &str) -> Result<()>;

    /// Stop capture. Must be safe to call when not capturing.
    fn stop(&mut self);
}

/// Recognizer for platforms without a speech capability.
///
/// `is_available` is always false and `start` reports
/// `UnsupportedCapability`, matching the probe-before-use contract.
#[derive(Debug, Default)]
pub struct UnavailableRecognizer;

impl SpeechRecognizer for UnavailableRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, _language_code: &str) -> Result<()> {
        Err(TrainerError::UnsupportedCapability)
    }

    fn stop(&mut self) {}
}

// =============================================================================
// Mock implementation
// =============================================================================

#[derive(Debug, Default)]
struct MockState {
    starts: Vec<String>,
    stops: usize,
    capturing: bool,
}

/// Scripted recognizer for tests.
///
/// Records every `start` locale and `stop` call; the shared
/// [`MockRecognizerHandle`] stays inspectable after the recognizer is
/// boxed into a manager.
#[derive(Debug)]
pub struct MockRecognizer {
    state: Arc<Mutex<MockState>>,
    available: bool,
    fail_start: bool,
}

/// Inspection handle for a [`MockRecognizer`] owned elsewhere.
#[derive(Clone, Debug)]
pub struct MockRecognizerHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockRecognizer {
    /// A recognizer that reports availability and accepts every start.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::default())),
            available: true,
            fail_start: false,
        }
    }

    /// A recognizer whose `start` always fails with a device error.
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::new()
        }
    }

    /// A recognizer that reports no speech capability, while still
    /// recording any calls made against it.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Handle for asserting on starts/stops after the recognizer has
    /// been moved into a manager.
    pub fn handle(&self) -> MockRecognizerHandle {
        MockRecognizerHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechRecognizer for MockRecognizer {
    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, language_code: &str) -> Result<()> {
        if self.fail_start {
            return Err(TrainerError::Capture("audio-capture".to_string()));
        }
        let mut state = self.state.lock().expect("mock state mutex poisoned");
        state.starts.push(language_code.to_string());
        state.capturing = true;
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().expect("mock state mutex poisoned");
        if state.capturing {
            state.capturing = false;
            state.stops += 1;
        }
    }
}

impl MockRecognizerHandle {
    /// Locales passed to `start`, in call order.
    pub fn starts(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("mock state mutex poisoned")
            .starts
            .clone()
    }

    /// Number of effective stops (stop while capturing).
    pub fn stops(&self) -> usize {
        self.state.lock().expect("mock state mutex poisoned").stops
    }

    /// Whether the device believes it is capturing right now.
    pub fn capturing(&self) -> bool {
        self.state
            .lock()
            .expect("mock state mutex poisoned")
            .capturing
    }
}
