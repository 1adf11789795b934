use thiserror::Error;

/// Top-level error type for the PitchDrill system.
///
/// Variants map one-to-one onto the failure taxonomy of the trainer:
/// local validation, missing platform capability, recognizer runtime
/// failures, and the two flavors of external-service failure. Subsystem
/// crates return this type directly so the `?` operator works across
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainerError {
    /// Submitted text was empty or whitespace-only. Rejected locally;
    /// no network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The platform offers no speech-recognition capability.
    #[error("Speech recognition is not supported on this platform")]
    UnsupportedCapability,

    /// The recognizer reported a runtime error. The capture session is
    /// terminated; there is no automatic retry.
    #[error("Capture error: {0}")]
    Capture(String),

    /// Non-success response from the reasoning service, carrying the
    /// message extracted from the response body when present.
    #[error("Service error: {0}")]
    Service(String),

    /// Network or timeout failure reaching the service.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for TrainerError {
    fn from(err: toml::de::Error) -> Self {
        TrainerError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for TrainerError {
    fn from(err: toml::ser::Error) -> Self {
        TrainerError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for TrainerError {
    fn from(err: serde_json::Error) -> Self {
        TrainerError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for PitchDrill operations.
pub type Result<T> = std::result::Result<T, TrainerError>;
