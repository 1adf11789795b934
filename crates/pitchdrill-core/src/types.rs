use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Top-level view the trainer is currently in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Landing view; nothing mode-local is held here.
    #[default]
    Home,
    /// Live objection handling against the reasoning service.
    ObjectionHandling,
    /// Multi-step practice session with per-scenario feedback.
    Practice,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Home => write!(f, "Home"),
            Mode::ObjectionHandling => write!(f, "ObjectionHandling"),
            Mode::Practice => write!(f, "Practice"),
        }
    }
}

/// The logical input field a dictation session writes into.
///
/// The recognizer hardware is a singleton, so at most one field receives
/// transcript updates at any instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    /// The objection input in the objection-handling view.
    Objection,
    /// The response input for the current practice scenario.
    PracticeResponse,
}

impl std::fmt::Display for TargetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TargetField::Objection => write!(f, "objection"),
            TargetField::PracticeResponse => write!(f, "practice_response"),
        }
    }
}

/// How a practice response was produced. Sent to the service as
/// `response_type` so feedback can account for the input channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    /// Typed into the response field.
    #[default]
    Text,
    /// Dictated through the speech recognizer.
    Voice,
}

impl ResponseKind {
    /// Wire value expected by the feedback endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseKind::Text => "text",
            ResponseKind::Voice => "voice",
        }
    }
}

// =============================================================================
// Catalog and service payloads
// =============================================================================

/// One catalog entry pairing a merchant objection with situational context
/// and a category tag. Immutable once fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Catalog-assigned unique id.
    pub id: i64,
    /// Category label, used for display grouping only.
    pub category: String,
    /// The merchant's stated objection.
    pub objection: String,
    /// Situational background for the objection.
    pub context: String,
    /// Coaching hint carried by the catalog; not always present on the wire.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_response: Option<String>,
}

/// Reply from the objection-handling endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectionReply {
    /// Free-form coaching text, stored verbatim.
    pub response: String,
    /// The catalog scenario the service matched, when an id was sent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario_used: Option<Scenario>,
}

/// Scored feedback for one practice response.
///
/// An empty `suggestions` list and an absent one are equivalent: nothing
/// to render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResult {
    /// Feedback text, stored verbatim.
    pub feedback: String,
    /// Score in `[0, 10]` when the service produced one.
    #[serde(default)]
    pub score: Option<u8>,
    /// Improvement suggestions, in service order.
    #[serde(default)]
    pub suggestions: Vec<String>,
}
