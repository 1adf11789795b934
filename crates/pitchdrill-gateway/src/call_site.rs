//! Per-site request state machine.
//!
//! Transitions:
//! - Idle | Succeeded | Failed -> InFlight (begin)
//! - InFlight -> Succeeded | Failed (completion with a current ticket)
//! - any -> Idle (reset)
//!
//! `begin` while InFlight is refused, which is what makes a double
//! submit a no-op instead of a second outstanding call. Every `begin`
//! and `reset` bumps a generation counter; completions carry the
//! generation they were issued under and are discarded when it no longer
//! matches, so a slow response for a superseded request can never
//! overwrite a later view.

use serde::Serialize;

/// Lifecycle of one call site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// No request issued since the last reset.
    #[default]
    Idle,
    /// A request is outstanding; further submits are refused.
    InFlight,
    /// The last request completed and its payload is stored.
    Succeeded,
    /// The last request failed and a display message is stored.
    Failed,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Idle => write!(f, "Idle"),
            RequestStatus::InFlight => write!(f, "InFlight"),
            RequestStatus::Succeeded => write!(f, "Succeeded"),
            RequestStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// Completion token issued by [`CallSite::begin`]. Only the completion
/// holding the current generation is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// State for one request call site.
#[derive(Debug)]
pub struct CallSite<T> {
    status: RequestStatus,
    payload: Option<T>,
    error: Option<String>,
    generation: u64,
}

impl<T> Default for CallSite<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CallSite<T> {
    pub fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            payload: None,
            error: None,
            generation: 0,
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Stored payload of the last successful request, if any.
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Display message of the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transition to InFlight and issue a completion ticket.
    ///
    /// Returns `None` while a request is already outstanding: the caller
    /// must treat that as a no-op, not queue a second call. Any stale
    /// payload or error from a previous request is cleared here, before
    /// the call begins.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.status == RequestStatus::InFlight {
            return None;
        }
        self.payload = None;
        self.error = None;
        self.generation += 1;
        self.status = RequestStatus::InFlight;
        Some(Ticket {
            generation: self.generation,
        })
    }

    /// Apply a successful completion. Returns whether it was applied;
    /// stale completions (site reset or re-begun since the ticket was
    /// issued) are discarded.
    pub fn succeed(&mut self, ticket: Ticket, payload: T) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!(generation = ticket.generation, "Discarding stale completion");
            return false;
        }
        self.payload = Some(payload);
        self.status = RequestStatus::Succeeded;
        true
    }

    /// Apply a failed completion with a user-facing message. Same
    /// staleness rule as [`CallSite::succeed`].
    pub fn fail(&mut self, ticket: Ticket, message: String) -> bool {
        if !self.accepts(ticket) {
            tracing::debug!(generation = ticket.generation, "Discarding stale failure");
            return false;
        }
        self.error = Some(message);
        self.status = RequestStatus::Failed;
        true
    }

    /// Return the site to Idle, clearing any stored result and
    /// invalidating every outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.status = RequestStatus::Idle;
        self.payload = None;
        self.error = None;
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        self.status == RequestStatus::InFlight && ticket.generation == self.generation
    }
}

// =============================================================================
// Tests
// =============================================================================
