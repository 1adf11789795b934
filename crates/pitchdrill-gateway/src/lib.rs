//! PitchDrill gateway crate - asynchronous request lifecycle against the
//! external reasoning service.
//!
//! Two independent call sites (objection handling, practice feedback),
//! each with its own re-entrancy guard and staleness generation: a submit
//! while a call is in flight is a no-op, and a completion arriving after
//! its site was reset is discarded rather than applied to a newer view.

pub mod call_site;
pub mod client;
pub mod gateway;
pub mod service;

pub use call_site::{CallSite, RequestStatus, Ticket};
pub use client::HttpTrainingService;
pub use gateway::{RequestGateway, SubmitOutcome};
pub use service::{MockTrainingService, TrainingService};
