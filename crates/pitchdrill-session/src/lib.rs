//! PitchDrill session crate - practice-session navigation and the
//! top-level trainer controller.
//!
//! The navigator owns the ordered scenario list, the monotone current
//! index, and the per-scenario response/feedback history. The controller
//! is the mode machine on top: it owns the single dictation manager and
//! the request gateway, routes transcripts into the right input buffer,
//! and clears mode-local state on every mode exit.

pub mod controller;
pub mod navigator;

pub use controller::TrainerController;
pub use navigator::{Advance, NavigatorSnapshot, SessionNavigator};
