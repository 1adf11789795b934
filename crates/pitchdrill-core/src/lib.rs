//! PitchDrill core crate - shared error type, configuration, domain types,
//! and domain events.
//!
//! Every other crate in the workspace depends on this one; it contains no
//! business logic of its own.

pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::TrainerConfig;
pub use error::{Result, TrainerError};
pub use events::TrainerEvent;
pub use types::*;
