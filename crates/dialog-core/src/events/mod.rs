//! Event types for the dialog bridge
//!
//! This module contains the typed request payloads handed to host handlers
//! and the [`DialogEvent`] enum mirrored on the dispatcher's monitoring
//! channel.

pub mod dialog_events;

// Re-export main types
pub use dialog_events::{DialogEvent, LoginRequest, ProgressRequest, QuestionRequest, QuestionType};
