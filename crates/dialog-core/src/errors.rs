//! Error types for the dialog bridge
//!
//! The error surface here is deliberately small. Most outcomes that look like
//! failures at the native boundary are expected and recoverable (the engine
//! refusing a post, a dialog withdrawn mid-interaction) and are reported as
//! `Ok(false)` from the handle operations rather than as errors. The variants
//! below cover the cases that genuinely indicate a bug or a setup problem.

use thiserror::Error;

/// Result type for dialog operations
pub type DialogResult<T> = Result<T, DialogError>;

/// Errors that can occur in the dialog bridge
#[derive(Debug, Clone, Error)]
pub enum DialogError {
    /// A resolving operation was attempted on a handle that is already retired.
    ///
    /// Each dialog handle accepts exactly one terminal call. Hitting this
    /// error means the handler resolved the same dialog twice, which is a
    /// programming error and is surfaced loudly instead of being absorbed.
    /// `dismiss` is exempt and reports `false` instead.
    #[error("dialog handle already retired: {operation} is not allowed")]
    InvalidHandle { operation: &'static str },

    /// No tokio runtime was available when constructing the dispatcher.
    #[error("no tokio runtime available for dialog dispatch: {message}")]
    NoRuntime { message: String },

    /// Configuration error
    #[error("invalid dialog configuration: {message}")]
    Configuration { message: String },

    /// A host dialog handler reported a failure of its own.
    ///
    /// Handlers may use this to propagate rendering or interaction failures;
    /// the dispatch task logs the error and moves on, so one failing handler
    /// never blocks delivery of later dialog events.
    #[error("dialog handler failed: {message}")]
    Handler { message: String },
}

impl DialogError {
    /// Create an invalid-handle error for the given operation name
    pub fn invalid_handle(operation: &'static str) -> Self {
        Self::InvalidHandle { operation }
    }

    /// Create a missing-runtime error
    pub fn no_runtime(message: impl Into<String>) -> Self {
        Self::NoRuntime {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a handler error
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler {
            message: message.into(),
        }
    }
}
