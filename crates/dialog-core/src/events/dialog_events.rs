//! Dialog event types
//!
//! Typed payloads for the dialog kinds a native media engine can raise, plus
//! the [`DialogEvent`] enum published on the dispatcher's monitoring channel.
//! All types serialize with serde so hosts can feed them into diagnostics or
//! structured logs as-is.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::dialog::DialogId;

/// Severity of a question dialog.
///
/// Mirrors the engine's wire values; [`QuestionType::from_raw`] is lossy on
/// purpose so an engine newer than this crate degrades to `Normal` instead of
/// failing dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionType {
    /// Ordinary question with no particular urgency
    Normal,
    /// The engine flags the situation as a warning
    Warning,
    /// The engine flags the situation as critical
    Critical,
}

impl QuestionType {
    /// Map the engine's raw discriminant onto a severity.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => QuestionType::Normal,
            1 => QuestionType::Warning,
            2 => QuestionType::Critical,
            other => {
                trace!("unknown question type {} from engine, treating as normal", other);
                QuestionType::Normal
            }
        }
    }

    /// The engine's raw discriminant for this severity.
    pub fn as_raw(&self) -> u32 {
        match self {
            QuestionType::Normal => 0,
            QuestionType::Warning => 1,
            QuestionType::Critical => 2,
        }
    }
}

/// Request to display a login dialog.
///
/// The handler answers through
/// [`DialogHandle::post_login`](crate::dialog::DialogHandle::post_login) or
/// dismisses the dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Dialog title supplied by the engine
    pub title: String,
    /// Explanatory text, e.g. which resource requires credentials
    pub text: String,
    /// Username to pre-fill, empty when the engine has none
    pub default_username: String,
    /// Whether the engine offers to store the entered credentials
    pub ask_store: bool,
}

/// Request to display a question dialog with up to two actions.
///
/// The handler answers with
/// [`DialogHandle::post_action`](crate::dialog::DialogHandle::post_action)
/// (`1` for the first action, `2` for the second) or dismisses the dialog,
/// which the engine treats as the cancel choice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// Dialog title supplied by the engine
    pub title: String,
    /// Question text
    pub text: String,
    /// Severity the engine assigned to the question
    pub question_type: QuestionType,
    /// Label for the cancel choice
    pub cancel_text: String,
    /// Label for the first action
    pub first_action_text: String,
    /// Label for the second action
    pub second_action_text: String,
}

/// Request to display a progress dialog.
///
/// Subsequent position changes arrive through
/// [`DialogHandlers::update_progress`](crate::handlers::DialogHandlers::update_progress)
/// for the same handle; the dialog stays live until resolved or cancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRequest {
    /// Dialog title supplied by the engine
    pub title: String,
    /// Progress text
    pub text: String,
    /// True when the engine cannot estimate completion
    pub indeterminate: bool,
    /// Initial position in `[0, 1]`; meaningless when indeterminate
    pub position: f32,
    /// Label for the cancel choice
    pub cancel_text: String,
}

/// A dialog event as observed on the dispatcher's monitoring channel.
///
/// Every inbound native callback is mirrored here after coercion to typed
/// form, in arrival order per dialog. The stream is observational: consuming
/// it does not resolve dialogs and dropping it does not affect dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DialogEvent {
    /// Fire-and-forget error notice; carries no handle
    Error {
        /// Notice title
        title: String,
        /// Notice text
        text: String,
    },

    /// A login dialog was raised
    LoginRequested {
        /// Identifier of the dialog the engine raised
        id: DialogId,
        /// Login payload handed to the handler
        request: LoginRequest,
    },

    /// A question dialog was raised
    QuestionRequested {
        /// Identifier of the dialog the engine raised
        id: DialogId,
        /// Question payload handed to the handler
        request: QuestionRequest,
    },

    /// A progress dialog was raised
    ProgressRequested {
        /// Identifier of the dialog the engine raised
        id: DialogId,
        /// Progress payload handed to the handler
        request: ProgressRequest,
    },

    /// An already-shown progress dialog changed position or text
    ProgressUpdated {
        /// Identifier of the progress dialog being updated
        id: DialogId,
        /// New position in `[0, 1]`
        position: f32,
        /// New progress text
        text: String,
    },

    /// The engine withdrew a dialog before the handler resolved it
    Cancelled {
        /// Identifier of the withdrawn dialog
        id: DialogId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_type_raw_mapping() {
        assert_eq!(QuestionType::from_raw(0), QuestionType::Normal);
        assert_eq!(QuestionType::from_raw(1), QuestionType::Warning);
        assert_eq!(QuestionType::from_raw(2), QuestionType::Critical);
        // Unknown discriminants degrade instead of failing dispatch
        assert_eq!(QuestionType::from_raw(7), QuestionType::Normal);

        for kind in [QuestionType::Normal, QuestionType::Warning, QuestionType::Critical] {
            assert_eq!(QuestionType::from_raw(kind.as_raw()), kind);
        }
    }
}
