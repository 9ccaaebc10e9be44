//! Host-side dialog handlers
//!
//! The host application decides how dialogs are presented by implementing
//! [`DialogHandlers`] and passing it to the dispatcher once, at construction.
//! Each method covers one dialog kind; methods left at their default body
//! drop the corresponding events with a debug log, which is the "no UI
//! available for this kind" behavior.
//!
//! # Examples
//!
//! ```rust
//! use rmedia_dialog_core::{DialogHandle, DialogHandlers, DialogResult, LoginRequest};
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! /// Answers every login prompt from stored credentials.
//! struct StoredCredentials {
//!     username: String,
//!     password: String,
//! }
//!
//! #[async_trait]
//! impl DialogHandlers for StoredCredentials {
//!     async fn display_login(
//!         &self,
//!         dialog: DialogHandle,
//!         request: LoginRequest,
//!         _token: CancellationToken,
//!     ) -> DialogResult<()> {
//!         println!("login requested: {}", request.title);
//!         dialog.post_login(Some(&self.username), Some(&self.password), false)?;
//!         Ok(())
//!     }
//! }
//! ```
//!
//! A handler that waits for user interaction should select on its
//! cancellation token so a withdrawn dialog stops occupying the UI:
//!
//! ```rust,no_run
//! # use rmedia_dialog_core::{DialogHandle, DialogResult, QuestionRequest};
//! # use tokio_util::sync::CancellationToken;
//! # async fn ask_user(_request: &QuestionRequest) -> u16 { 1 }
//! # async fn demo(dialog: DialogHandle, request: QuestionRequest, token: CancellationToken) -> DialogResult<()> {
//! tokio::select! {
//!     choice = ask_user(&request) => { dialog.post_action(choice)?; }
//!     _ = token.cancelled() => { dialog.dismiss(); }
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::dialog::DialogHandle;
use crate::errors::DialogResult;
use crate::events::{LoginRequest, ProgressRequest, QuestionRequest};

/// Host-supplied dialog presentation, one async method per dialog kind.
///
/// The dispatcher spawns each invocation as its own task on the host
/// runtime: methods may suspend for as long as the user takes to respond
/// without ever blocking the engine thread that raised the dialog, and a
/// failure in one invocation never prevents delivery of later events (it is
/// logged by the dispatch task).
///
/// For the three dialog kinds that carry a handle, the handler owns the
/// handle and is expected to eventually resolve it: answer it or
/// [`dismiss`](DialogHandle::dismiss) it. An unresolved dialog stays open
/// until the engine withdraws it, at which point the supplied cancellation
/// token fires.
#[async_trait]
pub trait DialogHandlers: Send + Sync {
    /// Present a fire-and-forget error notice.
    ///
    /// No handle is involved and the engine expects no response.
    async fn display_error(&self, title: String, text: String) -> DialogResult<()> {
        debug!("no error handler registered, dropping notice '{}'", title);
        let _ = text;
        Ok(())
    }

    /// Present a login dialog and resolve `dialog` with the outcome.
    async fn display_login(
        &self,
        dialog: DialogHandle,
        request: LoginRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        debug!("no login handler registered, dropping '{}'", request.title);
        let _ = (dialog, token);
        Ok(())
    }

    /// Present a question dialog and resolve `dialog` with the chosen action.
    async fn display_question(
        &self,
        dialog: DialogHandle,
        request: QuestionRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        debug!("no question handler registered, dropping '{}'", request.title);
        let _ = (dialog, token);
        Ok(())
    }

    /// Present a progress dialog.
    ///
    /// The same handle later appears in [`update_progress`](Self::update_progress)
    /// calls until the dialog is resolved or withdrawn.
    async fn display_progress(
        &self,
        dialog: DialogHandle,
        request: ProgressRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        debug!("no progress handler registered, dropping '{}'", request.title);
        let _ = (dialog, token);
        Ok(())
    }

    /// Apply a position/text update to a progress dialog shown earlier.
    ///
    /// `dialog` is a clone of the handle given to
    /// [`display_progress`](Self::display_progress); the update does not
    /// retire it.
    async fn update_progress(
        &self,
        dialog: DialogHandle,
        position: f32,
        text: String,
    ) -> DialogResult<()> {
        debug!("no progress-update handler registered, dropping update at {}", position);
        let _ = (dialog, text);
        Ok(())
    }
}
