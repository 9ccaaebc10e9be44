//! # RMEDIA Dialog Core - Native Dialog Bridging
//!
//! This crate carries the dialog traffic of an embedded native media engine
//! into an async Rust host. Engines raise login prompts, questions, progress
//! windows and error notices from their own worker threads and expect an
//! answer through a one-shot native reference; the host wants to serve those
//! from async code without ever blocking an engine thread. `dialog-core`
//! provides the pieces in between:
//!
//! - **[`DialogDispatcher`]**: implements the engine's callback table and
//!   spawns one handler task per dialog event on the host runtime
//! - **[`DialogHandle`]**: single-use, thread-safe token a handler resolves
//!   exactly once (answer or dismiss), immune to double resolution
//! - **[`DialogHandlers`]**: the host's presentation layer, one async method
//!   per dialog kind, with drop-by-default bodies
//! - **[`DialogEngine`] / [`DialogCallbacks`]**: the outbound and inbound
//!   ports an FFI adapter implements and drives
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use rmedia_dialog_core::prelude::*;
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//!
//! # struct FfiEngine;
//! # impl DialogEngine for FfiEngine {
//! #     fn post_login(&self, _: DialogId, _: &str, _: &str, _: bool) -> i32 { 0 }
//! #     fn post_action(&self, _: DialogId, _: u16) -> i32 { 0 }
//! #     fn dismiss(&self, _: DialogId) -> i32 { 0 }
//! # }
//! /// Answers every question with its first action.
//! struct ConsoleUi;
//!
//! #[async_trait]
//! impl DialogHandlers for ConsoleUi {
//!     async fn display_question(
//!         &self,
//!         dialog: DialogHandle,
//!         request: QuestionRequest,
//!         _token: CancellationToken,
//!     ) -> DialogResult<()> {
//!         println!("{}: {}", request.title, request.text);
//!         dialog.post_action(1)?;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine: Arc<dyn DialogEngine> = Arc::new(FfiEngine);
//!     let dispatcher =
//!         DialogDispatcher::new(engine, Arc::new(ConsoleUi), DispatchConfig::default())?;
//!
//!     // Watch dialog traffic without participating in it
//!     let mut events = dispatcher.events();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             tracing::debug!("dialog event: {:?}", event);
//!         }
//!     });
//!
//!     // Wire `dispatcher.clone()` into the engine's callback table here;
//!     // from then on every dialog the engine raises reaches ConsoleUi.
//!     Ok(())
//! }
//! ```
//!
//! ## Dialog Lifecycle
//!
//! Every dialog carrying a handle is resolved exactly once, by whichever
//! side gets there first:
//!
//! 1. The engine raises the dialog; the dispatcher mints a [`DialogHandle`]
//!    plus a cancellation token and spawns the matching handler
//! 2. The handler answers ([`DialogHandle::post_login`] /
//!    [`DialogHandle::post_action`]) or dismisses
//!    ([`DialogHandle::dismiss`]), retiring the handle
//! 3. Or the engine withdraws the dialog first: the token fires, the handle
//!    is retired by the dispatcher, and the handler's late attempt reports
//!    failure instead of double-posting
//!
//! ## Threading Model
//!
//! - [`DialogCallbacks`] methods run on arbitrary engine threads and return
//!   after constant-time work; handler execution is spawned, never awaited
//! - [`DialogHandlers`] methods run as tasks on the host tokio runtime and
//!   may suspend indefinitely
//! - [`DialogHandle`] operations are synchronous, lock-free and callable
//!   from any thread

#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/rmedia-dialog-core/0.1.4")]

pub mod config;
pub mod dialog;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod native;

// Re-export main types
pub use config::DispatchConfig;
pub use dialog::{DialogHandle, DialogId};
pub use dispatch::DialogDispatcher;
pub use errors::{DialogError, DialogResult};
pub use events::{DialogEvent, LoginRequest, ProgressRequest, QuestionRequest, QuestionType};
pub use handlers::DialogHandlers;
pub use native::{DialogCallbacks, DialogEngine};

/// Everything needed to embed the dialog bridge.
pub mod prelude {
    pub use crate::{
        DialogCallbacks, DialogDispatcher, DialogEngine, DialogError, DialogEvent, DialogHandle,
        DialogHandlers, DialogId, DialogResult, DispatchConfig, LoginRequest, ProgressRequest,
        QuestionRequest, QuestionType,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
