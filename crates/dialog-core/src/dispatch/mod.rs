//! Callback-to-handler dispatch
//!
//! Home of the [`DialogDispatcher`], which turns synchronous engine
//! callbacks into handler tasks on the host runtime, and the internal
//! live-dialog table backing cancellation and progress updates.

mod dispatcher;
mod registry;

pub use dispatcher::DialogDispatcher;
