//! Inbound callback surface
//!
//! The native engine announces dialogs through a fixed table of callbacks.
//! [`DialogCallbacks`] is the safe rendition of that table: one method per
//! event kind, implemented by the dispatcher and driven by the external ABI
//! adapter. The adapter owns all marshaling concerns (UTF-8 conversion,
//! pointer-to-u64 translation, the per-process context pointer) and hands
//! this trait already-safe data.

/// Callback table invoked by the native engine, one method per event kind.
///
/// ## Threading
///
/// Every method may be called from an arbitrary engine worker thread, often
/// while the engine holds internal locks. Implementations must return
/// promptly and must never block on host-side work; the provided
/// [`DialogDispatcher`](crate::dispatch::DialogDispatcher) satisfies this by
/// scheduling handler execution on the host runtime and returning.
///
/// ## Data conventions
///
/// * `id` is the engine's raw dialog reference; `0` is the invalid sentinel.
/// * Text arguments are `None` where the engine passed no string; consumers
///   treat that the same as an empty string.
pub trait DialogCallbacks: Send + Sync {
    /// An error notice was raised. No handle, no response expected.
    fn on_error(&self, title: Option<String>, text: Option<String>);

    /// A login dialog was raised for the native reference `id`.
    fn on_login_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        default_username: Option<String>,
        ask_store: bool,
    );

    /// A question dialog was raised for the native reference `id`.
    ///
    /// `question_type` is the engine's raw severity discriminant.
    fn on_question_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        question_type: u32,
        cancel_text: Option<String>,
        first_action_text: Option<String>,
        second_action_text: Option<String>,
    );

    /// A progress dialog was raised for the native reference `id`.
    fn on_progress_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        indeterminate: bool,
        position: f32,
        cancel_text: Option<String>,
    );

    /// An already-shown progress dialog changed position or text.
    ///
    /// References the handle created by the earlier progress event; no new
    /// handle is created and the existing one stays valid.
    fn on_progress_updated(&self, id: u64, position: f32, text: Option<String>);

    /// The engine withdrew the dialog `id` before it was resolved.
    fn on_cancelled(&self, id: u64);
}
