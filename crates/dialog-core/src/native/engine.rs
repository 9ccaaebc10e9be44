//! Outbound port to the native engine
//!
//! Posting a dialog response is the only direction in which this crate calls
//! into the engine. The three functions involved map one-to-one onto the
//! engine's C entry points; adapters implement [`DialogEngine`] over the raw
//! ABI, tests implement it over recording mocks.

use crate::dialog::DialogId;

/// The engine's dialog-response surface.
///
/// Implementations forward each call to the corresponding native function
/// and return its raw status code unchanged: `0` means the engine accepted
/// the response, anything else means it refused (for example because the
/// dialog was withdrawn on the native side a moment earlier). Refusal is an
/// expected outcome, not an error; [`DialogHandle`](crate::dialog::DialogHandle)
/// translates it into `Ok(false)`.
///
/// Calls may arrive from any host task. Implementations must be quick and
/// must never block on user interaction; the native post functions only
/// enqueue the response inside the engine.
pub trait DialogEngine: Send + Sync {
    /// Post a login answer for `id`.
    ///
    /// `username` and `password` are always present (the handle coerces
    /// absent credentials to empty strings before this point).
    fn post_login(&self, id: DialogId, username: &str, password: &str, store: bool) -> i32;

    /// Post a question answer for `id`; `action_index` is 1 or 2.
    fn post_action(&self, id: DialogId, action_index: u16) -> i32;

    /// Dismiss the dialog `id` without answering it.
    fn dismiss(&self, id: DialogId) -> i32;
}
