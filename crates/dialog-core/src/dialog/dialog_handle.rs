//! Dialog handle implementation
//!
//! A [`DialogHandle`] is the single-use token through which a host handler
//! resolves one native dialog. The handle holds the engine's raw reference in
//! an atomic; retirement is a `swap` to zero performed *before* the native
//! call, so when a handler resolution races a native-side cancel, exactly one
//! side wins the reference and the other observes an already-retired handle.
//! The native identifier therefore can never be posted twice.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::dialog_id::DialogId;
use crate::errors::{DialogError, DialogResult};
use crate::native::DialogEngine;

/// Single-use handle for resolving one native dialog.
///
/// Created by the dispatcher when the engine raises a login, question or
/// progress dialog and handed to the matching [`DialogHandlers`] method.
/// Exactly one of [`post_login`], [`post_action`] or [`dismiss`] resolves the
/// dialog; afterwards the handle is permanently retired and the resolving
/// operations fail with [`DialogError::InvalidHandle`] (`dismiss` reports
/// `false` instead, so cancellation paths can call it unconditionally).
///
/// Handles are cheap to clone; all clones share the same retirement state.
///
/// [`DialogHandlers`]: crate::handlers::DialogHandlers
/// [`post_login`]: DialogHandle::post_login
/// [`post_action`]: DialogHandle::post_action
/// [`dismiss`]: DialogHandle::dismiss
#[derive(Clone)]
pub struct DialogHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    /// Raw native reference; zero once the handle is retired.
    raw: AtomicU64,

    /// Outbound port the terminal call is posted through.
    engine: Arc<dyn DialogEngine>,

    /// Cancellation signal shared with the handler for this dialog.
    cancel: CancellationToken,

    /// Live-dialog table, for deregistration at retirement. Weak: the
    /// dispatcher owns the table, the handle only refers back to it.
    live: Weak<DashMap<u64, DialogHandle>>,
}

impl DialogHandle {
    pub(crate) fn new(
        id: DialogId,
        engine: Arc<dyn DialogEngine>,
        cancel: CancellationToken,
        live: Weak<DashMap<u64, DialogHandle>>,
    ) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                raw: AtomicU64::new(id.as_raw()),
                engine,
                cancel,
                live,
            }),
        }
    }

    /// Whether the handle can still resolve its dialog.
    ///
    /// Point-in-time answer: a concurrent resolution or native cancel can
    /// retire the handle immediately after this returns `true`.
    pub fn is_valid(&self) -> bool {
        self.inner.raw.load(Ordering::Acquire) != 0
    }

    /// Post a login answer and retire the handle.
    ///
    /// Absent credentials are posted as empty strings, matching what the
    /// engine expects. `Ok(true)` means the engine accepted the answer;
    /// `Ok(false)` means it refused (for example the dialog was withdrawn
    /// natively in the same instant), which is an expected outcome.
    ///
    /// # Errors
    ///
    /// [`DialogError::InvalidHandle`] if the handle was already retired;
    /// a double resolution by the handler, surfaced loudly.
    pub fn post_login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
        store: bool,
    ) -> DialogResult<bool> {
        let id = self
            .retire()
            .ok_or(DialogError::invalid_handle("post_login"))?;
        let status = self.inner.engine.post_login(
            id,
            username.unwrap_or(""),
            password.unwrap_or(""),
            store,
        );
        if status != 0 {
            debug!("engine refused login answer for {} (status {})", id, status);
        }
        Ok(status == 0)
    }

    /// Post a question answer and retire the handle.
    ///
    /// `action_index` is `1` for the first action, `2` for the second.
    ///
    /// # Errors
    ///
    /// [`DialogError::InvalidHandle`] if the handle was already retired.
    pub fn post_action(&self, action_index: u16) -> DialogResult<bool> {
        let id = self
            .retire()
            .ok_or(DialogError::invalid_handle("post_action"))?;
        let status = self.inner.engine.post_action(id, action_index);
        if status != 0 {
            debug!(
                "engine refused action {} for {} (status {})",
                action_index, id, status
            );
        }
        Ok(status == 0)
    }

    /// Dismiss the dialog without answering and retire the handle.
    ///
    /// Safe to call at any time, including on an already-retired handle:
    /// dismissal doubles as the internal cleanup path for cancellation and
    /// must be idempotent. Returns `true` only when this call retired the
    /// handle and the engine accepted the dismissal.
    pub fn dismiss(&self) -> bool {
        match self.retire() {
            Some(id) => {
                let status = self.inner.engine.dismiss(id);
                if status != 0 {
                    debug!("engine refused dismissal of {} (status {})", id, status);
                }
                status == 0
            }
            None => false,
        }
    }

    /// Claim the native reference, leaving the handle retired.
    ///
    /// The swap happens before any native call so that of two concurrent
    /// resolvers exactly one obtains the reference. The winner also drops
    /// the live-table entry; the `ptr_eq` guard keeps a stale handle from
    /// evicting a successor registered under a reused raw id.
    fn retire(&self) -> Option<DialogId> {
        let raw = self.inner.raw.swap(0, Ordering::AcqRel);
        let id = DialogId::from_raw(raw)?;
        if let Some(live) = self.inner.live.upgrade() {
            live.remove_if(&raw, |_, existing| {
                Arc::ptr_eq(&existing.inner, &self.inner)
            });
        }
        Some(id)
    }

    /// Retire the handle without posting to the engine.
    ///
    /// Used when the engine has already withdrawn the dialog natively and a
    /// dismissal must not be posted back.
    pub(crate) fn invalidate(&self) {
        let _ = self.retire();
    }

    /// The cancellation signal bound to this dialog.
    pub(crate) fn cancel_token(&self) -> &CancellationToken {
        &self.inner.cancel
    }

    /// Whether two handles refer to the same underlying dialog instance.
    pub(crate) fn same_dialog(&self, other: &DialogHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// Manual impl: `dyn DialogEngine` is not Debug.
impl fmt::Debug for DialogHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = self.inner.raw.load(Ordering::Acquire);
        f.debug_struct("DialogHandle")
            .field("raw", &raw)
            .field("retired", &(raw == 0))
            .finish()
    }
}
