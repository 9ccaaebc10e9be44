//! Opaque dialog identifiers
//!
//! The native engine names each dialog with a pointer-sized reference that is
//! meaningful only to the engine itself. [`DialogId`] wraps that reference as
//! an opaque, non-zero token: zero is the engine's "no dialog" sentinel and is
//! unrepresentable here, so every `DialogId` in circulation names a dialog
//! that existed at the time it was issued.

use std::fmt;
use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a native dialog.
///
/// Issued by the dispatcher when the engine announces a dialog and consumed
/// by [`DialogEngine`](crate::native::DialogEngine) implementations when a
/// response is posted back. The inner value is the engine's own reference;
/// host code should treat it as opaque and use [`fmt::Display`] for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DialogId(NonZeroU64);

impl DialogId {
    /// Wrap a raw native reference, rejecting the zero sentinel.
    ///
    /// Adapters translate the engine's pointer-sized reference into a `u64`
    /// before it reaches this crate; `None` means the engine handed over the
    /// invalid sentinel and the event carrying it should be dropped.
    pub fn from_raw(raw: u64) -> Option<Self> {
        NonZeroU64::new(raw).map(Self)
    }

    /// The raw native reference, for handing back across the engine boundary.
    pub fn as_raw(&self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for DialogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dialog-{:x}", self.0)
    }
}
