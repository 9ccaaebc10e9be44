//! Dialog identity and handle types
//!
//! Every dialog the engine raises lives through exactly two states:
//!
//! ```text
//!              post_login / post_action / dismiss
//!              (handler side)
//!   ┌────────┐ ──────────────────────────────────► ┌─────────┐
//!   │ Active │                                     │ Retired │
//!   └────────┘ ──────────────────────────────────► └─────────┘
//!              native cancel (dispatcher side)
//! ```
//!
//! The transition is one-way and happens exactly once, no matter how many
//! clones of the handle exist or which thread drives it. See
//! [`DialogHandle`] for the resolution contract.

mod dialog_handle;
mod dialog_id;

pub use dialog_handle::DialogHandle;
pub use dialog_id::DialogId;
