//! The native engine boundary
//!
//! Two small traits define everything that crosses between this crate and
//! the engine's C ABI:
//!
//! - [`DialogCallbacks`]: the inbound face, through which the engine
//!   announces dialog events
//! - [`DialogEngine`]: the outbound port, through which the host posts
//!   dialog responses
//!
//! The `extern "C"` shims that connect these traits to a concrete engine
//! live in an adapter crate, not here; this crate only ever sees safe,
//! already-marshaled data.

pub mod callbacks;
pub mod engine;

// Re-export main types
pub use callbacks::DialogCallbacks;
pub use engine::DialogEngine;
