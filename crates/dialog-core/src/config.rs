//! Dispatcher configuration

use serde::{Deserialize, Serialize};

use crate::errors::{DialogError, DialogResult};

/// Configuration for a [`DialogDispatcher`].
///
/// The defaults suit embedding a media engine in a long-running host; most
/// applications can use `DispatchConfig::default()` unchanged.
///
/// [`DialogDispatcher`]: crate::dispatch::DialogDispatcher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Post a dismissal to the engine when a dialog is cancelled natively.
    ///
    /// Engines withdraw a cancelled dialog on their own, so the dismissal
    /// is usually refused and only closes the window where the engine still
    /// considers the dialog open. Disable for engines that treat a dismissal
    /// of a withdrawn dialog as an error.
    pub dismiss_on_cancel: bool,

    /// Capacity of the broadcast channel behind [`events`].
    ///
    /// Slow monitoring subscribers lose the oldest events once the channel
    /// is full; dialog delivery to handlers is never affected.
    ///
    /// [`events`]: crate::dispatch::DialogDispatcher::events
    pub event_channel_capacity: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            dismiss_on_cancel: true,
            event_channel_capacity: 64,
        }
    }
}

impl DispatchConfig {
    /// Set whether native cancellation posts a dismissal back to the engine.
    pub fn with_dismiss_on_cancel(mut self, dismiss: bool) -> Self {
        self.dismiss_on_cancel = dismiss;
        self
    }

    /// Set the monitoring channel capacity.
    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// [`DialogError::Configuration`] if the event channel capacity is zero,
    /// which the broadcast channel cannot represent.
    pub fn validate(&self) -> DialogResult<()> {
        if self.event_channel_capacity == 0 {
            return Err(DialogError::configuration(
                "event_channel_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}
