//! Live-dialog table
//!
//! Maps the engine's raw dialog references to the handles currently held by
//! handlers, so the cancellation and progress-update callbacks can find the
//! dialog they refer to. Entries leave the table when a handle retires (the
//! handle removes itself) or when the dispatcher takes them on cancellation
//! and shutdown.

use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::warn;

use crate::dialog::{DialogHandle, DialogId};

/// Concurrent table of dialogs raised but not yet resolved.
#[derive(Clone)]
pub(crate) struct DialogRegistry {
    live: Arc<DashMap<u64, DialogHandle>>,
}

impl DialogRegistry {
    pub(crate) fn new() -> Self {
        Self {
            live: Arc::new(DashMap::new()),
        }
    }

    /// Back-reference for handles, so retirement can deregister without the
    /// handle keeping the table alive.
    pub(crate) fn downgrade(&self) -> Weak<DashMap<u64, DialogHandle>> {
        Arc::downgrade(&self.live)
    }

    /// Register a freshly raised dialog.
    ///
    /// An engine that raises a new dialog under a reference still registered
    /// as live has withdrawn the old one without telling us. The stale entry
    /// is displaced; its handle is cancelled and invalidated without posting,
    /// since the reference now belongs to the new dialog.
    pub(crate) fn register(&self, id: DialogId, handle: DialogHandle) {
        if let Some(stale) = self.live.insert(id.as_raw(), handle) {
            warn!(
                "engine reused dialog reference {} while a dialog was still live, \
                 invalidating the stale handle",
                id
            );
            stale.cancel_token().cancel();
            stale.invalidate();
        }
    }

    /// Look up a live dialog without removing it.
    pub(crate) fn get(&self, raw: u64) -> Option<DialogHandle> {
        self.live.get(&raw).map(|entry| entry.value().clone())
    }

    /// Remove and return a live dialog, if the reference is still known.
    pub(crate) fn take(&self, raw: u64) -> Option<DialogHandle> {
        self.live.remove(&raw).map(|(_, handle)| handle)
    }

    /// Remove and return every live dialog.
    pub(crate) fn drain(&self) -> Vec<DialogHandle> {
        let keys: Vec<u64> = self.live.iter().map(|entry| *entry.key()).collect();
        keys.into_iter()
            .filter_map(|raw| self.take(raw))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::native::DialogEngine;

    struct NullEngine {
        dismissals: AtomicUsize,
    }

    impl DialogEngine for NullEngine {
        fn post_login(&self, _id: DialogId, _username: &str, _password: &str, _store: bool) -> i32 {
            0
        }

        fn post_action(&self, _id: DialogId, _action_index: u16) -> i32 {
            0
        }

        fn dismiss(&self, _id: DialogId) -> i32 {
            self.dismissals.fetch_add(1, Ordering::SeqCst);
            0
        }
    }

    fn registered_handle(registry: &DialogRegistry, raw: u64, engine: Arc<NullEngine>) -> DialogHandle {
        let id = DialogId::from_raw(raw).unwrap();
        let handle = DialogHandle::new(id, engine, CancellationToken::new(), registry.downgrade());
        registry.register(id, handle.clone());
        handle
    }

    fn null_engine() -> Arc<NullEngine> {
        Arc::new(NullEngine {
            dismissals: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_retirement_deregisters() {
        let registry = DialogRegistry::new();
        let handle = registered_handle(&registry, 0x10, null_engine());
        assert_eq!(registry.len(), 1);

        assert!(handle.dismiss());
        assert_eq!(registry.len(), 0);
        assert!(registry.get(0x10).is_none());
    }

    #[test]
    fn test_reused_reference_displaces_stale_handle() {
        let registry = DialogRegistry::new();
        let engine = null_engine();
        let stale = registered_handle(&registry, 0x20, engine.clone());
        let fresh = registered_handle(&registry, 0x20, engine.clone());

        // The stale handle is dead: cancelled, invalid, and posting nothing
        assert!(stale.cancel_token().is_cancelled());
        assert!(!stale.is_valid());
        assert!(!stale.dismiss());
        assert_eq!(engine.dismissals.load(Ordering::SeqCst), 0);

        // The reference now resolves to the fresh dialog
        assert!(registry.get(0x20).is_some());
        assert!(fresh.is_valid());
        assert!(fresh.dismiss());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_stale_handle_cannot_evict_successor() {
        let registry = DialogRegistry::new();
        let engine = null_engine();
        let stale = registered_handle(&registry, 0x30, engine.clone());

        // Simulate the handle outliving its table entry: the entry is taken
        // (as the cancel path does) and the reference re-registered.
        let taken = registry.take(0x30).unwrap();
        assert!(taken.same_dialog(&stale));
        let _fresh = registered_handle(&registry, 0x30, engine);

        // Retiring the stale handle must leave the successor registered
        stale.invalidate();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_drain_empties_table() {
        let registry = DialogRegistry::new();
        let engine = null_engine();
        for raw in [0x41u64, 0x42, 0x43] {
            registered_handle(&registry, raw, engine.clone());
        }

        let drained = registry.drain();
        assert_eq!(drained.len(), 3);
        assert_eq!(registry.len(), 0);
    }
}
