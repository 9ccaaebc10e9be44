//! Dialog dispatcher
//!
//! [`DialogDispatcher`] sits between the engine's callback table and the
//! host's async handlers. It is the only component that touches both worlds:
//! inbound it implements [`DialogCallbacks`] and is driven synchronously from
//! engine worker threads; outbound it spawns one task per dialog event on the
//! host runtime and returns immediately, so an engine thread is never parked
//! behind host-side work.
//!
//! The dispatcher also owns the live-dialog table that lets the engine's
//! cancel and progress-update callbacks, which arrive bearing only a raw
//! reference, find the handle a handler is currently holding.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::config::DispatchConfig;
use crate::dialog::{DialogHandle, DialogId};
use crate::errors::{DialogError, DialogResult};
use crate::events::{DialogEvent, LoginRequest, ProgressRequest, QuestionRequest, QuestionType};
use crate::handlers::DialogHandlers;
use crate::native::{DialogCallbacks, DialogEngine};

use super::registry::DialogRegistry;

/// Bridges native dialog callbacks onto async host handlers.
///
/// One dispatcher serves one engine instance for the life of the embedding.
/// Construct it on the host runtime (or hand it a [`runtime::Handle`]
/// explicitly), wire its [`DialogCallbacks`] impl into the engine's callback
/// table, and it takes care of the rest: handle creation, handler spawning,
/// cancellation relay and the monitoring stream.
///
/// Cloning is cheap and every clone drives the same dispatcher.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use rmedia_dialog_core::{DialogDispatcher, DialogEngine, DialogHandlers, DispatchConfig};
///
/// # struct Engine;
/// # impl DialogEngine for Engine {
/// #     fn post_login(&self, _: rmedia_dialog_core::DialogId, _: &str, _: &str, _: bool) -> i32 { 0 }
/// #     fn post_action(&self, _: rmedia_dialog_core::DialogId, _: u16) -> i32 { 0 }
/// #     fn dismiss(&self, _: rmedia_dialog_core::DialogId) -> i32 { 0 }
/// # }
/// # struct Ui;
/// # impl DialogHandlers for Ui {}
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine: Arc<dyn DialogEngine> = Arc::new(Engine);
/// let handlers: Arc<dyn DialogHandlers> = Arc::new(Ui);
///
/// let dispatcher = DialogDispatcher::new(engine, handlers, DispatchConfig::default())?;
/// // wire `dispatcher.clone()` into the engine's callback table here
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DialogDispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    config: DispatchConfig,
    engine: Arc<dyn DialogEngine>,
    handlers: Arc<dyn DialogHandlers>,
    registry: DialogRegistry,

    /// Host runtime the handler tasks are spawned on. Captured at
    /// construction because the callbacks run on engine threads, where
    /// there is no ambient runtime to discover.
    runtime: runtime::Handle,

    event_tx: broadcast::Sender<DialogEvent>,

    /// Set once by `shutdown`; detached dispatchers refuse new dialogs.
    detached: AtomicBool,
}

impl DialogDispatcher {
    /// Create a dispatcher on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// [`DialogError::NoRuntime`] when called outside a runtime context and
    /// [`DialogError::Configuration`] when `config` is invalid.
    pub fn new(
        engine: Arc<dyn DialogEngine>,
        handlers: Arc<dyn DialogHandlers>,
        config: DispatchConfig,
    ) -> DialogResult<Self> {
        let rt = runtime::Handle::try_current()
            .map_err(|e| DialogError::no_runtime(e.to_string()))?;
        Self::with_runtime(engine, handlers, config, rt)
    }

    /// Create a dispatcher that spawns handler tasks on `rt`.
    ///
    /// For hosts that construct the dispatcher off-runtime, for example
    /// during engine setup on the main thread.
    ///
    /// # Errors
    ///
    /// [`DialogError::Configuration`] when `config` is invalid.
    pub fn with_runtime(
        engine: Arc<dyn DialogEngine>,
        handlers: Arc<dyn DialogHandlers>,
        config: DispatchConfig,
        rt: runtime::Handle,
    ) -> DialogResult<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(config.event_channel_capacity);
        Ok(Self {
            inner: Arc::new(DispatcherInner {
                config,
                engine,
                handlers,
                registry: DialogRegistry::new(),
                runtime: rt,
                event_tx,
                detached: AtomicBool::new(false),
            }),
        })
    }

    /// Subscribe to the monitoring stream of dialog events.
    ///
    /// Purely observational; see [`DialogEvent`]. A subscriber that falls
    /// more than the configured capacity behind loses the oldest events.
    pub fn events(&self) -> broadcast::Receiver<DialogEvent> {
        self.inner.event_tx.subscribe()
    }

    /// Number of dialogs currently raised and unresolved.
    pub fn active_dialogs(&self) -> usize {
        self.inner.registry.len()
    }

    /// Whether [`shutdown`](Self::shutdown) has run.
    pub fn is_detached(&self) -> bool {
        self.inner.detached.load(Ordering::SeqCst)
    }

    /// The configuration this dispatcher was built with.
    pub fn config(&self) -> &DispatchConfig {
        &self.inner.config
    }

    /// Detach from the engine and cancel every live dialog.
    ///
    /// Call when tearing the embedding down, before the engine itself is
    /// released. Handlers still waiting on user input observe their token
    /// fire; their late resolution attempts fail like any post-cancel
    /// resolution does. Callbacks that straggle in afterwards are refused.
    /// Idempotent.
    pub fn shutdown(&self) {
        if self.inner.detached.swap(true, Ordering::SeqCst) {
            return;
        }
        let live = self.inner.registry.drain();
        let count = live.len();
        for handle in live {
            handle.cancel_token().cancel();
            if self.inner.config.dismiss_on_cancel {
                handle.dismiss();
            } else {
                handle.invalidate();
            }
        }
        info!("dialog dispatcher shut down, {} live dialog(s) cancelled", count);
    }

    /// Gatekeeper for the dialog-raising callbacks.
    ///
    /// Filters the engine's invalid sentinel reference and, once detached,
    /// dismisses stragglers right away so the engine is not left waiting on
    /// an answer nobody will give.
    fn admit(&self, raw: u64, kind: &str) -> Option<DialogId> {
        let Some(id) = DialogId::from_raw(raw) else {
            warn!("engine raised {} dialog with a null reference, dropping", kind);
            return None;
        };
        if self.is_detached() {
            debug!("{} dialog {} raised after shutdown, dismissing", kind, id);
            let status = self.inner.engine.dismiss(id);
            if status != 0 {
                debug!(
                    "engine refused post-shutdown dismissal of {} (status {})",
                    id, status
                );
            }
            return None;
        }
        Some(id)
    }

    /// Mint the handle and token for a freshly raised dialog and register it.
    fn open_dialog(&self, id: DialogId) -> (DialogHandle, CancellationToken) {
        let token = CancellationToken::new();
        let handle = DialogHandle::new(
            id,
            self.inner.engine.clone(),
            token.clone(),
            self.inner.registry.downgrade(),
        );
        self.inner.registry.register(id, handle.clone());
        // Re-check after registering: a shutdown that ran between admit and
        // register has already drained the table, so sweep this entry too.
        if self.is_detached() {
            if let Some(straggler) = self.inner.registry.take(id.as_raw()) {
                straggler.cancel_token().cancel();
                if self.inner.config.dismiss_on_cancel {
                    straggler.dismiss();
                } else {
                    straggler.invalidate();
                }
            }
        }
        (handle, token)
    }

    fn emit(&self, event: DialogEvent) {
        // send errs only when nobody subscribes, which is the common case
        let _ = self.inner.event_tx.send(event);
    }
}

impl DialogCallbacks for DialogDispatcher {
    fn on_error(&self, title: Option<String>, text: Option<String>) {
        if self.is_detached() {
            debug!("error notice after shutdown, dropping");
            return;
        }
        let title = title.unwrap_or_default();
        let text = text.unwrap_or_default();
        self.emit(DialogEvent::Error {
            title: title.clone(),
            text: text.clone(),
        });
        let handlers = self.inner.handlers.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = handlers.display_error(title, text).await {
                error!("error handler failed: {}", e);
            }
        });
    }

    fn on_login_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        default_username: Option<String>,
        ask_store: bool,
    ) {
        let Some(id) = self.admit(id, "login") else {
            return;
        };
        let request = LoginRequest {
            title: title.unwrap_or_default(),
            text: text.unwrap_or_default(),
            default_username: default_username.unwrap_or_default(),
            ask_store,
        };
        let (handle, token) = self.open_dialog(id);
        debug!("login dialog {} raised: '{}'", id, request.title);
        self.emit(DialogEvent::LoginRequested {
            id,
            request: request.clone(),
        });

        let handlers = self.inner.handlers.clone();
        let cleanup = handle.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = handlers.display_login(handle, request, token).await {
                error!("login handler failed for {}: {}", id, e);
                cleanup.dismiss();
            }
        });
    }

    fn on_question_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        question_type: u32,
        cancel_text: Option<String>,
        first_action_text: Option<String>,
        second_action_text: Option<String>,
    ) {
        let Some(id) = self.admit(id, "question") else {
            return;
        };
        let request = QuestionRequest {
            title: title.unwrap_or_default(),
            text: text.unwrap_or_default(),
            question_type: QuestionType::from_raw(question_type),
            cancel_text: cancel_text.unwrap_or_default(),
            first_action_text: first_action_text.unwrap_or_default(),
            second_action_text: second_action_text.unwrap_or_default(),
        };
        let (handle, token) = self.open_dialog(id);
        debug!("question dialog {} raised: '{}'", id, request.title);
        self.emit(DialogEvent::QuestionRequested {
            id,
            request: request.clone(),
        });

        let handlers = self.inner.handlers.clone();
        let cleanup = handle.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = handlers.display_question(handle, request, token).await {
                error!("question handler failed for {}: {}", id, e);
                cleanup.dismiss();
            }
        });
    }

    fn on_progress_requested(
        &self,
        id: u64,
        title: Option<String>,
        text: Option<String>,
        indeterminate: bool,
        position: f32,
        cancel_text: Option<String>,
    ) {
        let Some(id) = self.admit(id, "progress") else {
            return;
        };
        let request = ProgressRequest {
            title: title.unwrap_or_default(),
            text: text.unwrap_or_default(),
            indeterminate,
            position,
            cancel_text: cancel_text.unwrap_or_default(),
        };
        let (handle, token) = self.open_dialog(id);
        debug!("progress dialog {} raised: '{}'", id, request.title);
        self.emit(DialogEvent::ProgressRequested {
            id,
            request: request.clone(),
        });

        let handlers = self.inner.handlers.clone();
        let cleanup = handle.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = handlers.display_progress(handle, request, token).await {
                error!("progress handler failed for {}: {}", id, e);
                cleanup.dismiss();
            }
        });
    }

    fn on_progress_updated(&self, id: u64, position: f32, text: Option<String>) {
        let Some(did) = DialogId::from_raw(id) else {
            warn!("engine updated a progress dialog with a null reference, dropping");
            return;
        };
        let Some(handle) = self.inner.registry.get(id) else {
            // Arrives after a cancel or resolution went through; benign
            debug!("progress update for unknown dialog {}, dropping", did);
            return;
        };
        let text = text.unwrap_or_default();
        self.emit(DialogEvent::ProgressUpdated {
            id: did,
            position,
            text: text.clone(),
        });

        let handlers = self.inner.handlers.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = handlers.update_progress(handle, position, text).await {
                error!("progress update handler failed for {}: {}", did, e);
            }
        });
    }

    fn on_cancelled(&self, id: u64) {
        let Some(did) = DialogId::from_raw(id) else {
            warn!("engine cancelled a dialog with a null reference, dropping");
            return;
        };
        let Some(handle) = self.inner.registry.take(id) else {
            // Handler resolution won the race; nothing left to cancel
            debug!("cancel for unknown or already-resolved dialog {}, dropping", did);
            return;
        };
        debug!("dialog {} cancelled by engine", did);
        handle.cancel_token().cancel();
        if self.inner.config.dismiss_on_cancel {
            // Harmless if the engine already withdrew the dialog; closes the
            // window where it has not
            handle.dismiss();
        } else {
            handle.invalidate();
        }
        self.emit(DialogEvent::Cancelled { id: did });
    }
}

impl fmt::Debug for DialogDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogDispatcher")
            .field("active_dialogs", &self.active_dialogs())
            .field("detached", &self.is_detached())
            .finish()
    }
}
