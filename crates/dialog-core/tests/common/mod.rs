//! Shared fixtures for the dialog bridge integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use rmedia_dialog_core::{
    DialogEngine, DialogError, DialogHandle, DialogHandlers, DialogId, DialogResult, LoginRequest,
    ProgressRequest, QuestionRequest,
};

/// One outbound native call recorded by [`MockEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    PostLogin {
        id: u64,
        username: String,
        password: String,
        store: bool,
    },
    PostAction {
        id: u64,
        action_index: u16,
    },
    Dismiss {
        id: u64,
    },
}

/// Engine double: records every post and answers with a settable status.
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    status: AtomicI32,
}

impl MockEngine {
    /// An engine that accepts every post (status 0).
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            status: AtomicI32::new(0),
        })
    }

    /// Change the status every subsequent post is answered with.
    pub fn set_status(&self, status: i32) {
        self.status.store(status, Ordering::SeqCst);
    }

    /// Snapshot of the calls recorded so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: EngineCall) -> i32 {
        self.calls.lock().unwrap().push(call);
        self.status.load(Ordering::SeqCst)
    }
}

impl DialogEngine for MockEngine {
    fn post_login(&self, id: DialogId, username: &str, password: &str, store: bool) -> i32 {
        self.record(EngineCall::PostLogin {
            id: id.as_raw(),
            username: username.to_string(),
            password: password.to_string(),
            store,
        })
    }

    fn post_action(&self, id: DialogId, action_index: u16) -> i32 {
        self.record(EngineCall::PostAction {
            id: id.as_raw(),
            action_index,
        })
    }

    fn dismiss(&self, id: DialogId) -> i32 {
        self.record(EngineCall::Dismiss { id: id.as_raw() })
    }
}

/// One handler invocation as observed by [`CapturingHandlers`].
pub enum HandlerEvent {
    Error {
        title: String,
        text: String,
    },
    Login {
        dialog: DialogHandle,
        request: LoginRequest,
        token: CancellationToken,
    },
    Question {
        dialog: DialogHandle,
        request: QuestionRequest,
        token: CancellationToken,
    },
    Progress {
        dialog: DialogHandle,
        request: ProgressRequest,
        token: CancellationToken,
    },
    ProgressUpdate {
        dialog: DialogHandle,
        position: f32,
        text: String,
    },
}

/// Handler set that forwards every invocation to the test body over a
/// channel, so tests drive resolution themselves.
pub struct CapturingHandlers {
    tx: mpsc::UnboundedSender<HandlerEvent>,
}

impl CapturingHandlers {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<HandlerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Arc::new(Self { tx }), rx)
    }
}

#[async_trait]
impl DialogHandlers for CapturingHandlers {
    async fn display_error(&self, title: String, text: String) -> DialogResult<()> {
        let _ = self.tx.send(HandlerEvent::Error { title, text });
        Ok(())
    }

    async fn display_login(
        &self,
        dialog: DialogHandle,
        request: LoginRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        let _ = self.tx.send(HandlerEvent::Login {
            dialog,
            request,
            token,
        });
        Ok(())
    }

    async fn display_question(
        &self,
        dialog: DialogHandle,
        request: QuestionRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        let _ = self.tx.send(HandlerEvent::Question {
            dialog,
            request,
            token,
        });
        Ok(())
    }

    async fn display_progress(
        &self,
        dialog: DialogHandle,
        request: ProgressRequest,
        token: CancellationToken,
    ) -> DialogResult<()> {
        let _ = self.tx.send(HandlerEvent::Progress {
            dialog,
            request,
            token,
        });
        Ok(())
    }

    async fn update_progress(
        &self,
        dialog: DialogHandle,
        position: f32,
        text: String,
    ) -> DialogResult<()> {
        let _ = self.tx.send(HandlerEvent::ProgressUpdate {
            dialog,
            position,
            text,
        });
        Ok(())
    }
}

/// Handler set that keeps every default body, standing in for a host with
/// no UI wired up.
pub struct DroppingHandlers;

impl DialogHandlers for DroppingHandlers {}

/// Handler set whose dialog methods all fail, for failure containment tests.
pub struct FailingHandlers;

#[async_trait]
impl DialogHandlers for FailingHandlers {
    async fn display_login(
        &self,
        _dialog: DialogHandle,
        _request: LoginRequest,
        _token: CancellationToken,
    ) -> DialogResult<()> {
        Err(DialogError::handler("login rendering failed"))
    }

    async fn display_question(
        &self,
        _dialog: DialogHandle,
        _request: QuestionRequest,
        _token: CancellationToken,
    ) -> DialogResult<()> {
        Err(DialogError::handler("question rendering failed"))
    }

    async fn display_progress(
        &self,
        _dialog: DialogHandle,
        _request: ProgressRequest,
        _token: CancellationToken,
    ) -> DialogResult<()> {
        Err(DialogError::handler("progress rendering failed"))
    }
}

/// Poll until the engine has recorded `count` calls, or fail after a second.
pub async fn wait_for_call_count(engine: &MockEngine, count: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while engine.calls().len() < count {
        if tokio::time::Instant::now() >= deadline {
            panic!(
                "engine never reached {} call(s), recorded: {:?}",
                count,
                engine.calls()
            );
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

/// Install a test subscriber once so failing tests come with dialog logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
