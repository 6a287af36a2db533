// Import session state.
//
// Purpose
// - Allow at most one import per process and let callers request cancellation at any time.
//
// Responsibilities
// - Keep the state in one atomic: Idle, Processing, CancelRequested or Persisting.
// - Move between states with compare-and-swap only.
// - Return to Idle when the guard of the running import is dropped, whatever the exit path.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

const IDLE: u8 = 0;
const PROCESSING: u8 = 1;
const CANCEL_REQUESTED: u8 = 2;
const PERSISTING: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Idle,
    Processing,
    CancelRequested,
    Persisting,
}

impl SessionState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            PROCESSING => SessionState::Processing,
            CANCEL_REQUESTED => SessionState::CancelRequested,
            PERSISTING => SessionState::Persisting,
            _ => SessionState::Idle,
        }
    }
}

#[derive(Debug, Default)]
pub struct ImportSession {
    state: AtomicU8,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_raw(self.state.load(Ordering::SeqCst))
    }

    pub fn is_processing(&self) -> bool {
        self.state() != SessionState::Idle
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.state() == SessionState::CancelRequested
    }

    /// Claims the session. `None` while another import holds it. The guard owns the
    /// session so the run can outlive whoever started it.
    pub fn try_begin(self: &Arc<Self>) -> Option<ProcessingGuard> {
        self.transition(IDLE, PROCESSING).then(|| ProcessingGuard {
            session: Arc::clone(self),
        })
    }

    /// Asks the running import to stop at its next checkpoint. Has no effect when idle
    /// or once persistence has started. Returns whether the request was registered.
    pub fn cancel_processing(&self) -> bool {
        let registered = self.transition(PROCESSING, CANCEL_REQUESTED);
        tracing::info!(registered, state = ?self.state(), "cancellation requested");
        registered
    }

    fn transition(&self, from: u8, to: u8) -> bool {
        self.state
            .compare_exchange(from, to, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

/// Held by the running import; releases the session on drop.
#[derive(Debug)]
pub struct ProcessingGuard {
    session: Arc<ImportSession>,
}

impl ProcessingGuard {
    /// Last cancellation checkpoint. Returns false if cancellation was requested;
    /// otherwise later cancel requests are ignored.
    pub fn begin_persisting(&self) -> bool {
        self.session.transition(PROCESSING, PERSISTING)
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.session.is_cancel_requested()
    }
}

impl Drop for ProcessingGuard {
    fn drop(&mut self) {
        self.session.state.store(IDLE, Ordering::SeqCst);
    }
}
