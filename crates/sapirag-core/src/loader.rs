use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

/// Process-wide busy indicator shown while an action is in flight
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusyState {
    pub busy: bool,
    pub status: String,
    in_flight: usize,
}

/// Wraps async actions so observers see a busy flag and status text.
///
/// Overlapping actions are neither queued nor rejected. The status text is
/// last-write-wins; the busy flag stays set until the last action settles.
#[derive(Clone)]
pub struct LoaderGate {
    tx: Arc<watch::Sender<BusyState>>,
}

impl LoaderGate {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(BusyState::default());
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to busy-state changes
    pub fn subscribe(&self) -> watch::Receiver<BusyState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> BusyState {
        self.tx.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.tx.borrow().busy
    }

    /// Run `action` with the busy flag raised. The flag is released on every
    /// exit path, including panics and the future being dropped.
    pub async fn run<F, T>(&self, status: impl Into<String>, action: F) -> T
    where
        F: Future<Output = T>,
    {
        let _guard = self.acquire(status.into());
        action.await
    }

    fn acquire(&self, status: String) -> BusyGuard {
        debug!(status = %status, "Loader raised");
        self.tx.send_modify(|state| {
            state.in_flight += 1;
            state.busy = true;
            state.status = status;
        });
        BusyGuard {
            tx: self.tx.clone(),
        }
    }
}

impl Default for LoaderGate {
    fn default() -> Self {
        Self::new()
    }
}

struct BusyGuard {
    tx: Arc<watch::Sender<BusyState>>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.tx.send_modify(|state| {
            state.in_flight = state.in_flight.saturating_sub(1);
            state.busy = state.in_flight > 0;
        });
    }
}
