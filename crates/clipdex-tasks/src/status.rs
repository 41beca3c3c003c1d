//! Process-wide single-slot status line.
//!
//! One writable slot, many readers, initialized to `"Ready"`. Writes are
//! last-write-wins; a write with a duration schedules a revert to `"Ready"`
//! that only fires if no later write superseded it. Superseded timers are
//! aborted outright, and an epoch compare guards the revert in case the
//! abort loses the race, so a stale timer can never clobber a newer message.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use clipdex_core::defaults::STATUS_READY;

struct TimerState {
    /// Bumped on every write. A scheduled revert fires only if the epoch it
    /// captured is still current.
    epoch: u64,
    /// Outstanding expiry timer, aborted when superseded or on teardown.
    timer: Option<JoinHandle<()>>,
}

struct Shared {
    tx: watch::Sender<String>,
    state: Mutex<TimerState>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
        }
    }
}

/// Cloneable handle to the status slot.
#[derive(Clone)]
pub struct StatusNotifier {
    shared: Arc<Shared>,
}

impl Default for StatusNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusNotifier {
    /// Create a notifier initialized to `"Ready"`.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(STATUS_READY.to_string());
        Self {
            shared: Arc::new(Shared {
                tx,
                state: Mutex::new(TimerState {
                    epoch: 0,
                    timer: None,
                }),
            }),
        }
    }

    /// Write a sticky message. Stays until the next write.
    pub fn set(&self, text: impl Into<String>) {
        let text = text.into();
        debug!(status = %text, "Status updated");
        let mut state = self.shared.state();
        state.epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        self.shared.tx.send_replace(text);
    }

    /// Write a message that reverts to `"Ready"` after `duration`, unless a
    /// later write supersedes it first.
    pub fn set_for(&self, text: impl Into<String>, duration: Duration) {
        let text = text.into();
        debug!(status = %text, duration_ms = duration.as_millis() as u64, "Status updated");
        let mut state = self.shared.state();
        state.epoch += 1;
        if let Some(timer) = state.timer.take() {
            timer.abort();
        }
        self.shared.tx.send_replace(text);

        let epoch = state.epoch;
        // The timer holds only a weak reference: teardown of the last handle
        // must not be kept alive by its own expiry timer.
        let weak = Arc::downgrade(&self.shared);
        state.timer = Some(tokio::spawn(expire(weak, epoch, duration)));
    }

    /// Reset the slot to `"Ready"` immediately.
    pub fn clear(&self) {
        self.set(STATUS_READY);
    }

    /// The currently observable message.
    pub fn current(&self) -> String {
        self.shared.tx.borrow().clone()
    }

    /// Subscribe to message changes. Each receiver observes only the latest
    /// value; there is no history.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.shared.tx.subscribe()
    }
}

async fn expire(shared: Weak<Shared>, epoch: u64, duration: Duration) {
    tokio::time::sleep(duration).await;
    let Some(shared) = shared.upgrade() else {
        return;
    };
    let mut state = shared.state();
    if state.epoch != epoch {
        // A later write superseded this message; its timer owns the slot now.
        return;
    }
    state.timer = None;
    shared.tx.send_replace(STATUS_READY.to_string());
}
