//! # Busy Gate
//!
//! A single busy flag shared by every asynchronous store operation, with a
//! self-expiring watchdog.
//!
//! - [`BusyGate::start`] raises the flag and (re)arms the watchdog. Any pending
//!   watchdog is cancelled and replaced, so the expiry is always measured from
//!   the most recent `start`.
//! - [`BusyGate::stop`] lowers the flag and disarms the watchdog. It is
//!   idempotent and safe to call without a prior `start`.
//! - If nobody calls `stop`, the flag clears itself once the watchdog interval
//!   elapses.
//!
//! The gate is counter-free: with two overlapping operations, the first one to
//! settle lowers the flag while the second is still in flight. The watchdog
//! bounds the opposite failure, a flag stuck at `true`.
//!
//! The read accessor compares against the armed deadline, so [`BusyGate::is_busy`]
//! is exact even before the watchdog task has been polled. Subscribers receive
//! the flag through a `watch` channel.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace};

pub const DEFAULT_WATCHDOG: Duration = Duration::from_millis(2000);

#[derive(Default)]
struct BusyState {
    busy: bool,
    deadline: Option<Instant>,
    expiry: Option<JoinHandle<()>>,
    /// Bumped on every start/stop so a late watchdog can tell it was superseded.
    generation: u64,
}

struct Shared {
    state: Mutex<BusyState>,
    tx: watch::Sender<bool>,
    watchdog: Duration,
}

impl Shared {
    fn expire(&self, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation || !state.busy {
            return;
        }
        state.busy = false;
        state.deadline = None;
        state.expiry = None;
        self.tx.send_replace(false);
        debug!("busy watchdog expired, clearing flag");
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        if let Some(handle) = self.state.get_mut().expiry.take() {
            handle.abort();
        }
    }
}

/// Cloneable handle to the session's busy flag.
#[derive(Clone)]
pub struct BusyGate {
    shared: Arc<Shared>,
}

impl Default for BusyGate {
    fn default() -> Self {
        Self::new(DEFAULT_WATCHDOG)
    }
}

impl BusyGate {
    pub fn new(watchdog: Duration) -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(BusyState::default()),
                tx,
                watchdog,
            }),
        }
    }

    pub fn watchdog(&self) -> Duration {
        self.shared.watchdog
    }

    pub fn start(&self) {
        let mut state = self.shared.state.lock();
        if let Some(handle) = state.expiry.take() {
            handle.abort();
        }
        state.generation += 1;
        state.busy = true;
        state.deadline = Some(Instant::now() + self.shared.watchdog);

        // Outside a runtime there is nobody to notify; the deadline check in
        // `is_busy` still expires the flag.
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            let shared: Weak<Shared> = Arc::downgrade(&self.shared);
            let generation = state.generation;
            let watchdog = self.shared.watchdog;
            state.expiry = Some(runtime.spawn(async move {
                tokio::time::sleep(watchdog).await;
                if let Some(shared) = shared.upgrade() {
                    shared.expire(generation);
                }
            }));
        }

        self.shared.tx.send_replace(true);
        trace!(generation = state.generation, "busy gate started");
    }

    pub fn stop(&self) {
        let mut state = self.shared.state.lock();
        if let Some(handle) = state.expiry.take() {
            handle.abort();
        }
        state.generation += 1;
        state.busy = false;
        state.deadline = None;
        self.shared.tx.send_if_modified(|busy| std::mem::replace(busy, false));
        trace!(generation = state.generation, "busy gate stopped");
    }

    pub fn is_busy(&self) -> bool {
        let state = self.shared.state.lock();
        state.busy && matches!(state.deadline, Some(deadline) if Instant::now() < deadline)
    }

    /// Receives every change of the flag, including watchdog expiry.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.tx.subscribe()
    }

    /// Starts the gate and returns a guard that stops it when dropped.
    ///
    /// Store operations hold the guard across their latency, so the flag is
    /// lowered on settlement and also when the operation future is dropped.
    pub fn engage(&self) -> BusyGuard {
        self.start();
        BusyGuard { gate: self.clone() }
    }
}

impl std::fmt::Debug for BusyGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusyGate")
            .field("busy", &self.is_busy())
            .field("watchdog", &self.shared.watchdog)
            .finish()
    }
}

#[must_use = "dropping the guard immediately stops the busy gate"]
pub struct BusyGuard {
    gate: BusyGate,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.gate.stop();
    }
}
