//! # Search Debouncing
//!
//! Turns raw keystroke values into a rate-limited, de-duplicated stream of
//! committed search terms.
//!
//! A value commits once the input has been quiet for the whole window **and**
//! it differs from the last committed value. A new keystroke inside the window
//! replaces the pending value and restarts the window.
//!
//! The logic is split in two:
//!
//! - [`Debounce`]: a clock-agnostic state machine. Feed it values with the time
//!   they arrived and poll it with the current time.
//! - [`SearchDebouncer`] / [`CommittedTerms`]: a Tokio task that drives a
//!   `Debounce<String>` from a channel of raw values and forwards commits.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::trace;

pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debounce<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
    last_committed: Option<T>,
}

impl<T: Clone + PartialEq> Debounce<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            last_committed: None,
        }
    }

    /// Records a new raw value, superseding any pending one.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// When the pending value becomes eligible to commit.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Commits the pending value if its window has elapsed.
    ///
    /// A value equal to the last commit is dropped silently.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Commits the pending value regardless of the window.
    pub fn flush(&mut self) -> Option<T> {
        let (value, _) = self.pending.take()?;
        if self.last_committed.as_ref() == Some(&value) {
            return None;
        }
        self.last_committed = Some(value.clone());
        Some(value)
    }

    pub fn last_committed(&self) -> Option<&T> {
        self.last_committed.as_ref()
    }

    /// Drops any pending value and treats `committed` as the last commit.
    ///
    /// For terms applied outside the debouncer, so that typing them again
    /// later is not mistaken for a repeat.
    pub fn reset(&mut self, committed: T) {
        self.pending = None;
        self.last_committed = Some(committed);
    }
}

#[derive(Debug)]
enum SearchInput {
    Raw(String),
    Reset(String),
}

/// Input side of a running debouncer. Dropping it ends the committed stream.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    input: mpsc::UnboundedSender<SearchInput>,
}

/// Output side: committed search terms, in order.
#[derive(Debug)]
pub struct CommittedTerms {
    rx: mpsc::UnboundedReceiver<String>,
}

impl CommittedTerms {
    /// Waits for the next committed term. `None` once the debouncer is gone.
    pub async fn next(&mut self) -> Option<String> {
        self.rx.recv().await
    }

    pub fn try_next(&mut self) -> Option<String> {
        self.rx.try_recv().ok()
    }
}

impl SearchDebouncer {
    /// Spawns the debouncing task on the current Tokio runtime.
    pub fn spawn(window: Duration) -> (Self, CommittedTerms) {
        let (input, raw_rx) = mpsc::unbounded_channel();
        let (out_tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(drive(Debounce::new(window), raw_rx, out_tx));
        (Self { input }, CommittedTerms { rx })
    }

    /// Feeds one keystroke's worth of input.
    pub fn push(&self, raw: impl Into<String>) {
        // Fails only after the task exited because nobody reads commits.
        let _ = self.input.send(SearchInput::Raw(raw.into()));
    }

    /// Records that `term` was applied without going through the debouncer.
    ///
    /// A pending keystroke is discarded, and typing `term` again commits it.
    pub fn reset(&self, term: impl Into<String>) {
        let _ = self.input.send(SearchInput::Reset(term.into()));
    }
}

async fn drive(
    mut state: Debounce<String>,
    mut raw: mpsc::UnboundedReceiver<SearchInput>,
    out: mpsc::UnboundedSender<String>,
) {
    loop {
        let next = match state.deadline() {
            Some(deadline) => {
                tokio::select! {
                    biased;
                    value = raw.recv() => value,
                    _ = sleep_until(deadline) => {
                        if let Some(term) = state.poll(Instant::now()) {
                            trace!(term = %term, "search term committed");
                            if out.send(term).is_err() {
                                return;
                            }
                        }
                        continue;
                    }
                }
            }
            None => raw.recv().await,
        };

        match next {
            Some(SearchInput::Raw(value)) => state.input(value, Instant::now()),
            Some(SearchInput::Reset(term)) => {
                trace!(term = %term, "search debouncer reset");
                state.reset(term);
            }
            None => {
                if state.is_pending() {
                    trace!("input closed, dropping pending search term");
                }
                return;
            }
        }
    }
}
