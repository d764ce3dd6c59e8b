/// Trailing debounce: collapses a burst of changes into a single event
/// that fires once the input has been quiet for a fixed window.
///
/// The debouncer owns no timer. Callers report changes with `observe`
/// and poll with `fire` from their own event loop, passing the current
/// time so behavior stays deterministic.
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Quiescence window.
    window: Duration,
    /// When the pending event fires, if one is pending.
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Creates an idle debouncer with the given window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The configured quiescence window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Reports a change at `now`, pushing any pending deadline back to `now + window`.
    pub fn observe(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// Returns true once, when a pending deadline has been reached.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drops the pending event, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether an event is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending event fires.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the pending event fires, zero if already due.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
