//! Event rate limiting.
//!
//! Explicit stateful objects instead of timer-capturing closures: a
//! [`Debouncer`] owns its pending deadline and payload, a [`Throttler`]
//! owns its cooldown. All timing flows through `now` arguments so a
//! simulated clock can drive both.

use std::time::{Duration, Instant};

/// Trailing-edge debounce: an invocation is held until a quiet period of
/// `wait` has elapsed since the most recent call, then fires once with the
/// arguments of that last call.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    wait: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    deadline: Instant,
    payload: T,
}

impl<T> Debouncer<T> {
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            pending: None,
        }
    }

    /// Record a call, replacing any pending one. The deadline moves to
    /// `now + wait`; only the newest payload survives.
    pub fn call(&mut self, payload: T, now: Instant) {
        self.pending = Some(Pending {
            deadline: now + self.wait,
            payload,
        });
    }

    /// Fire the pending invocation if its quiet period has elapsed.
    /// With `wait` of zero this fires on the first poll after a call.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref().is_some_and(|p| now >= p.deadline) {
            self.pending.take().map(|p| p.payload)
        } else {
            None
        }
    }

    /// Deadline of the pending invocation, for scheduler integration.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drop any pending invocation.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Leading-edge throttle: the first call in a fresh window is admitted and
/// opens a cooldown of `limit`; calls during cooldown are dropped, never
/// queued. No trailing invocation.
#[derive(Debug, Clone)]
pub struct Throttler {
    limit: Duration,
    open_at: Option<Instant>,
}

impl Throttler {
    pub fn new(limit: Duration) -> Self {
        Self {
            limit,
            open_at: None,
        }
    }

    /// Whether a call arriving at `now` passes the gate. Admitting a call
    /// starts the cooldown. With `limit` of zero every call is admitted.
    pub fn try_admit(&mut self, now: Instant) -> bool {
        match self.open_at {
            Some(open_at) if now < open_at => false,
            _ => {
                self.open_at = Some(now + self.limit);
                true
            }
        }
    }

    /// Forget the cooldown, so the next call is admitted immediately.
    pub fn reset(&mut self) {
        self.open_at = None;
    }
}
