//! Time calculation utilities for animations.
//!
//! Pure functions over explicit instants; nothing here reads the wall
//! clock, so a simulated clock drives animations deterministically.

use std::time::{Duration, Instant};

/// Animation progress in [0.0, 1.0] at `now` for an animation begun at
/// `start`. A zero duration is complete immediately.
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if an animation begun at `start` is complete at `now`.
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values with factor `t` in [0.0, 1.0].
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
