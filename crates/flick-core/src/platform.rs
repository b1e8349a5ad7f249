//! Platform abstraction traits for tracker services.
//!
//! These traits let the tracker delegate frame scheduling, listener
//! management and timekeeping to the host, so the same state machine runs in
//! a browser, a native window or a headless test.

use web_time::Instant;

/// Runs work on the host's display frame cadence.
pub trait FrameScheduler {
    /// Run `callback` once on the next display frame, passing the frame
    /// timestamp in milliseconds. There is no way to cancel the request.
    fn request_frame(&self, callback: Box<dyn FnOnce(f64) + 'static>);
}

/// The element the tracker is attached to.
///
/// The host keeps the attach-time "down" listeners registered until
/// [`PointerSource::release`]; the tracker asks for the session-scoped
/// move/up/cancel listeners only while a pointer is held.
pub trait PointerSource {
    /// Start delivering move, up and cancel events.
    fn begin_session(&self);

    /// Stop delivering move, up and cancel events.
    fn end_session(&self);

    /// Remove every listener registered on behalf of the tracker.
    fn release(&self);
}

/// A source that needs no listener bookkeeping, for hosts that feed events
/// into the tracker by hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSource;

impl PointerSource for NullSource {
    fn begin_session(&self) {}

    fn end_session(&self) {}

    fn release(&self) {}
}

/// Provides timing information for pointer samples.
pub trait Clock {
    /// Milliseconds elapsed on a monotonic timeline.
    fn now_millis(&self) -> f64;
}

/// Monotonic clock starting at zero when created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
