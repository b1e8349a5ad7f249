//! Headless stand-ins for the host capabilities a tracker consumes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flick_core::{Clock, FrameScheduler, PointerSource};

type FrameCallback = Box<dyn FnOnce(f64) + 'static>;

/// Frame scheduler driven by the test.
///
/// Requests queue up until [`ManualFrameScheduler::drain_frame`] runs them.
/// Callbacks requested while a frame is draining wait for the next frame.
#[derive(Default)]
pub struct ManualFrameScheduler {
    queue: RefCell<Vec<FrameCallback>>,
}

impl ManualFrameScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs every callback queued before this call.
    pub fn drain_frame(&self, frame_time_ms: f64) {
        let callbacks: Vec<FrameCallback> = self.queue.borrow_mut().drain(..).collect();
        if callbacks.is_empty() {
            return;
        }
        log::trace!(
            "frame at {frame_time_ms}ms running {} callbacks",
            callbacks.len()
        );
        for callback in callbacks {
            callback(frame_time_ms);
        }
    }

    /// Drains frames `interval_ms` apart until nothing is queued.
    ///
    /// Returns the number of frames run, or `None` if work was still pending
    /// after `max_frames`.
    pub fn run_until_idle(&self, start_ms: f64, interval_ms: f64, max_frames: usize) -> Option<usize> {
        let mut frames = 0;
        while self.pending() > 0 {
            if frames == max_frames {
                return None;
            }
            frames += 1;
            self.drain_frame(start_ms + interval_ms * frames as f64);
        }
        Some(frames)
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64) + 'static>) {
        self.queue.borrow_mut().push(callback);
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) -> f64 {
        self.now.set(self.now.get() + ms);
        self.now.get()
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> f64 {
        self.now.get()
    }
}

/// Pointer source counting listener bookkeeping calls.
#[derive(Debug, Default)]
pub struct CountingSource {
    sessions_begun: Cell<usize>,
    sessions_ended: Cell<usize>,
    releases: Cell<usize>,
}

impl CountingSource {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn sessions_begun(&self) -> usize {
        self.sessions_begun.get()
    }

    pub fn sessions_ended(&self) -> usize {
        self.sessions_ended.get()
    }

    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Whether session listeners are currently registered.
    pub fn is_watching(&self) -> bool {
        self.sessions_begun.get() > self.sessions_ended.get()
    }
}

impl PointerSource for CountingSource {
    fn begin_session(&self) {
        self.sessions_begun.set(self.sessions_begun.get() + 1);
    }

    fn end_session(&self) {
        self.sessions_ended.set(self.sessions_ended.get() + 1);
    }

    fn release(&self) {
        self.releases.set(self.releases.get() + 1);
    }
}

/// Collects every `(x, y)` the tracker reports.
#[derive(Clone, Debug, Default)]
pub struct UpdateRecorder {
    updates: Rc<RefCell<Vec<(f64, Option<f64>)>>>,
}

impl UpdateRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback suitable for `TrackerBuilder::on_update`.
    pub fn callback(&self) -> impl FnMut(f64, Option<f64>) + 'static {
        let updates = self.updates.clone();
        move |x, y| updates.borrow_mut().push((x, y))
    }

    pub fn len(&self) -> usize {
        self.updates.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.updates.borrow().is_empty()
    }

    pub fn last(&self) -> Option<(f64, Option<f64>)> {
        self.updates.borrow().last().copied()
    }

    pub fn snapshot(&self) -> Vec<(f64, Option<f64>)> {
        self.updates.borrow().clone()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.updates.borrow().iter().map(|(x, _)| *x).collect()
    }
}
