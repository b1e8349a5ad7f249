//! Robot-style driver for scripted gestures.
//!
//! Wraps a tracker together with a manual frame scheduler, a manual clock and
//! an update recorder so a test reads like the gesture it performs.
//!
//! # Example
//!
//! ```
//! use flick_core::DragTracker;
//! use flick_testing::GestureRobot;
//!
//! let mut robot = GestureRobot::launch(DragTracker::builder().friction(0.9));
//! robot.press(0.0, 0.0);
//! robot.move_to(100.0, 0.0, 50.0);
//! robot.frame();
//! robot.release();
//! robot.wait_for_idle();
//! assert!(robot.x() > 100.0);
//! ```

use std::rc::Rc;

use flick_core::{
    Clock, DragTracker, Phase, Point, PointerEvent, PointerEventKind, PointerKey, TrackerBuilder,
};

use crate::harness::{CountingSource, ManualClock, ManualFrameScheduler, UpdateRecorder};

/// Nominal display frame interval.
pub const FRAME_INTERVAL_MS: f64 = 16.0;

/// Upper bound on frames `wait_for_idle` will pump.
const MAX_IDLE_FRAMES: usize = 10_000;

pub struct GestureRobot {
    tracker: DragTracker,
    frames: Rc<ManualFrameScheduler>,
    source: Rc<CountingSource>,
    clock: ManualClock,
    updates: UpdateRecorder,
    pointer: PointerKey,
    cursor: Point,
}

impl GestureRobot {
    /// Builds the tracker with recording callback and headless capabilities.
    ///
    /// Panics if the builder's options are invalid.
    pub fn launch(builder: TrackerBuilder) -> Self {
        let frames = ManualFrameScheduler::new();
        let source = CountingSource::new();
        let updates = UpdateRecorder::new();
        let tracker = builder
            .on_update(updates.callback())
            .build(frames.clone(), source.clone())
            .expect("robot tracker options are valid");

        Self {
            tracker,
            frames,
            source,
            clock: ManualClock::new(0.0),
            updates,
            pointer: PointerKey::Mouse,
            cursor: Point::ZERO,
        }
    }

    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    pub fn frames(&self) -> &ManualFrameScheduler {
        &self.frames
    }

    pub fn source(&self) -> &CountingSource {
        &self.source
    }

    pub fn updates(&self) -> &UpdateRecorder {
        &self.updates
    }

    pub fn now(&self) -> f64 {
        self.clock.now_millis()
    }

    pub fn phase(&self) -> Phase {
        self.tracker.phase()
    }

    pub fn x(&self) -> f64 {
        self.tracker.position().0
    }

    pub fn y(&self) -> Option<f64> {
        self.tracker.position().1
    }

    /// Uses `pointer` for the following events.
    pub fn with_pointer(&mut self, pointer: PointerKey) -> &mut Self {
        self.pointer = pointer;
        self
    }

    pub fn send(&mut self, kind: PointerEventKind, x: f64, y: f64) {
        self.cursor = Point::new(x, y);
        self.tracker
            .handle(PointerEvent::new(kind, self.pointer, self.cursor, self.now()));
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.send(PointerEventKind::Down, x, y);
    }

    /// Moves to `(x, y)` after `elapsed_ms` without running a frame.
    pub fn move_to(&mut self, x: f64, y: f64, elapsed_ms: f64) {
        self.clock.advance(elapsed_ms);
        self.send(PointerEventKind::Move, x, y);
    }

    /// Releases at the last cursor position at the current time.
    pub fn release(&mut self) {
        let Point { x, y } = self.cursor;
        self.send(PointerEventKind::Up, x, y);
    }

    pub fn cancel(&mut self) {
        let Point { x, y } = self.cursor;
        self.send(PointerEventKind::Cancel, x, y);
    }

    /// Lets time pass with no events and no frames.
    pub fn wait(&mut self, ms: f64) {
        self.clock.advance(ms);
    }

    /// Runs one display frame at the current time.
    pub fn frame(&mut self) {
        self.frames.drain_frame(self.now());
    }

    /// Moves in `steps` even increments over `duration_ms`, running a frame
    /// after each move.
    pub fn drag_to(&mut self, x: f64, y: f64, duration_ms: f64, steps: usize) {
        let steps = steps.max(1);
        let start = self.cursor;
        for step in 1..=steps {
            let fraction = step as f64 / steps as f64;
            let target = start + (Point::new(x, y) - start) * fraction;
            self.move_to(target.x, target.y, duration_ms / steps as f64);
            self.frame();
        }
    }

    /// Pumps frames until nothing is scheduled; returns how many ran.
    ///
    /// Panics if the tracker is still animating after `MAX_IDLE_FRAMES`.
    pub fn wait_for_idle(&mut self) -> usize {
        let start = self.now();
        let frames = self
            .frames
            .run_until_idle(start, FRAME_INTERVAL_MS, MAX_IDLE_FRAMES)
            .expect("tracker settles");
        self.clock.advance(FRAME_INTERVAL_MS * frames as f64);
        frames
    }
}
