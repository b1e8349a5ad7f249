//! Drag tracker driving a position value from pointer gestures.
//!
//! A pointer-down starts a session, moves are folded into the position at most
//! once per display frame, and the release hands the sampled velocity to the
//! configured [`DecayPolicy`], which then runs one step per frame until it
//! finishes or a new session starts.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::TrackerConfig;
use crate::decay_spec::{DecayPolicy, DecaySpec, DecayStep};
use crate::error::ConfigError;
use crate::frame_clock::FrameClock;
use crate::geometry::{Axes, Point};
use crate::input::{PointerEvent, PointerEventKind, PointerKey};
use crate::platform::{FrameScheduler, PointerSource};
use crate::velocity_tracker::SampleWindow;

/// Receives `(x, y)` whenever the tracked position changes; `y` is `None`
/// for single-axis trackers.
pub type UpdateCallback = Box<dyn FnMut(f64, Option<f64>) + 'static>;

/// What the tracker is doing right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Tracking,
    /// Free friction decay after a flick.
    Decaying,
    /// Attractor settling after a release.
    Settling,
}

struct TrackerState {
    axes: Axes,
    position: Point,
    velocity: Point,
    multiplier: f64,
    policy: DecayPolicy,
    paused: bool,
    detached: bool,
    /// Pointer owning the current session.
    session: Option<PointerKey>,
    /// Pointer position already folded into `position`.
    pointer_last: Point,
    /// Most recent pointer position.
    pointer_current: Point,
    samples: SampleWindow,
    frame_pending: bool,
    /// Generation of the release run allowed to step.
    active_run: Option<u64>,
    next_run: u64,
}

impl TrackerState {
    fn phase(&self) -> Phase {
        if self.session.is_some() {
            Phase::Tracking
        } else if self.active_run.is_some() {
            if self.policy.is_attractor() {
                Phase::Settling
            } else {
                Phase::Decaying
            }
        } else {
            Phase::Idle
        }
    }

    fn start_run(&mut self) -> u64 {
        let run = self.next_run;
        self.next_run = self.next_run.wrapping_add(1);
        self.active_run = Some(run);
        run
    }
}

struct TrackerInner {
    state: RefCell<TrackerState>,
    update: RefCell<UpdateCallback>,
    frames: FrameClock,
    source: Rc<dyn PointerSource>,
}

impl TrackerInner {
    /// Invokes the host callback with no state borrow held.
    fn notify(&self, (x, y): (f64, Option<f64>)) {
        match self.update.try_borrow_mut() {
            Ok(mut update) => {
                let callback: &mut dyn FnMut(f64, Option<f64>) = &mut **update;
                callback(x, y);
            }
            Err(_) => log::warn!("update callback re-entered; dropping position ({x}, {y:?})"),
        }
    }

    fn schedule_render(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.frames.on_next_frame(move || {
            if let Some(inner) = weak.upgrade() {
                inner.update_and_render();
            }
        });
    }

    fn schedule_step(self: &Rc<Self>, run: u64) {
        let weak = Rc::downgrade(self);
        self.frames.on_next_frame(move || {
            if let Some(inner) = weak.upgrade() {
                inner.step(run);
            }
        });
    }

    /// Folds every move received since the previous frame into the position.
    fn update_and_render(self: &Rc<Self>) {
        let update = {
            let mut state = self.state.borrow_mut();
            state.frame_pending = false;
            if state.detached {
                return;
            }
            let delta = state.pointer_current - state.pointer_last;
            let multiplier = state.multiplier;
            state.position += delta * multiplier;
            state.pointer_last = state.pointer_current;
            state.axes.split(state.position)
        };
        log::trace!("drag frame at {update:?}");
        self.notify(update);
    }

    fn step(self: &Rc<Self>, run: u64) {
        let (outcome, update) = {
            let mut state = self.state.borrow_mut();
            if state.detached || state.active_run != Some(run) {
                return;
            }
            let policy = state.policy;
            let mut position = state.position;
            let mut velocity = state.velocity;
            let outcome = policy.step(&mut position, &mut velocity);
            state.position = position;
            state.velocity = velocity;
            if outcome != DecayStep::Continue {
                state.active_run = None;
            }
            (outcome, state.axes.split(position))
        };

        match outcome {
            DecayStep::Continue => log::trace!("release step {run} at {update:?}"),
            DecayStep::Finished => log::debug!("release run {run} finished at {update:?}"),
        }
        self.notify(update);
        if outcome == DecayStep::Continue {
            self.schedule_step(run);
        }
    }

    fn pointer_down(self: &Rc<Self>, event: PointerEvent) {
        {
            let mut state = self.state.borrow_mut();
            if state.detached || state.paused || state.session.is_some() {
                return;
            }
            let position = state.axes.constrain(event.position);
            state.active_run = None;
            state.session = Some(event.pointer);
            state.pointer_last = position;
            state.pointer_current = position;
            state.samples.clear();
            state.samples.push(position, event.time_ms);
        }
        log::debug!("session started by {:?}", event.pointer);
        self.source.begin_session();
    }

    fn pointer_move(self: &Rc<Self>, event: PointerEvent) {
        let request_frame = {
            let mut state = self.state.borrow_mut();
            if state.session != Some(event.pointer) {
                return;
            }
            state.pointer_current = state.axes.constrain(event.position);
            let last = state.pointer_last;
            state.samples.push(last, event.time_ms);
            !std::mem::replace(&mut state.frame_pending, true)
        };
        if request_frame {
            self.schedule_render();
        }
    }

    fn pointer_up(self: &Rc<Self>, event: PointerEvent) {
        let run = {
            let mut state = self.state.borrow_mut();
            if state.session != Some(event.pointer) {
                return;
            }
            let last = state.pointer_last;
            state.samples.push(last, event.time_ms);
            state.session = None;

            let velocity = state
                .axes
                .constrain(state.samples.release_velocity(state.multiplier));
            state.velocity = velocity;
            log::debug!("session released with velocity {velocity:?}");

            if state.policy.should_start(velocity) {
                Some(state.start_run())
            } else {
                None
            }
        };
        self.source.end_session();
        if let Some(run) = run {
            self.schedule_step(run);
        }
    }
}

/// Converts pointer drags into a position value with flick physics.
///
/// Clones share the same tracker.
#[derive(Clone)]
pub struct DragTracker {
    inner: Rc<TrackerInner>,
}

impl DragTracker {
    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    /// Feeds a normalized pointer event into the session state machine.
    pub fn handle(&self, event: PointerEvent) {
        match event.kind {
            PointerEventKind::Down => self.pointer_down(event),
            PointerEventKind::Move => self.pointer_move(event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.pointer_up(event),
        }
    }

    /// Starts a session unless paused, detached, or another pointer is held.
    /// Cancels any running release animation.
    pub fn pointer_down(&self, event: PointerEvent) {
        self.inner.pointer_down(event);
    }

    /// Records a move of the session's pointer; other pointers are ignored.
    pub fn pointer_move(&self, event: PointerEvent) {
        self.inner.pointer_move(event);
    }

    /// Ends the session of a matching pointer and starts the release run.
    pub fn pointer_up(&self, event: PointerEvent) {
        self.inner.pointer_up(event);
    }

    pub fn pointer_cancel(&self, event: PointerEvent) {
        self.inner.pointer_up(event);
    }

    /// Ends any active session and refuses new ones until [`resume`].
    ///
    /// A release animation that is already running keeps going.
    ///
    /// [`resume`]: DragTracker::resume
    pub fn pause(&self) {
        let ended = {
            let mut state = self.inner.state.borrow_mut();
            state.paused = true;
            state.session.take().is_some()
        };
        if ended {
            log::debug!("session ended by pause");
            self.inner.source.end_session();
        }
    }

    pub fn resume(&self) {
        self.inner.state.borrow_mut().paused = false;
    }

    /// Overwrites the position without notifying the host.
    ///
    /// Each axis is applied only when given a finite value; `y` is ignored
    /// by single-axis trackers.
    pub fn set_position(&self, x: Option<f64>, y: Option<f64>) {
        let mut state = self.inner.state.borrow_mut();
        if state.detached {
            return;
        }
        match x {
            Some(x) if x.is_finite() => state.position.x = x,
            Some(x) => log::warn!("ignoring non-finite x position {x}"),
            None => {}
        }
        if state.axes == Axes::Two {
            match y {
                Some(y) if y.is_finite() => state.position.y = y,
                Some(y) => log::warn!("ignoring non-finite y position {y}"),
                None => {}
            }
        }
    }

    pub fn set_x(&self, x: f64) {
        self.set_position(Some(x), None);
    }

    /// Replaces the displacement gain; the free-decay stop threshold scales
    /// with it.
    pub fn set_multiplier(&self, multiplier: f64) {
        if !multiplier.is_finite() {
            log::warn!("ignoring non-finite multiplier {multiplier}");
            return;
        }
        let mut state = self.inner.state.borrow_mut();
        state.multiplier = multiplier;
        state.policy.set_multiplier(multiplier);
    }

    /// Removes every listener and silences the tracker for good.
    ///
    /// Always returns `None` so the host can drop its handle in one
    /// expression: `tracker = tracker.and_then(|t| t.detach())`.
    pub fn detach(&self) -> Option<DragTracker> {
        let was_tracking = {
            let mut state = self.inner.state.borrow_mut();
            if state.detached {
                return None;
            }
            state.detached = true;
            state.active_run = None;
            state.session.take().is_some()
        };
        if was_tracking {
            self.inner.source.end_session();
        }
        self.inner.source.release();
        log::debug!("tracker detached");
        None
    }

    pub fn position(&self) -> (f64, Option<f64>) {
        let state = self.inner.state.borrow();
        state.axes.split(state.position)
    }

    /// Current release velocity in units per frame.
    pub fn velocity(&self) -> (f64, Option<f64>) {
        let state = self.inner.state.borrow();
        state.axes.split(state.velocity)
    }

    pub fn multiplier(&self) -> f64 {
        self.inner.state.borrow().multiplier
    }

    pub fn axes(&self) -> Axes {
        self.inner.state.borrow().axes
    }

    pub fn phase(&self) -> Phase {
        self.inner.state.borrow().phase()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.state.borrow().paused
    }

    pub fn is_detached(&self) -> bool {
        self.inner.state.borrow().detached
    }

    /// Whether a coalesced drag frame is waiting to run.
    pub fn has_pending_frame(&self) -> bool {
        self.inner.state.borrow().frame_pending
    }
}

impl fmt::Debug for DragTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("DragTracker")
            .field("phase", &state.phase())
            .field("position", &state.position)
            .field("velocity", &state.velocity)
            .field("multiplier", &state.multiplier)
            .field("paused", &state.paused)
            .field("detached", &state.detached)
            .finish()
    }
}

/// Fluent construction of a [`DragTracker`].
#[derive(Default)]
pub struct TrackerBuilder {
    config: TrackerConfig,
    update: Option<UpdateCallback>,
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: TrackerConfig) -> Self {
        Self {
            config,
            update: None,
        }
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.config.multiplier = multiplier;
        self
    }

    pub fn friction(mut self, friction: f64) -> Self {
        self.config.friction = friction;
        self
    }

    pub fn initial_position(mut self, x: f64, y: f64) -> Self {
        self.config.initial_values = [x, y];
        self
    }

    pub fn axes(mut self, axes: Axes) -> Self {
        self.config.axes = axes;
        self
    }

    /// Snaps to multiples of `width` on release. Attractor mode is single-axis.
    pub fn attractor(mut self, width: f64) -> Self {
        self.config.width = Some(width);
        self.config.axes = Axes::One;
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.config.paused = paused;
        self
    }

    pub fn on_update(mut self, update: impl FnMut(f64, Option<f64>) + 'static) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    pub fn build(
        self,
        frames: Rc<dyn FrameScheduler>,
        source: Rc<dyn PointerSource>,
    ) -> Result<DragTracker, ConfigError> {
        let update = self.update.ok_or(ConfigError::MissingUpdateCallback)?;
        let policy = self.config.decay_policy()?;
        let config = self.config;

        let state = TrackerState {
            axes: config.axes,
            position: config.initial_position(),
            velocity: Point::ZERO,
            multiplier: config.multiplier,
            policy,
            paused: config.paused,
            detached: false,
            session: None,
            pointer_last: Point::ZERO,
            pointer_current: Point::ZERO,
            samples: SampleWindow::new(),
            frame_pending: false,
            active_run: None,
            next_run: 0,
        };

        Ok(DragTracker {
            inner: Rc::new(TrackerInner {
                state: RefCell::new(state),
                update: RefCell::new(update),
                frames: FrameClock::new(frames),
                source,
            }),
        })
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
