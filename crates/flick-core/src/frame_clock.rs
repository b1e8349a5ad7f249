use std::fmt;
use std::rc::Rc;

use crate::platform::FrameScheduler;

/// Shared handle to the host's frame scheduler.
#[derive(Clone)]
pub struct FrameClock {
    scheduler: Rc<dyn FrameScheduler>,
}

impl FrameClock {
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self { scheduler }
    }

    /// Runs `callback` on the next frame with the frame time in milliseconds.
    pub fn with_frame_millis(&self, callback: impl FnOnce(f64) + 'static) {
        self.scheduler.request_frame(Box::new(callback));
    }

    /// Runs `callback` on the next frame, ignoring the frame time.
    pub fn on_next_frame(&self, callback: impl FnOnce() + 'static) {
        self.with_frame_millis(move |_| callback());
    }
}

impl fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameClock").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct QueueScheduler {
        queue: RefCell<Vec<Box<dyn FnOnce(f64)>>>,
    }

    impl FrameScheduler for QueueScheduler {
        fn request_frame(&self, callback: Box<dyn FnOnce(f64) + 'static>) {
            self.queue.borrow_mut().push(callback);
        }
    }

    #[test]
    fn callbacks_run_with_frame_time() {
        let scheduler = Rc::new(QueueScheduler::default());
        let clock = FrameClock::new(scheduler.clone());
        let seen = Rc::new(Cell::new(None));
        let ran = Rc::new(Cell::new(false));

        {
            let seen = seen.clone();
            clock.with_frame_millis(move |time| seen.set(Some(time)));
        }
        {
            let ran = ran.clone();
            clock.on_next_frame(move || ran.set(true));
        }
        assert_eq!(seen.get(), None);

        let callbacks: Vec<_> = scheduler.queue.borrow_mut().drain(..).collect();
        for callback in callbacks {
            callback(16.0);
        }

        assert_eq!(seen.get(), Some(16.0));
        assert!(ran.get());
    }
}
