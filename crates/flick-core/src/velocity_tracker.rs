//! Release velocity estimation for flick gestures.
//!
//! Keeps the pointer positions observed during the trailing
//! [`SAMPLE_WINDOW_MS`] and derives a per-frame velocity from the oldest and
//! newest of them when the pointer lifts.

use std::collections::VecDeque;

use crate::gesture_constants::{FRAME_UNIT_MS, SAMPLE_WINDOW_MS};
use crate::geometry::Point;

/// A position with timestamp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub time_ms: f64,
}

/// Time-windowed buffer of pointer samples.
///
/// Insertion order is temporal order. Before each push, samples older than the
/// window (measured against the incoming sample) are dropped from the front one
/// at a time, so the newest sample always survives even when it is alone.
#[derive(Clone, Debug, Default)]
pub struct SampleWindow {
    samples: VecDeque<PointerSample>,
}

impl SampleWindow {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::new(),
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Records a sample, discarding any that fell out of the window.
    pub fn push(&mut self, position: Point, time_ms: f64) {
        while let Some(oldest) = self.samples.front() {
            if time_ms - oldest.time_ms <= SAMPLE_WINDOW_MS {
                break;
            }
            self.samples.pop_front();
        }
        self.samples.push_back(PointerSample { position, time_ms });
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn oldest(&self) -> Option<&PointerSample> {
        self.samples.front()
    }

    pub fn newest(&self) -> Option<&PointerSample> {
        self.samples.back()
    }

    /// Velocity in position units per frame, already scaled by `multiplier`.
    ///
    /// Any component that does not come out finite (no elapsed time, an
    /// empty window, a zero multiplier) is reported as zero.
    pub fn release_velocity(&self, multiplier: f64) -> Point {
        let (Some(first), Some(last)) = (self.oldest(), self.newest()) else {
            return Point::ZERO;
        };

        let offset = last.position - first.position;
        let frames = (last.time_ms - first.time_ms) / FRAME_UNIT_MS / multiplier;

        Point::new(offset.x / frames, offset.y / frames).finite_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prunes_samples_older_than_window() {
        let mut window = SampleWindow::new();
        window.push(Point::new(0.0, 0.0), 0.0);
        window.push(Point::new(10.0, 0.0), 60.0);
        window.push(Point::new(20.0, 0.0), 100.0);
        assert_eq!(window.len(), 3, "a sample exactly at the edge stays");

        window.push(Point::new(30.0, 0.0), 150.0);
        assert_eq!(window.len(), 3);
        assert_eq!(window.oldest().map(|s| s.time_ms), Some(60.0));
    }

    #[test]
    fn newest_sample_survives_a_long_pause() {
        let mut window = SampleWindow::new();
        window.push(Point::new(0.0, 0.0), 0.0);
        window.push(Point::new(5.0, 5.0), 10.0);
        window.push(Point::new(7.0, 7.0), 5_000.0);

        assert_eq!(window.len(), 1);
        assert_eq!(window.newest().map(|s| s.position), Some(Point::new(7.0, 7.0)));
    }

    #[test]
    fn velocity_is_displacement_per_frame() {
        let mut window = SampleWindow::new();
        window.push(Point::new(0.0, 0.0), 0.0);
        window.push(Point::new(100.0, -50.0), 50.0);

        let velocity = window.release_velocity(1.0);
        assert!((velocity.x - 30.0).abs() < 1e-9);
        assert!((velocity.y + 15.0).abs() < 1e-9);
    }

    #[test]
    fn multiplier_scales_velocity() {
        let mut window = SampleWindow::new();
        window.push(Point::new(0.0, 0.0), 0.0);
        window.push(Point::new(100.0, 0.0), 50.0);

        let velocity = window.release_velocity(2.0);
        assert!((velocity.x - 60.0).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_time_yields_zero_velocity() {
        let mut window = SampleWindow::new();
        window.push(Point::new(0.0, 0.0), 40.0);
        window.push(Point::new(25.0, 0.0), 40.0);

        let velocity = window.release_velocity(1.0);
        assert_eq!(velocity, Point::ZERO);
        assert!(!velocity.x.is_nan());
    }

    #[test]
    fn stationary_release_yields_zero_velocity() {
        let mut window = SampleWindow::new();
        window.push(Point::new(12.0, 3.0), 0.0);
        assert_eq!(window.release_velocity(1.0), Point::ZERO);
        assert_eq!(SampleWindow::new().release_velocity(1.0), Point::ZERO);
    }
}
