use crate::geometry::Point;

/// Identity of the pointer driving a session.
///
/// The mouse has no identifier of its own; each finger carries the platform
/// touch identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKey {
    Mouse,
    Touch(i32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// A normalized pointer observation.
///
/// Platform adapters translate native mouse/touch events into this shape;
/// the tracker never sees anything platform specific.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer: PointerKey,
    pub position: Point,
    /// Milliseconds on the host's monotonic clock.
    pub time_ms: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, pointer: PointerKey, position: Point, time_ms: f64) -> Self {
        Self {
            kind,
            pointer,
            position,
            time_ms,
        }
    }

    pub fn down(pointer: PointerKey, position: Point, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Down, pointer, position, time_ms)
    }

    pub fn moved(pointer: PointerKey, position: Point, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Move, pointer, position, time_ms)
    }

    pub fn up(pointer: PointerKey, position: Point, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Up, pointer, position, time_ms)
    }

    pub fn cancel(pointer: PointerKey, position: Point, time_ms: f64) -> Self {
        Self::new(PointerEventKind::Cancel, pointer, position, time_ms)
    }
}
