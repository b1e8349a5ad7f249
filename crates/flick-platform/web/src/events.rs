//! DOM event normalization.

use flick_core::{Point, PointerEvent, PointerEventKind, PointerKey};
use smallvec::SmallVec;
use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, Touch, TouchEvent, TouchList};

/// Which native event family a DOM event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputFamily {
    Mouse,
    Touch,
}

/// Maps a DOM event type to the family and pointer phase it represents.
pub fn classify_event_type(event_type: &str) -> Option<(InputFamily, PointerEventKind)> {
    let classified = match event_type {
        "mousedown" => (InputFamily::Mouse, PointerEventKind::Down),
        "mousemove" => (InputFamily::Mouse, PointerEventKind::Move),
        "mouseup" => (InputFamily::Mouse, PointerEventKind::Up),
        "touchstart" => (InputFamily::Touch, PointerEventKind::Down),
        "touchmove" => (InputFamily::Touch, PointerEventKind::Move),
        "touchend" => (InputFamily::Touch, PointerEventKind::Up),
        "touchcancel" => (InputFamily::Touch, PointerEventKind::Cancel),
        _ => return None,
    };
    Some(classified)
}

fn from_mouse(kind: PointerEventKind, event: &MouseEvent, time_ms: f64) -> PointerEvent {
    let position = Point::new(event.client_x() as f64, event.client_y() as f64);
    PointerEvent::new(kind, PointerKey::Mouse, position, time_ms)
}

/// Identifier and client position of one DOM touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub identifier: i32,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(identifier: i32, x: f64, y: f64) -> Self {
        Self {
            identifier,
            position: Point::new(x, y),
        }
    }

    fn from_touch(touch: &Touch) -> Self {
        Self::new(
            touch.identifier(),
            touch.client_x() as f64,
            touch.client_y() as f64,
        )
    }

    fn into_event(self, kind: PointerEventKind, time_ms: f64) -> PointerEvent {
        PointerEvent::new(kind, PointerKey::Touch(self.identifier), self.position, time_ms)
    }
}

fn touch_points(list: TouchList) -> impl Iterator<Item = TouchPoint> {
    (0..list.length()).filter_map(move |index| list.get(index).map(|t| TouchPoint::from_touch(&t)))
}

/// Picks the touches a touch event reports.
///
/// A touch start yields its first target touch; later touch events yield
/// every changed touch and leave it to the tracker to pick its own finger.
pub fn select_touches(
    kind: PointerEventKind,
    target_touches: impl IntoIterator<Item = TouchPoint>,
    changed_touches: impl IntoIterator<Item = TouchPoint>,
    time_ms: f64,
) -> SmallVec<[PointerEvent; 2]> {
    if kind == PointerEventKind::Down {
        target_touches
            .into_iter()
            .take(1)
            .map(|touch| touch.into_event(kind, time_ms))
            .collect()
    } else {
        changed_touches
            .into_iter()
            .map(|touch| touch.into_event(kind, time_ms))
            .collect()
    }
}

/// Converts a native event into zero or more pointer events.
pub fn to_pointer_events(event: &Event, time_ms: f64) -> SmallVec<[PointerEvent; 2]> {
    let Some((family, kind)) = classify_event_type(&event.type_()) else {
        return SmallVec::new();
    };

    match family {
        InputFamily::Mouse => event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| from_mouse(kind, mouse, time_ms))
            .into_iter()
            .collect(),
        InputFamily::Touch => match event.dyn_ref::<TouchEvent>() {
            Some(touch_event) => select_touches(
                kind,
                touch_points(touch_event.target_touches()),
                touch_points(touch_event.changed_touches()),
                time_ms,
            ),
            None => SmallVec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_listened_event_types() {
        assert_eq!(
            classify_event_type("mousedown"),
            Some((InputFamily::Mouse, PointerEventKind::Down))
        );
        assert_eq!(
            classify_event_type("touchmove"),
            Some((InputFamily::Touch, PointerEventKind::Move))
        );
        assert_eq!(
            classify_event_type("touchcancel"),
            Some((InputFamily::Touch, PointerEventKind::Cancel))
        );
        assert_eq!(
            classify_event_type("mouseup"),
            Some((InputFamily::Mouse, PointerEventKind::Up))
        );
    }

    #[test]
    fn ignores_unrelated_event_types() {
        assert_eq!(classify_event_type("click"), None);
        assert_eq!(classify_event_type("pointerdown"), None);
        assert_eq!(classify_event_type(""), None);
    }

    fn fingers() -> [TouchPoint; 3] {
        [
            TouchPoint::new(4, 10.0, 20.0),
            TouchPoint::new(9, 30.0, 40.0),
            TouchPoint::new(2, 50.0, 60.0),
        ]
    }

    #[test]
    fn touch_start_reports_only_the_first_target_touch() {
        let changed = [TouchPoint::new(9, 30.0, 40.0)];
        let events = select_touches(PointerEventKind::Down, fingers(), changed, 12.0);

        assert_eq!(
            events.as_slice(),
            &[PointerEvent::down(
                PointerKey::Touch(4),
                Point::new(10.0, 20.0),
                12.0
            )]
        );
    }

    #[test]
    fn touch_start_without_target_touches_reports_nothing() {
        let none: [TouchPoint; 0] = [];
        let events = select_touches(PointerEventKind::Down, none, fingers(), 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn later_touch_events_forward_every_changed_touch() {
        for kind in [
            PointerEventKind::Move,
            PointerEventKind::Up,
            PointerEventKind::Cancel,
        ] {
            let target = [TouchPoint::new(1, 0.0, 0.0)];
            let events = select_touches(kind, target, fingers(), 5.0);

            let pointers: Vec<_> = events.iter().map(|e| e.pointer).collect();
            assert_eq!(
                pointers,
                [PointerKey::Touch(4), PointerKey::Touch(9), PointerKey::Touch(2)]
            );
            assert!(events.iter().all(|e| e.kind == kind && e.time_ms == 5.0));
            assert_eq!(events[2].position, Point::new(50.0, 60.0));
        }
    }
}
