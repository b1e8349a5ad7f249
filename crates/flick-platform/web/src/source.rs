//! Native listener management for a tracked element.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use flick_core::{Clock, DragTracker, PointerEventKind, PointerSource};
use smallvec::SmallVec;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget};

use crate::events::{classify_event_type, to_pointer_events};

const ATTACH_EVENTS: [&str; 2] = ["touchstart", "mousedown"];
const SESSION_EVENTS: [&str; 5] = ["touchmove", "touchend", "touchcancel", "mousemove", "mouseup"];

/// Whether `event_type` must be registered with `passive: false` so its
/// listener can call `preventDefault`.
fn needs_active_listener(event_type: &str, passive_supported: bool) -> bool {
    passive_supported
        && matches!(
            classify_event_type(event_type),
            Some((_, PointerEventKind::Move))
        )
}

struct Listener {
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn function(&self) -> &js_sys::Function {
        self.callback.as_ref().unchecked_ref()
    }
}

/// [`PointerSource`] over a DOM element and its document.
///
/// Listener closures are created once and live until [`PointerSource::release`];
/// sessions only add and remove their registrations, so a listener can end
/// its own session while it runs.
pub struct DomPointerSource {
    document: Document,
    target: EventTarget,
    passive_supported: bool,
    attach_listeners: RefCell<SmallVec<[Listener; 2]>>,
    session_listeners: RefCell<SmallVec<[Listener; 5]>>,
    watching: Cell<bool>,
}

impl DomPointerSource {
    pub fn new(document: Document, target: EventTarget, passive_supported: bool) -> Self {
        Self {
            document,
            target,
            passive_supported,
            attach_listeners: RefCell::new(SmallVec::new()),
            session_listeners: RefCell::new(SmallVec::new()),
            watching: Cell::new(false),
        }
    }

    /// Creates the listener closures for `tracker` and registers the
    /// attach-time ones on the target.
    pub fn install(&self, tracker: &DragTracker, clock: Rc<dyn Clock>) -> Result<(), JsValue> {
        let make = |event_type: &'static str| {
            let tracker = tracker.clone();
            let clock = clock.clone();
            let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let events = to_pointer_events(&event, clock.now_millis());
                if events.iter().any(|e| e.kind == PointerEventKind::Move) {
                    event.prevent_default();
                }
                for pointer_event in events {
                    tracker.handle(pointer_event);
                }
            });
            Listener {
                event_type,
                callback,
            }
        };

        let mut attach = self.attach_listeners.borrow_mut();
        for event_type in ATTACH_EVENTS {
            let listener = make(event_type);
            self.target
                .add_event_listener_with_callback(event_type, listener.function())?;
            attach.push(listener);
        }
        drop(attach);

        let mut session = self.session_listeners.borrow_mut();
        session.extend(SESSION_EVENTS.into_iter().map(make));
        Ok(())
    }

    fn add_session_listener(&self, listener: &Listener) -> Result<(), JsValue> {
        if needs_active_listener(listener.event_type, self.passive_supported) {
            let options = AddEventListenerOptions::new();
            options.set_passive(false);
            self.document
                .add_event_listener_with_callback_and_add_event_listener_options(
                    listener.event_type,
                    listener.function(),
                    &options,
                )
        } else {
            self.document
                .add_event_listener_with_callback(listener.event_type, listener.function())
        }
    }
}

impl PointerSource for DomPointerSource {
    fn begin_session(&self) {
        if self.watching.replace(true) {
            return;
        }
        for listener in self.session_listeners.borrow().iter() {
            if let Err(err) = self.add_session_listener(listener) {
                log::warn!("failed to listen for {}: {err:?}", listener.event_type);
            }
        }
    }

    fn end_session(&self) {
        if !self.watching.replace(false) {
            return;
        }
        for listener in self.session_listeners.borrow().iter() {
            if let Err(err) = self
                .document
                .remove_event_listener_with_callback(listener.event_type, listener.function())
            {
                log::warn!("failed to stop listening for {}: {err:?}", listener.event_type);
            }
        }
    }

    fn release(&self) {
        self.end_session();
        for listener in self.attach_listeners.borrow_mut().drain(..) {
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(listener.event_type, listener.function())
            {
                log::warn!("failed to stop listening for {}: {err:?}", listener.event_type);
            }
        }
        self.session_listeners.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::InputFamily;

    #[test]
    fn attach_listeners_only_start_sessions() {
        for event_type in ATTACH_EVENTS {
            assert!(matches!(
                classify_event_type(event_type),
                Some((_, PointerEventKind::Down))
            ));
        }
    }

    #[test]
    fn session_listeners_cover_every_later_phase() {
        let kinds: Vec<_> = SESSION_EVENTS
            .iter()
            .filter_map(|event_type| classify_event_type(event_type))
            .collect();

        assert_eq!(kinds.len(), SESSION_EVENTS.len());
        assert!(kinds.iter().all(|(_, kind)| *kind != PointerEventKind::Down));
        for family in [InputFamily::Mouse, InputFamily::Touch] {
            assert!(kinds.contains(&(family, PointerEventKind::Move)));
            assert!(kinds.contains(&(family, PointerEventKind::Up)));
        }
        assert!(kinds.contains(&(InputFamily::Touch, PointerEventKind::Cancel)));
    }

    #[test]
    fn only_move_listeners_opt_out_of_passive() {
        assert!(needs_active_listener("touchmove", true));
        assert!(needs_active_listener("mousemove", true));
        assert!(!needs_active_listener("touchmove", false));
        assert!(!needs_active_listener("touchend", true));
        assert!(!needs_active_listener("mouseup", true));
    }
}
