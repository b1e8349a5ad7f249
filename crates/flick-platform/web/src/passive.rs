//! Passive event listener feature detection.

use std::cell::Cell;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::AddEventListenerOptions;

const PROBE_EVENT: &str = "flick-passive-probe";

thread_local! {
    static PASSIVE_SUPPORTED: OnceCell<bool> = const { OnceCell::new() };
}

/// Whether the browser understands the `passive` listener option.
///
/// Probed once per thread; later calls return the cached answer.
pub fn supports_passive_listeners() -> bool {
    PASSIVE_SUPPORTED.with(|supported| *supported.get_or_init(probe))
}

/// Registers a throwaway listener with an options object whose `passive`
/// getter records that the browser read it.
fn probe() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };

    let read = Rc::new(Cell::new(false));
    let getter = {
        let read = read.clone();
        Closure::<dyn FnMut() -> JsValue>::new(move || {
            read.set(true);
            JsValue::FALSE
        })
    };

    let descriptor = js_sys::Object::new();
    if js_sys::Reflect::set(&descriptor, &"get".into(), getter.as_ref()).is_err() {
        return false;
    }
    let options = js_sys::Object::new();
    js_sys::Object::define_property(&options, &"passive".into(), &descriptor);

    let noop = Closure::<dyn FnMut()>::new(|| {});
    let added = window.add_event_listener_with_callback_and_add_event_listener_options(
        PROBE_EVENT,
        noop.as_ref().unchecked_ref(),
        options.unchecked_ref::<AddEventListenerOptions>(),
    );
    if added.is_ok() {
        if let Err(err) =
            window.remove_event_listener_with_callback(PROBE_EVENT, noop.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove passive probe listener: {err:?}");
        }
    }

    let supported = read.get();
    log::debug!("passive event listeners supported: {supported}");
    supported
}
