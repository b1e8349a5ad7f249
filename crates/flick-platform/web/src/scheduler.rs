use flick_core::FrameScheduler;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

/// Frame scheduler backed by `window.requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: Box<dyn FnOnce(f64) + 'static>) {
        // The JS function frees itself after its single invocation.
        let function = Closure::once_into_js(move |time: f64| callback(time));
        if let Err(err) = self
            .window
            .request_animation_frame(function.unchecked_ref())
        {
            log::warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}
