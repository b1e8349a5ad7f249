//! Browser adapter for Flick.
//!
//! Resolves the source element, wires native mouse and touch listeners into
//! a [`DragTracker`], and drives its frames with `requestAnimationFrame`.
//!
//! ```ignore
//! let flick = Flick::attach(
//!     Source::Selector("#carousel".into()),
//!     TrackerConfig { axes: Axes::One, width: Some(320.0), ..Default::default() },
//!     |element, x, _| {
//!         let _ = element.set_attribute("style", &format!("transform: translateX({x}px)"));
//!     },
//! )?;
//! ```

pub mod events;
pub mod passive;
pub mod scheduler;
pub mod source;

use std::rc::Rc;

use flick_core::{ConfigError, DragTracker, SystemClock, TrackerBuilder, TrackerConfig};
use thiserror::Error;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, EventTarget};

pub use events::{classify_event_type, select_touches, to_pointer_events, InputFamily, TouchPoint};
pub use passive::supports_passive_listeners;
pub use scheduler::AnimationFrameScheduler;
pub use source::DomPointerSource;

#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no global window exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("source element `{0}` not found")]
    SourceNotFound(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        WebError::Js(format!("{value:?}"))
    }
}

/// Where drags start.
#[derive(Clone, Debug, Default)]
pub enum Source {
    /// The whole document.
    #[default]
    Document,
    /// The first element matching a CSS selector.
    Selector(String),
    Element(Element),
}

impl Source {
    /// The event target for down listeners and the element handed to the
    /// update callback.
    fn resolve(self, document: &Document) -> Result<(EventTarget, Element), WebError> {
        match self {
            Source::Document => {
                let root = document
                    .document_element()
                    .ok_or_else(|| WebError::SourceNotFound("document".into()))?;
                Ok((document.clone().into(), root))
            }
            Source::Selector(selector) => {
                let element = document
                    .query_selector(&selector)?
                    .ok_or(WebError::SourceNotFound(selector))?;
                Ok((element.clone().into(), element))
            }
            Source::Element(element) => Ok((element.clone().into(), element)),
        }
    }
}

/// A drag tracker attached to a DOM element.
pub struct Flick {
    tracker: DragTracker,
}

impl Flick {
    /// Attaches a tracker to `source`.
    ///
    /// `update` receives the source element and the new position on every
    /// change.
    pub fn attach(
        source: Source,
        config: TrackerConfig,
        mut update: impl FnMut(&Element, f64, Option<f64>) + 'static,
    ) -> Result<Self, WebError> {
        let window = web_sys::window().ok_or(WebError::NoWindow)?;
        let document = window.document().ok_or(WebError::NoDocument)?;
        let (target, element) = source.resolve(&document)?;

        let pointer_source = Rc::new(DomPointerSource::new(
            document,
            target,
            supports_passive_listeners(),
        ));
        let tracker = TrackerBuilder::from_config(config)
            .on_update(move |x, y| update(&element, x, y))
            .build(
                Rc::new(AnimationFrameScheduler::new(window)),
                pointer_source.clone(),
            )?;

        if let Err(err) = pointer_source.install(&tracker, Rc::new(SystemClock::new())) {
            tracker.detach();
            return Err(err.into());
        }
        log::debug!("flick attached");

        Ok(Self { tracker })
    }

    pub fn tracker(&self) -> &DragTracker {
        &self.tracker
    }

    pub fn pause(&self) {
        self.tracker.pause();
    }

    pub fn resume(&self) {
        self.tracker.resume();
    }

    pub fn set_values(&self, x: Option<f64>, y: Option<f64>) {
        self.tracker.set_position(x, y);
    }

    pub fn set_x(&self, x: f64) {
        self.tracker.set_x(x);
    }

    pub fn set_multiplier(&self, multiplier: f64) {
        self.tracker.set_multiplier(multiplier);
    }

    /// Removes every listener. Returns `None` so callers can overwrite their
    /// handle with the result.
    pub fn destroy(self) -> Option<Flick> {
        self.tracker.detach();
        None
    }
}
