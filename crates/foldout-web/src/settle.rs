#![forbid(unsafe_code)]

//! Bounded dynamic-height tracking after a panel opens.
//!
//! Content inside a freshly opened panel can still grow (images, embeds,
//! asynchronously rendered sub-content), which would leave the `max-height`
//! clamp too small. A `MutationObserver` keeps re-applying the natural
//! height while that is likely, and is torn down after the configured
//! settle window so observers never accumulate.
//!
//! # Invariants
//!
//! 1. At most one tracker is alive per panel; installing a replacement
//!    drops (and thereby disconnects) the previous one.
//! 2. The observer disconnects on timeout, on drop, whichever comes first;
//!    double disconnect is harmless.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, MutationObserver, MutationObserverInit, Window};

use crate::dom;
use crate::schedule;
use foldout_core::{HeightTarget, SettleWindow};

/// A live post-open observation window.
#[derive(Debug)]
pub struct SettleTracker {
    observer: MutationObserver,
    // Kept alive for as long as the observer may fire.
    _remeasure: Closure<dyn FnMut()>,
}

impl SettleTracker {
    /// Observe `content`'s subtree and keep its applied height natural,
    /// until `window`'s duration elapses.
    pub fn start(
        window: &Window,
        content: &HtmlElement,
        settle: SettleWindow,
    ) -> Result<Self, JsValue> {
        let remeasure = {
            let content = content.clone();
            Closure::<dyn FnMut()>::wrap(Box::new(move || {
                let _ = dom::apply_height(&content, HeightTarget::Natural);
            }))
        };
        let observer = MutationObserver::new(remeasure.as_ref().unchecked_ref())?;

        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(content, &options)?;

        {
            let observer = observer.clone();
            schedule::set_timeout(window, settle.duration, move || {
                observer.disconnect();
            })?;
        }

        Ok(Self {
            observer,
            _remeasure: remeasure,
        })
    }
}

impl Drop for SettleTracker {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
