#![forbid(unsafe_code)]

//! Frame and timer scheduling.
//!
//! The only suspension point in the whole page controller: deferring one
//! rendering frame so the browser commits layout before a natural height is
//! read, or before transitions are re-enabled.

use std::time::Duration;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use crate::classes::STATE_INSTANT;

/// Run `f` on the next rendering frame.
pub fn next_frame(window: &Window, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(move |_timestamp: f64| f());
    window.request_animation_frame(callback.unchecked_ref())?;
    Ok(())
}

/// Run `f` once after `delay`.
pub fn set_timeout(
    window: &Window,
    delay: Duration,
    f: impl FnOnce() + 'static,
) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(f);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay.as_millis()).unwrap_or(i32::MAX),
    )
}

/// Suppress transitions on `body` for exactly one rendering frame.
///
/// State applied while the marker is present lands without visible
/// animation; the marker is removed on the next frame.
pub fn instant_frame(window: &Window, body: &HtmlElement) -> Result<(), JsValue> {
    body.class_list().add_1(STATE_INSTANT)?;
    let body = body.clone();
    next_frame(window, move || {
        let _ = body.class_list().remove_1(STATE_INSTANT);
    })
}
