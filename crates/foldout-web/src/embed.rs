#![forbid(unsafe_code)]

//! Iframe embedding support.
//!
//! When the page runs inside a frame, the host document cannot size the
//! frame to its content; the page posts its scroll height to the parent and
//! turns its own scrolling off so only the host scrolls.

use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;
use web_sys::{Document, Window};

use crate::classes::STATE_NO_SCROLL;

/// Whether this window is embedded in another document.
#[must_use]
pub fn is_framed(window: &Window) -> bool {
    match window.top() {
        Ok(Some(top)) => top != *window,
        // A cross-origin ancestor can make `top` inaccessible; that still
        // means we are framed.
        Ok(None) | Err(_) => true,
    }
}

/// Post a `setHeight` message with the document's scroll height to the
/// parent. No-op when not framed.
pub fn post_height(window: &Window, document: &Document) -> Result<(), JsValue> {
    if !is_framed(window) {
        return Ok(());
    }
    let Some(root) = document.document_element() else {
        return Ok(());
    };
    let Ok(Some(parent)) = window.parent() else {
        return Ok(());
    };
    let message = Object::new();
    Reflect::set(&message, &"type".into(), &"setHeight".into())?;
    Reflect::set(
        &message,
        &"height".into(),
        &JsValue::from_f64(f64::from(root.scroll_height())),
    )?;
    parent.post_message(&message, "*")
}

/// Mark or unmark the root as frame-hosted (`no-scroll`).
pub fn apply_frame_mode(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(root) = document.document_element() else {
        return Ok(());
    };
    if is_framed(window) {
        root.class_list().add_1(STATE_NO_SCROLL)
    } else {
        root.class_list().remove_1(STATE_NO_SCROLL)
    }
}
