#![forbid(unsafe_code)]

//! Slide-out sidebar wiring.
//!
//! Stateless: visibility lives in a body class, nothing is persisted.
//! Opening goes through an instant frame so the first layout of the sidebar
//! does not animate in from a stale position.

use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, MouseEvent, Node, Window};

use crate::classes::{SIDEBAR_TOGGLE, SIDEBAR_WRAPPER, STATE_SIDEBAR_VISIBLE};
use crate::schedule;

/// Attach the toggle-button and outside-click handlers.
///
/// Pages without a sidebar are normal; wiring is skipped silently.
pub fn wire(window: &Window, document: &Document, body: &HtmlElement) -> Result<(), JsValue> {
    let toggle = document.query_selector(&format!(".{SIDEBAR_TOGGLE}"))?;
    let sidebar = document.query_selector(&format!(".{SIDEBAR_WRAPPER}"))?;
    let (Some(toggle), Some(sidebar)) = (toggle, sidebar) else {
        debug!("no sidebar on this page");
        return Ok(());
    };

    // Toggle button flips visibility; opening suppresses the transition for
    // one frame.
    {
        let window = window.clone();
        let body = body.clone();
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            let opening = !body.class_list().contains(STATE_SIDEBAR_VISIBLE);
            if opening {
                let _ = body.class_list().add_1(STATE_SIDEBAR_VISIBLE);
                let _ = schedule::instant_frame(&window, &body);
            } else {
                let _ = body.class_list().remove_1(STATE_SIDEBAR_VISIBLE);
            }
        }));
        toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // A click outside both the sidebar and its button closes it.
    {
        let body = body.clone();
        let sidebar: Element = sidebar;
        let toggle: Element = toggle;
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
            if !body.class_list().contains(STATE_SIDEBAR_VISIBLE) {
                return;
            }
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                return;
            };
            if !sidebar.contains(Some(&target)) && !toggle.contains(Some(&target)) {
                let _ = body.class_list().remove_1(STATE_SIDEBAR_VISIBLE);
            }
        }));
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
