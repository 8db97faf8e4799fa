#![forbid(unsafe_code)]

//! Page wiring and the JS-facing handle.
//!
//! `PageApp::new` runs once on DOM-ready: probe storage, discover panels,
//! restore persisted state under one suppressed frame, attach listeners,
//! then mark the page `js-ready`. Everything afterwards is event-driven on
//! the UI thread; closures share the controller through `Rc<RefCell<..>>`.

use std::cell::RefCell;
use std::rc::Rc;

use foldout_core::{
    ControllerConfig, DisclosureController, ExclusiveGroup, HeightTarget, ToggleEffect,
};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, MouseEvent, Node, Window};

use crate::canvas;
use crate::classes::{
    COLLECTION_ITEM, COLLECTION_PANEL, COLLECTION_TRIGGER, STATE_JS_READY, STATE_LOADED,
    STATE_OPEN,
};
use crate::dom::{self, PanelDom};
use crate::embed;
use crate::schedule;
use crate::settle::SettleTracker;
use crate::sidebar;
use crate::storage::PageStore;

// ---------------------------------------------------------------------------
// Shared state behind the listeners
// ---------------------------------------------------------------------------

struct Inner {
    window: Window,
    controller: DisclosureController<PageStore>,
    panels: Vec<Option<PanelDom>>,
    /// Live post-open tracker; replaced (and thereby torn down) on every
    /// toggle.
    settle: Option<SettleTracker>,
}

impl Inner {
    /// Apply one toggle outcome to the page.
    fn apply_effect(&mut self, effect: ToggleEffect) -> Result<(), JsValue> {
        let Some(panel) = self.panels.get(effect.index).and_then(|p| p.as_ref()) else {
            return Ok(());
        };
        dom::set_open(panel, effect.is_open)?;
        match effect.height {
            HeightTarget::Natural => {
                // The natural height is only valid after the open class has
                // been laid out; measure on the next frame.
                let content = panel.content.clone();
                schedule::next_frame(&self.window, move || {
                    let _ = dom::apply_height(&content, HeightTarget::Natural);
                })?;
                self.settle = match effect.settle {
                    Some(window) => {
                        Some(SettleTracker::start(&self.window, &panel.content, window)?)
                    }
                    None => None,
                };
            }
            HeightTarget::Zero => {
                dom::apply_height(&panel.content, HeightTarget::Zero)?;
                self.settle = None;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JS-facing handle
// ---------------------------------------------------------------------------

/// Handle the host page keeps after initialization.
#[wasm_bindgen]
pub struct PageApp {
    inner: Rc<RefCell<Inner>>,
}

#[wasm_bindgen]
impl PageApp {
    /// Wire the whole page. Call once, on DOM-ready.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<PageApp, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let store = PageStore::detect(&window);
        let mut controller = DisclosureController::new(ControllerConfig::default(), store);
        let discovery = dom::discover(&document)?;
        debug!(panels = discovery.probes.len(), "page discovery complete");

        // Restore persisted state with transitions suppressed, so panels do
        // not visibly animate into their restored size.
        schedule::instant_frame(&window, &body)?;
        let directives = controller.initialize(&discovery.probes);
        for directive in &directives {
            if let Some(panel) = discovery
                .panels
                .get(directive.index)
                .and_then(|p| p.as_ref())
            {
                dom::set_open(panel, directive.is_open)?;
                dom::apply_height(&panel.content, directive.height)?;
            }
        }

        let inner = Rc::new(RefCell::new(Inner {
            window: window.clone(),
            controller,
            panels: discovery.panels,
            settle: None,
        }));

        wire_panel_toggles(&inner)?;
        wire_outside_click(&inner, &document)?;
        wire_resize(&inner, &window, &document)?;
        wire_collection_items(&document)?;
        sidebar::wire(&window, &document, &body)?;
        canvas::rescale_all(&window, &document)?;
        embed::apply_frame_mode(&window, &document)?;
        embed::post_height(&window, &document)?;
        wire_loaded_marker(&window, &document)?;

        body.class_list().add_1(STATE_JS_READY)?;
        Ok(PageApp { inner })
    }

    /// Number of panel wrappers found at initialization, wired or not.
    #[wasm_bindgen(js_name = panelCount)]
    pub fn panel_count(&self) -> usize {
        self.inner.borrow().controller.panel_count()
    }

    /// Current open state of a panel, if the index exists.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self, index: usize) -> Option<bool> {
        self.inner.borrow().controller.is_open(index)
    }

    /// Toggle a panel programmatically; `true` when the index was wired.
    pub fn toggle(&self, index: usize) -> bool {
        let mut inner = self.inner.borrow_mut();
        match inner.controller.toggle(index) {
            Some(effect) => {
                let _ = inner.apply_effect(effect);
                true
            }
            None => false,
        }
    }

    /// JSON snapshot of controller state, for host diagnostics.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        let snapshot = self.inner.borrow().controller.snapshot();
        serde_json::to_string(&snapshot).unwrap_or_else(|_| "{}".to_owned())
    }

    /// Drain queued domain events as a JSON array, oldest first.
    #[wasm_bindgen(js_name = drainEventsJson)]
    pub fn drain_events_json(&self) -> String {
        let events = self.inner.borrow_mut().controller.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_owned())
    }
}

// ---------------------------------------------------------------------------
// Listener wiring
// ---------------------------------------------------------------------------

fn wire_panel_toggles(inner: &Rc<RefCell<Inner>>) -> Result<(), JsValue> {
    let toggles: Vec<(usize, Element)> = inner
        .borrow()
        .panels
        .iter()
        .enumerate()
        .filter_map(|(index, panel)| Some((index, panel.as_ref()?.toggle.clone())))
        .collect();
    for (index, toggle) in toggles {
        let inner = Rc::clone(inner);
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            let mut inner = inner.borrow_mut();
            if let Some(effect) = inner.controller.toggle(index) {
                let _ = inner.apply_effect(effect);
            }
        }));
        toggle.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn wire_outside_click(inner: &Rc<RefCell<Inner>>, document: &Document) -> Result<(), JsValue> {
    let inner = Rc::clone(inner);
    let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |event: MouseEvent| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
            return;
        };
        let mut inner = inner.borrow_mut();
        let hits = dom::click_hits(&inner.panels, &target);
        for effect in inner.controller.outside_click(&hits) {
            let _ = inner.apply_effect(effect);
        }
    }));
    document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_resize(
    inner: &Rc<RefCell<Inner>>,
    window: &Window,
    document: &Document,
) -> Result<(), JsValue> {
    let inner = Rc::clone(inner);
    let win = window.clone();
    let document = document.clone();
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
        {
            let mut inner = inner.borrow_mut();
            for index in inner.controller.viewport_resized() {
                if let Some(panel) = inner.panels.get(index).and_then(|p| p.as_ref()) {
                    let _ = dom::apply_height(&panel.content, HeightTarget::Natural);
                }
            }
        }
        let _ = canvas::rescale_all(&win, &document);
        let _ = embed::post_height(&win, &document);
    }));
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Accordion items: at most one expanded, no persistence.
fn wire_collection_items(document: &Document) -> Result<(), JsValue> {
    let nodes = document.query_selector_all(&format!(".{COLLECTION_ITEM}"))?;
    let mut triggers = Vec::new();
    let mut items = Vec::new();
    for i in 0..nodes.length() {
        let Some(item) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let trigger = item.query_selector(&format!(".{COLLECTION_TRIGGER}"))?;
        let panel = item.query_selector(&format!(".{COLLECTION_PANEL}"))?;
        let (Some(trigger), Some(_panel)) = (trigger, panel) else {
            continue;
        };
        triggers.push(trigger);
        items.push(item);
    }
    if items.is_empty() {
        return Ok(());
    }

    let group = Rc::new(RefCell::new(ExclusiveGroup::new(items.len())));
    let items = Rc::new(items);
    for (index, trigger) in triggers.into_iter().enumerate() {
        let group = Rc::clone(&group);
        let items = Rc::clone(&items);
        let closure = Closure::<dyn FnMut(MouseEvent)>::wrap(Box::new(move |_event: MouseEvent| {
            let change = group.borrow_mut().activate(index);
            for closed in &change.closed {
                let _ = items[*closed].class_list().remove_1(STATE_OPEN);
            }
            if let Some(opened) = change.opened {
                let _ = items[opened].class_list().add_1(STATE_OPEN);
            }
        }));
        trigger.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn wire_loaded_marker(window: &Window, document: &Document) -> Result<(), JsValue> {
    let root = document.document_element();
    let closure = Closure::<dyn FnMut(Event)>::wrap(Box::new(move |_event: Event| {
        if let Some(root) = &root {
            let _ = root.class_list().add_1(STATE_LOADED);
        }
    }));
    window.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
