#![forbid(unsafe_code)]

//! Panel discovery and the style/class writes behind height directives.
//!
//! Discovery walks every wrapper in page order; wrappers missing their
//! toggle or content region are reported as incomplete probes so the
//! controller can keep later indices stable. The height of an open panel is
//! driven through `max-height` (plus opacity), which is what the page's
//! transition rules animate.

use foldout_core::{ClickHit, HeightTarget, PanelFlags, PanelProbe};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Node};

use crate::classes::{
    MARKER_CLOSABLE, MARKER_CLOSED_BY_DEFAULT, PANEL_CONTENT, PANEL_ICON, PANEL_TOGGLE,
    PANEL_WRAPPER, STATE_OPEN,
};

/// DOM handles for one wired panel.
#[derive(Debug, Clone)]
pub struct PanelDom {
    pub wrapper: Element,
    pub toggle: Element,
    pub content: HtmlElement,
    /// Indicator icon; purely decorative, absence is not an error.
    pub icon: Option<Element>,
}

/// Everything discovery found, index-aligned: `panels[i]` is `None` exactly
/// when `probes[i]` is incomplete.
#[derive(Debug, Default)]
pub struct Discovery {
    pub probes: Vec<PanelProbe>,
    pub panels: Vec<Option<PanelDom>>,
}

/// Scan the page for disclosure panels, in page order.
pub fn discover(document: &Document) -> Result<Discovery, JsValue> {
    let wrappers = document.query_selector_all(&format!(".{PANEL_WRAPPER}"))?;
    let mut discovery = Discovery::default();
    for i in 0..wrappers.length() {
        let wrapper = wrappers
            .item(i)
            .and_then(|node| node.dyn_into::<Element>().ok());
        let Some(wrapper) = wrapper else {
            discovery.probes.push(PanelProbe::incomplete());
            discovery.panels.push(None);
            continue;
        };
        let toggle = wrapper.query_selector(&format!(".{PANEL_TOGGLE}"))?;
        let content = wrapper
            .query_selector(&format!(".{PANEL_CONTENT}"))?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let (Some(toggle), Some(content)) = (toggle, content) else {
            discovery.probes.push(PanelProbe::incomplete());
            discovery.panels.push(None);
            continue;
        };
        let icon = wrapper.query_selector(&format!(".{PANEL_ICON}"))?;

        let class_list = wrapper.class_list();
        let mut flags = PanelFlags::empty();
        if class_list.contains(MARKER_CLOSED_BY_DEFAULT) {
            flags |= PanelFlags::CLOSED_BY_DEFAULT;
        }
        if class_list.contains(MARKER_CLOSABLE) {
            flags |= PanelFlags::CLOSABLE;
        }

        discovery.probes.push(PanelProbe::complete(flags));
        discovery.panels.push(Some(PanelDom {
            wrapper,
            toggle,
            content,
            icon,
        }));
    }
    Ok(discovery)
}

/// Flip the wrapper's open marker class.
pub fn set_open(panel: &PanelDom, open: bool) -> Result<(), JsValue> {
    if open {
        panel.wrapper.class_list().add_1(STATE_OPEN)
    } else {
        panel.wrapper.class_list().remove_1(STATE_OPEN)
    }
}

/// Drive the content region to a height target.
///
/// `Natural` reads the current scroll height, so it must run after the
/// browser has committed layout (next frame after the open class lands).
pub fn apply_height(content: &HtmlElement, target: HeightTarget) -> Result<(), JsValue> {
    let style = content.style();
    match target {
        HeightTarget::Natural => {
            style.set_property("max-height", &format!("{}px", content.scroll_height()))?;
            style.set_property("opacity", "1")
        }
        HeightTarget::Zero => {
            style.set_property("max-height", "0px")?;
            style.set_property("opacity", "0")
        }
    }
}

/// Where a page-level click landed, relative to every wired panel.
#[must_use]
pub fn click_hits(panels: &[Option<PanelDom>], target: &Node) -> Vec<ClickHit> {
    panels
        .iter()
        .enumerate()
        .filter_map(|(index, panel)| {
            let panel = panel.as_ref()?;
            Some(ClickHit {
                index,
                inside_panel: panel.wrapper.contains(Some(target)),
                inside_toggle: panel.toggle.contains(Some(target)),
            })
        })
        .collect()
}
