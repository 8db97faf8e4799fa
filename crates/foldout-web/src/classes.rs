#![forbid(unsafe_code)]

//! The class-name contract between this crate and the page markup.
//!
//! The markup is produced by the CMS and is not ours to redesign; these
//! names are the stable query surface. Markers (`closed-by-default`,
//! `closable`) are boolean flags on the panel wrapper.

use foldout_core::PanelFlags;

/// Wrapper element of one disclosure panel.
pub const PANEL_WRAPPER: &str = "ui-dropdown-wrapper";
/// Toggle control inside a wrapper.
pub const PANEL_TOGGLE: &str = "ui-dropdown-flex-div";
/// Collapsible content region inside a wrapper.
pub const PANEL_CONTENT: &str = "ui-dropdown-content";
/// Optional indicator icon inside a wrapper.
pub const PANEL_ICON: &str = "ui-dropdown-button-icon";
/// Marker: start closed when no choice was persisted.
pub const MARKER_CLOSED_BY_DEFAULT: &str = "closed-by-default";
/// Marker: outside clicks close the panel.
pub const MARKER_CLOSABLE: &str = "ui-dropdown-closable";

/// Applied to an open wrapper (and to an expanded collection item).
pub const STATE_OPEN: &str = "open";
/// Applied to the body while transitions are suppressed for one frame.
pub const STATE_INSTANT: &str = "instant";
/// Applied to the body once wiring completed.
pub const STATE_JS_READY: &str = "js-ready";
/// Applied to the root once the window fired `load`.
pub const STATE_LOADED: &str = "loaded";
/// Applied to the root while embedded in a frame.
pub const STATE_NO_SCROLL: &str = "no-scroll";
/// Applied to the body while the sidebar is visible.
pub const STATE_SIDEBAR_VISIBLE: &str = "sidebar-visible";

/// Slide-out sidebar wrapper.
pub const SIDEBAR_WRAPPER: &str = "ui-sidebar-wrapper";
/// Button toggling the sidebar.
pub const SIDEBAR_TOGGLE: &str = "ui-menu-toggle-button";

/// One accordion ("collection") item.
pub const COLLECTION_ITEM: &str = "ui-collection-item";
/// Click target of a collection item.
pub const COLLECTION_TRIGGER: &str = "ui-collection-item-content-div";
/// Expanding region of a collection item.
pub const COLLECTION_PANEL: &str = "ui-collection-item-right";

/// Animation canvases carry their asset path in this attribute.
pub const CANVAS_ATTR: &str = "data-anim";

/// Derive panel flags from a space-separated `class` attribute value.
#[must_use]
pub fn flags_from_class_attr(class_attr: &str) -> PanelFlags {
    let mut flags = PanelFlags::empty();
    for class in class_attr.split_ascii_whitespace() {
        match class {
            MARKER_CLOSED_BY_DEFAULT => flags |= PanelFlags::CLOSED_BY_DEFAULT,
            MARKER_CLOSABLE => flags |= PanelFlags::CLOSABLE,
            _ => {}
        }
    }
    flags
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn markers_are_order_independent() {
        assert_eq!(
            flags_from_class_attr("ui-dropdown-wrapper closed-by-default"),
            PanelFlags::CLOSED_BY_DEFAULT
        );
        assert_eq!(
            flags_from_class_attr("ui-dropdown-closable  ui-dropdown-wrapper closed-by-default"),
            PanelFlags::CLOSED_BY_DEFAULT | PanelFlags::CLOSABLE
        );
        assert_eq!(flags_from_class_attr(""), PanelFlags::empty());
    }

    #[test]
    fn unrelated_classes_are_ignored() {
        assert_eq!(
            flags_from_class_attr("ui-dropdown-wrapper w-embed open"),
            PanelFlags::empty()
        );
    }
}
