#![forbid(unsafe_code)]

//! Panel identity, markers, and the height directives the adapter applies.
//!
//! A panel has no persistent id in the page markup, so its position among the
//! discovered panels doubles as its persistence key. Indices are assigned in
//! page order at initialization and stay fixed for the session; panels are
//! never created or destroyed between page loads.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-panel markers read off the wrapper element.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PanelFlags: u8 {
        /// When no choice was persisted, start closed instead of open.
        const CLOSED_BY_DEFAULT = 0b01;
        /// Eligible for outside-click auto-close.
        const CLOSABLE = 0b10;
    }
}

/// What discovery found for one wrapper, before the controller takes over.
///
/// Wrappers missing a toggle control or content region still occupy their
/// page-order index (so persisted keys of later panels stay stable) but are
/// skipped by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelProbe {
    pub flags: PanelFlags,
    /// Both required sub-elements (toggle control, content region) present.
    pub complete: bool,
}

impl PanelProbe {
    #[must_use]
    pub const fn complete(flags: PanelFlags) -> Self {
        Self {
            flags,
            complete: true,
        }
    }

    #[must_use]
    pub const fn incomplete() -> Self {
        Self {
            flags: PanelFlags::empty(),
            complete: false,
        }
    }
}

/// One disclosure unit, as tracked by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub index: usize,
    pub flags: PanelFlags,
    pub is_open: bool,
    /// `false` for wrappers skipped at initialization; operations no-op.
    pub wired: bool,
}

/// Target height for the collapsible content region.
///
/// The adapter resolves `Natural` against the content's measured scroll
/// height after the browser has committed layout; the controller never sees
/// pixel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightTarget {
    /// Expand to the measured natural height.
    Natural,
    /// Collapse to zero.
    Zero,
}

/// Resolve the initial open state for one panel.
///
/// A persisted choice always wins; the closed-by-default marker only applies
/// while no choice has ever been stored.
#[must_use]
pub fn resolve_initial_open(stored: Option<&str>, flags: PanelFlags) -> bool {
    match stored {
        Some(value) => value == "true",
        None => !flags.contains(PanelFlags::CLOSED_BY_DEFAULT),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    // -- default policy --

    #[test]
    fn no_entry_no_flag_opens() {
        assert_eq!(resolve_initial_open(None, PanelFlags::empty()), true);
    }

    #[test]
    fn no_entry_closed_by_default_stays_closed() {
        assert_eq!(
            resolve_initial_open(None, PanelFlags::CLOSED_BY_DEFAULT),
            false
        );
    }

    // -- persisted choice wins --

    #[test]
    fn stored_false_closes_regardless_of_flags() {
        assert_eq!(resolve_initial_open(Some("false"), PanelFlags::empty()), false);
        assert_eq!(
            resolve_initial_open(Some("false"), PanelFlags::CLOSED_BY_DEFAULT),
            false
        );
    }

    #[test]
    fn stored_true_overrides_closed_by_default() {
        assert_eq!(
            resolve_initial_open(Some("true"), PanelFlags::CLOSED_BY_DEFAULT),
            true
        );
    }

    #[test]
    fn malformed_entry_reads_as_closed() {
        // Anything that is not the literal "true" counts as a stored "closed".
        assert_eq!(resolve_initial_open(Some("yes"), PanelFlags::empty()), false);
    }
}
