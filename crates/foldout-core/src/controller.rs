#![forbid(unsafe_code)]

//! Disclosure panel controller.
//!
//! Owns the open/closed state of every panel discovered on the page,
//! resolves initial state from the persistence port, and turns user
//! interaction into height directives for the adapter to apply. All work is
//! synchronous; the only timed activity is the settle window handed back to
//! the adapter on open, which the adapter tears down itself.
//!
//! # Invariants
//!
//! 1. Panel indices are assigned once, in page order, and never reused or
//!    shifted within a session; incomplete wrappers still occupy an index.
//! 2. A persisted choice always beats the closed-by-default marker; absence
//!    of an entry means "default policy", never "closed".
//! 3. Persistence failures never propagate out of an operation: the first
//!    `set` failure downgrades the controller to in-memory state for the
//!    rest of the session.
//! 4. Opening a panel supersedes any earlier settle window (generations are
//!    strictly increasing).
//!
//! # Failure Modes
//!
//! - Unknown or unwired index: operations return `None`/skip, no panic.
//! - Zero panels: `initialize` returns an empty directive list and logs at
//!   info level; nothing else happens for the session.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ControllerConfig;
use crate::event::{PanelEvent, push_bounded};
use crate::panel::{HeightTarget, Panel, PanelFlags, PanelProbe, resolve_initial_open};
use crate::store::{StateStore, storage_key};

// ---------------------------------------------------------------------------
// Directives handed to the adapter
// ---------------------------------------------------------------------------

/// Initial state to apply to one panel, under suppressed transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitDirective {
    pub index: usize,
    pub is_open: bool,
    pub height: HeightTarget,
}

/// Post-open observation window for late content growth.
///
/// The adapter keeps re-measuring the content region until the duration
/// elapses or [`DisclosureController::settle_superseded`] reports a newer
/// window exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleWindow {
    pub generation: u64,
    pub duration: Duration,
}

/// Outcome of a toggle, ready to apply to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleEffect {
    pub index: usize,
    pub is_open: bool,
    pub height: HeightTarget,
    /// Present only when the panel just opened.
    pub settle: Option<SettleWindow>,
}

/// Where a page-level click landed relative to one panel, as computed by the
/// adapter from DOM containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickHit {
    pub index: usize,
    pub inside_panel: bool,
    pub inside_toggle: bool,
}

/// Serializable view of controller state for host diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerSnapshot {
    pub namespace: String,
    pub persistence_active: bool,
    pub panels: Vec<PanelSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelSnapshot {
    pub index: usize,
    pub is_open: bool,
    pub wired: bool,
    pub closable: bool,
    pub closed_by_default: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// State owner for every disclosure panel on one page load.
#[derive(Debug)]
pub struct DisclosureController<S: StateStore> {
    config: ControllerConfig,
    store: S,
    persistence_active: bool,
    panels: Vec<Panel>,
    events: Vec<PanelEvent>,
    settle_generation: u64,
}

impl<S: StateStore> DisclosureController<S> {
    #[must_use]
    pub fn new(config: ControllerConfig, store: S) -> Self {
        Self {
            config,
            store,
            persistence_active: true,
            panels: Vec::new(),
            events: Vec::new(),
            settle_generation: 0,
        }
    }

    /// Register the discovered panels, in page order, and resolve each
    /// panel's initial state.
    ///
    /// The returned directives must be applied before transitions are
    /// re-enabled (one suppressed rendering frame), so restored panels do
    /// not visibly animate from the wrong size.
    pub fn initialize(&mut self, probes: &[PanelProbe]) -> Vec<InitDirective> {
        if probes.is_empty() {
            info!("no disclosure panels on this page");
        }
        let mut directives = Vec::with_capacity(probes.len());
        for (index, probe) in probes.iter().enumerate() {
            if !probe.complete {
                warn!(index, "panel missing toggle or content region, skipping");
                self.panels.push(Panel {
                    index,
                    flags: probe.flags,
                    is_open: false,
                    wired: false,
                });
                continue;
            }
            let stored = self.store.get(&self.key(index));
            let is_open = resolve_initial_open(stored.as_deref(), probe.flags);
            self.panels.push(Panel {
                index,
                flags: probe.flags,
                is_open,
                wired: true,
            });
            directives.push(InitDirective {
                index,
                is_open,
                height: if is_open {
                    HeightTarget::Natural
                } else {
                    HeightTarget::Zero
                },
            });
        }
        directives
    }

    /// Invert one panel's open state.
    ///
    /// Returns `None` for an unknown or unwired index.
    pub fn toggle(&mut self, index: usize) -> Option<ToggleEffect> {
        let panel = self.panels.get_mut(index).filter(|p| p.wired)?;
        panel.is_open = !panel.is_open;
        let is_open = panel.is_open;
        debug!(index, is_open, "panel toggled");
        self.persist(index, is_open);
        self.push_event(PanelEvent::Toggled { index, is_open });
        let settle = is_open.then(|| self.next_settle_window());
        Some(ToggleEffect {
            index,
            is_open,
            height: if is_open {
                HeightTarget::Natural
            } else {
                HeightTarget::Zero
            },
            settle,
        })
    }

    /// Close every closable open panel the click landed outside of.
    ///
    /// The toggle control is excluded from the "outside" test because it has
    /// its own click handler; closing here would make that handler reopen
    /// the panel on the same click.
    pub fn outside_click(&mut self, hits: &[ClickHit]) -> Vec<ToggleEffect> {
        let mut effects = Vec::new();
        for hit in hits {
            let Some(panel) = self.panels.get_mut(hit.index).filter(|p| p.wired) else {
                continue;
            };
            let eligible = panel.flags.contains(PanelFlags::CLOSABLE)
                && panel.is_open
                && !hit.inside_panel
                && !hit.inside_toggle;
            if !eligible {
                continue;
            }
            panel.is_open = false;
            debug!(index = hit.index, "closable panel closed by outside click");
            self.persist(hit.index, false);
            self.push_event(PanelEvent::OutsideClickClosed { index: hit.index });
            effects.push(ToggleEffect {
                index: hit.index,
                is_open: false,
                height: HeightTarget::Zero,
                settle: None,
            });
        }
        effects
    }

    /// Indices of panels whose expanded height must be re-measured after a
    /// viewport resize. Closed panels are unaffected.
    pub fn viewport_resized(&mut self) -> Vec<usize> {
        let open: Vec<usize> = self
            .panels
            .iter()
            .filter(|p| p.wired && p.is_open)
            .map(|p| p.index)
            .collect();
        self.push_event(PanelEvent::ViewportResized {
            open_panels: open.len(),
        });
        open
    }

    /// `true` once a newer settle window has been issued than `window`.
    #[must_use]
    pub fn settle_superseded(&self, window: SettleWindow) -> bool {
        self.settle_generation > window.generation
    }

    // -- accessors --

    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    #[must_use]
    pub fn is_open(&self, index: usize) -> Option<bool> {
        self.panels.get(index).map(|p| p.is_open)
    }

    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Whether persisted writes are still being attempted.
    #[must_use]
    pub fn persistence_active(&self) -> bool {
        self.persistence_active
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Take all undrained events, oldest first.
    pub fn drain_events(&mut self) -> Vec<PanelEvent> {
        std::mem::take(&mut self.events)
    }

    /// Tear down the controller, handing back the persistence port.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            namespace: self.config.namespace.clone(),
            persistence_active: self.persistence_active,
            panels: self
                .panels
                .iter()
                .map(|p| PanelSnapshot {
                    index: p.index,
                    is_open: p.is_open,
                    wired: p.wired,
                    closable: p.flags.contains(PanelFlags::CLOSABLE),
                    closed_by_default: p.flags.contains(PanelFlags::CLOSED_BY_DEFAULT),
                })
                .collect(),
        }
    }

    // -- internals --

    fn key(&self, index: usize) -> String {
        storage_key(&self.config.namespace, index)
    }

    fn persist(&mut self, index: usize, is_open: bool) {
        if !self.persistence_active {
            return;
        }
        let key = self.key(index);
        let value = if is_open { "true" } else { "false" };
        if let Err(err) = self.store.set(&key, value) {
            warn!(%err, key, "persist failed, continuing in-memory for this session");
            self.persistence_active = false;
        }
    }

    fn push_event(&mut self, event: PanelEvent) {
        push_bounded(&mut self.events, event, self.config.event_buffer_max);
    }

    fn next_settle_window(&mut self) -> SettleWindow {
        self.settle_generation += 1;
        SettleWindow {
            generation: self.settle_generation,
            duration: self.config.settle_window,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::{MemoryStore, StorageError};

    fn controller() -> DisclosureController<MemoryStore> {
        DisclosureController::new(ControllerConfig::default(), MemoryStore::new())
    }

    fn complete(flags: PanelFlags) -> PanelProbe {
        PanelProbe::complete(flags)
    }

    // -- initialization --

    #[test]
    fn three_panels_one_closed_by_default() {
        let mut c = controller();
        let directives = c.initialize(&[
            complete(PanelFlags::empty()),
            complete(PanelFlags::CLOSED_BY_DEFAULT),
            complete(PanelFlags::empty()),
        ]);
        assert_eq!(c.is_open(0), Some(true));
        assert_eq!(c.is_open(1), Some(false));
        assert_eq!(c.is_open(2), Some(true));
        assert_eq!(directives[0].height, HeightTarget::Natural);
        assert_eq!(directives[1].height, HeightTarget::Zero);
        assert_eq!(directives[2].height, HeightTarget::Natural);
    }

    #[test]
    fn persisted_entry_beats_closed_by_default() {
        let mut store = MemoryStore::new();
        store.set("panel-open-0", "true").unwrap();
        store.set("panel-open-1", "false").unwrap();
        let mut c = DisclosureController::new(ControllerConfig::default(), store);
        c.initialize(&[
            complete(PanelFlags::CLOSED_BY_DEFAULT),
            complete(PanelFlags::empty()),
        ]);
        assert_eq!(c.is_open(0), Some(true));
        assert_eq!(c.is_open(1), Some(false));
    }

    #[test]
    fn incomplete_wrapper_keeps_later_indices_stable() {
        let mut store = MemoryStore::new();
        store.set("panel-open-2", "false").unwrap();
        let mut c = DisclosureController::new(ControllerConfig::default(), store);
        let directives = c.initialize(&[
            complete(PanelFlags::empty()),
            PanelProbe::incomplete(),
            complete(PanelFlags::empty()),
        ]);
        // The broken wrapper occupies index 1 but yields no directive.
        assert_eq!(directives.len(), 2);
        assert_eq!(c.panel_count(), 3);
        assert_eq!(c.panel(1).map(|p| p.wired), Some(false));
        assert_eq!(c.is_open(2), Some(false));
    }

    #[test]
    fn empty_page_is_not_an_error() {
        let mut c = controller();
        assert_eq!(c.initialize(&[]), vec![]);
        assert_eq!(c.panel_count(), 0);
    }

    // -- toggle --

    #[test]
    fn toggle_flips_state_and_persists() {
        let mut c = controller();
        c.initialize(&[complete(PanelFlags::empty())]);
        let effect = c.toggle(0).unwrap();
        assert_eq!(effect.is_open, false);
        assert_eq!(effect.height, HeightTarget::Zero);
        assert!(effect.settle.is_none());
        assert_eq!(c.store.get("panel-open-0").as_deref(), Some("false"));

        let effect = c.toggle(0).unwrap();
        assert_eq!(effect.is_open, true);
        assert_eq!(effect.height, HeightTarget::Natural);
        assert!(effect.settle.is_some());
        assert_eq!(c.store.get("panel-open-0").as_deref(), Some("true"));
    }

    #[test]
    fn toggle_unwired_or_unknown_is_noop() {
        let mut c = controller();
        c.initialize(&[PanelProbe::incomplete()]);
        assert_eq!(c.toggle(0), None);
        assert_eq!(c.toggle(9), None);
    }

    #[test]
    fn reopening_supersedes_previous_settle_window() {
        let mut c = controller();
        c.initialize(&[complete(PanelFlags::CLOSED_BY_DEFAULT)]);
        let first = c.toggle(0).unwrap().settle.unwrap();
        assert!(!c.settle_superseded(first));
        c.toggle(0); // close
        let second = c.toggle(0).unwrap().settle.unwrap();
        assert!(c.settle_superseded(first));
        assert!(!c.settle_superseded(second));
    }

    // -- outside click --

    fn hit(index: usize, inside_panel: bool, inside_toggle: bool) -> ClickHit {
        ClickHit {
            index,
            inside_panel,
            inside_toggle,
        }
    }

    #[test]
    fn outside_click_closes_only_eligible_panels() {
        let mut c = controller();
        c.initialize(&[
            complete(PanelFlags::CLOSABLE),
            complete(PanelFlags::empty()),
            complete(PanelFlags::CLOSABLE),
        ]);
        c.toggle(2); // close panel 2 beforehand
        let effects = c.outside_click(&[
            hit(0, false, false),
            hit(1, false, false),
            hit(2, false, false),
        ]);
        // 0 closes; 1 is not closable; 2 was already closed.
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].index, 0);
        assert_eq!(effects[0].height, HeightTarget::Zero);
        assert_eq!(c.is_open(0), Some(false));
        assert_eq!(c.is_open(1), Some(true));
        assert_eq!(c.store.get("panel-open-0").as_deref(), Some("false"));
    }

    #[test]
    fn clicks_inside_panel_or_toggle_do_not_close() {
        let mut c = controller();
        c.initialize(&[complete(PanelFlags::CLOSABLE)]);
        assert!(c.outside_click(&[hit(0, true, false)]).is_empty());
        assert!(c.outside_click(&[hit(0, false, true)]).is_empty());
        assert_eq!(c.is_open(0), Some(true));
    }

    // -- resize --

    #[test]
    fn resize_remeasures_open_panels_only() {
        let mut c = controller();
        c.initialize(&[
            complete(PanelFlags::empty()),
            complete(PanelFlags::CLOSED_BY_DEFAULT),
            complete(PanelFlags::empty()),
        ]);
        assert_eq!(c.viewport_resized(), vec![0, 2]);
    }

    // -- storage degradation --

    #[derive(Debug, Default)]
    struct PoisonedStore;

    impl StateStore for PoisonedStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".into()))
        }
    }

    #[test]
    fn persist_failure_degrades_to_in_memory() {
        let mut c = DisclosureController::new(ControllerConfig::default(), PoisonedStore);
        c.initialize(&[complete(PanelFlags::empty())]);
        let effect = c.toggle(0).unwrap();
        assert_eq!(effect.is_open, false);
        assert_eq!(c.is_open(0), Some(false));
        assert!(!c.persistence_active());
        // Further toggles still work, silently unpersisted.
        let effect = c.toggle(0).unwrap();
        assert_eq!(effect.is_open, true);
    }

    // -- events --

    #[test]
    fn operations_queue_domain_events() {
        let mut c = controller();
        c.initialize(&[complete(PanelFlags::CLOSABLE)]);
        c.toggle(0);
        c.toggle(0);
        c.viewport_resized();
        c.outside_click(&[hit(0, false, false)]);
        assert_eq!(
            c.drain_events(),
            vec![
                PanelEvent::Toggled {
                    index: 0,
                    is_open: false
                },
                PanelEvent::Toggled {
                    index: 0,
                    is_open: true
                },
                PanelEvent::ViewportResized { open_panels: 1 },
                PanelEvent::OutsideClickClosed { index: 0 },
            ]
        );
        assert!(c.drain_events().is_empty());
    }

    // -- snapshot --

    #[test]
    fn snapshot_reflects_flags_and_state() {
        let mut c = controller();
        c.initialize(&[
            complete(PanelFlags::CLOSABLE),
            complete(PanelFlags::CLOSED_BY_DEFAULT),
        ]);
        let snap = c.snapshot();
        assert_eq!(snap.namespace, "panel");
        assert!(snap.persistence_active);
        assert_eq!(snap.panels.len(), 2);
        assert!(snap.panels[0].closable);
        assert!(snap.panels[1].closed_by_default);
        assert!(!snap.panels[1].is_open);
    }
}
