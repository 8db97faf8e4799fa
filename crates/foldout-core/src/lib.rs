#![forbid(unsafe_code)]

//! `foldout-core` is the platform-independent half of the foldout page
//! controller: disclosure panel state with persisted open/closed choices,
//! exclusive toggle groups, and the decision logic behind resize and
//! outside-click handling.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (the wasm adapter, or a
//!   test) feeds discovery results and interaction in, and applies the
//!   returned directives; this crate never touches the DOM.
//! - **Injected persistence**: durable storage is a [`StateStore`] port, not
//!   an ambient global, so unavailability degrades instead of failing.
//! - **No blocking / no threads**: everything is synchronous within a frame;
//!   suitable for `wasm32-unknown-unknown`.

pub mod config;
pub mod controller;
pub mod event;
pub mod group;
pub mod panel;
pub mod store;

pub use config::ControllerConfig;
pub use controller::{
    ClickHit, ControllerSnapshot, DisclosureController, InitDirective, PanelSnapshot,
    SettleWindow, ToggleEffect,
};
pub use event::PanelEvent;
pub use group::{ExclusiveGroup, GroupChange};
pub use panel::{HeightTarget, Panel, PanelFlags, PanelProbe};
pub use store::{MemoryStore, StateStore, StorageError};
