#![forbid(unsafe_code)]

//! `foldout-web` is the browser half of foldout: DOM discovery, class and
//! style application, `localStorage` persistence, and listener wiring for
//! the disclosure panels, sidebar, accordions, animation canvases, and
//! iframe height messaging.
//!
//! All decisions live in `foldout-core`; this crate measures, applies, and
//! forwards. DOM-touching modules only exist on `wasm32`; the pure helpers
//! (class contract, canvas sizing math) compile and test on the host.

pub mod canvas;
pub mod classes;

#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod embed;
#[cfg(target_arch = "wasm32")]
pub mod schedule;
#[cfg(target_arch = "wasm32")]
pub mod settle;
#[cfg(target_arch = "wasm32")]
pub mod sidebar;
#[cfg(target_arch = "wasm32")]
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PageApp;
