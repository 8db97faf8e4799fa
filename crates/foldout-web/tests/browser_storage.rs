#![cfg(target_arch = "wasm32")]
#![forbid(unsafe_code)]

//! Browser-only checks for the storage probe and the page store fallback.
//! Run with `wasm-pack test --headless --chrome crates/foldout-web`.

use foldout_core::StateStore;
use foldout_web::storage::{LocalStorageStore, PageStore};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn probe_finds_browser_storage() {
    let window = web_sys::window().unwrap();
    assert!(LocalStorageStore::probe(&window).is_some());
}

#[wasm_bindgen_test]
fn page_store_round_trips() {
    let window = web_sys::window().unwrap();
    let mut store = PageStore::detect(&window);
    store.set("panel-open-998", "false").unwrap();
    assert_eq!(store.get("panel-open-998").as_deref(), Some("false"));
    if let PageStore::Durable(_) = store {
        // Clean up the real origin store.
        window
            .local_storage()
            .unwrap()
            .unwrap()
            .remove_item("panel-open-998")
            .unwrap();
    }
}
