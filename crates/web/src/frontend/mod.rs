//! Leptos frontend for the browser build.

pub mod app;
pub mod local_storage;
pub mod sidebar_view;
pub mod toasts;
pub mod voucher_view;

use wasm_bindgen::prelude::*;

/// WASM entry point, called when the module loads.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount_to_body(app::App);
}
