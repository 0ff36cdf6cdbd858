//! # client
//!
//! Leptos + WASM front end for internmatch.
//!
//! This crate wires the `session` container to the browser: a localStorage
//! identity store, an HTTP auth service talking to the API server, a guard
//! component driven by the shared route table, and the landing, login,
//! registration and profile pages.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
