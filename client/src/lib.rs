//! # client
//!
//! Leptos + WASM frontend for the academy platform: admin CRUD screens,
//! dashboards, student lesson views, and the certification exam flow.
//!
//! Pages and components live here; resource types, validation and the exam
//! state machine come from the framework-agnostic `models` and `exam`
//! crates so the terminal client shares them.

#![recursion_limit = "256"]

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install logging and hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
