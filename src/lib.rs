//! # portal-client
//!
//! Leptos + WASM client for the planning portal (fund sources, WFPs, PPMPs,
//! APPs).
//!
//! This crate contains the route table and auth guard, the permission gate
//! over the cookie-stored permission list, the JSON HTTP helper, display
//! formatters, and the pages that sit behind them. Browser-only code is gated
//! behind the `csr` feature; everything else is plain Rust and unit-tested
//! natively.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod routes;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// WASM entry point: install browser logging and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}
