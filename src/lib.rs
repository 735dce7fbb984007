//! # loan-portal
//!
//! Leptos + WASM client for the Loan Assessment Portal.
//!
//! The core of this crate is the client-side authentication session: a
//! persistent token store, an auth gateway with remote and simulated
//! backends, a session controller that owns mutation state and the query
//! cache, and route gates that turn session state into redirects. Pages for
//! sign-in, registration, password recovery, and the dashboard sit on top.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod gateway;
pub mod net;
pub mod pages;
pub mod session;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

/// Browser entry point: installs logging and hydrates the server-rendered
/// shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Debug) {
        // Only fails when a logger is already installed, which keeps working.
        log::warn!("console logger not installed: {e}");
    }
    leptos::mount::hydrate_body(app::App);
}
