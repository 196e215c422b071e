//! # client
//!
//! Leptos + WASM front-end for the role-gated HR workspace. Users sign in
//! with Google through Firebase, are classified as admin or employee, and
//! are routed to the matching dashboard.
//!
//! This crate contains the pages, components, session and login state, the
//! route guard, and the Firebase/Firestore bindings. All authentication and
//! record storage is delegated to Firebase; nothing here trusts a server.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(app::App);
}
