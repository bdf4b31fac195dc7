//! # car-auth
//!
//! Leptos + WASM client-side authentication for the Car front end.
//!
//! This crate holds the session store (token and user lifecycle backed by
//! `localStorage` and the backend's `/auth/login` and `/users/me`
//! endpoints), the route guards that redirect on missing sessions or roles,
//! and the pages that consume them.

pub mod app;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: installs logging and hydrates the server-rendered app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
