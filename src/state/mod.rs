//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `auth` holds the plain session data observed by guards and views;
//! `session` owns the operations that mutate it and talk to the backend.

pub mod auth;
pub mod session;
