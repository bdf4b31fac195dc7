//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page installs its own route guard and reads the session store from
//! context; none of them talk to the backend directly.

pub mod admin;
pub mod forbidden;
pub mod login;
pub mod profile;
