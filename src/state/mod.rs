//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The UI depends only on the `AuthState` snapshot; everything that mutates
//! it lives in `session`.

pub mod auth;
