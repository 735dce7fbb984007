//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared `RwSignal<AuthState>` and the session handle
//! from Leptos context; pages compose them.

pub mod auth_layout;
pub mod route_gate;
