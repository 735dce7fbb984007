//! Shared auth routing decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components apply identical redirect behavior. The decisions are
//! pure functions of the current [`AuthState`] so they are testable without a
//! router; `components::route_gate` turns them into navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const FORGOT_PASSWORD_PATH: &str = "/forgot-password";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
pub const DASHBOARD_PATH: &str = "/dashboard";

const PUBLIC_ONLY_PATHS: [&str; 4] = [LOGIN_PATH, REGISTER_PATH, FORGOT_PASSWORD_PATH, RESET_PASSWORD_PATH];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    /// Startup resolution is still running; show a placeholder.
    Loading,
    Render,
    Redirect { to: &'static str, return_to: Option<String> },
}

/// Decide what a protected view shows for `requested` (path plus query).
pub fn protected_gate(state: &AuthState, requested: &str) -> GateDecision {
    if state.loading {
        GateDecision::Loading
    } else if state.logged_in {
        GateDecision::Render
    } else {
        GateDecision::Redirect { to: LOGIN_PATH, return_to: Some(requested.to_owned()) }
    }
}

/// Sign-in and recovery pages bounce an authenticated user to the dashboard.
pub fn public_only_gate(state: &AuthState) -> GateDecision {
    if state.logged_in {
        GateDecision::Redirect { to: DASHBOARD_PATH, return_to: None }
    } else {
        GateDecision::Render
    }
}

pub fn is_public_only_path(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
    PUBLIC_ONLY_PATHS.contains(&path)
}

/// Where to land after a successful sign-in. Only same-origin paths that are
/// not themselves sign-in pages are honored.
pub fn post_login_target(return_to: Option<String>) -> String {
    return_to
        .filter(|p| p.starts_with('/') && !p.starts_with("//") && !p.contains('\\'))
        .filter(|p| !is_public_only_path(p))
        .unwrap_or_else(|| DASHBOARD_PATH.to_owned())
}
