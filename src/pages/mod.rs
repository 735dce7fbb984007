//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page validates its form, hands the typed request to the session
//! controller, and renders from the shared `AuthState`. Redirects after a
//! state change belong to `components::route_gate`, not the pages.

pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod register;
pub mod reset_password;

use crate::state::auth::{AuthState, MutationKind};

/// Error text of the last failed `kind`, if the slot holds one.
pub(crate) fn failure_text(state: &AuthState, kind: MutationKind) -> Option<String> {
    state.mutation(kind).error().map(ToString::to_string)
}
