//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. The session controller produces a fresh
//! `AuthState` after every transition; the app root mirrors it into an
//! `RwSignal<AuthState>` provided via context.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::error::AuthError;
use crate::net::types::User;

/// The five independent session mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Logout,
}

impl MutationKind {
    pub const ALL: [Self; 5] = [Self::Login, Self::Register, Self::ForgotPassword, Self::ResetPassword, Self::Logout];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ForgotPassword => "forgot-password",
            Self::ResetPassword => "reset-password",
            Self::Logout => "logout",
        }
    }
}

/// Lifecycle of one mutation kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Succeeded { message: Option<String> },
    Failed(AuthError),
}

impl MutationState {
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn error(&self) -> Option<&AuthError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded { message } => message.as_deref(),
            _ => None,
        }
    }
}

/// Per-kind mutation slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mutations {
    pub login: MutationState,
    pub register: MutationState,
    pub forgot_password: MutationState,
    pub reset_password: MutationState,
    pub logout: MutationState,
}

impl Mutations {
    #[must_use]
    pub fn get(&self, kind: MutationKind) -> &MutationState {
        match kind {
            MutationKind::Login => &self.login,
            MutationKind::Register => &self.register,
            MutationKind::ForgotPassword => &self.forgot_password,
            MutationKind::ResetPassword => &self.reset_password,
            MutationKind::Logout => &self.logout,
        }
    }

    pub fn get_mut(&mut self, kind: MutationKind) -> &mut MutationState {
        match kind {
            MutationKind::Login => &mut self.login,
            MutationKind::Register => &mut self.register,
            MutationKind::ForgotPassword => &mut self.forgot_password,
            MutationKind::ResetPassword => &mut self.reset_password,
            MutationKind::Logout => &mut self.logout,
        }
    }
}

/// Snapshot of the session as the UI sees it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    /// The startup profile resolution is still running.
    pub loading: bool,
    /// Derived from the token store when the snapshot was taken.
    pub logged_in: bool,
    pub mutations: Mutations,
}

impl AuthState {
    #[must_use]
    pub fn mutation(&self, kind: MutationKind) -> &MutationState {
        self.mutations.get(kind)
    }

    #[must_use]
    pub fn is_pending(&self, kind: MutationKind) -> bool {
        self.mutations.get(kind).is_pending()
    }
}
