//! Error taxonomy for the authentication session core.
//!
//! ERROR HANDLING
//! ==============
//! Gateway and storage failures are values, not panics: the session
//! controller parks them in per-mutation state and pages render them. Every
//! variant is `Clone + PartialEq` so it can live inside reactive state.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::util::validation::ValidationErrors;

/// Message shown for a rejected e-mail/password pair.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
/// Message shown when registration collides with an existing account.
pub const EMAIL_EXISTS_MESSAGE: &str = "Email already exists";
/// Fallback used when a failure body carries no `message`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";
/// Shown when the request never reached the backend.
pub const NETWORK_FAILURE_MESSAGE: &str = "Unable to reach the server. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Login rejected; carries the backend's message verbatim.
    #[error("{0}")]
    InvalidCredentials(String),

    /// Registration rejected because the e-mail is taken.
    #[error("{0}")]
    EmailAlreadyExists(String),

    /// Local form validation failed. Never produced by a gateway.
    #[error("{0}")]
    ValidationFailed(ValidationErrors),

    /// Any other backend or network failure.
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// The refresh token is missing, expired, or was rejected.
    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    /// Persisting the session failed; nothing was kept.
    #[error("session storage failed: {0}")]
    Storage(String),

    /// The same mutation was invoked again while still pending.
    #[error("{action} is already in progress")]
    MutationInFlight { action: &'static str },
}

impl AuthError {
    /// A backend failure with an optional HTTP status.
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Whether the session can no longer be used and must be dropped.
    #[must_use]
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

impl From<ValidationErrors> for AuthError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationFailed(errors)
    }
}

/// Invalid configuration value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
