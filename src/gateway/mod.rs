//! Auth gateway: the only component that talks to the identity backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Two implementations share one contract. `SimulatedGateway` is a
//! deterministic offline backend with seeded accounts; `RemoteGateway` calls
//! the real service through an [`HttpTransport`](crate::net::transport::HttpTransport).
//! [`connect`] picks one from config exactly once, at startup.
//!
//! Both write through to the [`TokenStore`] before returning a session, so
//! the controller and the store never disagree about who is signed in.

pub mod remote;
pub mod simulator;

use std::rc::Rc;

use async_trait::async_trait;

use crate::config::{GatewayMode, PortalConfig};
use crate::error::AuthError;
use crate::net::types::{ForgotPasswordData, LoginCredentials, RegisterData, Session};
use crate::session::token_store::TokenStore;

pub use remote::RemoteGateway;
pub use simulator::SimulatedGateway;

#[async_trait(?Send)]
pub trait AuthGateway {
    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidCredentials`] on a mismatch, otherwise a server
    /// or storage error.
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError>;

    /// Create an account and sign it in.
    ///
    /// # Errors
    ///
    /// [`AuthError::EmailAlreadyExists`] when the e-mail is taken.
    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError>;

    /// Request reset instructions. Succeeds whether or not the account
    /// exists.
    ///
    /// # Errors
    ///
    /// Only transport or server failures.
    async fn forgot_password(&self, data: &ForgotPasswordData) -> Result<String, AuthError>;

    /// Set a new password using an emailed reset token.
    ///
    /// # Errors
    ///
    /// Server-side token rejection or transport failures.
    async fn reset_password(&self, token: &str, password: &str) -> Result<String, AuthError>;

    /// Mint a new session from the stored refresh token.
    ///
    /// # Errors
    ///
    /// [`AuthError::SessionExpired`] when the refresh token is missing or
    /// rejected; the store has been cleared by then.
    async fn refresh(&self) -> Result<Session, AuthError>;

    /// Invalidate the refresh token remotely, then clear local state. Local
    /// state is cleared even when the remote call fails.
    ///
    /// # Errors
    ///
    /// The remote failure, reported after local cleanup.
    async fn logout(&self) -> Result<(), AuthError>;

    fn mode(&self) -> GatewayMode;
}

/// Build the gateway selected by `config`.
pub fn connect(config: &PortalConfig, store: Rc<TokenStore>) -> Rc<dyn AuthGateway> {
    log::info!("auth gateway mode: {:?}", config.gateway_mode);
    match config.gateway_mode {
        GatewayMode::Simulator => Rc::new(SimulatedGateway::new(store, config.mock_delay)),
        GatewayMode::Remote => {
            #[cfg(feature = "hydrate")]
            let transport = crate::net::transport::GlooTransport;
            #[cfg(not(feature = "hydrate"))]
            let transport = crate::net::transport::UnavailableTransport;
            Rc::new(RemoteGateway::new(&config.api_base_url, transport, store))
        }
    }
}
