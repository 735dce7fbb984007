//! Deterministic offline identity backend.
//!
//! Two seeded accounts (one USER, one ADMIN) share the password
//! `Password123!`; matching is exact and case-sensitive. Registration
//! succeeds for every e-mail except the reserved `existing@example.com`.
//! Password recovery always acknowledges, so the simulator never reveals
//! whether an account exists.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "simulator_test.rs"]
mod simulator_test;

use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use time::macros::datetime;
use uuid::Uuid;

use super::AuthGateway;
use crate::config::GatewayMode;
use crate::error::{AuthError, EMAIL_EXISTS_MESSAGE, INVALID_CREDENTIALS_MESSAGE};
use crate::net::types::{ForgotPasswordData, LoginCredentials, RegisterData, Role, Session, Token, TokenPair, User};
use crate::session::token_store::TokenStore;

pub const SEEDED_PASSWORD: &str = "Password123!";
pub const SEEDED_USER_EMAIL: &str = "john.doe@example.com";
pub const SEEDED_ADMIN_EMAIL: &str = "admin@example.com";
pub const RESERVED_EMAIL: &str = "existing@example.com";

pub const FORGOT_PASSWORD_ACK: &str = "Password reset email sent successfully";
pub const RESET_PASSWORD_ACK: &str = "Password reset successfully";

const ACCESS_TOKEN_TTL: time::Duration = time::Duration::minutes(15);
const REFRESH_TOKEN_TTL: time::Duration = time::Duration::days(7);

pub struct SimulatedGateway {
    store: Rc<TokenStore>,
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(store: Rc<TokenStore>, delay: Duration) -> Self {
        Self { store, delay }
    }

    async fn latency(&self) {
        #[cfg(feature = "hydrate")]
        {
            if !self.delay.is_zero() {
                gloo_timers::future::sleep(self.delay).await;
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self.delay;
        }
    }

    fn persist(&self, session: Session) -> Result<Session, AuthError> {
        self.store.set_auth_data(&session)?;
        Ok(session)
    }
}

#[async_trait(?Send)]
impl AuthGateway for SimulatedGateway {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        log::debug!("simulator: login {}", credentials.email);
        self.latency().await;
        let user = seeded_accounts()
            .into_iter()
            .find(|u| u.email == credentials.email && credentials.password == SEEDED_PASSWORD)
            .ok_or_else(|| AuthError::InvalidCredentials(INVALID_CREDENTIALS_MESSAGE.to_owned()))?;
        self.persist(issue_session(user, OffsetDateTime::now_utc()))
    }

    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError> {
        log::debug!("simulator: register {}", data.email);
        self.latency().await;
        if data.email == RESERVED_EMAIL {
            return Err(AuthError::EmailAlreadyExists(EMAIL_EXISTS_MESSAGE.to_owned()));
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4().to_string(),
            first_name: data.first_name.clone(),
            last_name: data.last_name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            role: Role::User,
            is_active: true,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        };
        self.persist(issue_session(user, now))
    }

    async fn forgot_password(&self, data: &ForgotPasswordData) -> Result<String, AuthError> {
        log::debug!("simulator: forgot password for {}", data.email);
        self.latency().await;
        Ok(FORGOT_PASSWORD_ACK.to_owned())
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<String, AuthError> {
        log::debug!("simulator: reset password");
        let _ = (token, password);
        self.latency().await;
        Ok(RESET_PASSWORD_ACK.to_owned())
    }

    async fn refresh(&self) -> Result<Session, AuthError> {
        let epoch = self.store.epoch();
        self.latency().await;
        let now = OffsetDateTime::now_utc();
        let live_refresh = self.store.get_refresh_token().is_some_and(|t| t.is_live_at(now));
        let user = match self.store.get_stored_user() {
            Some(user) if live_refresh => user,
            _ => {
                self.store.clear_auth_data_if_epoch(epoch);
                return Err(AuthError::SessionExpired);
            }
        };
        let session = issue_session(user, now);
        if !self.store.set_auth_data_if_epoch(&session, epoch)? {
            log::warn!("simulator: discarding refresh, session changed while in flight");
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        if self.store.get_stored_refresh_token().is_some() {
            log::debug!("simulator: revoking refresh token");
            self.latency().await;
        }
        self.store.clear_auth_data();
        Ok(())
    }

    fn mode(&self) -> GatewayMode {
        GatewayMode::Simulator
    }
}

/// The two accounts the simulator accepts.
pub fn seeded_accounts() -> [User; 2] {
    let seeded_at = datetime!(2024-01-01 0:00 UTC);
    let user = User {
        id: "1".to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        email: SEEDED_USER_EMAIL.to_owned(),
        phone: Some("+1234567890".to_owned()),
        role: Role::User,
        is_active: true,
        is_email_verified: true,
        created_at: seeded_at,
        updated_at: seeded_at,
    };
    let admin = User {
        id: "2".to_owned(),
        first_name: "Admin".to_owned(),
        last_name: "User".to_owned(),
        email: SEEDED_ADMIN_EMAIL.to_owned(),
        role: Role::Admin,
        ..user.clone()
    };
    [user, admin]
}

fn issue_session(user: User, now: OffsetDateTime) -> Session {
    let nonce = Uuid::new_v4().simple();
    Session {
        user,
        tokens: TokenPair {
            access: Token { token: format!("sim-access-{nonce}"), expires: now + ACCESS_TOKEN_TTL },
            refresh: Token { token: format!("sim-refresh-{nonce}"), expires: now + REFRESH_TOKEN_TTL },
        },
    }
}
