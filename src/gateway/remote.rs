//! Gateway backed by the real identity service.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx replies carry `{message}`; that text is surfaced verbatim. The
//! status decides the variant: 400 or 401 on login is a credential mismatch, 409 on
//! register is a taken e-mail, 401/403 on refresh ends the session, and
//! anything else is a server error. Transport failures get a generic
//! message and the detail goes to the log.

#[cfg(test)]
#[path = "remote_test.rs"]
mod remote_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::AuthGateway;
use crate::config::GatewayMode;
use crate::error::{AuthError, GENERIC_FAILURE_MESSAGE, NETWORK_FAILURE_MESSAGE};
use crate::net::transport::{HttpTransport, endpoint_url};
use crate::net::types::{
    ErrorBody, ForgotPasswordData, LoginCredentials, MessageResponse, RefreshTokenBody, RegisterData,
    ResetPasswordData, Session,
};
use crate::session::token_store::TokenStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Login,
    Register,
    ForgotPassword,
    ResetPassword,
    Refresh,
    Logout,
}

impl Operation {
    fn path(self) -> &'static str {
        match self {
            Self::Login => "/auth/login",
            Self::Register => "/auth/register",
            Self::ForgotPassword => "/auth/forgot-password",
            Self::ResetPassword => "/auth/reset-password",
            Self::Refresh => "/auth/refresh",
            Self::Logout => "/auth/logout",
        }
    }
}

pub struct RemoteGateway<T> {
    base_url: String,
    transport: T,
    store: Rc<TokenStore>,
}

impl<T: HttpTransport> RemoteGateway<T> {
    pub fn new(base_url: &str, transport: T, store: Rc<TokenStore>) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), transport, store }
    }

    async fn post<B: Serialize>(&self, op: Operation, body: &B, bearer: Option<&str>) -> Result<String, AuthError> {
        let body = serde_json::to_value(body).map_err(|e| AuthError::server(None, e.to_string()))?;
        let url = endpoint_url(&self.base_url, op.path());
        let reply = self.transport.post_json(&url, &body, bearer).await.map_err(|e| {
            log::warn!("{op:?} request to {url} failed: {e}");
            AuthError::server(None, NETWORK_FAILURE_MESSAGE)
        })?;
        if reply.is_success() {
            Ok(reply.body)
        } else {
            Err(failure_for(op, reply.status, &reply.body))
        }
    }

    async fn post_for<B: Serialize, R: DeserializeOwned>(&self, op: Operation, body: &B) -> Result<R, AuthError> {
        let raw = self.post(op, body, None).await?;
        parse_success(op, &raw)
    }

    fn persist(&self, session: Session) -> Result<Session, AuthError> {
        self.store.set_auth_data(&session)?;
        Ok(session)
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> AuthGateway for RemoteGateway<T> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<Session, AuthError> {
        let session = self.post_for(Operation::Login, credentials).await?;
        self.persist(session)
    }

    async fn register(&self, data: &RegisterData) -> Result<Session, AuthError> {
        let session = self.post_for(Operation::Register, data).await?;
        self.persist(session)
    }

    async fn forgot_password(&self, data: &ForgotPasswordData) -> Result<String, AuthError> {
        let ack: MessageResponse = self.post_for(Operation::ForgotPassword, data).await?;
        Ok(ack.message)
    }

    async fn reset_password(&self, token: &str, password: &str) -> Result<String, AuthError> {
        let body = ResetPasswordData { token: token.to_owned(), password: password.to_owned() };
        let ack: MessageResponse = self.post_for(Operation::ResetPassword, &body).await?;
        Ok(ack.message)
    }

    async fn refresh(&self) -> Result<Session, AuthError> {
        let epoch = self.store.epoch();
        let Some(refresh_token) = self.store.get_stored_refresh_token() else {
            self.store.clear_auth_data();
            return Err(AuthError::SessionExpired);
        };
        match self.post_for::<_, Session>(Operation::Refresh, &RefreshTokenBody { refresh_token }).await {
            Ok(session) => {
                if self.store.set_auth_data_if_epoch(&session, epoch)? {
                    Ok(session)
                } else {
                    log::warn!("discarding refresh result, session changed while in flight");
                    Err(AuthError::SessionExpired)
                }
            }
            Err(AuthError::SessionExpired) => {
                self.store.clear_auth_data_if_epoch(epoch);
                Err(AuthError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let remote = match self.store.get_stored_refresh_token() {
            Some(refresh_token) => {
                let bearer = self.store.get_access_token().map(|t| t.token);
                self.post(Operation::Logout, &RefreshTokenBody { refresh_token }, bearer.as_deref())
                    .await
                    .map(|_| ())
            }
            None => Ok(()),
        };
        self.store.clear_auth_data();
        if let Err(e) = &remote {
            log::warn!("remote logout failed, local session cleared anyway: {e}");
        }
        remote
    }

    fn mode(&self) -> GatewayMode {
        GatewayMode::Remote
    }
}

fn failure_for(op: Operation, status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
    match (op, status) {
        (Operation::Login, 400 | 401) => AuthError::InvalidCredentials(message),
        (Operation::Register, 409) => AuthError::EmailAlreadyExists(message),
        (Operation::Refresh, 401 | 403) => AuthError::SessionExpired,
        _ => AuthError::server(Some(status), message),
    }
}

fn parse_success<R: DeserializeOwned>(op: Operation, raw: &str) -> Result<R, AuthError> {
    serde_json::from_str(raw).map_err(|e| {
        log::error!("{op:?} returned an unreadable body: {e}");
        AuthError::server(None, GENERIC_FAILURE_MESSAGE)
    })
}
