//! Durable persistence of the current session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The token store is the only owner of the persisted session. The gateway
//! writes through it after every successful login/register/refresh and the
//! session controller derives "logged in" from it on every read.
//!
//! INVARIANTS
//! ==========
//! - Three keys: access token, refresh token, user profile. They are
//!   written together and cleared together.
//! - The access token is written last, so `is_authenticated` only turns
//!   true once the rest of the session is in place. A failed write removes
//!   every key again.
//! - Every write or clear bumps `epoch`, letting a slow refresh detect that
//!   the session changed underneath it.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;

use super::storage::KeyValueStore;
use crate::error::AuthError;
use crate::net::types::{Session, Token, User};

pub const ACCESS_TOKEN_KEY: &str = "auth_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user_data";

pub struct TokenStore {
    backend: Rc<dyn KeyValueStore>,
    epoch: Cell<u64>,
}

impl TokenStore {
    pub fn new(backend: Rc<dyn KeyValueStore>) -> Self {
        Self { backend, epoch: Cell::new(0) }
    }

    /// Persist a full session, replacing whatever was stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Storage`] if any key could not be written; the
    /// store is left empty in that case.
    pub fn set_auth_data(&self, session: &Session) -> Result<(), AuthError> {
        self.bump_epoch();
        let written = self
            .write_json(USER_KEY, &session.user)
            .and_then(|()| self.write_json(REFRESH_TOKEN_KEY, &session.tokens.refresh))
            .and_then(|()| self.write_json(ACCESS_TOKEN_KEY, &session.tokens.access));
        if let Err(e) = written {
            log::error!("persisting session failed, clearing partial write: {e}");
            self.remove_all();
            return Err(AuthError::Storage(e));
        }
        Ok(())
    }

    /// Persist `session` only if nothing was written or cleared since
    /// `epoch` was observed. Returns whether the write happened.
    ///
    /// # Errors
    ///
    /// Same as [`TokenStore::set_auth_data`].
    pub fn set_auth_data_if_epoch(&self, session: &Session, epoch: u64) -> Result<bool, AuthError> {
        if self.epoch.get() != epoch {
            return Ok(false);
        }
        self.set_auth_data(session)?;
        Ok(true)
    }

    /// Stored profile, or `None` when missing or unreadable.
    pub fn get_stored_user(&self) -> Option<User> {
        self.read_json(USER_KEY)
    }

    pub fn get_stored_refresh_token(&self) -> Option<String> {
        self.read_json::<Token>(REFRESH_TOKEN_KEY).map(|t| t.token)
    }

    pub fn get_refresh_token(&self) -> Option<Token> {
        self.read_json(REFRESH_TOKEN_KEY)
    }

    pub fn get_access_token(&self) -> Option<Token> {
        self.read_json(ACCESS_TOKEN_KEY)
    }

    /// True iff a non-expired access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(OffsetDateTime::now_utc())
    }

    pub fn is_authenticated_at(&self, now: OffsetDateTime) -> bool {
        self.get_access_token().is_some_and(|t| t.is_live_at(now))
    }

    /// The access token is gone or expired, but a user and a live refresh
    /// token are still stored.
    pub fn needs_refresh_at(&self, now: OffsetDateTime) -> bool {
        !self.is_authenticated_at(now)
            && self.get_stored_user().is_some()
            && self.get_refresh_token().is_some_and(|t| t.is_live_at(now))
    }

    /// Remove every session key. Safe to call on an empty store.
    pub fn clear_auth_data(&self) {
        self.bump_epoch();
        self.remove_all();
    }

    /// Clear only if nothing was written or cleared since `epoch` was
    /// observed. Returns whether the clear happened.
    pub fn clear_auth_data_if_epoch(&self, epoch: u64) -> bool {
        if self.epoch.get() != epoch {
            return false;
        }
        self.clear_auth_data();
        true
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.get()
    }

    fn bump_epoch(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
    }

    fn remove_all(&self) {
        self.backend.remove(ACCESS_TOKEN_KEY);
        self.backend.remove(REFRESH_TOKEN_KEY);
        self.backend.remove(USER_KEY);
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), String> {
        let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
        self.backend.set(key, &raw)
    }

    fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        serde_json::from_str(&raw).ok()
    }
}
