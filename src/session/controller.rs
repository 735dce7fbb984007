//! Session controller: the single source of truth the UI reads.
//!
//! SYSTEM CONTEXT
//! ==============
//! One instance per application lifetime, created by the app root and
//! shared through context. Pages invoke mutations here; the controller calls
//! the gateway, merges results into its query cache, and notifies
//! subscribers with a fresh [`AuthState`].
//!
//! INVARIANTS
//! ==========
//! - `is_logged_in` and every gate decision are read from the token store
//!   on every call, never from the last snapshot.
//! - A lapsed access token with a live refresh token is revalidated at most
//!   once per stored session; a failed attempt is not retried until the
//!   session changes.
//! - Each mutation kind has its own slot; kinds never block each other.
//! - A kind that is already pending rejects a second invocation without
//!   touching the in-flight one.
//! - No `RefCell` borrow is held across an `.await`.
//! - Logout always ends logged out, whatever the remote call did.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use time::OffsetDateTime;

use super::query_cache::{AUTH_NAMESPACE, QueryCache, USER_QUERY};
use super::token_store::TokenStore;
use crate::error::AuthError;
use crate::gateway::AuthGateway;
use crate::net::types::{ForgotPasswordData, LoginCredentials, RegisterData, Session, User};
use crate::state::auth::{AuthState, MutationKind, MutationState, Mutations};
use crate::util::auth::{GateDecision, protected_gate, public_only_gate};

type Listener = Rc<dyn Fn(&AuthState)>;

pub struct SessionController {
    gateway: Rc<dyn AuthGateway>,
    store: Rc<TokenStore>,
    cache: RefCell<QueryCache>,
    mutations: RefCell<Mutations>,
    loading: Cell<bool>,
    revalidating: Cell<bool>,
    /// Store epoch whose silent refresh failed without ending the session.
    failed_refresh_epoch: Cell<Option<u64>>,
    return_to: RefCell<Option<String>>,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionController {
    /// Starts in the loading state until [`SessionController::bootstrap`]
    /// has run.
    pub fn new(gateway: Rc<dyn AuthGateway>, store: Rc<TokenStore>) -> Self {
        Self {
            gateway,
            store,
            cache: RefCell::new(QueryCache::default()),
            mutations: RefCell::new(Mutations::default()),
            loading: Cell::new(true),
            revalidating: Cell::new(false),
            failed_refresh_epoch: Cell::new(None),
            return_to: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    pub fn is_logged_in(&self) -> bool {
        self.store.is_authenticated()
    }

    /// Startup resolution or a mid-session revalidation is running.
    pub fn is_loading(&self) -> bool {
        self.loading.get() || self.revalidating.get()
    }

    /// Cached profile, refetched from the token store once stale or
    /// invalidated.
    pub fn user(&self) -> Option<User> {
        let now = OffsetDateTime::now_utc();
        if let Some(cached) = self.cache.borrow().get_fresh::<Option<User>>(USER_QUERY, now) {
            return cached;
        }
        let user = self.store.get_stored_user();
        self.cache.borrow_mut().set(USER_QUERY, &user, now);
        user
    }

    pub fn mutation(&self, kind: MutationKind) -> MutationState {
        self.mutations.borrow().get(kind).clone()
    }

    pub fn snapshot(&self) -> AuthState {
        AuthState {
            user: self.user(),
            loading: self.is_loading(),
            logged_in: self.is_logged_in(),
            mutations: self.mutations.borrow().clone(),
        }
    }

    /// Register a callback run with a fresh snapshot after every transition.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Gate decision for a protected view at `requested`, evaluated against
    /// the token store now.
    pub fn protected_decision(&self, requested: &str) -> GateDecision {
        protected_gate(&self.snapshot(), requested)
    }

    pub fn public_only_decision(&self) -> GateDecision {
        public_only_gate(&self.snapshot())
    }

    /// The access token lapsed while a refresh is still possible and has not
    /// already failed for this session.
    pub fn needs_revalidation(&self) -> bool {
        !self.is_loading()
            && self.failed_refresh_epoch.get() != Some(self.store.epoch())
            && self.store.needs_refresh_at(OffsetDateTime::now_utc())
    }

    /// Remember where a gated navigation was headed.
    pub fn remember_return_to(&self, path: Option<String>) {
        *self.return_to.borrow_mut() = path;
    }

    pub fn take_return_to(&self) -> Option<String> {
        self.return_to.borrow_mut().take()
    }

    // =========================================================================
    // STARTUP
    // =========================================================================

    /// Resolve the persisted session once at app start. Silently refreshes
    /// an expired access token when a live refresh token is stored.
    pub async fn bootstrap(&self) {
        self.loading.set(true);
        self.notify();
        self.ensure_fresh_session().await;
        self.cache.borrow_mut().invalidate(USER_QUERY);
        self.loading.set(false);
        log::debug!("session bootstrap done, logged_in={}", self.is_logged_in());
        self.notify();
    }

    /// Silently refresh a lapsed session before a protected view renders.
    /// Subscribers see `loading` while the refresh is in flight.
    pub async fn revalidate(&self) -> bool {
        if !self.needs_revalidation() {
            return self.is_logged_in();
        }
        self.revalidating.set(true);
        self.notify();
        let usable = self.ensure_fresh_session().await;
        self.revalidating.set(false);
        log::debug!("session revalidated, logged_in={usable}");
        self.notify();
        usable
    }

    /// Refresh the session if the access token lapsed but the refresh token
    /// is still live. Returns whether the session is usable afterwards.
    pub async fn ensure_fresh_session(&self) -> bool {
        if !self.store.needs_refresh_at(OffsetDateTime::now_utc()) {
            return self.is_logged_in();
        }
        match self.gateway.refresh().await {
            Ok(session) => {
                self.adopt_user(&session.user);
                true
            }
            Err(e) => {
                log::warn!("silent refresh failed: {e}");
                if e.is_session_fatal() {
                    self.cache.borrow_mut().clear();
                } else {
                    self.failed_refresh_epoch.set(Some(self.store.epoch()));
                }
                false
            }
        }
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// # Errors
    ///
    /// The gateway's error, also retained in the login slot.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Session, AuthError> {
        self.begin(MutationKind::Login)?;
        let result = self.gateway.login(&credentials).await;
        if let Ok(session) = &result {
            self.adopt_user(&session.user);
        }
        self.finish(MutationKind::Login, &result, None);
        result
    }

    /// # Errors
    ///
    /// The gateway's error, also retained in the register slot.
    pub async fn register(&self, data: RegisterData) -> Result<Session, AuthError> {
        self.begin(MutationKind::Register)?;
        let result = self.gateway.register(&data).await;
        if let Ok(session) = &result {
            self.adopt_user(&session.user);
        }
        self.finish(MutationKind::Register, &result, None);
        result
    }

    /// # Errors
    ///
    /// The gateway's error, also retained in the forgot-password slot.
    pub async fn forgot_password(&self, data: ForgotPasswordData) -> Result<String, AuthError> {
        self.begin(MutationKind::ForgotPassword)?;
        let result = self.gateway.forgot_password(&data).await;
        let message = result.as_ref().ok().cloned();
        self.finish(MutationKind::ForgotPassword, &result, message);
        result
    }

    /// # Errors
    ///
    /// The gateway's error, also retained in the reset-password slot.
    pub async fn reset_password(&self, token: String, password: String) -> Result<String, AuthError> {
        self.begin(MutationKind::ResetPassword)?;
        let result = self.gateway.reset_password(&token, &password).await;
        let message = result.as_ref().ok().cloned();
        self.finish(MutationKind::ResetPassword, &result, message);
        result
    }

    /// Sign out. Local tokens and every cached read are gone afterwards even
    /// when the remote call fails.
    ///
    /// # Errors
    ///
    /// The remote failure, also retained in the logout slot.
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.begin(MutationKind::Logout)?;
        let result = self.gateway.logout().await;
        if result.is_err() {
            self.store.clear_auth_data();
        }
        self.forget_identity();
        self.finish(MutationKind::Logout, &result, None);
        result
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn begin(&self, kind: MutationKind) -> Result<(), AuthError> {
        {
            let mut mutations = self.mutations.borrow_mut();
            let slot = mutations.get_mut(kind);
            if slot.is_pending() {
                return Err(AuthError::MutationInFlight { action: kind.label() });
            }
            *slot = MutationState::Pending;
        }
        self.notify();
        Ok(())
    }

    fn finish<T>(&self, kind: MutationKind, result: &Result<T, AuthError>, message: Option<String>) {
        let next = match result {
            Ok(_) => MutationState::Succeeded { message },
            Err(e) => {
                log::error!("{} failed: {e}", kind.label());
                MutationState::Failed(e.clone())
            }
        };
        *self.mutations.borrow_mut().get_mut(kind) = next;
        self.notify();
    }

    /// Replace the cached profile and mark the whole session namespace
    /// stale so dependent reads refetch for the new identity.
    fn adopt_user(&self, user: &User) {
        let mut cache = self.cache.borrow_mut();
        cache.set(USER_QUERY, &Some(user), OffsetDateTime::now_utc());
        cache.invalidate(AUTH_NAMESPACE);
    }

    /// Purge every cached read so nothing leaks into the next account.
    fn forget_identity(&self) {
        self.cache.borrow_mut().clear();
    }

    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        if listeners.is_empty() {
            return;
        }
        let state = self.snapshot();
        for listener in listeners {
            listener(&state);
        }
    }
}
