//! Shared fixtures for unit tests.

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use time::{Duration, OffsetDateTime};

use crate::net::transport::{HttpReply, HttpTransport};
use crate::net::types::{Role, Session, Token, TokenPair, User};
use crate::session::storage::{KeyValueStore, MemoryStore};
use crate::session::token_store::TokenStore;

pub fn user_with_email(email: &str) -> User {
    let created = time::macros::datetime!(2024-01-01 0:00 UTC);
    User {
        id: "u-1".to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        email: email.to_owned(),
        phone: None,
        role: Role::User,
        is_active: true,
        is_email_verified: true,
        created_at: created,
        updated_at: created,
    }
}

pub fn session_expiring(email: &str, access_in: Duration, refresh_in: Duration) -> Session {
    let now = OffsetDateTime::now_utc();
    Session {
        user: user_with_email(email),
        tokens: TokenPair {
            access: Token { token: format!("access-{email}"), expires: now + access_in },
            refresh: Token { token: format!("refresh-{email}"), expires: now + refresh_in },
        },
    }
}

/// Access valid for 15 minutes, refresh for 7 days.
pub fn live_session(email: &str) -> Session {
    session_expiring(email, Duration::minutes(15), Duration::days(7))
}

/// Access expired a minute ago, refresh still live.
pub fn stale_session(email: &str) -> Session {
    session_expiring(email, Duration::minutes(-1), Duration::days(7))
}

pub fn memory_token_store() -> (Rc<MemoryStore>, Rc<TokenStore>) {
    let backend = Rc::new(MemoryStore::new());
    let store = Rc::new(TokenStore::new(backend.clone()));
    (backend, store)
}

/// Memory store that refuses writes to selected keys.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub failing_keys: RefCell<HashSet<String>>,
}

impl FlakyStore {
    pub fn failing_on(key: &str) -> Self {
        let store = Self::default();
        store.failing_keys.borrow_mut().insert(key.to_owned());
        store
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        if self.failing_keys.borrow().contains(key) {
            return Err("quota exceeded".to_owned());
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) {
        self.inner.remove(key);
    }
}

/// A request observed by [`ScriptedTransport`].
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: serde_json::Value,
    pub bearer: Option<String>,
}

/// Transport that replays queued replies in order and records requests.
#[derive(Default)]
pub struct ScriptedTransport {
    pub replies: RefCell<VecDeque<Result<HttpReply, String>>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpReply { status, body: body.to_string() }));
        self
    }

    pub fn reply_raw(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(Ok(HttpReply { status, body: body.to_owned() }));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.replies.borrow_mut().push_back(Err(reason.to_owned()));
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &serde_json::Value, bearer: Option<&str>) -> Result<HttpReply, String> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_owned(),
            body: body.clone(),
            bearer: bearer.map(str::to_owned),
        });
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".to_owned()))
    }
}

#[async_trait(?Send)]
impl HttpTransport for Rc<ScriptedTransport> {
    async fn post_json(&self, url: &str, body: &serde_json::Value, bearer: Option<&str>) -> Result<HttpReply, String> {
        self.as_ref().post_json(url, body, bearer).await
    }
}
