//! Keyed cache of derived reads that depend on the signed-in identity.
//!
//! DESIGN
//! ======
//! Keys are segment paths such as `["auth", "user"]`. Invalidation works on
//! prefixes so a new identity can mark a whole namespace stale in one call,
//! and `clear` drops everything when the identity goes away.

#[cfg(test)]
#[path = "query_cache_test.rs"]
mod query_cache_test;

use std::collections::BTreeMap;

use serde::Serialize;
use serde::de::DeserializeOwned;
use time::{Duration, OffsetDateTime};

/// Namespace for every entry tied to the current session.
pub const AUTH_NAMESPACE: &[&str] = &["auth"];
/// The cached profile of the signed-in user.
pub const USER_QUERY: &[&str] = &["auth", "user"];
/// Default freshness window for cached reads.
pub const DEFAULT_STALE_TIME: Duration = Duration::minutes(5);

#[derive(Clone, Debug)]
struct Entry {
    value: serde_json::Value,
    updated_at: OffsetDateTime,
    invalidated: bool,
}

#[derive(Debug)]
pub struct QueryCache {
    entries: BTreeMap<Vec<String>, Entry>,
    stale_time: Duration,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new(DEFAULT_STALE_TIME)
    }
}

impl QueryCache {
    #[must_use]
    pub fn new(stale_time: Duration) -> Self {
        Self { entries: BTreeMap::new(), stale_time }
    }

    /// Store `value` under `key`, marking it fresh as of `now`.
    pub fn set<T: Serialize>(&mut self, key: &[&str], value: &T, now: OffsetDateTime) {
        let Ok(value) = serde_json::to_value(value) else {
            log::warn!("query cache: value for {key:?} is not serializable");
            return;
        };
        self.entries.insert(owned_key(key), Entry { value, updated_at: now, invalidated: false });
    }

    /// The cached value if present, not invalidated, and within the stale
    /// time.
    pub fn get_fresh<T: DeserializeOwned>(&self, key: &[&str], now: OffsetDateTime) -> Option<T> {
        let entry = self.entries.get(&owned_key(key))?;
        if entry.invalidated || now - entry.updated_at >= self.stale_time {
            return None;
        }
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Whether an entry exists, fresh or not.
    #[must_use]
    pub fn contains(&self, key: &[&str]) -> bool {
        self.entries.contains_key(&owned_key(key))
    }

    /// Mark every entry whose key starts with `prefix` as stale. Returns the
    /// number of entries affected.
    pub fn invalidate(&mut self, prefix: &[&str]) -> usize {
        let mut count = 0;
        for (key, entry) in &mut self.entries {
            if has_prefix(key, prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        count
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn owned_key(key: &[&str]) -> Vec<String> {
    key.iter().map(|s| (*s).to_owned()).collect()
}

fn has_prefix(key: &[String], prefix: &[&str]) -> bool {
    key.len() >= prefix.len() && key.iter().zip(prefix).all(|(k, p)| k == p)
}
