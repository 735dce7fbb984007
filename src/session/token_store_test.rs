use super::*;
use crate::session::storage::MemoryStore;
use crate::test_support::{FlakyStore, live_session, memory_token_store, session_expiring, stale_session};

// =============================================================
// set_auth_data / reads
// =============================================================

#[test]
fn set_auth_data_persists_all_three_keys() {
    let (backend, store) = memory_token_store();
    let session = live_session("john.doe@example.com");

    store.set_auth_data(&session).unwrap();

    assert_eq!(backend.len(), 3);
    assert_eq!(store.get_stored_user(), Some(session.user.clone()));
    assert_eq!(store.get_stored_refresh_token().as_deref(), Some("refresh-john.doe@example.com"));
    assert_eq!(store.get_access_token(), Some(session.tokens.access));
    assert!(store.is_authenticated());
}

#[test]
fn set_auth_data_replaces_previous_session_wholesale() {
    let (_, store) = memory_token_store();
    store.set_auth_data(&live_session("first@example.com")).unwrap();
    store.set_auth_data(&live_session("second@example.com")).unwrap();

    assert_eq!(store.get_stored_user().unwrap().email, "second@example.com");
    assert_eq!(store.get_stored_refresh_token().as_deref(), Some("refresh-second@example.com"));
}

#[test]
fn failed_write_leaves_no_partial_session() {
    let backend = Rc::new(FlakyStore::failing_on(ACCESS_TOKEN_KEY));
    let store = TokenStore::new(backend.clone());

    let err = store.set_auth_data(&live_session("john.doe@example.com")).unwrap_err();

    assert!(matches!(err, AuthError::Storage(_)));
    assert!(backend.inner.is_empty());
    assert!(store.get_stored_user().is_none());
    assert!(store.get_stored_refresh_token().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn failed_write_also_drops_previously_stored_session() {
    let backend = Rc::new(FlakyStore::default());
    let store = TokenStore::new(backend.clone());
    store.set_auth_data(&live_session("old@example.com")).unwrap();

    backend.failing_keys.borrow_mut().insert(REFRESH_TOKEN_KEY.to_owned());
    assert!(store.set_auth_data(&live_session("new@example.com")).is_err());

    assert!(store.get_stored_user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn corrupt_user_record_reads_as_absent() {
    let backend = Rc::new(MemoryStore::new());
    backend.set(USER_KEY, "{not json").unwrap();
    let store = TokenStore::new(backend);
    assert!(store.get_stored_user().is_none());
}

#[test]
fn empty_store_reads_absent() {
    let (_, store) = memory_token_store();
    assert!(store.get_stored_user().is_none());
    assert!(store.get_stored_refresh_token().is_none());
    assert!(!store.is_authenticated());
}

// =============================================================
// is_authenticated
// =============================================================

#[test]
fn expired_access_token_is_not_authenticated() {
    let (_, store) = memory_token_store();
    store.set_auth_data(&stale_session("john.doe@example.com")).unwrap();
    assert!(!store.is_authenticated());
}

#[test]
fn is_authenticated_is_pure_over_store_contents() {
    let (backend, store) = memory_token_store();
    store.set_auth_data(&live_session("john.doe@example.com")).unwrap();
    let now = OffsetDateTime::now_utc();
    let epoch = store.epoch();

    let first = store.is_authenticated_at(now);
    let second = store.is_authenticated_at(now);

    assert!(first);
    assert_eq!(first, second);
    assert_eq!(store.epoch(), epoch);
    assert_eq!(backend.len(), 3);
}

// =============================================================
// needs_refresh_at
// =============================================================

#[test]
fn needs_refresh_when_access_expired_and_refresh_live() {
    let (_, store) = memory_token_store();
    store.set_auth_data(&stale_session("john.doe@example.com")).unwrap();
    assert!(store.needs_refresh_at(OffsetDateTime::now_utc()));
}

#[test]
fn no_refresh_needed_for_live_or_dead_sessions() {
    let (_, store) = memory_token_store();
    assert!(!store.needs_refresh_at(OffsetDateTime::now_utc()));

    store.set_auth_data(&live_session("john.doe@example.com")).unwrap();
    assert!(!store.needs_refresh_at(OffsetDateTime::now_utc()));

    let dead = session_expiring("john.doe@example.com", time::Duration::minutes(-10), time::Duration::minutes(-1));
    store.set_auth_data(&dead).unwrap();
    assert!(!store.needs_refresh_at(OffsetDateTime::now_utc()));
}

// =============================================================
// clear_auth_data / epoch
// =============================================================

#[test]
fn clear_auth_data_removes_everything_and_is_idempotent() {
    let (backend, store) = memory_token_store();
    store.set_auth_data(&live_session("john.doe@example.com")).unwrap();

    store.clear_auth_data();
    assert!(backend.is_empty());
    store.clear_auth_data();
    assert!(backend.is_empty());
    assert!(!store.is_authenticated());
}

#[test]
fn epoch_guard_skips_write_after_session_changed() {
    let (_, store) = memory_token_store();
    store.set_auth_data(&live_session("john.doe@example.com")).unwrap();
    let observed = store.epoch();

    store.clear_auth_data();
    let written = store.set_auth_data_if_epoch(&live_session("john.doe@example.com"), observed).unwrap();

    assert!(!written);
    assert!(store.get_stored_user().is_none());
}

#[test]
fn guarded_clear_spares_a_newer_session() {
    let (_, store) = memory_token_store();
    let observed = store.epoch();
    store.set_auth_data(&live_session("newer@example.com")).unwrap();

    assert!(!store.clear_auth_data_if_epoch(observed));
    assert!(store.is_authenticated());

    assert!(store.clear_auth_data_if_epoch(store.epoch()));
    assert!(!store.is_authenticated());
}

#[test]
fn epoch_guard_writes_when_unchanged() {
    let (_, store) = memory_token_store();
    let observed = store.epoch();
    let written = store.set_auth_data_if_epoch(&live_session("john.doe@example.com"), observed).unwrap();
    assert!(written);
    assert!(store.is_authenticated());
}
