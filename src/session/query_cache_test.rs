use super::*;
use time::macros::datetime;

const T0: OffsetDateTime = datetime!(2024-01-01 12:00 UTC);

#[test]
fn fresh_entry_is_returned() {
    let mut cache = QueryCache::default();
    cache.set(USER_QUERY, &"john", T0);
    assert_eq!(cache.get_fresh::<String>(USER_QUERY, T0 + Duration::minutes(4)), Some("john".to_owned()));
}

#[test]
fn entry_goes_stale_after_stale_time() {
    let mut cache = QueryCache::default();
    cache.set(USER_QUERY, &"john", T0);
    assert_eq!(cache.get_fresh::<String>(USER_QUERY, T0 + DEFAULT_STALE_TIME), None);
    assert!(cache.contains(USER_QUERY));
}

#[test]
fn cached_absence_is_distinct_from_missing_entry() {
    let mut cache = QueryCache::default();
    assert_eq!(cache.get_fresh::<Option<String>>(USER_QUERY, T0), None);
    cache.set(USER_QUERY, &None::<String>, T0);
    assert_eq!(cache.get_fresh::<Option<String>>(USER_QUERY, T0), Some(None));
}

#[test]
fn invalidate_marks_only_matching_prefix() {
    let mut cache = QueryCache::default();
    cache.set(USER_QUERY, &1, T0);
    cache.set(&["auth", "permissions"], &2, T0);
    cache.set(&["loans", "summary"], &3, T0);

    let affected = cache.invalidate(AUTH_NAMESPACE);

    assert_eq!(affected, 2);
    assert_eq!(cache.get_fresh::<i32>(USER_QUERY, T0), None);
    assert_eq!(cache.get_fresh::<i32>(&["auth", "permissions"], T0), None);
    assert_eq!(cache.get_fresh::<i32>(&["loans", "summary"], T0), Some(3));
    assert_eq!(cache.len(), 3);
}

#[test]
fn invalidate_does_not_match_partial_segments() {
    let mut cache = QueryCache::default();
    cache.set(&["authorization"], &1, T0);
    assert_eq!(cache.invalidate(AUTH_NAMESPACE), 0);
    assert_eq!(cache.get_fresh::<i32>(&["authorization"], T0), Some(1));
}

#[test]
fn set_after_invalidate_is_fresh_again() {
    let mut cache = QueryCache::default();
    cache.set(USER_QUERY, &1, T0);
    cache.invalidate(AUTH_NAMESPACE);
    cache.set(USER_QUERY, &2, T0);
    assert_eq!(cache.get_fresh::<i32>(USER_QUERY, T0), Some(2));
}

#[test]
fn clear_purges_every_namespace() {
    let mut cache = QueryCache::default();
    cache.set(USER_QUERY, &1, T0);
    cache.set(&["loans", "summary"], &3, T0);
    cache.clear();
    assert!(cache.is_empty());
}
