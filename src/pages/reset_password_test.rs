use super::*;

#[test]
fn reset_token_trims_query_value() {
    assert_eq!(reset_token(Some("  abc123 ".to_owned())), Some("abc123".to_owned()));
}

#[test]
fn reset_token_blank_or_missing_is_none() {
    assert_eq!(reset_token(Some("   ".to_owned())), None);
    assert_eq!(reset_token(None), None);
}
