use super::*;

fn state(loading: bool, logged_in: bool) -> AuthState {
    AuthState { loading, logged_in, ..AuthState::default() }
}

// =============================================================
// protected_gate
// =============================================================

#[test]
fn protected_waits_while_loading() {
    assert_eq!(protected_gate(&state(true, false), "/dashboard"), GateDecision::Loading);
    assert_eq!(protected_gate(&state(true, true), "/dashboard"), GateDecision::Loading);
}

#[test]
fn protected_redirects_and_remembers_location() {
    assert_eq!(
        protected_gate(&state(false, false), "/dashboard?tab=loans"),
        GateDecision::Redirect { to: LOGIN_PATH, return_to: Some("/dashboard?tab=loans".to_owned()) }
    );
}

#[test]
fn protected_renders_when_authenticated() {
    assert_eq!(protected_gate(&state(false, true), "/dashboard"), GateDecision::Render);
}

// =============================================================
// public_only_gate
// =============================================================

#[test]
fn public_only_bounces_authenticated_user() {
    assert_eq!(
        public_only_gate(&state(false, true)),
        GateDecision::Redirect { to: DASHBOARD_PATH, return_to: None }
    );
}

#[test]
fn public_only_renders_for_anonymous_user() {
    assert_eq!(public_only_gate(&state(false, false)), GateDecision::Render);
    assert_eq!(public_only_gate(&state(true, false)), GateDecision::Render);
}

// =============================================================
// post_login_target
// =============================================================

#[test]
fn post_login_defaults_to_dashboard() {
    assert_eq!(post_login_target(None), DASHBOARD_PATH);
}

#[test]
fn post_login_honors_local_path() {
    assert_eq!(post_login_target(Some("/dashboard?tab=loans".to_owned())), "/dashboard?tab=loans");
}

#[test]
fn post_login_rejects_foreign_and_public_targets() {
    for target in ["https://evil.example", "//evil.example", "/\\evil.example", "dashboard", "/login", "/register/", "/reset-password?token=x"] {
        assert_eq!(post_login_target(Some(target.to_owned())), DASHBOARD_PATH, "{target}");
    }
}

#[test]
fn public_only_paths() {
    assert!(is_public_only_path("/forgot-password"));
    assert!(is_public_only_path("/login#top"));
    assert!(!is_public_only_path("/dashboard"));
    assert!(!is_public_only_path("/"));
}
