use super::*;
use time::macros::datetime;

const SESSION_JSON: &str = r#"{
    "user": {
        "id": "1",
        "firstName": "John",
        "lastName": "Doe",
        "email": "john.doe@example.com",
        "phone": "+1234567890",
        "role": "USER",
        "isActive": true,
        "isEmailVerified": true,
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    },
    "tokens": {
        "access": { "token": "access-1", "expires": "2024-01-01T00:15:00Z" },
        "refresh": { "token": "refresh-1", "expires": "2024-01-08T00:00:00Z" }
    }
}"#;

#[test]
fn session_parses_backend_auth_response() {
    let session: Session = serde_json::from_str(SESSION_JSON).unwrap();
    assert_eq!(session.user.email, "john.doe@example.com");
    assert_eq!(session.user.role, Role::User);
    assert_eq!(session.user.phone.as_deref(), Some("+1234567890"));
    assert_eq!(session.user.created_at, datetime!(2024-01-01 0:00 UTC));
    assert_eq!(session.tokens.access.token, "access-1");
    assert_eq!(session.tokens.refresh.expires, datetime!(2024-01-08 0:00 UTC));
}

#[test]
fn user_without_phone_parses_and_omits_phone_on_write() {
    let raw = r#"{
        "id": "2", "firstName": "Admin", "lastName": "User", "email": "admin@example.com",
        "role": "ADMIN", "isActive": true, "isEmailVerified": false,
        "createdAt": "2024-01-01T00:00:00Z", "updatedAt": "2024-01-01T00:00:00Z"
    }"#;
    let user: User = serde_json::from_str(raw).unwrap();
    assert_eq!(user.role, Role::Admin);
    assert!(user.phone.is_none());

    let written = serde_json::to_value(&user).unwrap();
    assert!(written.get("phone").is_none());
    assert_eq!(written["firstName"], "Admin");
}

#[test]
fn register_data_serializes_camel_case_wire_fields() {
    let data = RegisterData {
        first_name: "Jane".to_owned(),
        last_name: "Roe".to_owned(),
        email: "jane@example.com".to_owned(),
        phone: None,
        password: "Password123!".to_owned(),
        confirm_password: "Password123!".to_owned(),
        accept_terms: true,
    };
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["firstName"], "Jane");
    assert_eq!(value["confirmPassword"], "Password123!");
    assert_eq!(value["acceptTerms"], true);
    assert!(value.get("phone").is_none());
}

#[test]
fn refresh_token_body_uses_camel_case() {
    let body = RefreshTokenBody { refresh_token: "r-1".to_owned() };
    assert_eq!(serde_json::to_value(&body).unwrap(), serde_json::json!({ "refreshToken": "r-1" }));
}

#[test]
fn error_body_tolerates_missing_message() {
    let body: ErrorBody = serde_json::from_str("{}").unwrap();
    assert_eq!(body.message, None);
    let body: ErrorBody = serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
    assert_eq!(body.message.as_deref(), Some("Invalid credentials"));
}

#[test]
fn token_liveness_is_strict() {
    let token = Token { token: "t".to_owned(), expires: datetime!(2024-01-01 0:15 UTC) };
    assert!(token.is_live_at(datetime!(2024-01-01 0:14:59 UTC)));
    assert!(!token.is_live_at(datetime!(2024-01-01 0:15 UTC)));
}

#[test]
fn full_name_joins_first_and_last() {
    let session: Session = serde_json::from_str(SESSION_JSON).unwrap();
    assert_eq!(session.user.full_name(), "John Doe");
    assert_eq!(Role::Admin.label(), "ADMIN");
}
