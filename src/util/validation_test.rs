use super::*;

fn registration() -> RegisterData {
    RegisterData {
        first_name: "Jane".to_owned(),
        last_name: "Roe".to_owned(),
        email: "jane@example.com".to_owned(),
        phone: Some("+1 (555) 555-0100".to_owned()),
        password: "Password123!".to_owned(),
        confirm_password: "Password123!".to_owned(),
        accept_terms: true,
    }
}

// =============================================================
// login
// =============================================================

#[test]
fn login_trims_email() {
    let creds = validate_login("  john.doe@example.com ", "Password123!").unwrap();
    assert_eq!(creds.email, "john.doe@example.com");
    assert_eq!(creds.password, "Password123!");
}

#[test]
fn login_reports_both_missing_fields() {
    let errors = validate_login("", "").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.for_field("email"), Some("Email is required"));
    assert_eq!(errors.for_field("password"), Some("Password is required"));
    assert_eq!(errors.to_string(), "Email is required; Password is required");
}

#[test]
fn login_rejects_short_password() {
    let errors = validate_login("john.doe@example.com", "short").unwrap_err();
    assert_eq!(errors.for_field("password"), Some("Password must be at least 8 characters long"));
    assert_eq!(errors.for_field("email"), None);
}

#[test]
fn email_shapes() {
    assert!(is_email("a@b.co"));
    assert!(is_email("first.last+tag@mail.example.com"));
    assert!(!is_email("plain"));
    assert!(!is_email("@example.com"));
    assert!(!is_email("a@example"));
    assert!(!is_email("a@@example.com"));
    assert!(!is_email("a b@example.com"));
    assert!(!is_email("a@.com"));
}

// =============================================================
// register
// =============================================================

#[test]
fn register_accepts_complete_form() {
    let data = validate_register(registration()).unwrap();
    assert_eq!(data, registration());
}

#[test]
fn register_blank_phone_becomes_none() {
    let data = validate_register(RegisterData { phone: Some("   ".to_owned()), ..registration() }).unwrap();
    assert_eq!(data.phone, None);
}

#[test]
fn register_name_length_bounds() {
    let short = validate_register(RegisterData { first_name: "J".to_owned(), ..registration() }).unwrap_err();
    assert_eq!(short.for_field("firstName"), Some("First name must be at least 2 characters long"));

    let long = validate_register(RegisterData { last_name: "x".repeat(51), ..registration() }).unwrap_err();
    assert_eq!(long.for_field("lastName"), Some("Last name must be at most 50 characters"));

    assert!(validate_register(RegisterData { last_name: "x".repeat(50), ..registration() }).is_ok());
}

#[test]
fn register_rejects_bad_phone() {
    let errors = validate_register(RegisterData { phone: Some("555-CALL".to_owned()), ..registration() }).unwrap_err();
    assert_eq!(errors.for_field("phone"), Some("Please enter a valid phone number"));
}

#[test]
fn register_requires_matching_confirmation_and_terms() {
    let data = RegisterData { confirm_password: "Password124!".to_owned(), accept_terms: false, ..registration() };
    let errors = validate_register(data).unwrap_err();
    assert_eq!(errors.for_field("confirmPassword"), Some("Passwords do not match"));
    assert_eq!(errors.for_field("acceptTerms"), Some("You must accept the terms and conditions"));
}

#[test]
fn phone_shapes() {
    assert!(is_phone("5555550100"));
    assert!(is_phone("+44 20 7946 0958"));
    assert!(!is_phone("+123"));
    assert!(!is_phone("555.555.0100"));
}

// =============================================================
// forgot / reset
// =============================================================

#[test]
fn forgot_password_requires_valid_email() {
    assert_eq!(validate_forgot_password(" ghost@example.com ").unwrap().email, "ghost@example.com");
    let errors = validate_forgot_password("ghost").unwrap_err();
    assert_eq!(errors.for_field("email"), Some("Please enter a valid email address"));
}

#[test]
fn reset_password_requires_token() {
    let errors = validate_reset_password("", "NewPassword123!", "NewPassword123!").unwrap_err();
    assert_eq!(errors.for_field("token"), Some("Reset token is required"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn reset_password_builds_request() {
    let data = validate_reset_password("reset-token-123", "NewPassword123!", "NewPassword123!").unwrap();
    assert_eq!(data.token, "reset-token-123");
    assert_eq!(data.password, "NewPassword123!");
}
