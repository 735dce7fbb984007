//! Form-boundary validation.
//!
//! Each `validate_*` function turns raw form input into the typed request the
//! controller accepts, or reports every failing field. Nothing here reaches
//! the network. Password strength beyond a minimum length is left to the
//! identity service.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use std::fmt;

use crate::net::types::{ForgotPasswordData, LoginCredentials, RegisterData, ResetPasswordData};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;
const MIN_PHONE_LEN: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// All field failures from one submission, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// First message recorded for `field`.
    pub fn for_field(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError::new(field, message));
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl From<Vec<FieldError>> for ValidationErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message).collect();
        f.write_str(&messages.join("; "))
    }
}

/// # Errors
///
/// Every failing field.
pub fn validate_login(email: &str, password: &str) -> Result<LoginCredentials, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = email.trim();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors.into_result(LoginCredentials { email: email.to_owned(), password: password.to_owned() })
}

/// Trims text fields and normalizes a blank phone to `None`.
///
/// # Errors
///
/// Every failing field.
pub fn validate_register(data: RegisterData) -> Result<RegisterData, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let first_name = data.first_name.trim().to_owned();
    let last_name = data.last_name.trim().to_owned();
    let email = data.email.trim().to_owned();
    let phone = data.phone.map(|p| p.trim().to_owned()).filter(|p| !p.is_empty());

    check_name(
        &mut errors,
        "firstName",
        &first_name,
        ["First name is required", "First name must be at least 2 characters long", "First name must be at most 50 characters"],
    );
    check_name(
        &mut errors,
        "lastName",
        &last_name,
        ["Last name is required", "Last name must be at least 2 characters long", "Last name must be at most 50 characters"],
    );
    check_email(&mut errors, &email);
    if phone.as_deref().is_some_and(|p| !is_phone(p)) {
        errors.push("phone", "Please enter a valid phone number");
    }
    check_password(&mut errors, &data.password);
    check_confirmation(&mut errors, &data.password, &data.confirm_password);
    if !data.accept_terms {
        errors.push("acceptTerms", "You must accept the terms and conditions");
    }

    errors.into_result(RegisterData { first_name, last_name, email, phone, ..data })
}

/// # Errors
///
/// A missing or malformed e-mail.
pub fn validate_forgot_password(email: &str) -> Result<ForgotPasswordData, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let email = email.trim();
    check_email(&mut errors, email);
    errors.into_result(ForgotPasswordData { email: email.to_owned() })
}

/// # Errors
///
/// Every failing field, including a missing reset token.
pub fn validate_reset_password(
    token: &str,
    password: &str,
    confirm_password: &str,
) -> Result<ResetPasswordData, ValidationErrors> {
    let mut errors = ValidationErrors::default();
    let token = token.trim();
    if token.is_empty() {
        errors.push("token", "Reset token is required");
    }
    check_password(&mut errors, password);
    check_confirmation(&mut errors, password, confirm_password);
    errors.into_result(ResetPasswordData { token: token.to_owned(), password: password.to_owned() })
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_email(email) {
        errors.push("email", "Please enter a valid email address");
    }
}

fn check_password(errors: &mut ValidationErrors, password: &str) {
    if password.is_empty() {
        errors.push("password", "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push("password", "Password must be at least 8 characters long");
    }
}

fn check_confirmation(errors: &mut ValidationErrors, password: &str, confirm: &str) {
    if confirm.is_empty() {
        errors.push("confirmPassword", "Please confirm your password");
    } else if password != confirm {
        errors.push("confirmPassword", "Passwords do not match");
    }
}

fn check_name(errors: &mut ValidationErrors, field: &'static str, value: &str, messages: [&'static str; 3]) {
    let len = value.chars().count();
    if len == 0 {
        errors.push(field, messages[0]);
    } else if len < MIN_NAME_LEN {
        errors.push(field, messages[1]);
    } else if len > MAX_NAME_LEN {
        errors.push(field, messages[2]);
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !host.starts_with('.') && !tld.is_empty()
}

/// Optional leading `+`, then at least ten digits, spaces, dashes, or parens.
pub fn is_phone(value: &str) -> bool {
    let body = value.strip_prefix('+').unwrap_or(value);
    body.chars().count() >= MIN_PHONE_LEN
        && body.chars().all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'))
}
