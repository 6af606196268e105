//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB TEXT fields carry no built-in length enforcement, so limits
//! are applied at the API boundary.

use crate::utils::AppError;
use shared::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product names, categories, user names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, review text, cancellation reasons
pub const MAX_TEXT_LEN: usize = 2000;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a phone number: 10 to 15 digits, nothing else.
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    let digits_only = phone.chars().all(|c| c.is_ascii_digit());
    if !digits_only || phone.len() < 10 || phone.len() > 15 {
        return Err(AppError::new(ErrorCode::InvalidPhoneNumber));
    }
    Ok(())
}

/// Minimal email shape check: `local@domain` with a dot in the domain.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = email.len() <= MAX_EMAIL_LEN
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        });
    if !valid {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}
