//! Request field checks
//!
//! Small predicates used by the request types' `validate()` methods. Each
//! returns a `SharedError::ValidationError` naming the offending field.

use crate::shared::error::SharedError;

/// Check that a string's character count lies in `min..=max`
pub fn require_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), SharedError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(SharedError::validation(
            field,
            format!("must be between {} and {} characters", min, max),
        ));
    }
    Ok(())
}

/// Check an optional string's length when present
pub fn require_optional_length(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<(), SharedError> {
    match value {
        Some(value) => require_length(field, value, min, max),
        None => Ok(()),
    }
}

/// Validate a page slug
///
/// Slugs are lowercase alphanumeric words joined by single dashes
/// (`about`, `contact-us`, `2024-events`).
pub fn require_slug(field: &str, slug: &str) -> Result<(), SharedError> {
    require_length(field, slug, 1, 200)?;

    let well_formed = slug
        .split('-')
        .all(|word| !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));

    if !well_formed {
        return Err(SharedError::validation(
            field,
            "must contain lowercase letters and digits separated by single dashes",
        ));
    }
    Ok(())
}

/// Basic email shape check: one '@' with something on each side and a dot in the domain
pub fn require_email(field: &str, email: &str) -> Result<(), SharedError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(SharedError::validation(field, "must be a valid email address"));
    }
    Ok(())
}

/// Sibling positions are zero-based
pub fn require_position(field: &str, value: Option<i64>) -> Result<(), SharedError> {
    match value {
        Some(v) if v < 0 => Err(SharedError::validation(field, "must be zero or greater")),
        _ => Ok(()),
    }
}

/// Check that a value is one of a fixed set of literals
pub fn require_one_of(field: &str, value: &str, allowed: &[&str]) -> Result<(), SharedError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(SharedError::validation(
            field,
            format!("must be one of: {}", allowed.join(", ")),
        ))
    }
}

/// Password policy: at least 8 characters with an uppercase letter,
/// a lowercase letter and a digit
pub fn require_strong_password(field: &str, password: &str) -> Result<(), SharedError> {
    if password.chars().count() < 8 {
        return Err(SharedError::validation(field, "must be at least 8 characters"));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(SharedError::validation(field, "must contain an uppercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(SharedError::validation(field, "must contain a lowercase letter"));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(SharedError::validation(field, "must contain a digit"));
    }
    Ok(())
}
