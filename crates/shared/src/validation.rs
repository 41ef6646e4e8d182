//! Common validation logic shared between request DTOs.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Usernames: 3-50 chars, letters/digits plus `_ . -`, must start
    /// with a letter or digit.
    static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{2,49}$").unwrap();
}

/// Validates a username against the service-wide rules.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_username");
        err.message = Some(
            "Username must be 3-50 characters: letters, digits, '_', '.' or '-', starting with a letter or digit"
                .into(),
        );
        Err(err)
    }
}

/// Validates a password meets the minimum strength rules:
/// at least 8 characters, one letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= 8;
    let has_letter = password.chars().any(|c| c.is_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        let mut err = ValidationError::new("weak_password");
        err.message =
            Some("Password must be at least 8 characters and contain a letter and a digit".into());
        Err(err)
    }
}
