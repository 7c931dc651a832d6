//! Field validators shared by the service layer and the entity save hooks.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

// Ten digits, leading digit 6-9.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[9876][0-9]{9}$").expect("PHONE_REGEX: invalid regex pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid contact number")]
    InvalidPhone,

    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },
}

/// Accepts exactly ten ASCII digits starting with 6, 7, 8 or 9.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value < 0.0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn validate_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}
