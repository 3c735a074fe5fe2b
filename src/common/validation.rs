// src/common/validation.rs

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

// Optional leading "+", then digits, blanks and - ( ) /
pub static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()/]*$").expect("phone pattern compiles"));

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Rejects empty and whitespace-only strings.
pub fn validate_not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        return Err(error("blank", "This field must not be blank."));
    }
    Ok(())
}

pub fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = error("range", "The value must be positive.");
        err.add_param("min".into(), &0.0);
        return Err(err);
    }
    Ok(())
}

/// 0 to 100 inclusive.
pub fn validate_percentage(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() && !val.is_zero() {
        return Err(error("range", "Tax rate cannot be negative."));
    }
    if *val > Decimal::ONE_HUNDRED {
        return Err(error("range", "Tax rate cannot exceed 100%."));
    }
    Ok(())
}
