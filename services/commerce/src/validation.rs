//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Require a strictly positive monetary value
pub fn validate_positive(field: &str, value: f64) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{field} must be a positive number"));
    }
    Ok(())
}

/// Require a non-negative integer quantity
pub fn validate_non_negative(field: &str, value: i32) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{field} must not be negative"));
    }
    Ok(())
}

/// Require an integer quantity of at least one
pub fn validate_at_least_one(field: &str, value: i32) -> Result<(), String> {
    if value < 1 {
        return Err(format!("{field} must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_email() {
        assert!(validate_email("runner@sportgear.example").is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("name@host").is_err());
    }

    #[test]
    fn positive_guard() {
        assert!(validate_positive("price", 19.99).is_ok());
        assert!(validate_positive("price", 0.0).is_err());
        assert!(validate_positive("price", -5.0).is_err());
        assert!(validate_positive("price", f64::NAN).is_err());
    }

    #[test]
    fn quantity_guards() {
        assert!(validate_non_negative("stock_quantity", 0).is_ok());
        assert!(validate_non_negative("stock_quantity", -1).is_err());
        assert!(validate_at_least_one("quantity", 1).is_ok());
        assert!(validate_at_least_one("quantity", 0).is_err());
    }
}
