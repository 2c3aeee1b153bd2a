//! Input validation helpers
//!
//! This module contains the format checks applied to public registration
//! submissions before anything is written to the sheet store.

use std::sync::OnceLock;

use regex::Regex;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("hard-coded pattern"))
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^01[0125][0-9]{8}$").expect("hard-coded pattern"))
}

/// Validate email format
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validate an Egyptian mobile number (11 digits, 010/011/012/015 prefix)
pub fn is_valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Sanitize filename for safe storage on the image host
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
