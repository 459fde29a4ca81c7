use lazy_static::lazy_static;
use regex::Regex;

/// E.164-style phone number: optional `+`, first digit 1-9, 2-15 digits total.
pub fn is_valid_phone(phone: &str) -> bool {
    lazy_static! {
        static ref PHONE_RE: Regex = Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap();
    }
    PHONE_RE.is_match(phone)
}

/// Syntax check only, no DNS or mailbox verification.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();
    }
    EMAIL_RE.is_match(email)
}
