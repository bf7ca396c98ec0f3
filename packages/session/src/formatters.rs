//! Email and Brazilian phone number helpers for the registration form.
//!
//! Phones are at most [`PHONE_MAX_DIGITS`] digits (area code plus number) and
//! display as `(DD) DDDD-DDDD` or `(DD) DDDDD-DDDD`.

use std::sync::LazyLock;

use regex::Regex;

pub const PHONE_MAX_DIGITS: usize = 11;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\([0-9]{2}\) [0-9]{4,5}-[0-9]{4}$").expect("valid phone regex"));

pub fn is_email_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Keeps the first `max` ASCII digits of `input`.
pub fn sanitize_digits(input: &str, max: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Mask applied while the user types.
pub fn format_phone_progressive(value: &str) -> String {
    let d = sanitize_digits(value, PHONE_MAX_DIGITS);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({d}"),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Mask applied when the field loses focus.
pub fn format_phone_final(value: &str) -> String {
    let d = sanitize_digits(value, PHONE_MAX_DIGITS);
    match d.len() {
        0 => String::new(),
        len @ 1..=10 => format!(
            "({}) {}-{}",
            &d[..len.min(2)],
            &d[len.min(2)..len.min(6)],
            &d[len.min(6)..]
        ),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

/// Phone is optional: blank is valid.
pub fn is_phone_valid(phone: &str) -> bool {
    let phone = phone.trim();
    phone.is_empty() || PHONE_RE.is_match(phone)
}
