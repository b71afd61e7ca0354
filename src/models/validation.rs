// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Field validators for the login and registration forms.
//!
//! Every predicate is total: malformed input evaluates to `false` instead of
//! returning an error, so form components can call them on raw text.

use chrono::{Datelike, Local, NaiveDate};

/// Number of digits in an Aadhar number.
pub const IDENTIFIER_LEN: usize = 12;

/// Minimum age (in whole years) required to register.
pub const MINIMUM_AGE: i32 = 18;

/// Symbols accepted in a password besides ASCII letters and digits.
const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

/// Date format produced by the birth date field and its picker.
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Return true when `value` is exactly twelve ASCII digits.
///
/// # Examples
///
/// ```ignore
/// assert!(identifier_is_valid("123456789012"));
/// assert!(!identifier_is_valid("12345678901a"));
/// ```
pub fn identifier_is_valid(value: &str) -> bool {
    value.len() == IDENTIFIER_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Return true for passwords of at least eight characters mixing letters and digits.
///
/// Only ASCII letters, digits, and `@$!%*#?&` are accepted.
pub fn passphrase_is_valid(value: &str) -> bool {
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);

    value.chars().count() >= 8
        && value.chars().all(allowed)
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value.chars().any(|c| c.is_ascii_digit())
}

/// Return true for usernames of 3-30 ASCII letters, digits, or underscores.
pub fn display_name_is_valid(value: &str) -> bool {
    (3..=30).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Return true when `value` parses as a date and the person is at least 18 today.
pub fn birth_date_is_valid(value: &str) -> bool {
    birth_date_is_valid_on(value, Local::now().date_naive())
}

/// Same as [`birth_date_is_valid`] but measured against an explicit `today`.
pub fn birth_date_is_valid_on(value: &str, today: NaiveDate) -> bool {
    parse_birth_date(value)
        .map(|birth| age_on(birth, today) >= MINIMUM_AGE)
        .unwrap_or(false)
}

/// Parse a `YYYY-MM-DD` birth date.
pub fn parse_birth_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT).ok()
}

/// Age in whole years on `today`; the current year only counts once the birthday is reached.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
