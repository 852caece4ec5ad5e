//! Pure validation helpers for registration and identity checks.

use ballot_types::TypeError;
use chrono::{Datelike, NaiveDate};

/// Phone numbers are exactly this many digits.
pub const PHONE_LEN: usize = 10;
/// National ID numbers are exactly this many digits.
pub const NATIONAL_ID_LEN: usize = 12;
/// Minimum age, in whole years, to register.
pub const VOTING_AGE: i32 = 18;

/// Calendar age in whole years on `today`.
///
/// One year is subtracted when the birth month/day has not yet occurred in
/// `today`'s year. A 29 February birthday counts as reached on 1 March in
/// non-leap years.
pub fn compute_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

/// True iff `value` is exactly `length` ASCII decimal digits.
pub fn is_digit_string(value: &str, length: usize) -> bool {
    value.chars().count() == length && value.chars().all(|c| c.is_ascii_digit())
}

/// Names are letters and spaces only, with at least one letter.
pub fn is_valid_voter_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Parse an ISO `YYYY-MM-DD` date of birth.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, TypeError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| TypeError::InvalidDate(format!("{}: {e}", raw.trim())))
}
