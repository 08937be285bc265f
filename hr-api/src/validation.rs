//! Field validators
//!
//! Pure syntactic checks. Each returns the first rule the value breaks.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

static ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").expect("static pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9-]+$").expect("static pattern"));
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("static pattern"));

pub const MAX_NAME_LEN: usize = 32;
pub const MAX_PHONE_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} can only contain letters, numbers and spaces")]
    Charset(&'static str),

    #[error("{0} must start with a capital letter")]
    Capital(&'static str),

    #[error("{0} is too long")]
    TooLong(&'static str),

    #[error("phone number can only contain numbers and dashes")]
    PhoneCharset,

    #[error("email cannot contain spaces")]
    EmailSpaces,

    #[error("hire date must be formatted as YYYY-MM-DD")]
    HireDate,

    #[error("ID must be a number")]
    InvalidId,
}

impl From<Violation> for AppError {
    fn from(v: Violation) -> Self {
        match v {
            Violation::InvalidId => AppError::new(ErrorCode::InvalidId),
            other => AppError::validation(other.to_string()),
        }
    }
}

fn check_shape(label: &'static str, value: &str) -> Result<(), Violation> {
    if !ALPHANUMERIC.is_match(value) {
        return Err(Violation::Charset(label));
    }
    Ok(())
}

fn check_len(label: &'static str, value: &str, max: usize) -> Result<(), Violation> {
    if value.chars().count() > max {
        return Err(Violation::TooLong(label));
    }
    Ok(())
}

/// Capitalised name: letters, digits and spaces, at most 32 characters
pub fn check_name(label: &'static str, value: &str) -> Result<(), Violation> {
    check_shape(label, value)?;
    if !value.starts_with(|c: char| c.is_ascii_uppercase()) {
        return Err(Violation::Capital(label));
    }
    check_len(label, value, MAX_NAME_LEN)
}

/// Letters, digits and spaces, at most 32 characters
pub fn check_plain(label: &'static str, value: &str) -> Result<(), Violation> {
    check_shape(label, value)?;
    check_len(label, value, MAX_NAME_LEN)
}

pub fn check_first_name(value: &str) -> Result<(), Violation> {
    check_name("name", value)
}

pub fn check_last_name(value: &str) -> Result<(), Violation> {
    check_plain("last name", value)
}

pub fn check_address(value: &str) -> Result<(), Violation> {
    check_plain("address", value)
}

pub fn check_phone(value: &str) -> Result<(), Violation> {
    if !PHONE.is_match(value) {
        return Err(Violation::PhoneCharset);
    }
    check_len("phone number", value, MAX_PHONE_LEN)
}

pub fn check_email_spaces(value: &str) -> Result<(), Violation> {
    if value.chars().any(char::is_whitespace) {
        return Err(Violation::EmailSpaces);
    }
    Ok(())
}

pub fn parse_hire_date(value: &str) -> Result<NaiveDate, Violation> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| Violation::HireDate)
}

/// Numeric path parameter
pub fn parse_id(value: &str) -> Result<i64, Violation> {
    if !NUMBER.is_match(value) {
        return Err(Violation::InvalidId);
    }
    value.parse().map_err(|_| Violation::InvalidId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert_eq!(check_first_name("John"), Ok(()));
        assert_eq!(check_first_name("Employee 1"), Ok(()));
        assert_eq!(check_first_name("john"), Err(Violation::Capital("name")));
        assert_eq!(check_first_name("1john"), Err(Violation::Capital("name")));
        assert_eq!(check_first_name("Jo-hn"), Err(Violation::Charset("name")));
        assert_eq!(check_first_name(""), Err(Violation::Charset("name")));
        let long = format!("J{}", "o".repeat(32));
        assert_eq!(check_first_name(&long), Err(Violation::TooLong("name")));
        assert_eq!(check_first_name(&long[..32]), Ok(()));
    }

    #[test]
    fn test_last_name_and_address_have_no_capital_rule() {
        assert_eq!(check_last_name("van der Berg"), Ok(()));
        assert_eq!(check_address("dune 12"), Ok(()));
        assert_eq!(check_address("Dune 12!"), Err(Violation::Charset("address")));
        assert_eq!(
            check_last_name(&"a".repeat(33)),
            Err(Violation::TooLong("last name"))
        );
    }

    #[test]
    fn test_phone_rules() {
        assert_eq!(check_phone("06-12345678"), Ok(()));
        assert_eq!(check_phone("06 12345678"), Err(Violation::PhoneCharset));
        assert_eq!(check_phone("+3161234"), Err(Violation::PhoneCharset));
        assert_eq!(check_phone(&"1".repeat(16)), Ok(()));
        assert_eq!(
            check_phone(&"1".repeat(17)),
            Err(Violation::TooLong("phone number"))
        );
    }

    #[test]
    fn test_email_spaces() {
        assert_eq!(check_email_spaces("j.doe@holiday-parks.eu"), Ok(()));
        assert_eq!(
            check_email_spaces("j doe@holiday-parks.eu"),
            Err(Violation::EmailSpaces)
        );
        assert_eq!(
            check_email_spaces("j.doe@holiday-parks.eu\t"),
            Err(Violation::EmailSpaces)
        );
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Ok(42));
        assert_eq!(parse_id("-1"), Err(Violation::InvalidId));
        assert_eq!(parse_id("4a"), Err(Violation::InvalidId));
        assert_eq!(parse_id(""), Err(Violation::InvalidId));
        assert_eq!(parse_id("99999999999999999999"), Err(Violation::InvalidId));
    }

    #[test]
    fn test_hire_date() {
        assert!(parse_hire_date("2021-01-01").is_ok());
        assert_eq!(parse_hire_date("01-01-2021"), Err(Violation::HireDate));
        assert_eq!(parse_hire_date("2021-02-30"), Err(Violation::HireDate));
    }

    #[test]
    fn test_violation_messages() {
        let err: AppError = Violation::Charset("city").into();
        assert_eq!(err.message, "city can only contain letters, numbers and spaces");
        let err: AppError = Violation::InvalidId.into();
        assert_eq!(err.code, ErrorCode::InvalidId);
    }
}
