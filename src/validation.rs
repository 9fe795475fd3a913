//! Input validation for the parking core.
//!
//! This module provides validation functions for all user inputs.
//! All validators return ParkingError::Validation on failure.

use rust_decimal::Decimal;

use crate::error::{ParkingError, ParkingResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_PLATE_LENGTH: usize = 15;
pub const MAX_NOTES_LENGTH: usize = 1_000;
pub const MIN_JOIN_YEAR: i32 = 1900;
pub const MAX_JOIN_YEAR: i32 = 9999;

/// Time-of-day format stored on every movement: "HH:mm" (24h)
pub const TIME_FORMAT: &str = "%H:%M";

/// Validate a time-of-day string and normalize it to "HH:mm".
///
/// Accepts one or two hour digits, so "7:15" becomes "07:15".
///
/// Valid: "00:00", "7:05", "23:59"
/// Invalid: "24:00", "12:60", "12.30", "1230"
pub fn validate_time(value: &str, field_name: &str) -> ParkingResult<String> {
    let value = value.trim();
    let Some((hours, minutes)) = value.split_once(':') else {
        return Err(ParkingError::validation(
            field_name,
            "time must be in format 'HH:mm'",
        ));
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(hours) || hours.len() > 2 || !all_digits(minutes) || minutes.len() != 2 {
        return Err(ParkingError::validation(
            field_name,
            format!("time must be in format 'HH:mm', got '{}'", value),
        ));
    }

    let hour: u32 = hours
        .parse()
        .map_err(|_| ParkingError::validation(field_name, "invalid hour"))?;
    let minute: u32 = minutes
        .parse()
        .map_err(|_| ParkingError::validation(field_name, "invalid minute"))?;

    if hour > 23 {
        return Err(ParkingError::validation(
            field_name,
            format!("hour must be between 00 and 23, got {:02}", hour),
        ));
    }

    if minute > 59 {
        return Err(ParkingError::validation(
            field_name,
            format!("minute must be between 00 and 59, got {:02}", minute),
        ));
    }

    Ok(format!("{:02}:{:02}", hour, minute))
}

/// Validate a required text field. Returns the trimmed value.
pub fn validate_required(value: &str, field_name: &str) -> ParkingResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParkingError::validation(field_name, "must not be empty"));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ParkingError::validation(
            field_name,
            format!("must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a license plate.
pub fn validate_plate(plate: &str) -> ParkingResult<String> {
    let trimmed = plate.trim();
    if trimmed.is_empty() {
        return Err(ParkingError::validation("plate", "must not be empty"));
    }
    if trimmed.len() > MAX_PLATE_LENGTH {
        return Err(ParkingError::validation(
            "plate",
            format!("must be at most {} characters", MAX_PLATE_LENGTH),
        ));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == ' ') {
        return Err(ParkingError::validation(
            "plate",
            "may only contain letters, digits, spaces and '-'",
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate an employee number (must be positive).
pub fn validate_employee_number(number: i64) -> ParkingResult<u32> {
    if number <= 0 {
        return Err(ParkingError::validation(
            "employee_number",
            "employee number must be positive",
        ));
    }
    u32::try_from(number).map_err(|_| {
        ParkingError::validation("employee_number", "employee number is too large")
    })
}

/// Validate the year a client joined.
pub fn validate_join_year(year: i32) -> ParkingResult<i32> {
    if !(MIN_JOIN_YEAR..=MAX_JOIN_YEAR).contains(&year) {
        return Err(ParkingError::validation(
            "year_joined",
            format!(
                "year must be between {} and {}, got {}",
                MIN_JOIN_YEAR, MAX_JOIN_YEAR, year
            ),
        ));
    }
    Ok(year)
}

/// Validate free-text notes or comments (may be empty).
pub fn validate_notes(value: &str, field_name: &str) -> ParkingResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_NOTES_LENGTH {
        return Err(ParkingError::validation(
            field_name,
            format!("must be at most {} characters", MAX_NOTES_LENGTH),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a money amount (must not be negative).
pub fn validate_amount(amount: Decimal, field_name: &str) -> ParkingResult<Decimal> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ParkingError::validation(field_name, "amount must not be negative"));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_time_normalizes() {
        assert_eq!(validate_time("7:15", "hora").unwrap(), "07:15");
        assert_eq!(validate_time("23:59", "hora").unwrap(), "23:59");
        assert_eq!(validate_time(" 00:00 ", "hora").unwrap(), "00:00");
    }

    #[test]
    fn test_validate_time_rejects() {
        assert!(validate_time("24:00", "hora").is_err());
        assert!(validate_time("12:60", "hora").is_err());
        assert!(validate_time("12.30", "hora").is_err());
        assert!(validate_time("1230", "hora").is_err());
        assert!(validate_time("123:00", "hora").is_err());
        assert!(validate_time("12:5", "hora").is_err());
        assert!(validate_time("", "hora").is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("  Ana ", "name").unwrap(), "Ana");
        assert!(validate_required("   ", "name").is_err());
        assert!(validate_required(&"x".repeat(MAX_NAME_LENGTH + 1), "name").is_err());
    }

    #[test]
    fn test_validate_plate() {
        assert_eq!(validate_plate(" ABC1234 ").unwrap(), "ABC1234");
        assert!(validate_plate("").is_err());
        assert!(validate_plate("ABC_1234").is_err());
        assert!(validate_plate(&"A".repeat(MAX_PLATE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_employee_number() {
        assert_eq!(validate_employee_number(1).unwrap(), 1);
        assert!(validate_employee_number(0).is_err());
        assert!(validate_employee_number(-5).is_err());
    }

    #[test]
    fn test_validate_join_year() {
        assert!(validate_join_year(2020).is_ok());
        assert!(validate_join_year(1800).is_err());
    }

    #[test]
    fn test_validate_amount() {
        let value = Decimal::new(50000, 2);
        assert_eq!(validate_amount(value, "cost").unwrap(), value);
        assert!(validate_amount(Decimal::ZERO, "cost").is_ok());
        assert!(validate_amount(Decimal::new(-1, 0), "cost").is_err());
    }
}
