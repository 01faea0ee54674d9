// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{DateField, DomainError};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Date formats accepted from form input, tried in order.
const INPUT_DATE_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]"),
    format_description!("[month]/[day]/[year]"),
];

/// Validates that a telephone number uses only the allowed character classes.
///
/// Allowed characters are ASCII digits, space, `-`, `(` and `)`. No
/// structural rules (grouping, length) are applied here.
///
/// # Errors
///
/// Returns `DomainError::InvalidTelephone` if any other character is present.
pub fn validate_telephone(value: &str) -> Result<(), DomainError> {
    if value
        .chars()
        .all(|ch| ch.is_ascii_digit() || matches!(ch, ' ' | '-' | '(' | ')'))
    {
        Ok(())
    } else {
        Err(DomainError::InvalidTelephone(value.to_string()))
    }
}

/// Validates that a date is not later than `today`.
///
/// A date equal to `today` is accepted.
///
/// # Errors
///
/// Returns `DomainError::DateInFuture` if `date > today`.
pub fn validate_not_in_future(field: DateField, date: Date, today: Date) -> Result<(), DomainError> {
    if date > today {
        return Err(DomainError::DateInFuture { field, date, today });
    }
    Ok(())
}

/// Validates that a required text value is present.
///
/// Returns the value with surrounding whitespace removed.
///
/// # Errors
///
/// Returns `DomainError::RequiredField` if the value is absent or blank.
pub fn validate_required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, DomainError> {
    match value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed),
        _ => Err(DomainError::RequiredField { field }),
    }
}

/// Validates that a text value is at most `max` characters long.
///
/// # Errors
///
/// Returns `DomainError::FieldTooLong` if the value is longer than `max`.
pub fn validate_max_length(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), DomainError> {
    let actual: usize = value.chars().count();
    if actual > max {
        return Err(DomainError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

/// Parses a date entered in a form.
///
/// Accepts `YYYY-MM-DD` and `MM/DD/YYYY`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if no accepted format matches.
pub fn parse_input_date(field: &'static str, value: &str) -> Result<Date, DomainError> {
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|format| Date::parse(value, format).ok())
        .ok_or_else(|| DomainError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

/// Computes an age in whole years.
///
/// The year difference is reduced by one when `today`'s month/day falls
/// before the birth month/day. Nothing is pro-rated, so the age changes
/// exactly on the anniversary.
#[must_use]
pub fn compute_age(birth_date: Date, today: Date) -> i32 {
    let years: i32 = today.year() - birth_date.year();
    let before_anniversary: bool =
        (u8::from(today.month()), today.day()) < (u8::from(birth_date.month()), birth_date.day());
    if before_anniversary { years - 1 } else { years }
}
