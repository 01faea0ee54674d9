// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::{Duration, Month};

use super::date;
use crate::{
    DateField, DomainError, compute_age, parse_input_date, validate_max_length,
    validate_not_in_future, validate_required, validate_telephone,
};

#[test]
fn test_validate_telephone_accepts_allowed_characters() {
    for telephone in ["555-1234", "(555) 123-4567", "5551234", "555 123 4567", ""] {
        assert!(
            validate_telephone(telephone).is_ok(),
            "Telephone should be valid: {telephone}"
        );
    }
}

#[test]
fn test_validate_telephone_rejects_other_characters() {
    for telephone in ["555-ABCD", "555.1234", "555@1234", "+1 555 1234", "555\t1234"] {
        let result: Result<(), DomainError> = validate_telephone(telephone);
        assert!(
            matches!(result, Err(DomainError::InvalidTelephone(_))),
            "Telephone should be invalid: {telephone}"
        );
    }
}

#[test]
fn test_validate_telephone_rejects_non_ascii_digits() {
    // Arabic-Indic digits are numeric but not in the allowed class.
    assert!(validate_telephone("٥٥٥-١٢٣٤").is_err());
}

#[test]
fn test_validate_telephone_error_names_field() {
    let err: DomainError = validate_telephone("555.1234").unwrap_err();
    assert_eq!(err.field(), "telephone");
    assert_eq!(
        err.to_string(),
        "Telephone number should contain only digits, spaces, dashes, and parentheses."
    );
}

#[test]
fn test_validate_not_in_future_accepts_today() {
    let today = date(2024, Month::June, 15);
    assert!(validate_not_in_future(DateField::BirthDate, today, today).is_ok());
}

#[test]
fn test_validate_not_in_future_accepts_past() {
    let today = date(2024, Month::June, 15);
    let past = date(2018, Month::January, 1);
    assert!(validate_not_in_future(DateField::VisitDate, past, today).is_ok());
}

#[test]
fn test_validate_not_in_future_rejects_future_birth_date() {
    let today = date(2024, Month::June, 15);
    let future = today + Duration::days(30);

    let err: DomainError = validate_not_in_future(DateField::BirthDate, future, today).unwrap_err();
    assert_eq!(err.field(), "birth_date");
    assert_eq!(err.to_string(), "Birth date cannot be in the future");
}

#[test]
fn test_validate_not_in_future_rejects_tomorrow_visit() {
    let today = date(2024, Month::June, 15);
    let tomorrow = today + Duration::days(1);

    let err: DomainError =
        validate_not_in_future(DateField::VisitDate, tomorrow, today).unwrap_err();
    assert_eq!(err.field(), "date");
    assert_eq!(err.to_string(), "Visit date cannot be in the future");
}

#[test]
fn test_validate_required_trims_value() {
    assert_eq!(
        validate_required("first_name", Some("  John ")).unwrap(),
        "John"
    );
}

#[test]
fn test_validate_required_rejects_missing_and_blank() {
    for value in [None, Some(""), Some("   ")] {
        let err: DomainError = validate_required("city", value).unwrap_err();
        assert_eq!(err, DomainError::RequiredField { field: "city" });
        assert_eq!(err.to_string(), "This field is required.");
    }
}

#[test]
fn test_validate_max_length_counts_characters() {
    assert!(validate_max_length("name", "Émile", 5).is_ok());

    let err: DomainError = validate_max_length("name", "Bartholomew", 5).unwrap_err();
    assert_eq!(
        err,
        DomainError::FieldTooLong {
            field: "name",
            max: 5,
            actual: 11,
        }
    );
    assert_eq!(
        err.to_string(),
        "Ensure this value has at most 5 characters (it has 11)."
    );
}

#[test]
fn test_parse_input_date_accepts_iso_and_us_formats() {
    let expected = date(2023, Month::February, 15);
    assert_eq!(parse_input_date("date", "2023-02-15").unwrap(), expected);
    assert_eq!(parse_input_date("date", "02/15/2023").unwrap(), expected);
}

#[test]
fn test_parse_input_date_rejects_garbage() {
    for value in ["yesterday", "2023-13-01", "2023-02-30", "15.02.2023"] {
        let err: DomainError = parse_input_date("birth_date", value).unwrap_err();
        assert_eq!(err.field(), "birth_date");
        assert_eq!(err.to_string(), "Enter a valid date.");
    }
}

#[test]
fn test_compute_age_after_anniversary() {
    let birth = date(2018, Month::January, 1);
    assert_eq!(compute_age(birth, date(2024, Month::June, 15)), 6);
}

#[test]
fn test_compute_age_on_anniversary() {
    let birth = date(2018, Month::January, 1);
    assert_eq!(compute_age(birth, date(2024, Month::January, 1)), 6);
}

#[test]
fn test_compute_age_day_before_anniversary() {
    let birth = date(2018, Month::June, 16);
    assert_eq!(compute_age(birth, date(2024, Month::June, 15)), 5);
}

#[test]
fn test_compute_age_born_today_is_zero() {
    let today = date(2024, Month::March, 3);
    assert_eq!(compute_age(today, today), 0);
}

#[test]
fn test_compute_age_leap_day_birthday() {
    let birth = date(2020, Month::February, 29);
    assert_eq!(compute_age(birth, date(2021, Month::February, 28)), 0);
    assert_eq!(compute_age(birth, date(2021, Month::March, 1)), 1);
}
