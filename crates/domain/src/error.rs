// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Which date rule a [`DomainError::DateInFuture`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    /// A pet's birth date.
    BirthDate,
    /// The date of a clinical visit.
    VisitDate,
}

impl DateField {
    /// Returns the form field name carrying this date.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::BirthDate => "birth_date",
            Self::VisitDate => "date",
        }
    }
}

/// Errors that can occur during domain validation.
///
/// Every variant names the form field it belongs to, so callers can key
/// error messages per field. The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was blank.
    RequiredField {
        /// The blank field.
        field: &'static str,
    },
    /// A text field exceeds its maximum length.
    FieldTooLong {
        /// The offending field.
        field: &'static str,
        /// The maximum number of characters allowed.
        max: usize,
        /// The number of characters supplied.
        actual: usize,
    },
    /// Telephone text contains characters outside the allowed classes.
    InvalidTelephone(String),
    /// A date is later than the current date.
    DateInFuture {
        /// Which date rule was violated.
        field: DateField,
        /// The rejected date.
        date: Date,
        /// The date validation was performed on.
        today: Date,
    },
    /// A date could not be parsed.
    InvalidDate {
        /// The offending field.
        field: &'static str,
        /// The unparseable input.
        value: String,
    },
    /// A single-valued reference does not name an available record.
    InvalidChoice {
        /// The offending field.
        field: &'static str,
        /// The submitted value.
        value: String,
    },
    /// One entry of a multi-valued reference does not name an available record.
    InvalidMultipleChoice {
        /// The offending field.
        field: &'static str,
        /// The submitted value that was not available.
        value: String,
    },
}

impl DomainError {
    /// Returns the name of the form field this error belongs to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::RequiredField { field }
            | Self::FieldTooLong { field, .. }
            | Self::InvalidDate { field, .. }
            | Self::InvalidChoice { field, .. }
            | Self::InvalidMultipleChoice { field, .. } => field,
            Self::InvalidTelephone(_) => "telephone",
            Self::DateInFuture { field, .. } => field.field_name(),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredField { .. } => write!(f, "This field is required."),
            Self::FieldTooLong { max, actual, .. } => write!(
                f,
                "Ensure this value has at most {max} characters (it has {actual})."
            ),
            Self::InvalidTelephone(_) => write!(
                f,
                "Telephone number should contain only digits, spaces, dashes, and parentheses."
            ),
            Self::DateInFuture {
                field: DateField::BirthDate,
                ..
            } => write!(f, "Birth date cannot be in the future"),
            Self::DateInFuture {
                field: DateField::VisitDate,
                ..
            } => write!(f, "Visit date cannot be in the future"),
            Self::InvalidDate { .. } => write!(f, "Enter a valid date."),
            Self::InvalidChoice { .. } => write!(
                f,
                "Select a valid choice. That choice is not one of the available choices."
            ),
            Self::InvalidMultipleChoice { value, .. } => write!(
                f,
                "Select a valid choice. {value} is not one of the available choices."
            ),
        }
    }
}

impl std::error::Error for DomainError {}
