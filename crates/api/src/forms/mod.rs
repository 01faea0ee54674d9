// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Form binding, validation and rendering.
//!
//! Every form follows the same shape:
//!
//! - `validate_*` turns submitted [`FormData`] into a domain record, or
//!   returns every field error found. Validation never stops at the first
//!   failing field.
//! - `render_*` builds the [`FormView`] page model from a set of values
//!   (submitted, or derived from a stored record) and any errors.
//!
//! Pre-bound parent references (the owner of a new pet, the pet of a new
//! visit) are passed in separately. They render as hidden fields and always
//! override whatever the submission carries.

pub mod owner;
pub mod pet;
pub mod vet;
pub mod visit;

use petclinic_domain::{
    DateField, DomainError, parse_input_date, validate_max_length, validate_not_in_future,
    validate_required,
};
use serde::Serialize;
use time::Date;

use crate::error::{ApiError, translate_domain_error};
use crate::form_data::FormData;

/// Label of the empty option that leads every single-select.
const EMPTY_CHOICE_LABEL: &str = "---------";

/// How a field is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Text,
    Textarea,
    Date,
    Select,
    SelectMultiple,
    Hidden,
}

/// The current value of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

/// One option of a select widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// One field of a rendered form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub value: FieldValue,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<&'static str>,
    pub errors: Vec<String>,
}

/// The parent record a pre-bound form is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormContext {
    Owner {
        owner_id: i64,
        full_name: String,
    },
    Pet {
        pet_id: i64,
        display: String,
        owner_id: i64,
        owner_name: String,
    },
}

/// The page model of a create or edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub title: String,
    /// Where the form posts to.
    pub action: String,
    pub fields: Vec<FieldView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<FormContext>,
}

impl FormView {
    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Number of fields carrying at least one error.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.fields
            .iter()
            .filter(|field| !field.errors.is_empty())
            .count()
    }
}

/// Field errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<ApiError>,
}

impl FieldErrors {
    /// Returns the messages recorded against one field.
    #[must_use]
    pub fn for_field(&self, name: &str) -> Vec<String> {
        self.errors
            .iter()
            .filter_map(|err| match err {
                ApiError::InvalidInput { field, message } if field == name => {
                    Some(message.clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl From<&[DomainError]> for FieldErrors {
    fn from(errors: &[DomainError]) -> Self {
        Self {
            errors: errors.iter().map(translate_domain_error).collect(),
        }
    }
}

/// Accumulates field errors while a form is cleaned.
#[derive(Debug, Default)]
pub(crate) struct ErrorCollector {
    errors: Vec<DomainError>,
}

impl ErrorCollector {
    /// Records the error, if any, and passes the value through.
    pub(crate) fn check<T>(&mut self, result: Result<T, DomainError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.errors.push(err);
                None
            }
        }
    }

    pub(crate) fn into_errors(self) -> Vec<DomainError> {
        self.errors
    }
}

/// Cleans a required text field, trimming it and enforcing `max_length`.
pub(crate) fn clean_text(
    form: &FormData,
    field: &'static str,
    max_length: Option<usize>,
) -> Result<String, DomainError> {
    let value: &str = validate_required(field, form.get(field))?;
    if let Some(max) = max_length {
        validate_max_length(field, value, max)?;
    }
    Ok(value.to_string())
}

/// Cleans a required date field that must not lie in the future.
pub(crate) fn clean_date(
    form: &FormData,
    date_field: DateField,
    today: Date,
) -> Result<Date, DomainError> {
    let field: &'static str = date_field.field_name();
    let value: &str = validate_required(field, form.get(field))?;
    let date: Date = parse_input_date(field, value)?;
    validate_not_in_future(date_field, date, today)?;
    Ok(date)
}

fn parse_choice(value: &str, available: &[i64]) -> Option<i64> {
    value
        .parse::<i64>()
        .ok()
        .filter(|id| available.contains(id))
}

/// Cleans a required reference to one of the `available` record IDs.
pub(crate) fn clean_choice(
    form: &FormData,
    field: &'static str,
    available: &[i64],
) -> Result<i64, DomainError> {
    let value: &str = validate_required(field, form.get(field))?;
    parse_choice(value, available).ok_or_else(|| DomainError::InvalidChoice {
        field,
        value: value.to_string(),
    })
}

/// Cleans an optional multi-valued reference. Blank entries are skipped.
pub(crate) fn clean_multiple_choice(
    form: &FormData,
    field: &'static str,
    available: &[i64],
) -> Result<Vec<i64>, DomainError> {
    form.get_all(field)
        .into_iter()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            parse_choice(value, available).ok_or_else(|| DomainError::InvalidMultipleChoice {
                field,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Builds a free-input field (text, textarea or date).
pub(crate) fn input_field(
    name: &'static str,
    label: &'static str,
    widget: Widget,
    values: &FormData,
    errors: &FieldErrors,
) -> FieldView {
    FieldView {
        name,
        label,
        widget,
        value: FieldValue::Single(values.get(name).unwrap_or_default().to_string()),
        required: true,
        choices: Vec::new(),
        help_text: None,
        errors: errors.for_field(name),
    }
}

/// Builds a required single-select over `(id, label)` options.
pub(crate) fn select_field(
    name: &'static str,
    label: &'static str,
    options: Vec<(i64, String)>,
    values: &FormData,
    errors: &FieldErrors,
) -> FieldView {
    let current: &str = values.get(name).unwrap_or_default().trim();
    let mut choices: Vec<Choice> = vec![Choice {
        value: String::new(),
        label: EMPTY_CHOICE_LABEL.to_string(),
        selected: current.is_empty(),
    }];
    choices.extend(options.into_iter().map(|(id, label)| {
        let value: String = id.to_string();
        Choice {
            selected: value == current,
            value,
            label,
        }
    }));

    FieldView {
        name,
        label,
        widget: Widget::Select,
        value: FieldValue::Single(current.to_string()),
        required: true,
        choices,
        help_text: None,
        errors: errors.for_field(name),
    }
}

/// Builds an optional multi-select over `(id, label)` options.
pub(crate) fn multi_select_field(
    name: &'static str,
    label: &'static str,
    options: Vec<(i64, String)>,
    help_text: &'static str,
    values: &FormData,
    errors: &FieldErrors,
) -> FieldView {
    let current: Vec<String> = values
        .get_all(name)
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();
    let choices: Vec<Choice> = options
        .into_iter()
        .map(|(id, label)| {
            let value: String = id.to_string();
            Choice {
                selected: current.contains(&value),
                value,
                label,
            }
        })
        .collect();

    FieldView {
        name,
        label,
        widget: Widget::SelectMultiple,
        value: FieldValue::Multiple(current),
        required: false,
        choices,
        help_text: Some(help_text),
        errors: errors.for_field(name),
    }
}

/// Builds the hidden field of a pre-bound parent reference.
pub(crate) fn hidden_field(name: &'static str, label: &'static str, value: i64) -> FieldView {
    FieldView {
        name,
        label,
        widget: Widget::Hidden,
        value: FieldValue::Single(value.to_string()),
        required: true,
        choices: Vec::new(),
        help_text: None,
        errors: Vec::new(),
    }
}
