// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The vet form.

use petclinic_domain::{DomainError, PERSON_NAME_MAX_LENGTH, Specialty, Vet};

use super::{
    ErrorCollector, FieldErrors, FormView, Widget, clean_multiple_choice, clean_text,
    input_field, multi_select_field,
};
use crate::form_data::FormData;

/// Help text of the specialty selector.
pub const SPECIALTIES_HELP_TEXT: &str =
    "Hold down Ctrl (or Command on Mac) to select multiple specialties";

/// Validates a submitted vet form.
///
/// `specialties` lists every specialty that may be selected. Selecting none
/// is allowed.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_vet(form: &FormData, specialties: &[Specialty]) -> Result<Vet, Vec<DomainError>> {
    let available: Vec<i64> = specialties.iter().filter_map(|s| s.specialty_id).collect();

    let mut collector: ErrorCollector = ErrorCollector::default();
    let first_name = collector.check(clean_text(form, "first_name", Some(PERSON_NAME_MAX_LENGTH)));
    let last_name = collector.check(clean_text(form, "last_name", Some(PERSON_NAME_MAX_LENGTH)));
    let specialty_ids = collector.check(clean_multiple_choice(form, "specialties", &available));

    let (Some(first_name), Some(last_name), Some(specialty_ids)) =
        (first_name, last_name, specialty_ids)
    else {
        return Err(collector.into_errors());
    };

    Ok(Vet::new(first_name, last_name, specialty_ids))
}

/// Returns the form values describing a stored vet.
#[must_use]
pub fn vet_values(vet: &Vet) -> FormData {
    vet.specialty_ids.iter().fold(
        FormData::new()
            .with("first_name", &vet.first_name)
            .with("last_name", &vet.last_name),
        |values, id| values.with("specialties", &id.to_string()),
    )
}

/// Renders the vet form. Specialties are offered in the order given.
#[must_use]
pub fn render_vet_form(
    title: &str,
    action: &str,
    values: &FormData,
    errors: &[DomainError],
    specialties: &[Specialty],
) -> FormView {
    let errors: FieldErrors = FieldErrors::from(errors);
    let options: Vec<(i64, String)> = specialties
        .iter()
        .filter_map(|s| s.specialty_id.map(|id| (id, s.name.clone())))
        .collect();

    FormView {
        title: title.to_string(),
        action: action.to_string(),
        fields: vec![
            input_field("first_name", "First name", Widget::Text, values, &errors),
            input_field("last_name", "Last name", Widget::Text, values, &errors),
            multi_select_field(
                "specialties",
                "Specialties",
                options,
                SPECIALTIES_HELP_TEXT,
                values,
                &errors,
            ),
        ],
        context: None,
    }
}
