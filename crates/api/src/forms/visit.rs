// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The visit form.
//!
//! A visit scheduled from a pet's page is pre-bound to that pet, the same
//! way a pet form is pre-bound to an owner.

use petclinic_domain::{DateField, DomainError, Owner, Visit};
use petclinic_persistence::PetWithType;
use time::Date;

use super::{
    ErrorCollector, FieldErrors, FormContext, FormView, Widget, clean_choice, clean_date,
    clean_text, hidden_field, input_field, select_field,
};
use crate::form_data::FormData;

/// Validates a submitted visit form.
///
/// `pets` lists every pet that may be chosen. With `bound_pet` set the
/// `pet` field is not read.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_visit(
    form: &FormData,
    pets: &[PetWithType],
    bound_pet: Option<i64>,
    today: Date,
) -> Result<Visit, Vec<DomainError>> {
    let mut collector: ErrorCollector = ErrorCollector::default();
    let visit_date = collector.check(clean_date(form, DateField::VisitDate, today));
    let description = collector.check(clean_text(form, "description", None));
    let pet_id = match bound_pet {
        Some(pet_id) => Some(pet_id),
        None => {
            let available: Vec<i64> = pets.iter().filter_map(|p| p.pet.pet_id).collect();
            collector.check(clean_choice(form, "pet", &available))
        }
    };

    let (Some(visit_date), Some(description), Some(pet_id)) = (visit_date, description, pet_id)
    else {
        return Err(collector.into_errors());
    };

    Ok(Visit::new(visit_date, description, pet_id))
}

/// Returns the form values describing a stored visit.
#[must_use]
pub fn visit_values(visit: &Visit) -> FormData {
    FormData::new()
        .with("date", &visit.visit_date.to_string())
        .with("description", &visit.description)
        .with("pet", &visit.pet_id.to_string())
}

/// Returns the initial values of a blank visit form: the date is today.
#[must_use]
pub fn new_visit_values(today: Date) -> FormData {
    FormData::new().with("date", &today.to_string())
}

/// Renders the visit form.
///
/// `bound_pet` hides the pet field and fixes it to that pet, whose owner is
/// shown as context.
#[must_use]
pub fn render_visit_form(
    title: &str,
    action: &str,
    values: &FormData,
    errors: &[DomainError],
    pets: &[PetWithType],
    bound_pet: Option<(&PetWithType, &Owner)>,
) -> FormView {
    let errors: FieldErrors = FieldErrors::from(errors);

    let bound =
        bound_pet.and_then(|(pet, owner)| Some((pet.pet.pet_id?, owner.owner_id?, pet, owner)));
    let (pet_field, context) = match bound {
        Some((pet_id, owner_id, pet, owner)) => (
            hidden_field("pet", "Pet", pet_id),
            Some(FormContext::Pet {
                pet_id,
                display: pet.label(),
                owner_id,
                owner_name: owner.full_name(),
            }),
        ),
        None => {
            let options: Vec<(i64, String)> = pets
                .iter()
                .filter_map(|p| p.pet.pet_id.map(|id| (id, p.label())))
                .collect();
            (select_field("pet", "Pet", options, values, &errors), None)
        }
    };

    FormView {
        title: title.to_string(),
        action: action.to_string(),
        fields: vec![
            input_field("date", "Date", Widget::Date, values, &errors),
            input_field("description", "Description", Widget::Textarea, values, &errors),
            pet_field,
        ],
        context,
    }
}
