// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The pet form.
//!
//! When the form is reached from an owner's page the owner is pre-bound:
//! the `owner` field is hidden and its value comes from the URL, never
//! from the submission.

use petclinic_domain::{DateField, DomainError, Owner, PET_NAME_MAX_LENGTH, Pet, PetType};
use time::Date;

use super::{
    ErrorCollector, FieldErrors, FormContext, FormView, Widget, clean_choice, clean_date,
    clean_text, hidden_field, input_field, select_field,
};
use crate::form_data::FormData;

/// The records a pet form offers as choices.
#[derive(Debug, Clone, Default)]
pub struct PetChoices {
    /// Ordered by name.
    pub pet_types: Vec<PetType>,
    /// Ordered by last name, first name.
    pub owners: Vec<Owner>,
}

impl PetChoices {
    fn pet_type_ids(&self) -> Vec<i64> {
        self.pet_types.iter().filter_map(|t| t.pet_type_id).collect()
    }

    fn owner_ids(&self) -> Vec<i64> {
        self.owners.iter().filter_map(|o| o.owner_id).collect()
    }
}

/// Validates a submitted pet form.
///
/// With `bound_owner` set the `owner` field is not read.
///
/// # Errors
///
/// Returns every field error found.
pub fn validate_pet(
    form: &FormData,
    choices: &PetChoices,
    bound_owner: Option<i64>,
    today: Date,
) -> Result<Pet, Vec<DomainError>> {
    let mut collector: ErrorCollector = ErrorCollector::default();
    let name = collector.check(clean_text(form, "name", Some(PET_NAME_MAX_LENGTH)));
    let birth_date = collector.check(clean_date(form, DateField::BirthDate, today));
    let pet_type_id = collector.check(clean_choice(form, "type", &choices.pet_type_ids()));
    let owner_id = match bound_owner {
        Some(owner_id) => Some(owner_id),
        None => collector.check(clean_choice(form, "owner", &choices.owner_ids())),
    };

    let (Some(name), Some(birth_date), Some(pet_type_id), Some(owner_id)) =
        (name, birth_date, pet_type_id, owner_id)
    else {
        return Err(collector.into_errors());
    };

    Ok(Pet::new(name, birth_date, pet_type_id, owner_id))
}

/// Returns the form values describing a stored pet.
#[must_use]
pub fn pet_values(pet: &Pet) -> FormData {
    FormData::new()
        .with("name", &pet.name)
        .with("birth_date", &pet.birth_date.to_string())
        .with("type", &pet.pet_type_id.to_string())
        .with("owner", &pet.owner_id.to_string())
}

/// Renders the pet form.
///
/// `bound_owner` hides the owner field and fixes it to that owner.
#[must_use]
pub fn render_pet_form(
    title: &str,
    action: &str,
    values: &FormData,
    errors: &[DomainError],
    choices: &PetChoices,
    bound_owner: Option<&Owner>,
) -> FormView {
    let errors: FieldErrors = FieldErrors::from(errors);

    let pet_type_options: Vec<(i64, String)> = choices
        .pet_types
        .iter()
        .filter_map(|t| t.pet_type_id.map(|id| (id, t.name.clone())))
        .collect();

    let (owner_field, context) = match bound_owner.and_then(|o| o.owner_id.map(|id| (id, o))) {
        Some((owner_id, owner)) => (
            hidden_field("owner", "Owner", owner_id),
            Some(FormContext::Owner {
                owner_id,
                full_name: owner.full_name(),
            }),
        ),
        None => {
            let owner_options: Vec<(i64, String)> = choices
                .owners
                .iter()
                .filter_map(|o| o.owner_id.map(|id| (id, o.full_name())))
                .collect();
            (
                select_field("owner", "Owner", owner_options, values, &errors),
                None,
            )
        }
    };

    FormView {
        title: title.to_string(),
        action: action.to_string(),
        fields: vec![
            input_field("name", "Name", Widget::Text, values, &errors),
            input_field("birth_date", "Birth date", Widget::Date, values, &errors),
            select_field("type", "Type", pet_type_options, values, &errors),
            owner_field,
        ],
        context,
    }
}
