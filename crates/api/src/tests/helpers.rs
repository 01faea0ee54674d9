// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use petclinic_domain::{Owner, Pet, Telephone, Vet, Visit};
use petclinic_persistence::Persistence;
use time::Date;
use time::macros::date;

use crate::{FormData, FormOutcome, FormView};

/// The date every test treats as today.
pub const TODAY: Date = date!(2026 - 06 - 15);

/// Opens a fresh database seeded with the default pet types and specialties.
pub fn create_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.seed_reference_data().unwrap();
    persistence
}

pub fn pet_type_id(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .list_pet_types()
        .unwrap()
        .into_iter()
        .find(|t| t.name == name)
        .and_then(|t| t.pet_type_id)
        .expect("Seeded pet type")
}

pub fn specialty_id(persistence: &mut Persistence, name: &str) -> i64 {
    persistence
        .list_specialties()
        .unwrap()
        .into_iter()
        .find(|s| s.name == name)
        .and_then(|s| s.specialty_id)
        .expect("Seeded specialty")
}

pub fn add_owner(persistence: &mut Persistence, first_name: &str, last_name: &str) -> i64 {
    let owner: Owner = Owner::new(
        first_name.to_string(),
        last_name.to_string(),
        String::from("638 Cardinal Ave."),
        String::from("Sun Prairie"),
        Telephone::new("608-555-1749").unwrap(),
    );
    persistence.create_owner(&owner).unwrap()
}

pub fn add_pet(persistence: &mut Persistence, name: &str, type_name: &str, owner_id: i64) -> i64 {
    let pet_type_id: i64 = pet_type_id(persistence, type_name);
    let pet: Pet = Pet::new(name.to_string(), date!(2020 - 09 - 07), pet_type_id, owner_id);
    persistence.create_pet(&pet).unwrap()
}

pub fn add_visit(
    persistence: &mut Persistence,
    visit_date: Date,
    description: &str,
    pet_id: i64,
) -> i64 {
    let visit: Visit = Visit::new(visit_date, description.to_string(), pet_id);
    persistence.create_visit(&visit).unwrap()
}

pub fn add_vet(
    persistence: &mut Persistence,
    first_name: &str,
    last_name: &str,
    specialty_ids: Vec<i64>,
) -> i64 {
    let vet: Vet = Vet::new(first_name.to_string(), last_name.to_string(), specialty_ids);
    persistence.create_vet(&vet).unwrap()
}

pub fn owner_form_data(first_name: &str, last_name: &str) -> FormData {
    FormData::new()
        .with("first_name", first_name)
        .with("last_name", last_name)
        .with("address", "2335 Independence La.")
        .with("city", "Waunakee")
        .with("telephone", "(608) 555-2765")
}

/// Unwraps a rejected submission.
pub fn expect_invalid(outcome: FormOutcome) -> FormView {
    match outcome {
        FormOutcome::Invalid(view) => view,
        FormOutcome::Saved { redirect_to, .. } => {
            panic!("Expected the form to be rejected, but it redirected to {redirect_to}")
        }
    }
}

/// Returns the messages shown next to one field.
pub fn field_errors(view: &FormView, name: &str) -> Vec<String> {
    view.field(name).expect("Field is rendered").errors.clone()
}
