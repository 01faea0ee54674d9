// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod owner_tests;

use petclinic_domain::{Owner, Pet, Telephone, Vet, Visit};
use time::{Date, Month};

use crate::Persistence;

pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).expect("Valid test date")
}

pub fn create_test_owner(first_name: &str, last_name: &str) -> Owner {
    Owner::new(
        first_name.to_string(),
        last_name.to_string(),
        String::from("110 W. Liberty St."),
        String::from("Madison"),
        Telephone::new("608-555-1023").expect("Valid test telephone"),
    )
}

/// Opens a fresh database and inserts a `dog` pet type.
///
/// Returns the persistence adapter and the pet type ID.
pub fn create_test_persistence_with_dog() -> (Persistence, i64) {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let dog_id = persistence.create_pet_type("dog").unwrap();
    (persistence, dog_id)
}

pub fn create_test_pet(name: &str, pet_type_id: i64, owner_id: i64) -> Pet {
    Pet::new(
        name.to_string(),
        date(2018, Month::January, 1),
        pet_type_id,
        owner_id,
    )
}

pub fn create_test_visit(visit_date: Date, description: &str, pet_id: i64) -> Visit {
    Visit::new(visit_date, description.to_string(), pet_id)
}

pub fn create_test_vet(first_name: &str, last_name: &str, specialty_ids: Vec<i64>) -> Vet {
    Vet::new(first_name.to_string(), last_name.to_string(), specialty_ids)
}
