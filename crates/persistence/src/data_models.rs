// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use petclinic_domain::{Owner, Pet, PetType, Specialty, Telephone, Vet, Visit};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::diesel_schema::{owners, pet_types, pets, specialties, vets, visits};
use crate::error::PersistenceError;

/// Storage format for every date column.
const STORED_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// A slice of an ordered listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

/// One row of the owner list: the owner plus the names of their pets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerListing {
    pub owner: Owner,
    /// Pet names in alphabetical order.
    pub pet_names: Vec<String>,
}

/// A pet together with its type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetWithType {
    pub pet: Pet,
    pub pet_type: PetType,
}

impl PetWithType {
    /// Returns `"<pet name> (<type name>)"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.pet.name, self.pet_type.name)
    }
}

/// A pet as shown on its owner's page, with its visit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRecord {
    pub pet: Pet,
    pub pet_type: PetType,
    /// Newest first.
    pub visits: Vec<Visit>,
}

/// An owner with all of their pets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetails {
    pub owner: Owner,
    /// Ordered by pet name.
    pub pets: Vec<PetRecord>,
}

/// A pet with its type, owner and visit history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetDetails {
    pub pet: Pet,
    pub pet_type: PetType,
    pub owner: Owner,
    /// Newest first.
    pub visits: Vec<Visit>,
}

/// A vet with the specialties it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VetDetails {
    pub vet: Vet,
    /// Ordered by specialty name.
    pub specialties: Vec<Specialty>,
}

/// A visit with the pet it belongs to and that pet's owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitDetails {
    pub visit: Visit,
    pub pet: Pet,
    pub pet_type: PetType,
    pub owner: Owner,
}

/// Rows inserted by a reference data seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub pet_types_added: usize,
    pub specialties_added: usize,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = owners)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct OwnerRow {
    owner_id: i64,
    first_name: String,
    last_name: String,
    address: String,
    city: String,
    telephone: String,
}

impl OwnerRow {
    pub(crate) fn into_owner(self) -> Result<Owner, PersistenceError> {
        let telephone: Telephone = Telephone::new(&self.telephone).map_err(|e| {
            PersistenceError::ReconstructionError(format!("owner {}: {e}", self.owner_id))
        })?;
        Ok(Owner::new(
            self.first_name,
            self.last_name,
            self.address,
            self.city,
            telephone,
        )
        .with_id(self.owner_id))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = pet_types)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PetTypeRow {
    pet_type_id: i64,
    name: String,
}

impl PetTypeRow {
    pub(crate) fn into_pet_type(self) -> PetType {
        PetType::new(&self.name).with_id(self.pet_type_id)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = pets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct PetRow {
    pet_id: i64,
    name: String,
    birth_date: String,
    pet_type_id: i64,
    owner_id: i64,
}

impl PetRow {
    pub(crate) fn into_pet(self) -> Result<Pet, PersistenceError> {
        let birth_date: Date = decode_date(&self.birth_date)?;
        Ok(Pet::new(self.name, birth_date, self.pet_type_id, self.owner_id).with_id(self.pet_id))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = specialties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct SpecialtyRow {
    specialty_id: i64,
    name: String,
}

impl SpecialtyRow {
    pub(crate) fn into_specialty(self) -> Specialty {
        Specialty::new(&self.name).with_id(self.specialty_id)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = vets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct VetRow {
    pub(crate) vet_id: i64,
    first_name: String,
    last_name: String,
}

impl VetRow {
    pub(crate) fn into_vet(self, specialty_ids: Vec<i64>) -> Vet {
        Vet::new(self.first_name, self.last_name, specialty_ids).with_id(self.vet_id)
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = visits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct VisitRow {
    visit_id: i64,
    visit_date: String,
    description: String,
    pet_id: i64,
}

impl VisitRow {
    pub(crate) fn into_visit(self) -> Result<Visit, PersistenceError> {
        let visit_date: Date = decode_date(&self.visit_date)?;
        Ok(Visit::new(visit_date, self.description, self.pet_id).with_id(self.visit_id))
    }
}

/// Formats a date for storage.
pub(crate) fn encode_date(date: Date) -> Result<String, PersistenceError> {
    date.format(STORED_DATE_FORMAT)
        .map_err(|e| PersistenceError::QueryFailed(format!("cannot format date {date}: {e}")))
}

/// Parses a stored date.
pub(crate) fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, STORED_DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!("invalid stored date '{value}': {e}"))
    })
}
