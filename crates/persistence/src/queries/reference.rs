// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pet type and specialty queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::{PetType, Specialty};

use crate::data_models::{PetTypeRow, SpecialtyRow};
use crate::diesel_schema::{pet_types, pets, specialties};
use crate::error::PersistenceError;

/// Lists all pet types ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_pet_types(conn: &mut SqliteConnection) -> Result<Vec<PetType>, PersistenceError> {
    let rows: Vec<PetTypeRow> = pet_types::table
        .order((pet_types::name.asc(), pet_types::pet_type_id.asc()))
        .select(PetTypeRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(PetTypeRow::into_pet_type).collect())
}

/// Lists all specialties ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_specialties(conn: &mut SqliteConnection) -> Result<Vec<Specialty>, PersistenceError> {
    let rows: Vec<SpecialtyRow> = specialties::table
        .order((specialties::name.asc(), specialties::specialty_id.asc()))
        .select(SpecialtyRow::as_select())
        .load(conn)?;
    Ok(rows.into_iter().map(SpecialtyRow::into_specialty).collect())
}

/// Counts the pets of a given type.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_pets_of_type(
    conn: &mut SqliteConnection,
    pet_type_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(pets::table
        .filter(pets::pet_type_id.eq(pet_type_id))
        .count()
        .get_result(conn)?)
}
