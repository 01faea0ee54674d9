// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pet mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Pet;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::encode_date;
use crate::diesel_schema::pets;
use crate::error::PersistenceError;

/// Inserts a new pet and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if the owner or pet type
/// does not exist.
pub fn create_pet(conn: &mut SqliteConnection, pet: &Pet) -> Result<i64, PersistenceError> {
    debug!(
        "Creating pet {} for owner ID {}",
        pet.name, pet.owner_id
    );

    diesel::insert_into(pets::table)
        .values((
            pets::name.eq(&pet.name),
            pets::birth_date.eq(encode_date(pet.birth_date)?),
            pets::pet_type_id.eq(pet.pet_type_id),
            pets::owner_id.eq(pet.owner_id),
        ))
        .execute(conn)?;

    let pet_id: i64 = conn.get_last_insert_rowid()?;

    info!(pet_id, owner_id = pet.owner_id, "Pet created");
    Ok(pet_id)
}

/// Overwrites every field of an existing pet, including its owner.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no pet has this ID, or
/// `PersistenceError::ForeignKeyViolation` if the owner or pet type does not
/// exist.
pub fn update_pet(
    conn: &mut SqliteConnection,
    pet_id: i64,
    pet: &Pet,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(pets::table)
        .filter(pets::pet_id.eq(pet_id))
        .set((
            pets::name.eq(&pet.name),
            pets::birth_date.eq(encode_date(pet.birth_date)?),
            pets::pet_type_id.eq(pet.pet_type_id),
            pets::owner_id.eq(pet.owner_id),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Pet with ID {pet_id} not found"
        )));
    }

    info!(pet_id, "Pet updated");
    Ok(())
}

/// Deletes a pet together with its visits.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no pet has this ID.
pub fn delete_pet(conn: &mut SqliteConnection, pet_id: i64) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(pets::table)
        .filter(pets::pet_id.eq(pet_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Pet with ID {pet_id} not found"
        )));
    }

    info!(pet_id, "Pet deleted");
    Ok(())
}
