// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pet type and specialty mutations, including reference data seeding.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::SeedSummary;
use crate::diesel_schema::{pet_types, specialties};
use crate::error::PersistenceError;
use crate::queries::reference::count_pets_of_type;

/// Pet types inserted by [`seed_reference_data`].
pub const DEFAULT_PET_TYPES: &[&str] = &["bird", "cat", "dog", "hamster", "lizard", "snake"];

/// Specialties inserted by [`seed_reference_data`].
pub const DEFAULT_SPECIALTIES: &[&str] = &["dentistry", "radiology", "surgery"];

/// Inserts a pet type and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_pet_type(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(pet_types::table)
        .values(pet_types::name.eq(name))
        .execute(conn)?;
    let pet_type_id: i64 = conn.get_last_insert_rowid()?;
    info!(pet_type_id, name, "Pet type created");
    Ok(pet_type_id)
}

/// Deletes a pet type that no pet uses.
///
/// # Errors
///
/// Returns `PersistenceError::RecordReferenced` if any pet has this type,
/// or `PersistenceError::NotFound` if no pet type has this ID.
pub fn delete_pet_type(
    conn: &mut SqliteConnection,
    pet_type_id: i64,
) -> Result<(), PersistenceError> {
    info!("Attempting to delete pet type ID: {}", pet_type_id);

    let references: i64 = count_pets_of_type(conn, pet_type_id)?;
    if references > 0 {
        return Err(PersistenceError::RecordReferenced {
            entity: "pet type",
            id: pet_type_id,
            references,
        });
    }

    let rows_affected: usize = diesel::delete(pet_types::table)
        .filter(pet_types::pet_type_id.eq(pet_type_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Pet type with ID {pet_type_id} not found"
        )));
    }

    info!(pet_type_id, "Pet type deleted");
    Ok(())
}

/// Inserts a specialty and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_specialty(conn: &mut SqliteConnection, name: &str) -> Result<i64, PersistenceError> {
    diesel::insert_into(specialties::table)
        .values(specialties::name.eq(name))
        .execute(conn)?;
    let specialty_id: i64 = conn.get_last_insert_rowid()?;
    info!(specialty_id, name, "Specialty created");
    Ok(specialty_id)
}

/// Deletes a specialty. Vets holding it simply lose it.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no specialty has this ID.
pub fn delete_specialty(
    conn: &mut SqliteConnection,
    specialty_id: i64,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::delete(specialties::table)
        .filter(specialties::specialty_id.eq(specialty_id))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Specialty with ID {specialty_id} not found"
        )));
    }

    info!(specialty_id, "Specialty deleted");
    Ok(())
}

/// Fills empty reference tables with the default pet types and specialties.
///
/// Each table is seeded only if it has no rows, so running this against a
/// populated database is a no-op.
///
/// # Errors
///
/// Returns an error if any insert fails. Nothing is written in that case.
pub fn seed_reference_data(conn: &mut SqliteConnection) -> Result<SeedSummary, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut summary: SeedSummary = SeedSummary::default();

        let existing_pet_types: i64 = pet_types::table.count().get_result(conn)?;
        if existing_pet_types == 0 {
            for name in DEFAULT_PET_TYPES {
                create_pet_type(conn, name)?;
            }
            summary.pet_types_added = DEFAULT_PET_TYPES.len();
        }

        let existing_specialties: i64 = specialties::table.count().get_result(conn)?;
        if existing_specialties == 0 {
            for name in DEFAULT_SPECIALTIES {
                create_specialty(conn, name)?;
            }
            summary.specialties_added = DEFAULT_SPECIALTIES.len();
        }

        info!(
            pet_types_added = summary.pet_types_added,
            specialties_added = summary.specialties_added,
            "Reference data seeded"
        );
        Ok(summary)
    })
}
