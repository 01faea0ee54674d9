// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Visit queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Visit;
use tracing::debug;

use crate::data_models::{OwnerRow, PetRow, PetTypeRow, VisitDetails, VisitRow};
use crate::diesel_schema::{owners, pet_types, pets, visits};
use crate::error::PersistenceError;
use crate::queries::pets::load_visits_for_pets;

/// Retrieves a visit by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the visit is not found.
pub fn get_visit(
    conn: &mut SqliteConnection,
    visit_id: i64,
) -> Result<Option<Visit>, PersistenceError> {
    debug!("Looking up visit by ID: {}", visit_id);

    visits::table
        .filter(visits::visit_id.eq(visit_id))
        .select(VisitRow::as_select())
        .first(conn)
        .optional()?
        .map(VisitRow::into_visit)
        .transpose()
}

/// Retrieves a visit with its pet, the pet's type and the pet's owner.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the visit is not found.
pub fn get_visit_details(
    conn: &mut SqliteConnection,
    visit_id: i64,
) -> Result<Option<VisitDetails>, PersistenceError> {
    let row: Option<(VisitRow, PetRow, PetTypeRow, OwnerRow)> = visits::table
        .inner_join(
            pets::table
                .inner_join(pet_types::table)
                .inner_join(owners::table),
        )
        .filter(visits::visit_id.eq(visit_id))
        .select((
            VisitRow::as_select(),
            PetRow::as_select(),
            PetTypeRow::as_select(),
            OwnerRow::as_select(),
        ))
        .first(conn)
        .optional()?;

    row.map(|(visit, pet, pet_type, owner)| {
        Ok(VisitDetails {
            visit: visit.into_visit()?,
            pet: pet.into_pet()?,
            pet_type: pet_type.into_pet_type(),
            owner: owner.into_owner()?,
        })
    })
    .transpose()
}

/// Lists a pet's visits, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_visits_for_pet(
    conn: &mut SqliteConnection,
    pet_id: i64,
) -> Result<Vec<Visit>, PersistenceError> {
    Ok(load_visits_for_pets(conn, &[pet_id])?
        .remove(&pet_id)
        .unwrap_or_default())
}
