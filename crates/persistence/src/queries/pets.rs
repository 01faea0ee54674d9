// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pet queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::{Pet, Visit};
use tracing::debug;

use crate::data_models::{OwnerRow, PetDetails, PetRow, PetTypeRow, PetWithType, VisitRow};
use crate::diesel_schema::{owners, pet_types, pets, visits};
use crate::error::PersistenceError;

/// Loads pets with their types, ordered by pet name then ID.
///
/// Restricted to one owner when `owner_id` is given.
pub(crate) fn load_pets_with_types(
    conn: &mut SqliteConnection,
    owner_id: Option<i64>,
) -> Result<Vec<PetWithType>, PersistenceError> {
    let mut selection = pets::table.inner_join(pet_types::table).into_boxed();
    if let Some(owner_id) = owner_id {
        selection = selection.filter(pets::owner_id.eq(owner_id));
    }
    let rows: Vec<(PetRow, PetTypeRow)> = selection
        .order((pets::name.asc(), pets::pet_id.asc()))
        .select((PetRow::as_select(), PetTypeRow::as_select()))
        .load(conn)?;

    rows.into_iter()
        .map(|(pet, pet_type)| {
            Ok(PetWithType {
                pet: pet.into_pet()?,
                pet_type: pet_type.into_pet_type(),
            })
        })
        .collect()
}

/// Loads the visits of the given pets, grouped by pet, newest first.
pub(crate) fn load_visits_for_pets(
    conn: &mut SqliteConnection,
    pet_ids: &[i64],
) -> Result<HashMap<i64, Vec<Visit>>, PersistenceError> {
    let rows: Vec<VisitRow> = visits::table
        .filter(visits::pet_id.eq_any(pet_ids))
        .order((visits::visit_date.desc(), visits::visit_id.desc()))
        .select(VisitRow::as_select())
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<Visit>> = HashMap::new();
    for row in rows {
        let visit: Visit = row.into_visit()?;
        grouped.entry(visit.pet_id).or_default().push(visit);
    }
    Ok(grouped)
}

/// Lists every pet with its type, ordered by pet name.
///
/// Used for the pet choices of the visit form.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_pet_choices(conn: &mut SqliteConnection) -> Result<Vec<PetWithType>, PersistenceError> {
    load_pets_with_types(conn, None)
}

/// Retrieves a pet by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the pet is not found.
pub fn get_pet(conn: &mut SqliteConnection, pet_id: i64) -> Result<Option<Pet>, PersistenceError> {
    debug!("Looking up pet by ID: {}", pet_id);

    pets::table
        .filter(pets::pet_id.eq(pet_id))
        .select(PetRow::as_select())
        .first(conn)
        .optional()?
        .map(PetRow::into_pet)
        .transpose()
}

/// Retrieves a pet with its type, owner and visits.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the pet is not found.
pub fn get_pet_details(
    conn: &mut SqliteConnection,
    pet_id: i64,
) -> Result<Option<PetDetails>, PersistenceError> {
    let row: Option<(PetRow, PetTypeRow, OwnerRow)> = pets::table
        .inner_join(pet_types::table)
        .inner_join(owners::table)
        .filter(pets::pet_id.eq(pet_id))
        .select((
            PetRow::as_select(),
            PetTypeRow::as_select(),
            OwnerRow::as_select(),
        ))
        .first(conn)
        .optional()?;

    let Some((pet, pet_type, owner)) = row else {
        return Ok(None);
    };

    let visits: Vec<Visit> = load_visits_for_pets(conn, &[pet_id])?
        .remove(&pet_id)
        .unwrap_or_default();

    Ok(Some(PetDetails {
        pet: pet.into_pet()?,
        pet_type: pet_type.into_pet_type(),
        owner: owner.into_owner()?,
        visits,
    }))
}
