// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Owner queries.
//!
//! The owner list and owner search share [`owners_matching`], so both apply
//! the same filter and ordering.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use petclinic_domain::{NameQuery, Owner};
use tracing::debug;

use crate::data_models::{OwnerDetails, OwnerListing, OwnerRow, PageWindow, PetRecord};
use crate::diesel_schema::{owners, pets};
use crate::error::PersistenceError;
use crate::queries::pets::{load_pets_with_types, load_visits_for_pets};

/// Builds the owner selection for an optional name filter.
///
/// A query matches when it is a substring of the first OR last name. Case is
/// ignored for ASCII letters only.
fn owners_matching(query: Option<&NameQuery>) -> owners::BoxedQuery<'static, Sqlite> {
    let mut selection = owners::table.into_boxed();
    if let Some(query) = query {
        let pattern: String = query.like_pattern();
        selection = selection.filter(
            owners::first_name
                .like(pattern.clone())
                .escape('\\')
                .or(owners::last_name.like(pattern).escape('\\')),
        );
    }
    selection
}

/// Counts owners matching the filter.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_owners(
    conn: &mut SqliteConnection,
    query: Option<&NameQuery>,
) -> Result<i64, PersistenceError> {
    let total: i64 = owners_matching(query).count().get_result(conn)?;
    debug!(total, "Counted owners");
    Ok(total)
}

/// Lists owners matching the filter, ordered by last name, first name, ID.
///
/// Each listing carries the names of the owner's pets.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_owners(
    conn: &mut SqliteConnection,
    query: Option<&NameQuery>,
    window: Option<PageWindow>,
) -> Result<Vec<OwnerListing>, PersistenceError> {
    debug!(
        "Listing owners (query: {:?}, window: {:?})",
        query.map(NameQuery::text),
        window
    );

    let mut selection = owners_matching(query).order((
        owners::last_name.asc(),
        owners::first_name.asc(),
        owners::owner_id.asc(),
    ));
    if let Some(window) = window {
        selection = selection.limit(window.limit).offset(window.offset);
    }
    let rows: Vec<OwnerRow> = selection.select(OwnerRow::as_select()).load(conn)?;

    let owners: Vec<Owner> = rows
        .into_iter()
        .map(OwnerRow::into_owner)
        .collect::<Result<_, _>>()?;
    let owner_ids: Vec<i64> = owners.iter().filter_map(|o| o.owner_id).collect();

    let mut pet_names: HashMap<i64, Vec<String>> = HashMap::new();
    let pet_rows: Vec<(i64, String)> = pets::table
        .filter(pets::owner_id.eq_any(&owner_ids))
        .order((pets::name.asc(), pets::pet_id.asc()))
        .select((pets::owner_id, pets::name))
        .load(conn)?;
    for (owner_id, name) in pet_rows {
        pet_names.entry(owner_id).or_default().push(name);
    }

    Ok(owners
        .into_iter()
        .map(|owner| {
            let names: Vec<String> = owner
                .owner_id
                .and_then(|id| pet_names.remove(&id))
                .unwrap_or_default();
            OwnerListing {
                owner,
                pet_names: names,
            }
        })
        .collect())
}

/// Lists every owner, ordered by last name, first name, ID.
///
/// Used for the owner choices of the pet form.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_owner_choices(conn: &mut SqliteConnection) -> Result<Vec<Owner>, PersistenceError> {
    let rows: Vec<OwnerRow> = owners::table
        .order((
            owners::last_name.asc(),
            owners::first_name.asc(),
            owners::owner_id.asc(),
        ))
        .select(OwnerRow::as_select())
        .load(conn)?;
    rows.into_iter().map(OwnerRow::into_owner).collect()
}

/// Retrieves an owner by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the owner is not found.
pub fn get_owner(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> Result<Option<Owner>, PersistenceError> {
    debug!("Looking up owner by ID: {}", owner_id);

    owners::table
        .filter(owners::owner_id.eq(owner_id))
        .select(OwnerRow::as_select())
        .first(conn)
        .optional()?
        .map(OwnerRow::into_owner)
        .transpose()
}

/// Retrieves an owner with their pets and each pet's visits.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the owner is not found.
pub fn get_owner_details(
    conn: &mut SqliteConnection,
    owner_id: i64,
) -> Result<Option<OwnerDetails>, PersistenceError> {
    let Some(owner) = get_owner(conn, owner_id)? else {
        return Ok(None);
    };

    let pets = load_pets_with_types(conn, Some(owner_id))?;
    let pet_ids: Vec<i64> = pets.iter().filter_map(|p| p.pet.pet_id).collect();
    let mut visits = load_visits_for_pets(conn, &pet_ids)?;

    let pets: Vec<PetRecord> = pets
        .into_iter()
        .map(|p| PetRecord {
            visits: p
                .pet
                .pet_id
                .and_then(|id| visits.remove(&id))
                .unwrap_or_default(),
            pet: p.pet,
            pet_type: p.pet_type,
        })
        .collect();

    Ok(Some(OwnerDetails { owner, pets }))
}
