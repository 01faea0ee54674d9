// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Veterinarian queries.

use std::collections::HashMap;

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Specialty;
use tracing::debug;

use crate::data_models::{PageWindow, SpecialtyRow, VetDetails, VetRow};
use crate::diesel_schema::{specialties, vet_specialties, vets};
use crate::error::PersistenceError;

/// Loads the specialties held by each of the given vets, ordered by name.
fn load_specialties_for_vets(
    conn: &mut SqliteConnection,
    vet_ids: &[i64],
) -> Result<HashMap<i64, Vec<Specialty>>, PersistenceError> {
    let rows: Vec<(i64, SpecialtyRow)> = vet_specialties::table
        .inner_join(specialties::table)
        .filter(vet_specialties::vet_id.eq_any(vet_ids))
        .order((specialties::name.asc(), specialties::specialty_id.asc()))
        .select((vet_specialties::vet_id, SpecialtyRow::as_select()))
        .load(conn)?;

    let mut grouped: HashMap<i64, Vec<Specialty>> = HashMap::new();
    for (vet_id, row) in rows {
        grouped.entry(vet_id).or_default().push(row.into_specialty());
    }
    Ok(grouped)
}

fn attach_specialties(
    conn: &mut SqliteConnection,
    rows: Vec<VetRow>,
) -> Result<Vec<VetDetails>, PersistenceError> {
    let vet_ids: Vec<i64> = rows.iter().map(|row| row.vet_id).collect();
    let mut held = load_specialties_for_vets(conn, &vet_ids)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let specialties: Vec<Specialty> = held.remove(&row.vet_id).unwrap_or_default();
            let specialty_ids: Vec<i64> =
                specialties.iter().filter_map(|s| s.specialty_id).collect();
            VetDetails {
                vet: row.into_vet(specialty_ids),
                specialties,
            }
        })
        .collect())
}

/// Counts all vets.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_vets(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(vets::table.count().get_result(conn)?)
}

/// Lists vets ordered by last name, first name, ID, each with its
/// specialties.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_vets(
    conn: &mut SqliteConnection,
    window: Option<PageWindow>,
) -> Result<Vec<VetDetails>, PersistenceError> {
    debug!("Listing vets (window: {:?})", window);

    let mut selection = vets::table
        .order((
            vets::last_name.asc(),
            vets::first_name.asc(),
            vets::vet_id.asc(),
        ))
        .into_boxed();
    if let Some(window) = window {
        selection = selection.limit(window.limit).offset(window.offset);
    }
    let rows: Vec<VetRow> = selection.select(VetRow::as_select()).load(conn)?;

    attach_specialties(conn, rows)
}

/// Retrieves a vet with its specialties.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the vet is not found.
pub fn get_vet_details(
    conn: &mut SqliteConnection,
    vet_id: i64,
) -> Result<Option<VetDetails>, PersistenceError> {
    debug!("Looking up vet by ID: {}", vet_id);

    let row: Option<VetRow> = vets::table
        .filter(vets::vet_id.eq(vet_id))
        .select(VetRow::as_select())
        .first(conn)
        .optional()?;

    let Some(row) = row else {
        return Ok(None);
    };
    Ok(attach_specialties(conn, vec![row])?.pop())
}
