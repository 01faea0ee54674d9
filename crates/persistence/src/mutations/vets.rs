// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Veterinarian mutations.
//!
//! A vet's specialty set is always written as a whole: the association rows
//! are replaced inside the same transaction as the vet row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use petclinic_domain::Vet;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{vet_specialties, vets};
use crate::error::PersistenceError;

fn replace_specialties(
    conn: &mut SqliteConnection,
    vet_id: i64,
    specialty_ids: &[i64],
) -> Result<(), PersistenceError> {
    diesel::delete(vet_specialties::table)
        .filter(vet_specialties::vet_id.eq(vet_id))
        .execute(conn)?;

    let rows: Vec<_> = specialty_ids
        .iter()
        .map(|specialty_id| {
            (
                vet_specialties::vet_id.eq(vet_id),
                vet_specialties::specialty_id.eq(*specialty_id),
            )
        })
        .collect();
    if !rows.is_empty() {
        diesel::insert_into(vet_specialties::table)
            .values(rows)
            .execute(conn)?;
    }

    debug!(vet_id, count = specialty_ids.len(), "Vet specialties replaced");
    Ok(())
}

/// Inserts a new vet with its specialties and returns its ID.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyViolation` if a specialty does not
/// exist. Nothing is written in that case.
pub fn create_vet(conn: &mut SqliteConnection, vet: &Vet) -> Result<i64, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(vets::table)
            .values((
                vets::first_name.eq(&vet.first_name),
                vets::last_name.eq(&vet.last_name),
            ))
            .execute(conn)?;

        let vet_id: i64 = conn.get_last_insert_rowid()?;
        replace_specialties(conn, vet_id, &vet.specialty_ids)?;

        info!(vet_id, "Vet created");
        Ok(vet_id)
    })
}

/// Overwrites a vet's names and replaces its specialty set.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no vet has this ID, or
/// `PersistenceError::ForeignKeyViolation` if a specialty does not exist.
pub fn update_vet(
    conn: &mut SqliteConnection,
    vet_id: i64,
    vet: &Vet,
) -> Result<(), PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(vets::table)
            .filter(vets::vet_id.eq(vet_id))
            .set((
                vets::first_name.eq(&vet.first_name),
                vets::last_name.eq(&vet.last_name),
            ))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Vet with ID {vet_id} not found"
            )));
        }

        replace_specialties(conn, vet_id, &vet.specialty_ids)?;

        info!(vet_id, "Vet updated");
        Ok(())
    })
}
